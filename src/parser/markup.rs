use std::fmt::Write;

use scraper::{ElementRef, Html};

/// Collapse every whitespace run to one space and trim.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text content of an element.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_text(&el.text().collect::<String>())
}

/// Normalized text content of an HTML fragment (an option value, say).
pub fn fragment_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    element_text(fragment.root_element())
}

/// Serialize the children of `el`, leaving out the subtree rooted at `skip`.
///
/// The tree is never modified. Only the elements enclosing `skip` are written
/// here; every other subtree goes through html5ever's serializer.
pub fn inner_html_excluding(el: ElementRef<'_>, skip: Option<ElementRef<'_>>) -> String {
    let Some(skip) = skip else {
        return el.inner_html();
    };
    let mut out = String::new();
    write_children(el, skip, &mut out);
    out
}

fn write_children(el: ElementRef<'_>, skip: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if child.id() == skip.id() {
            continue;
        }
        if let Some(child_el) = ElementRef::wrap(child) {
            if skip.ancestors().any(|a| a.id() == child.id()) {
                write_open_tag(child_el, out);
                write_children(child_el, skip, out);
                let _ = write!(out, "</{}>", child_el.value().name());
            } else {
                out.push_str(&child_el.html());
            }
        } else if let Some(text) = child.value().as_text() {
            escape(text, false, out);
        } else if let Some(comment) = child.value().as_comment() {
            let _ = write!(out, "<!--{}-->", &**comment);
        }
    }
}

// An ancestor of the option list is never void or raw-text, so its start tag
// and text children are all that need writing by hand.
fn write_open_tag(el: ElementRef<'_>, out: &mut String) {
    out.push('<');
    out.push_str(el.value().name());
    for (attr, value) in el.value().attrs() {
        let _ = write!(out, " {}=\"", attr);
        escape(value, true, out);
        out.push('"');
    }
    out.push('>');
}

fn escape(text: &str, attr: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attr => out.push_str("&quot;"),
            '<' if !attr => out.push_str("&lt;"),
            '>' if !attr => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_text("  Answer\n\t is\u{a0}(C) "), "Answer is (C)");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn serializer_matches_inner_html_without_skip() {
        let doc = Html::parse_document(
            r#"<div id="q"><p class="x">a &amp; b &lt; c</p><img src="i.png?a=1&amp;b=2"><br><!-- note --></div>"#,
        );
        let q = first(&doc, "#q");
        assert_eq!(inner_html_excluding(q, None), q.inner_html());
    }

    #[test]
    fn skip_removes_only_that_subtree() {
        let doc = Html::parse_document(
            r#"<div id="q"><p>Which one?</p><ol><li>1</li><li>2</li></ol><p>tail</p></div>"#,
        );
        let q = first(&doc, "#q");
        let ol = first(&doc, "ol");
        let body = inner_html_excluding(q, Some(ol));
        assert_eq!(body, "<p>Which one?</p><p>tail</p>");
        // the document itself is untouched
        assert!(q.inner_html().contains("<ol>"));
    }

    #[test]
    fn skip_nested_inside_wrappers() {
        let doc = Html::parse_document(
            r#"<div id="q"><p>a &amp; b</p><div data-x="1&amp;2"><span>x &lt; y</span><ol><li>1</li></ol>after<!-- c --></div><script>if (a < b) {}</script></div>"#,
        );
        let q = first(&doc, "#q");
        let ol = first(&doc, "ol");
        let body = inner_html_excluding(q, Some(ol));
        assert_eq!(
            body,
            r#"<p>a &amp; b</p><div data-x="1&amp;2"><span>x &lt; y</span>after<!-- c --></div><script>if (a < b) {}</script>"#
        );
    }

    #[test]
    fn fragment_text_strips_tags() {
        assert_eq!(fragment_text("<p>The <b>stack</b>\n pointer</p>"), "The stack pointer");
    }
}
