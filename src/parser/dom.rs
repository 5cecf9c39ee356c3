use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::markup::element_text;

static QUESTION_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#".qa-part-q-view [itemprop="text"], .qa-q-view-content [itemprop="text"]"#)
        .unwrap()
});
static TAG_LIST_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.qa-q-view-tag-list").unwrap());
static SELECTED_ANSWER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.qa-a-list-item-selected").unwrap());
static BEST_LABEL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".qa-a-selected-text").unwrap());
static ANSWER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.qa-a-list-item").unwrap());
static TEXT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[itemprop="text"]"#).unwrap());
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static HEADING_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

/// How the answer container was chosen, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Selected,
    BestLabel,
    FirstAnswer,
}

#[derive(Debug, Clone, Copy)]
pub struct AnswerRegion<'a> {
    /// The answer's text node; absent when the container has no body.
    pub text: Option<ElementRef<'a>>,
    pub source: AnswerSource,
}

/// An immutable parse of one question page.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub fn parse(markup: &str) -> Self {
        ParsedDocument {
            html: Html::parse_document(markup),
        }
    }

    /// First question-text element inside the question view.
    pub fn question(&self) -> Option<ElementRef<'_>> {
        self.html.select(&QUESTION_SEL).next()
    }

    pub fn tag_list(&self) -> Option<ElementRef<'_>> {
        self.html.select(&TAG_LIST_SEL).next()
    }

    /// Selected answer, else the article holding the best-answer label,
    /// else the first answer in document order.
    pub fn answer(&self) -> Option<AnswerRegion<'_>> {
        let (container, source) = if let Some(a) = self.html.select(&SELECTED_ANSWER_SEL).next() {
            (a, AnswerSource::Selected)
        } else if let Some(a) = self.best_labelled_answer() {
            (a, AnswerSource::BestLabel)
        } else {
            (self.html.select(&ANSWER_SEL).next()?, AnswerSource::FirstAnswer)
        };

        Some(AnswerRegion {
            text: container.select(&TEXT_SEL).next(),
            source,
        })
    }

    fn best_labelled_answer(&self) -> Option<ElementRef<'_>> {
        let label = self.html.select(&BEST_LABEL_SEL).next()?;
        label
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "article")
    }

    /// Page title, falling back to the first heading.
    pub fn title(&self) -> Option<String> {
        [&*TITLE_SEL, &*HEADING_SEL]
            .into_iter()
            .filter_map(|sel| self.html.select(sel).next())
            .map(element_text)
            .find(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Algorithms: GATE 2010 | Question: 4</title></head><body>
        <div class="qa-part-q-view"><div class="qa-q-view-content">
          <div itemprop="text"><p>Question body</p></div>
        </div></div>
        <ul class="qa-q-view-tag-list"><li><a class="qa-tag-link">sorting</a></li></ul>
        <div class="qa-part-a-list">
          <article class="qa-a-list-item"><div itemprop="text">first</div></article>
          <article class="qa-a-list-item">
            <div class="qa-a-selected-text">Best answer</div>
            <div itemprop="text">labelled</div>
          </article>
        </div></body></html>"#;

    #[test]
    fn finds_question_tags_and_title() {
        let doc = ParsedDocument::parse(PAGE);
        let q = doc.question().unwrap();
        assert_eq!(element_text(q), "Question body");
        assert!(doc.tag_list().is_some());
        assert_eq!(doc.title().as_deref(), Some("Algorithms: GATE 2010 | Question: 4"));
    }

    #[test]
    fn best_label_promotes_enclosing_article() {
        let doc = ParsedDocument::parse(PAGE);
        let a = doc.answer().unwrap();
        assert_eq!(a.source, AnswerSource::BestLabel);
        assert_eq!(element_text(a.text.unwrap()), "labelled");
    }

    #[test]
    fn selected_answer_wins() {
        let page = PAGE.replace(
            r#"<article class="qa-a-list-item"><div itemprop="text">first</div>"#,
            r#"<article class="qa-a-list-item qa-a-list-item-selected"><div itemprop="text">chosen</div>"#,
        );
        let doc = ParsedDocument::parse(&page);
        let a = doc.answer().unwrap();
        assert_eq!(a.source, AnswerSource::Selected);
        assert_eq!(element_text(a.text.unwrap()), "chosen");
    }

    #[test]
    fn first_answer_is_last_resort() {
        let page = PAGE.replace("qa-a-selected-text", "qa-a-other");
        let doc = ParsedDocument::parse(&page);
        let a = doc.answer().unwrap();
        assert_eq!(a.source, AnswerSource::FirstAnswer);
        assert_eq!(element_text(a.text.unwrap()), "first");
    }

    #[test]
    fn missing_regions() {
        let doc = ParsedDocument::parse("<html><body><h1>Only a heading</h1></body></html>");
        assert!(doc.question().is_none());
        assert!(doc.tag_list().is_none());
        assert!(doc.answer().is_none());
        assert_eq!(doc.title().as_deref(), Some("Only a heading"));
    }
}
