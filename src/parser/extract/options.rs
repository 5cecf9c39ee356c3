use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::settings::OptionListRule;

static UPPER_ALPHA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)list-style-type\s*:\s*upper-alpha").unwrap());
static OL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ol").unwrap());
static LIST_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ol, ul").unwrap());

pub const LABELS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// The list chosen as the option set, plus its items keyed A..F.
#[derive(Debug)]
pub struct OptionList<'a> {
    pub list: ElementRef<'a>,
    pub options: BTreeMap<String, String>,
}

/// Upper-alpha styled `<ol>` first; otherwise the first list whose item count
/// satisfies `rule`. Items past F are dropped.
pub fn detect<'a>(question: ElementRef<'a>, rule: &OptionListRule) -> Option<OptionList<'a>> {
    let list = styled_list(question).or_else(|| counted_list(question, rule))?;

    let options = items(list)
        .zip(LABELS)
        .map(|(item, label)| (label.to_string(), item.inner_html().trim().to_string()))
        .collect();

    Some(OptionList { list, options })
}

fn styled_list(question: ElementRef<'_>) -> Option<ElementRef<'_>> {
    question.select(&OL_SEL).find(|ol| {
        ol.value()
            .attr("style")
            .is_some_and(|style| UPPER_ALPHA_RE.is_match(style))
            && items(*ol).next().is_some()
    })
}

fn counted_list<'a>(question: ElementRef<'a>, rule: &OptionListRule) -> Option<ElementRef<'a>> {
    question
        .select(&LIST_SEL)
        .find(|list| rule.accepts(items(*list).count()))
}

/// Direct `<li>` children only, so a nested sub-list doesn't inflate the count.
fn items(list: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
}
