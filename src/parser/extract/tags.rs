use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::parser::markup::element_text;
use crate::taxonomy::rules::EXAM_PREFIXES;

static ITEM_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static EXAM_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{}).*\d{{4}}", EXAM_PREFIXES.join("|"))).unwrap()
});

/// Tag texts in page order, first occurrence kept.
pub fn extract(tag_list: Option<ElementRef<'_>>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for item in tag_list.into_iter().flat_map(|list| list.select(&ITEM_SEL)) {
        let text = item
            .select(&LINK_SEL)
            .next()
            .map(element_text)
            .unwrap_or_else(|| element_text(item));
        if !text.is_empty() && seen.insert(text.clone()) {
            tags.push(text);
        }
    }

    tags
}

#[derive(Debug, Default, PartialEq)]
pub struct TagPartition {
    pub exam: Vec<String>,
    pub topic: Vec<String>,
}

pub fn is_exam_tag(tag: &str) -> bool {
    EXAM_TAG_RE.is_match(tag)
}

pub fn partition(tags: Vec<String>) -> TagPartition {
    let (exam, topic) = tags.into_iter().partition(|t| is_exam_tag(t));
    TagPartition { exam, topic }
}
