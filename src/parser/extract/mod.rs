pub mod options;
pub mod tags;
pub mod title;

use std::collections::BTreeMap;

use tracing::debug;

use super::dom::ParsedDocument;
use super::markup::{element_text, inner_html_excluding};
use crate::answer::{self, Inference, Solution};
use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::record::QuestionRecord;
use crate::settings::ExtractOptions;
use crate::taxonomy::{self, Classification};

/// A record plus the heuristic decisions behind it.
#[derive(Debug)]
pub struct Extraction {
    pub record: QuestionRecord,
    pub inference: Option<Inference>,
    pub classification: Classification,
}

pub fn extract_record(
    doc: &RawDocument,
    parsed: &ParsedDocument,
    opts: &ExtractOptions,
) -> Result<Extraction, ExtractError> {
    let question = parsed.question().ok_or_else(|| ExtractError::MissingQuestion {
        id: doc.id.clone(),
    })?;

    // Options come out of the question container; the body is everything else.
    let (options, option_list) = match options::detect(question, &opts.option_list) {
        Some(found) => (found.options, Some(found.list)),
        None => (BTreeMap::new(), None),
    };
    let body_html = inner_html_excluding(question, option_list).trim().to_string();

    let parts = tags::partition(tags::extract(parsed.tag_list()));
    let title = title::parse(&parsed.title().unwrap_or_default());
    let classification = taxonomy::classify(title.prefix.as_deref(), &parts.topic);

    let region = parsed.answer();
    let (solution_html, inference) = match region.and_then(|a| a.text) {
        Some(text_el) => {
            let markup = text_el.inner_html().trim().to_string();
            let text = element_text(text_el);
            let inference = answer::infer(
                Solution {
                    text: &text,
                    markup: &markup,
                },
                &options,
                opts.min_match_len,
            );
            (markup, inference)
        }
        None => (String::new(), None),
    };

    debug!(
        id = %doc.id,
        subject = ?classification.subject_source,
        subtopic = ?classification.subtopic_source,
        region = ?region.map(|a| a.source),
        answer = ?inference.as_ref().map(|i| i.strategy),
        "classified"
    );

    let record = QuestionRecord {
        id: doc.id.clone(),
        title: title.title,
        subject: classification.subject.clone(),
        subtopic: classification.subtopic.clone(),
        year: title.year,
        question_number: title.question_number,
        exam_tags: parts.exam,
        text: body_html.clone(),
        body_html,
        options,
        answer: inference.as_ref().map(|i| i.label.clone()),
        solution_html,
        award: 1,
        penalty: "0".to_string(),
        global_index: 0,
        local_index: 0,
    };

    Ok(Extraction {
        record,
        inference,
        classification,
    })
}
