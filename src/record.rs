use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder sequence left by the scraper where a formula or blank was lost.
const PLACEHOLDER: &str = "______";
const MIN_QUESTION_CHARS: usize = 30;

/// One extracted question, in the shape the serving app and the auditor read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "post_id")]
    pub id: String,
    pub title: String,
    pub subject: String,
    pub subtopic: String,
    pub year: Option<i32>,
    #[serde(rename = "question_num")]
    pub question_number: Option<u32>,
    /// Exam tags only; topic tags are consumed by classification.
    #[serde(rename = "tags")]
    pub exam_tags: Vec<String>,
    #[serde(rename = "question")]
    pub body_html: String,
    /// Keys are a gapless prefix of A..F, so map order is option order.
    pub options: BTreeMap<String, String>,
    pub answer: Option<String>,
    #[serde(rename = "solution")]
    pub solution_html: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_award")]
    pub award: u32,
    #[serde(default = "default_penalty")]
    pub penalty: String,
    #[serde(rename = "global_idx", default)]
    pub global_index: u32,
    #[serde(rename = "local_idx", default)]
    pub local_index: u32,
}

fn default_award() -> u32 {
    1
}

fn default_penalty() -> String {
    "0".to_string()
}

impl QuestionRecord {
    /// Keeps the `text` duplicate in step with the body.
    pub fn set_body(&mut self, body_html: String) {
        self.text = body_html.clone();
        self.body_html = body_html;
    }

    pub fn has_answer(&self) -> bool {
        self.answer.as_deref().is_some_and(|a| !a.trim().is_empty())
    }

    /// Missing answer, or a question body too thin to be the real thing.
    pub fn needs_repair(&self) -> bool {
        let body = self.body_html.trim();
        !self.has_answer()
            || body.chars().count() < MIN_QUESTION_CHARS
            || body.contains(PLACEHOLDER)
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, subject: &str, subtopic: &str) -> QuestionRecord {
    QuestionRecord {
        id: id.to_string(),
        title: format!("Question {}", id),
        subject: subject.to_string(),
        subtopic: subtopic.to_string(),
        year: None,
        question_number: None,
        exam_tags: Vec::new(),
        body_html: "Which of the following statements is true about this?".to_string(),
        options: BTreeMap::new(),
        answer: Some("A".to_string()),
        solution_html: String::new(),
        text: "Which of the following statements is true about this?".to_string(),
        award: 1,
        penalty: "0".to_string(),
        global_index: 0,
        local_index: 0,
    }
}
