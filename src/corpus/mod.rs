pub mod consolidate;
pub mod merge;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::record::QuestionRecord;

pub use consolidate::consolidate;
pub use merge::{merge, MergePolicy};

/// Subject → one collected test. A JSON object keyed by subject name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus(pub BTreeMap<String, Vec<Test>>);

/// All questions of one subject, in the wrapper shape the serving app expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub id: String,
    pub display_name: String,
    pub total_qs: String,
    pub total_marks: usize,
    pub syllabus: String,
    pub test_link: String,
    pub sections: Vec<Section>,
}

/// One subtopic's questions, ordered and indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub questions: Vec<QuestionRecord>,
}

impl Test {
    pub fn new(subject: &str, sections: Vec<Section>) -> Self {
        let count: usize = sections.iter().map(|s| s.questions.len()).sum();
        Test {
            id: format!("{}_Collected", subject.replace(' ', "_")),
            display_name: format!("{} - All Questions", subject),
            total_qs: count.to_string(),
            total_marks: count,
            syllabus: format!("Complete {} Syllabus", subject),
            test_link: "#".to_string(),
            sections,
        }
    }
}

impl Corpus {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse corpus {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Every record, subject order then section order.
    pub fn records(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.0
            .values()
            .flatten()
            .flat_map(|t| &t.sections)
            .flat_map(|s| &s.questions)
    }

    pub fn len(&self) -> usize {
        self.records().count()
    }
}
