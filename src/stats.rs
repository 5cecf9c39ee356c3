use crate::corpus::Corpus;
use crate::record::QuestionRecord;

pub struct SubjectStats {
    pub subject: String,
    pub sections: usize,
    pub questions: usize,
    pub answered: usize,
    pub needs_repair: usize,
}

/// One row per subject, in corpus (alphabetical) order.
pub fn overview(corpus: &Corpus) -> Vec<SubjectStats> {
    corpus
        .0
        .iter()
        .map(|(subject, tests)| {
            let records: Vec<&QuestionRecord> = tests
                .iter()
                .flat_map(|t| &t.sections)
                .flat_map(|s| &s.questions)
                .collect();
            SubjectStats {
                subject: subject.clone(),
                sections: tests.iter().map(|t| t.sections.len()).sum(),
                questions: records.len(),
                answered: records.iter().filter(|r| r.has_answer()).count(),
                needs_repair: records.iter().filter(|r| r.needs_repair()).count(),
            }
        })
        .collect()
}

pub struct RepairTarget<'a> {
    pub id: &'a str,
    pub subject: &'a str,
    pub reason: &'static str,
}

/// Records a repair pass should revisit, with the first failing check.
pub fn repair_targets(corpus: &Corpus) -> Vec<RepairTarget<'_>> {
    corpus
        .records()
        .filter(|r| r.needs_repair())
        .map(|r| RepairTarget {
            id: &r.id,
            subject: &r.subject,
            reason: if r.has_answer() { "question" } else { "answer" },
        })
        .collect()
}
