use std::collections::{HashMap, HashSet};

use clap::ValueEnum;

use super::{consolidate, Corpus};
use crate::record::QuestionRecord;

/// How freshly extracted records combine with a previously written corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MergePolicy {
    /// Rebuild from this run's records only.
    #[default]
    Replace,
    /// Rebuild, but keep a prior answer where inference found none.
    PreserveAnswers,
    /// Keep every prior record; patch fields this run recovered.
    Repair,
}

/// Combine `candidates` with an optional prior corpus. The prior is read, never modified.
pub fn merge(
    prior: Option<&Corpus>,
    candidates: Vec<QuestionRecord>,
    policy: MergePolicy,
) -> Corpus {
    let Some(prior) = prior else {
        return consolidate(candidates);
    };

    match policy {
        MergePolicy::Replace => consolidate(candidates),
        MergePolicy::PreserveAnswers => {
            let answers: HashMap<&str, &str> = prior
                .records()
                .filter(|r| r.has_answer())
                .filter_map(|r| Some((r.id.as_str(), r.answer.as_deref()?)))
                .collect();
            let records = candidates
                .into_iter()
                .map(|mut c| {
                    if !c.has_answer() {
                        if let Some(answer) = answers.get(c.id.as_str()) {
                            c.answer = Some(answer.to_string());
                        }
                    }
                    c
                })
                .collect();
            consolidate(records)
        }
        MergePolicy::Repair => {
            let mut by_id: HashMap<&str, Vec<&QuestionRecord>> = HashMap::new();
            for c in &candidates {
                by_id.entry(c.id.as_str()).or_default().push(c);
            }

            let mut records: Vec<QuestionRecord> = prior
                .records()
                .map(|r| {
                    let mut r = r.clone();
                    for patch in by_id.get(r.id.as_str()).into_iter().flatten() {
                        apply_patch(&mut r, patch);
                    }
                    r
                })
                .collect();

            let known: HashSet<&str> = prior.records().map(|r| r.id.as_str()).collect();
            records.extend(
                candidates
                    .iter()
                    .filter(|c| !known.contains(c.id.as_str()))
                    .cloned(),
            );
            consolidate(records)
        }
    }
}

/// Overwrite only the fields the candidate actually recovered.
fn apply_patch(record: &mut QuestionRecord, patch: &QuestionRecord) {
    if !patch.body_html.trim().is_empty() {
        record.set_body(patch.body_html.clone());
    }
    if !patch.options.is_empty() {
        record.options = patch.options.clone();
    }
    if patch.has_answer() {
        record.answer = patch.answer.clone();
    }
    if !patch.solution_html.trim().is_empty() {
        record.solution_html = patch.solution_html.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample;

    fn find<'a>(corpus: &'a Corpus, id: &str) -> Vec<&'a QuestionRecord> {
        corpus.records().filter(|r| r.id == id).collect()
    }

    fn prior() -> Corpus {
        let mut repaired = sample("1", "Algorithms", "sorting");
        repaired.answer = Some("B".into());
        repaired.solution_html = "<p>Answer: B</p>".into();
        consolidate(vec![repaired, sample("2", "Algorithms", "heap")])
    }

    fn unanswered(id: &str) -> QuestionRecord {
        let mut r = sample(id, "Algorithms", "sorting");
        r.answer = None;
        r
    }

    #[test]
    fn no_prior_is_plain_consolidation() {
        let c = vec![sample("1", "Other", "other")];
        for policy in [MergePolicy::Replace, MergePolicy::PreserveAnswers, MergePolicy::Repair] {
            assert_eq!(merge(None, c.clone(), policy), consolidate(c.clone()));
        }
    }

    #[test]
    fn replace_drops_prior_records() {
        let prior = prior();
        let out = merge(Some(&prior), vec![unanswered("1")], MergePolicy::Replace);
        assert_eq!(out.len(), 1);
        assert_eq!(find(&out, "1")[0].answer, None);
        assert!(find(&out, "2").is_empty());
    }

    #[test]
    fn preserve_answers_fills_only_gaps() {
        let prior = prior();
        let mut answered = sample("2", "Algorithms", "heap");
        answered.answer = Some("D".into());
        let out = merge(
            Some(&prior),
            vec![unanswered("1"), answered, unanswered("3")],
            MergePolicy::PreserveAnswers,
        );
        assert_eq!(find(&out, "1")[0].answer.as_deref(), Some("B"));
        assert_eq!(find(&out, "2")[0].answer.as_deref(), Some("D"));
        assert_eq!(find(&out, "3")[0].answer, None);
    }

    #[test]
    fn repair_patches_field_wise_and_keeps_prior() {
        let prior = prior();
        let before = prior.clone();

        let mut patch = unanswered("1");
        patch.set_body(String::new());
        patch.options.insert("A".into(), "x".into());
        patch.solution_html = "<p>longer explanation</p>".into();

        let candidates = vec![patch, sample("9", "Other", "other")];
        let out = merge(Some(&prior), candidates, MergePolicy::Repair);

        let r = find(&out, "1")[0];
        assert_eq!(r.answer.as_deref(), Some("B"));
        assert_eq!(r.body_html, sample("1", "Algorithms", "sorting").body_html);
        assert_eq!(r.text, r.body_html);
        assert_eq!(r.options["A"], "x");
        assert_eq!(r.solution_html, "<p>longer explanation</p>");

        assert_eq!(find(&out, "2").len(), 1);
        assert_eq!(find(&out, "9").len(), 1);
        assert_eq!(out.len(), 3);
        assert_eq!(prior, before);
    }

    #[test]
    fn repair_reindexes() {
        let prior = prior();
        let mut early = sample("7", "Algorithms", "sorting");
        early.year = Some(1990);
        let out = merge(Some(&prior), vec![early], MergePolicy::Repair);
        let sorting = &out.0["Algorithms"][0]
            .sections
            .iter()
            .find(|s| s.name == "sorting")
            .unwrap()
            .questions;
        assert_eq!(sorting[0].id, "7");
        assert_eq!(sorting[0].local_index, 1);
        assert_eq!(sorting[1].local_index, 2);
    }
}
