use std::collections::BTreeMap;

use super::{Corpus, Section, Test};
use crate::document::id_order;
use crate::record::QuestionRecord;

/// Group by subject and subtopic, order, and index.
///
/// Output depends only on the records, never on the order they finished
/// extracting in: candidates are first ordered by id (stable, so duplicates
/// keep their relative order), then each section by (year, question number)
/// with missing values last.
pub fn consolidate(mut records: Vec<QuestionRecord>) -> Corpus {
    records.sort_by(|a, b| id_order(&a.id, &b.id));

    let mut grouped: BTreeMap<String, BTreeMap<String, Vec<QuestionRecord>>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.subject.clone())
            .or_default()
            .entry(record.subtopic.clone())
            .or_default()
            .push(record);
    }

    let tests = grouped
        .into_iter()
        .map(|(subject, subtopics)| {
            let mut global = 0;
            let sections = subtopics
                .into_iter()
                .map(|(name, mut questions)| {
                    questions.sort_by_key(|q| {
                        (
                            q.year.unwrap_or(i32::MAX),
                            q.question_number.unwrap_or(u32::MAX),
                        )
                    });
                    for (local, q) in questions.iter_mut().enumerate() {
                        global += 1;
                        q.local_index = local as u32 + 1;
                        q.global_index = global;
                    }
                    Section { name, questions }
                })
                .collect();
            let test = Test::new(&subject, sections);
            (subject, vec![test])
        })
        .collect();

    Corpus(tests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample;

    fn rec(
        id: &str,
        subject: &str,
        subtopic: &str,
        year: Option<i32>,
        num: Option<u32>,
    ) -> QuestionRecord {
        let mut r = sample(id, subject, subtopic);
        r.year = year;
        r.question_number = num;
        r
    }

    fn ids(section: &Section) -> Vec<&str> {
        section.questions.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn groups_sorts_and_indexes() {
        let corpus = consolidate(vec![
            rec("1", "Operating Systems", "paging", Some(2010), Some(5)),
            rec("2", "Operating Systems", "deadlock", None, None),
            rec("3", "Operating Systems", "deadlock", Some(2003), Some(40)),
            rec("4", "Operating Systems", "deadlock", Some(2003), Some(2)),
            rec("5", "Algorithms", "sorting", Some(1999), None),
        ]);

        assert_eq!(corpus.0.keys().collect::<Vec<_>>(), ["Algorithms", "Operating Systems"]);
        let os = &corpus.0["Operating Systems"][0];
        assert_eq!(os.total_qs, "4");

        let names: Vec<&str> = os.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["deadlock", "paging"]);
        assert_eq!(ids(&os.sections[0]), ["4", "3", "2"]);

        let idx: Vec<(u32, u32)> = os
            .sections
            .iter()
            .flat_map(|s| &s.questions)
            .map(|q| (q.local_index, q.global_index))
            .collect();
        assert_eq!(idx, [(1, 1), (2, 2), (3, 3), (1, 4)]);

        let algo = &corpus.0["Algorithms"][0].sections[0].questions[0];
        assert_eq!((algo.local_index, algo.global_index), (1, 1));
    }

    #[test]
    fn missing_question_number_sorts_after_known_in_same_year() {
        let corpus = consolidate(vec![
            rec("10", "Algorithms", "sorting", Some(2005), None),
            rec("11", "Algorithms", "sorting", Some(2005), Some(81)),
            rec("12", "Algorithms", "sorting", Some(2004), None),
        ]);
        assert_eq!(ids(&corpus.0["Algorithms"][0].sections[0]), ["12", "11", "10"]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let records = vec![
            rec("30", "Algorithms", "sorting", Some(2001), Some(1)),
            rec("4", "Algorithms", "sorting", Some(2001), Some(1)),
            rec("200", "Databases & DBMS", "sql", None, None),
            rec("17", "Algorithms", "sorting", None, Some(3)),
        ];
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(consolidate(records), consolidate(reversed));
    }

    #[test]
    fn ties_fall_back_to_numeric_id_order() {
        let corpus = consolidate(vec![
            rec("100", "Algorithms", "sorting", Some(2001), Some(1)),
            rec("9", "Algorithms", "sorting", Some(2001), Some(1)),
        ]);
        assert_eq!(ids(&corpus.0["Algorithms"][0].sections[0]), ["9", "100"]);
    }

    #[test]
    fn consolidating_twice_is_stable() {
        let once = consolidate(vec![
            rec("3", "Algorithms", "sorting", Some(2001), None),
            rec("1", "Algorithms", "heap", Some(2001), Some(2)),
            rec("2", "Other", "other", None, None),
        ]);
        let again = consolidate(once.records().cloned().collect());
        assert_eq!(once, again);
    }

    #[test]
    fn duplicate_ids_are_both_kept() {
        let mut first = rec("5", "Algorithms", "sorting", Some(2001), Some(1));
        first.title = "from dir a".into();
        let mut second = first.clone();
        second.title = "from dir b".into();

        let corpus = consolidate(vec![first, second]);
        let titles: Vec<&str> = corpus.records().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, ["from dir a", "from dir b"]);
        assert_eq!(corpus.0["Algorithms"][0].total_marks, 2);
    }
}
