use std::sync::LazyLock;

use regex::Regex;

static SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\|\s*Question\s*:\s*\d+.*$").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static QUESTION_NUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Question\s*:\s*(\d+)").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct TitleInfo {
    /// Title with the "| Question: N" suffix removed.
    pub title: String,
    pub year: Option<i32>,
    pub question_number: Option<u32>,
    /// Text before the first ':' of the stripped title, if any.
    pub prefix: Option<String>,
}

pub fn parse(raw: &str) -> TitleInfo {
    let title = SUFFIX_RE.replace(raw, "").trim().to_string();

    let year = YEAR_RE.find(raw).and_then(|m| m.as_str().parse().ok());
    let question_number = QUESTION_NUM_RE
        .captures(raw)
        .and_then(|c| c[1].parse().ok());
    let prefix = title
        .split_once(':')
        .map(|(head, _)| head.trim().to_string())
        .filter(|p| !p.is_empty());

    TitleInfo {
        title,
        year,
        question_number,
        prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_prefixed_title() {
        let t = parse("Operating Systems: GATE 2015 | Question: 12");
        assert_eq!(t.title, "Operating Systems: GATE 2015");
        assert_eq!(t.year, Some(2015));
        assert_eq!(t.question_number, Some(12));
        assert_eq!(t.prefix.as_deref(), Some("Operating Systems"));
    }

    #[test]
    fn plain_exam_title() {
        let t = parse("GATE CSE 1998 | Question: 2.14 - GATE Overflow");
        assert_eq!(t.title, "GATE CSE 1998");
        assert_eq!(t.year, Some(1998));
        assert_eq!(t.question_number, Some(2));
        assert_eq!(t.prefix, None);
    }

    #[test]
    fn first_year_wins_and_no_number() {
        let t = parse("TIFR 2012 vs 2013 paper");
        assert_eq!(t.year, Some(2012));
        assert_eq!(t.question_number, None);
        assert_eq!(t.title, "TIFR 2012 vs 2013 paper");
    }

    #[test]
    fn year_must_be_standalone() {
        assert_eq!(parse("Question set 120155").year, None);
        assert_eq!(parse("").year, None);
    }
}
