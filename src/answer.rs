use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::markup::fragment_text;

static ANSWER_IS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:answer)\s*(?:(?i:is)\s*:?|:)?\s*\(?([A-D])(?:\)|\b)").unwrap()
});
static CORRECT_ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:correct\s*answer)\s*(?:(?i:is)\s*:?|:)?\s*\$*\s*\(?([A-D])(?:\)|\$|\b)")
        .unwrap()
});
static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:option)\s*(?:(?i:is)\s*:?|:)?\s*\(?([A-D])(?:\)|\b)").unwrap()
});
static BARE_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Da-d])$").unwrap());
static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:<(?:strong|b|em)>)\s*\(?\s*([A-D])\s*\)?\s*(?i:</(?:strong|b|em)>)").unwrap()
});

/// Which rule produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    AnswerIs,
    CorrectAnswer,
    OptionLabel,
    BareLetter,
    Emphasis,
    OptionText,
}

#[derive(Debug, Clone, Copy)]
enum Haystack {
    Text,
    Markup,
}

/// Pattern rules in priority order; the first match ends inference.
const CASCADE: &[(Strategy, Haystack)] = &[
    (Strategy::AnswerIs, Haystack::Text),
    (Strategy::CorrectAnswer, Haystack::Text),
    (Strategy::OptionLabel, Haystack::Text),
    (Strategy::BareLetter, Haystack::Text),
    (Strategy::Emphasis, Haystack::Markup),
];

impl Strategy {
    fn pattern(self) -> Option<&'static Regex> {
        match self {
            Strategy::AnswerIs => Some(&*ANSWER_IS_RE),
            Strategy::CorrectAnswer => Some(&*CORRECT_ANSWER_RE),
            Strategy::OptionLabel => Some(&*OPTION_RE),
            Strategy::BareLetter => Some(&*BARE_LETTER_RE),
            Strategy::Emphasis => Some(&*EMPHASIS_RE),
            Strategy::OptionText => None,
        }
    }
}

/// The accepted answer's body: whitespace-normalized text and raw markup.
#[derive(Debug, Clone, Copy)]
pub struct Solution<'a> {
    pub text: &'a str,
    pub markup: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub label: String,
    pub strategy: Strategy,
}

/// Pattern cascade first, then option-text containment. `None` rather than a guess.
pub fn infer(
    solution: Solution<'_>,
    options: &BTreeMap<String, String>,
    min_match_len: usize,
) -> Option<Inference> {
    cascade(solution).or_else(|| contained_option(solution.text, options, min_match_len))
}

fn cascade(solution: Solution<'_>) -> Option<Inference> {
    CASCADE.iter().find_map(|&(strategy, haystack)| {
        let hay = match haystack {
            Haystack::Text => solution.text,
            Haystack::Markup => solution.markup,
        };
        let caps = strategy.pattern()?.captures(hay)?;
        Some(Inference {
            label: caps[1].to_ascii_uppercase(),
            strategy,
        })
    })
}

/// First option (in label order) whose text appears inside the solution.
fn contained_option(
    text: &str,
    options: &BTreeMap<String, String>,
    min_match_len: usize,
) -> Option<Inference> {
    let haystack = text.to_lowercase();
    options.iter().find_map(|(label, html)| {
        let option = fragment_text(html).to_lowercase();
        let variants = std::iter::once(option.as_str())
            .chain(option.strip_prefix("the ").map(str::trim));
        let mut variants = variants.filter(|v| !v.is_empty() && v.chars().count() >= min_match_len);
        variants.any(|v| haystack.contains(v)).then(|| Inference {
            label: label.clone(),
            strategy: Strategy::OptionText,
        })
    })
}
