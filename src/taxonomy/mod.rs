pub mod rules;

use rules::{CURATED_TOPICS, EXCLUDED_TAGS, OTHER_SUBJECT, SUBJECT_RULES, TOPIC_ALIASES};

/// Where the subject came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectSource {
    TitlePrefix,
    TopicTag,
    Default,
}

/// Which subtopic step resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtopicSource {
    Curated,
    Alias,
    FirstTopicTag,
    Subject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub subject: String,
    pub subject_source: SubjectSource,
    pub subtopic: String,
    pub subtopic_source: SubtopicSource,
}

/// Subject from the title prefix or topic tags, then a subtopic within it.
/// `topic_tags` must already exclude exam tags.
pub fn classify(title_prefix: Option<&str>, topic_tags: &[String]) -> Classification {
    let (subject, subject_source) = subject(title_prefix, topic_tags);
    let (subtopic, subtopic_source) = subtopic(topic_tags, subject);
    Classification {
        subject: subject.to_string(),
        subject_source,
        subtopic,
        subtopic_source,
    }
}

pub fn subject(title_prefix: Option<&str>, topic_tags: &[String]) -> (&'static str, SubjectSource) {
    if let Some(rule) = title_prefix.and_then(|p| SUBJECT_RULES.iter().find(|r| r.matches(p))) {
        return (rule.subject, SubjectSource::TitlePrefix);
    }
    // Tags in page order; the first tag naming any subject decides.
    topic_tags
        .iter()
        .find_map(|t| SUBJECT_RULES.iter().find(|rule| rule.matches(t)))
        .map(|rule| (rule.subject, SubjectSource::TopicTag))
        .unwrap_or((OTHER_SUBJECT, SubjectSource::Default))
}

pub fn subtopic(topic_tags: &[String], subject: &str) -> (String, SubtopicSource) {
    let slugs: Vec<String> = topic_tags.iter().map(|t| slugify(t)).collect();

    if let Some(s) = slugs.iter().find(|s| CURATED_TOPICS.contains(&s.as_str())) {
        return (s.clone(), SubtopicSource::Curated);
    }
    if let Some(canonical) = slugs.iter().find_map(|s| alias(s)) {
        return (canonical.to_string(), SubtopicSource::Alias);
    }
    if let Some(s) = slugs
        .iter()
        .find(|s| !s.is_empty() && !EXCLUDED_TAGS.contains(&s.as_str()))
    {
        return (s.clone(), SubtopicSource::FirstTopicTag);
    }

    let derived = slugify(subject);
    let derived = if derived.is_empty() { "general".to_string() } else { derived };
    (derived, SubtopicSource::Subject)
}

fn alias(slug: &str) -> Option<&'static str> {
    TOPIC_ALIASES
        .iter()
        .find(|(tag, _)| *tag == slug)
        .map(|(_, canonical)| *canonical)
}

/// Lowercase, with every run of non-alphanumerics turned into one hyphen.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}
