//! Classification tables. Order is priority: earlier rows win.

/// Tag prefixes naming a source exam. An exam tag is one of these followed
/// somewhere by a 4-digit year.
pub const EXAM_PREFIXES: &[&str] = &[
    "gate", "isro", "ugcnet", "ugc-net", "tifr", "nielit", "cmi", "barc", "drdo",
];

pub const OTHER_SUBJECT: &str = "Other";

/// A subject and the keywords that identify it in a title prefix or tag.
#[derive(Debug)]
pub struct SubjectRule {
    pub subject: &'static str,
    /// Substrings of the normalized name, starting at a word.
    pub phrases: &'static [&'static str],
    /// Whole words of the normalized name.
    pub tokens: &'static [&'static str],
    /// The entire normalized name.
    pub names: &'static [&'static str],
}

impl SubjectRule {
    /// `name` is lowercased, with hyphens and underscores read as spaces.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase().replace(['-', '_'], " ");
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        let padded = format!(" {}", name);
        self.names.contains(&name.as_str())
            || self.phrases.iter().any(|p| padded.contains(&format!(" {}", p)))
            || name.split(' ').any(|t| self.tokens.contains(&t))
    }
}

pub const SUBJECT_RULES: &[SubjectRule] = &[
    SubjectRule {
        subject: "Theory of Computation",
        phrases: &["theory of computation"],
        tokens: &["toc"],
        names: &[],
    },
    SubjectRule {
        subject: "Databases & DBMS",
        phrases: &["databases"],
        tokens: &["dbms"],
        names: &[],
    },
    SubjectRule {
        subject: "Programming & DS",
        phrases: &["c programming", "programming in c", "data structure"],
        tokens: &["ds"],
        names: &["programming"],
    },
    SubjectRule {
        subject: "Algorithms",
        phrases: &["algorithm"],
        tokens: &[],
        names: &[],
    },
    SubjectRule {
        subject: "Computer Networks",
        phrases: &["networks"],
        tokens: &["cn"],
        names: &[],
    },
    SubjectRule {
        subject: "Compiler Design",
        phrases: &["compiler design"],
        tokens: &["cd"],
        names: &[],
    },
    SubjectRule {
        subject: "CO & Architecture",
        phrases: &["co and architecture", "computer organization"],
        tokens: &["coa"],
        names: &[],
    },
    SubjectRule {
        subject: "Operating Systems",
        phrases: &["operating system"],
        tokens: &["os"],
        names: &[],
    },
    SubjectRule {
        subject: "Mixed Subjects",
        phrases: &["mixed subjects", "full length"],
        tokens: &[],
        names: &[],
    },
    SubjectRule {
        subject: "Digital Logic",
        phrases: &["digital logic"],
        tokens: &["dl"],
        names: &[],
    },
    SubjectRule {
        subject: "Mathematics",
        phrases: &[
            "math",
            "calculus",
            "probability",
            "counting",
            "combinatorics",
            "linear algebra",
        ],
        tokens: &["dm"],
        names: &[],
    },
    SubjectRule {
        subject: "Mock Tests",
        phrases: &["mock"],
        tokens: &[],
        names: &[],
    },
    SubjectRule {
        subject: "General Aptitude",
        phrases: &["aptitude"],
        tokens: &[],
        names: &[],
    },
];

/// Fine-grained subtopic identifiers, compared against hyphenated tag slugs.
pub const CURATED_TOPICS: &[&str] = &[
    // operating systems
    "deadlock",
    "process-scheduling",
    "process-synchronization",
    "semaphore",
    "page-replacement",
    "virtual-memory",
    "memory-management",
    "disk-scheduling",
    "file-system",
    "threads",
    "fork-system-call",
    // databases
    "database-normalization",
    "functional-dependency",
    "sql",
    "relational-algebra",
    "tuple-relational-calculus",
    "transaction-and-concurrency",
    "er-diagram",
    "b-tree",
    "indexing",
    // theory of computation
    "finite-automata",
    "regular-expression",
    "regular-language",
    "context-free-language",
    "pushdown-automata",
    "turing-machine",
    "decidability",
    "identify-class-language",
    // algorithms
    "asymptotic-notation",
    "time-complexity",
    "recurrence-relation",
    "sorting",
    "searching",
    "graph-algorithms",
    "dynamic-programming",
    "greedy-algorithms",
    "minimum-spanning-tree",
    "shortest-path",
    "divide-and-conquer",
    // programming & data structures
    "pointers",
    "recursion",
    "arrays",
    "linked-list",
    "stack",
    "queue",
    "binary-tree",
    "binary-search-tree",
    "avl-tree",
    "heap",
    "hashing",
    // compiler design
    "lexical-analysis",
    "parsing",
    "grammar",
    "syntax-directed-translation",
    "intermediate-code",
    "register-allocation",
    "code-optimization",
    // computer networks
    "ip-addressing",
    "subnetting",
    "routing",
    "sliding-window",
    "tcp",
    "udp",
    "mac-protocol",
    "error-detection",
    "application-layer-protocols",
    // co & architecture
    "cache-memory",
    "pipelining",
    "addressing-modes",
    "instruction-format",
    "dma",
    "interrupts",
    // digital logic
    "boolean-algebra",
    "k-map",
    "number-representation",
    "combinational-circuit",
    "sequential-circuit",
    "flip-flop",
    "ieee-representation",
    // mathematics
    "set-theory",
    "relations",
    "functions",
    "group-theory",
    "lattice",
    "propositional-logic",
    "first-order-logic",
    "graph-connectivity",
    "graph-coloring",
    "counting",
    "generating-functions",
    "probability",
    "linear-algebra",
    "eigen-value",
    "calculus",
    // aptitude
    "quantitative-aptitude",
    "verbal-aptitude",
    "analytical-aptitude",
    "spatial-aptitude",
];

/// Broader tags mapped to a canonical subtopic identifier.
pub const TOPIC_ALIASES: &[(&str, &str)] = &[
    ("normal-forms", "database-normalization"),
    ("normalization", "database-normalization"),
    ("candidate-key", "functional-dependency"),
    ("transactions", "transaction-and-concurrency"),
    ("conflict-serializable", "transaction-and-concurrency"),
    ("b-plus-tree", "b-tree"),
    ("dfa", "finite-automata"),
    ("nfa", "finite-automata"),
    ("minimal-state-automata", "finite-automata"),
    ("pda", "pushdown-automata"),
    ("context-free-grammar", "context-free-language"),
    ("recursively-enumerable-languages", "decidability"),
    ("undecidable", "decidability"),
    ("mst", "minimum-spanning-tree"),
    ("dijkstras-algorithm", "shortest-path"),
    ("quick-sort", "sorting"),
    ("merge-sort", "sorting"),
    ("binary-search", "searching"),
    ("dfs", "graph-algorithms"),
    ("bfs", "graph-algorithms"),
    ("tree", "binary-tree"),
    ("tree-traversal", "binary-tree"),
    ("ll-parser", "parsing"),
    ("lr-parser", "parsing"),
    ("first-and-follow", "parsing"),
    ("three-address-code", "intermediate-code"),
    ("ipv4", "ip-addressing"),
    ("ip-packet", "ip-addressing"),
    ("congestion-control", "tcp"),
    ("distance-vector-routing", "routing"),
    ("crc-polynomial", "error-detection"),
    ("cache", "cache-memory"),
    ("instruction-pipelining", "pipelining"),
    ("min-no-gates", "combinational-circuit"),
    ("multiplexer", "combinational-circuit"),
    ("counter", "sequential-circuit"),
    ("binary-codes", "number-representation"),
    ("floating-point-representation", "ieee-representation"),
    ("mathematical-logic", "propositional-logic"),
    ("graph-theory", "graph-connectivity"),
    ("combinatory", "counting"),
    ("permutation-and-combination", "counting"),
    ("conditional-probability", "probability"),
    ("matrix", "linear-algebra"),
    ("determinant", "linear-algebra"),
    ("limits", "calculus"),
    ("maxima-minima", "calculus"),
];

/// Tags never used as a subtopic: difficulty, question type, bare subjects.
pub const EXCLUDED_TAGS: &[&str] = &[
    // difficulty
    "easy",
    "normal",
    "medium",
    "difficult",
    "hard",
    "very-difficult",
    // question type
    "descriptive",
    "numerical-answers",
    "multiple-selects",
    "one-mark",
    "two-marks",
    "match-the-following",
    "true-false",
    "out-of-syllabus-now",
    "out-of-gate-syllabus",
    "theory",
    // subjects
    "operating-system",
    "databases",
    "theory-of-computation",
    "algorithms",
    "programming",
    "programming-in-c",
    "c-programming",
    "data-structures",
    "compiler-design",
    "computer-networks",
    "co-and-architecture",
    "digital-logic",
    "discrete-mathematics",
    "engineering-mathematics",
    "general-aptitude",
    "mixed-subjects",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rule(subject: &str) -> &'static SubjectRule {
        SUBJECT_RULES.iter().find(|r| r.subject == subject).unwrap()
    }

    #[test]
    fn phrase_token_and_name_matching() {
        assert!(rule("Operating Systems").matches("operating-system"));
        assert!(rule("Operating Systems").matches("OS"));
        assert!(!rule("Operating Systems").matches("cost"));
        assert!(rule("Programming & DS").matches("programming"));
        assert!(!rule("Programming & DS").matches("dynamic-programming"));
        assert!(rule("Programming & DS").matches("data-structures"));
        assert!(rule("Algorithms").matches("graph-algorithms"));
        assert!(rule("Mathematics").matches("engineering-mathematics"));
        assert!(!rule("Mathematics").matches("aftermath"));
    }

    #[test]
    fn tables_have_no_duplicates() {
        let curated: HashSet<_> = CURATED_TOPICS.iter().collect();
        assert_eq!(curated.len(), CURATED_TOPICS.len());
        let aliases: HashSet<_> = TOPIC_ALIASES.iter().map(|(t, _)| t).collect();
        assert_eq!(aliases.len(), TOPIC_ALIASES.len());
    }

    #[test]
    fn aliases_point_at_curated_topics() {
        for (tag, canonical) in TOPIC_ALIASES {
            assert!(CURATED_TOPICS.contains(canonical), "{} -> {}", tag, canonical);
            assert!(!CURATED_TOPICS.contains(tag), "{} shadowed by curated list", tag);
        }
    }

    #[test]
    fn excluded_tags_are_not_topics() {
        for tag in EXCLUDED_TAGS {
            assert!(!CURATED_TOPICS.contains(tag), "{}", tag);
        }
    }
}
