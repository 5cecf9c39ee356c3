use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "pyq.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_dirs: Vec<PathBuf>,
    pub output: PathBuf,
    /// Prefix joined with the document id to form its source URL.
    pub base_url: String,
    /// Documents per parallel chunk.
    pub chunk_size: usize,
    pub extract: ExtractOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_dirs: vec![PathBuf::from("scraped_html/cleaned")],
            output: PathBuf::from("extraction/questions.json"),
            base_url: "https://gateoverflow.in/".to_string(),
            chunk_size: 500,
            extract: ExtractOptions::default(),
        }
    }
}

/// Tunables for the two heuristics whose recall/precision tradeoff is not settled.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub option_list: OptionListRule,
    /// Minimum normalized option length before substring containment is tried.
    pub min_match_len: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            option_list: OptionListRule::default(),
            min_match_len: 3,
        }
    }
}

/// Item-count rule for an unstyled list to be taken as the option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OptionListRule {
    pub items: usize,
    pub matching: ListMatch,
}

impl Default for OptionListRule {
    fn default() -> Self {
        OptionListRule {
            items: 4,
            matching: ListMatch::Exact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMatch {
    Exact,
    AtLeast,
}

impl OptionListRule {
    /// The older, looser rule: any list with two or more items.
    pub fn loose() -> Self {
        OptionListRule {
            items: 2,
            matching: ListMatch::AtLeast,
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        match self.matching {
            ListMatch::Exact => count == self.items,
            ListMatch::AtLeast => count >= self.items,
        }
    }
}

/// Defaults, then the TOML file, then `PYQ_*` environment variables.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("PYQ")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("input_dirs"),
        )
        .build()
        .context("Failed to load configuration")?
        .try_deserialize::<Settings>()
        .context("Invalid configuration")?;

    Ok(settings)
}
