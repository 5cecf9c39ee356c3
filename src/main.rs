mod answer;
mod corpus;
mod document;
mod error;
mod parser;
mod pipeline;
mod record;
mod settings;
mod stats;
mod taxonomy;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

use corpus::{Corpus, MergePolicy};
use settings::{OptionListRule, Settings};

#[derive(Parser)]
#[command(name = "pyq", about = "Exam question extraction from scraped Q&A pages")]
struct Cli {
    /// Settings file (default: ./pyq.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every document and write the consolidated corpus
    Extract {
        /// Input directory of cleaned HTML pages (repeatable)
        #[arg(short, long = "input")]
        inputs: Vec<PathBuf>,
        /// Corpus JSON to write
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Previously written corpus to merge with
        #[arg(long)]
        prior: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = MergePolicy::Replace)]
        policy: MergePolicy,
        /// Max documents to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Exact item count for an unstyled list to be read as options
        #[arg(long)]
        option_items: Option<usize>,
        /// Accept any unstyled list with two or more items as options
        #[arg(long, conflicts_with = "option_items")]
        loose_options: bool,
        /// Shortest option text tried as a substring of the solution
        #[arg(long)]
        min_match_len: Option<usize>,
    },
    /// Extract one document and show the record and answer strategy
    Inspect {
        file: PathBuf,
    },
    /// Per-subject overview of a written corpus
    Stats {
        #[arg(long)]
        corpus: PathBuf,
    },
    /// Ids of records needing repair
    Targets {
        #[arg(long)]
        corpus: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = settings::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Extract {
            inputs,
            output,
            prior,
            policy,
            limit,
            option_items,
            loose_options,
            min_match_len,
        } => {
            if !inputs.is_empty() {
                settings.input_dirs = inputs;
            }
            if let Some(out) = output {
                settings.output = out;
            }
            if loose_options {
                settings.extract.option_list = OptionListRule::loose();
            } else if let Some(items) = option_items {
                settings.extract.option_list = OptionListRule {
                    items,
                    ..OptionListRule::default()
                };
            }
            if let Some(n) = min_match_len {
                settings.extract.min_match_len = n;
            }

            let prior = prior.as_deref().map(Corpus::load).transpose()?;
            if prior.is_none() && policy != MergePolicy::Replace {
                warn!(?policy, "no prior corpus given; building from this run only");
            }

            let (_, summary) = pipeline::run(&settings, limit, prior.as_ref(), policy)?;
            summary.print();
            Ok(())
        }
        Commands::Inspect { file } => inspect(&file, &settings),
        Commands::Stats { corpus } => {
            let corpus = Corpus::load(&corpus)?;
            let rows = stats::overview(&corpus);
            if rows.is_empty() {
                println!("Corpus is empty.");
                return Ok(());
            }

            println!(
                "{:<24} | {:>8} | {:>9} | {:>8} | {:>6}",
                "Subject", "Sections", "Questions", "Answered", "Repair"
            );
            println!("{}", "-".repeat(68));
            for r in &rows {
                println!(
                    "{:<24} | {:>8} | {:>9} | {:>8} | {:>6}",
                    truncate(&r.subject, 24),
                    r.sections,
                    r.questions,
                    r.answered,
                    r.needs_repair
                );
            }

            let total: usize = rows.iter().map(|r| r.questions).sum();
            let repair: usize = rows.iter().map(|r| r.needs_repair).sum();
            println!("\n{} subjects | {} questions | {} need repair", rows.len(), total, repair);
            Ok(())
        }
        Commands::Targets { corpus } => {
            let corpus = Corpus::load(&corpus)?;
            let targets = stats::repair_targets(&corpus);
            for t in &targets {
                println!("{}\t{}\t{}", t.id, t.reason, t.subject);
            }
            println!("\n{} of {} records need repair", targets.len(), corpus.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn inspect(file: &Path, settings: &Settings) -> anyhow::Result<()> {
    let doc = document::DocumentPath::from_file(file)?
        .load(&settings.base_url)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let x = parser::process_document(&doc, &settings.extract)
        .with_context(|| format!("Failed to extract {}", doc.url))?;

    println!("{}", serde_json::to_string_pretty(&x.record)?);
    println!("\nSource:   {}", doc.url);
    println!(
        "Subject:  {} ({:?})",
        x.classification.subject, x.classification.subject_source
    );
    println!(
        "Subtopic: {} ({:?})",
        x.classification.subtopic, x.classification.subtopic_source
    );
    match &x.inference {
        Some(inf) => println!("Answer:   {} ({:?})", inf.label, inf.strategy),
        None => println!("Answer:   unresolved"),
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
