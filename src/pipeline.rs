use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::corpus::{self, Corpus, MergePolicy};
use crate::document::{self, DocumentPath};
use crate::error::ExtractError;
use crate::parser::{self, extract::Extraction};
use crate::record::QuestionRecord;
use crate::settings::Settings;

#[derive(Debug, Default, PartialEq)]
pub struct BatchSummary {
    pub processed: usize,
    pub answered: usize,
    pub skipped: usize,
    pub needs_repair: usize,
}

impl BatchSummary {
    pub fn print(&self) {
        println!(
            "Extracted {} questions ({} answered, {} need repair), skipped {} documents.",
            self.processed, self.answered, self.needs_repair, self.skipped,
        );
    }
}

/// Build phase: every document under the input directories to a candidate record.
///
/// Records come back in (id, path) order whatever order the workers finish in.
/// A document that fails is logged and counted; only a missing input directory
/// aborts the run.
pub fn extract_all(
    settings: &Settings,
    limit: Option<usize>,
) -> Result<(Vec<QuestionRecord>, BatchSummary)> {
    let mut docs = document::list_documents(&settings.input_dirs)?;
    if let Some(n) = limit {
        docs.truncate(n);
    }
    info!(documents = docs.len(), "extracting");

    let pb = ProgressBar::new(docs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut summary = BatchSummary::default();
    let mut records = Vec::with_capacity(docs.len());

    for chunk in docs.chunks(settings.chunk_size.max(1)) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|doc| extract_one(doc, settings))
            .collect();

        for (doc, result) in chunk.iter().zip(results) {
            match result {
                Ok(x) => {
                    summary.processed += 1;
                    if x.record.has_answer() {
                        summary.answered += 1;
                    }
                    if x.record.needs_repair() {
                        summary.needs_repair += 1;
                    }
                    records.push(x.record);
                }
                Err(e) => {
                    summary.skipped += 1;
                    warn!(
                        id = %doc.id,
                        url = %document::source_url(&settings.base_url, &doc.id),
                        path = %doc.path.display(),
                        kind = e.kind(),
                        "skipped: {}",
                        e
                    );
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok((records, summary))
}

/// Build, merge, and write. The output is always rewritten, even when this run
/// extracted nothing, so a stale corpus never outlives a `replace` run.
pub fn run(
    settings: &Settings,
    limit: Option<usize>,
    prior: Option<&Corpus>,
    policy: MergePolicy,
) -> Result<(Corpus, BatchSummary)> {
    let (records, summary) = extract_all(settings, limit)?;
    if records.is_empty() {
        warn!(path = %settings.output.display(), "no documents extracted");
    }

    let corpus = corpus::merge(prior, records, policy);
    corpus.save(&settings.output)?;
    info!(
        subjects = corpus.0.len(),
        questions = corpus.len(),
        path = %settings.output.display(),
        "corpus written"
    );
    Ok((corpus, summary))
}

fn extract_one(doc: &DocumentPath, settings: &Settings) -> Result<Extraction, ExtractError> {
    let raw = doc.load(&settings.base_url)?;
    parser::process_document(&raw, &settings.extract)
}
