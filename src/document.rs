use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::error::ExtractError;

/// One scraped question page, as the fetcher left it on disk.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub id: String,
    pub html: String,
    pub url: String,
}

/// A document file found in an input directory; read lazily by the worker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocumentPath {
    pub id: String,
    pub path: PathBuf,
}

impl DocumentPath {
    /// A single file named on the command line.
    pub fn from_file(path: &Path) -> Result<Self> {
        match document_id(path) {
            Some(id) => Ok(DocumentPath {
                id,
                path: path.to_path_buf(),
            }),
            None => bail!("{} is not an .html document", path.display()),
        }
    }

    pub fn load(&self, base_url: &str) -> Result<RawDocument, ExtractError> {
        let html = std::fs::read_to_string(&self.path).map_err(|source| ExtractError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(RawDocument {
            id: self.id.clone(),
            html,
            url: source_url(base_url, &self.id),
        })
    }
}

/// All `*.html` files across the input directories, ordered by (id, path).
///
/// A missing directory is systemic and aborts the run.
pub fn list_documents(dirs: &[PathBuf]) -> Result<Vec<DocumentPath>> {
    let mut docs = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            bail!("Input directory {} not found", dir.display());
        }
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to list {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if let Some(id) = document_id(&path) {
                docs.push(DocumentPath { id, path });
            }
        }
    }
    docs.sort_by(|a, b| id_order(&a.id, &b.id).then_with(|| a.path.cmp(&b.path)));
    Ok(docs)
}

fn document_id(path: &Path) -> Option<String> {
    if path.extension()? != "html" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

pub fn source_url(base_url: &str, id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id)
}

/// Numeric order for digit-only ids, lexicographic otherwise.
pub fn id_order(a: &str, b: &str) -> std::cmp::Ordering {
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
    if numeric(a) && numeric(b) {
        let (a, b) = (a.trim_start_matches('0'), b.trim_start_matches('0'));
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    } else {
        a.cmp(b)
    }
}
