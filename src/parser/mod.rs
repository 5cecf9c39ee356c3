pub mod dom;
pub mod extract;
pub mod markup;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::settings::ExtractOptions;
use dom::ParsedDocument;
use extract::Extraction;

/// Two-step pipeline: raw HTML → parsed regions → extracted record.
pub fn process_document(
    doc: &RawDocument,
    opts: &ExtractOptions,
) -> Result<Extraction, ExtractError> {
    let parsed = ParsedDocument::parse(&doc.html);
    extract::extract_record(doc, &parsed, opts)
}
