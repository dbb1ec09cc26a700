//! Regulatory document types.

use crate::config::CorpusSource;
use serde::Serialize;

/// A regulatory document submitted for ingestion into the vector DB.
///
/// The stack fetches the content from the URL and extracts text itself; the
/// local process never holds the document bytes.
#[derive(Debug, Clone, Serialize)]
pub struct RegulatoryDocument {
    /// Unique id within one provisioning run.
    pub document_id: String,
    /// Location of the document content.
    pub content: String,
    /// MIME type of the document.
    pub mime_type: String,
    /// Metadata recorded alongside the chunks.
    pub metadata: DocumentMetadata,
}

/// Metadata recorded alongside ingested chunks.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    /// Origin tag identifying the corpus a chunk came from.
    pub source: String,
}

impl RegulatoryDocument {
    /// Builds a document from a corpus source and its position in the corpus.
    #[must_use]
    pub fn from_corpus_source(index: usize, source: &CorpusSource) -> Self {
        Self {
            document_id: format!("permit-doc-{index}"),
            content: source.url.clone(),
            mime_type: source.mime_type.clone(),
            metadata: DocumentMetadata {
                source: source.source.clone(),
            },
        }
    }
}
