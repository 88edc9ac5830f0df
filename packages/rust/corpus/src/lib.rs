//! Corpus extraction and golden dataset assembly.
//!
//! This crate provides:
//! - [`extract`] — the [`CorpusExtractor`] strategy trait and its two
//!   built-in strategies (structured data, markup)
//! - [`merge`] — the ordered dedup merge producing a [`GoldenDataset`]
//! - [`text`] — markup stripping and whitespace normalization
//! - [`ingest`] — document preparation for the external search backends

pub mod extract;
pub mod ingest;
pub mod merge;
pub mod text;

pub use extract::{CorpusExtractor, MarkupExtractor, StructuredDataExtractor};
pub use ingest::{IngestDocument, chunk_text, document_from_html, tokenize_question};
pub use merge::{GoldenDataset, merge};
pub use text::{normalize_whitespace, strip_markup};
