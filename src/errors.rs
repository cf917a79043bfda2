//! Error types for the diff-engine crate.
//!
//! The engine itself has no fatal paths: every `(left, right, options)` triple
//! produces a well-formed `DiffResult`, and malformed JSON under JSON mode
//! falls back to the raw text. Errors surface only through the strict
//! canonicalization API for callers that want to know whether an input parsed
//! as JSON.

use thiserror::Error;

#[derive(Error, Debug)]
/// Unified error enumeration for the diff-engine library.
pub enum DiffError {
    /// Input text is not valid JSON.
    #[error("Not a valid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
