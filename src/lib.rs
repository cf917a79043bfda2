//! Diff-Engine: a deterministic text-diffing and result-structuring engine —
//! line alignment, change blocks, intra-line highlights, collapsible ranges,
//! JSON canonicalization, and patch/HTML export.
//!
//! Goals
//! - Produce a complete structured diff for any pair of in-memory texts, with
//!   no I/O, no shared state, and no failure modes.
//! - Stay fully deterministic: identical inputs always yield identical output.
//! - Keep the host shell thin: it supplies two strings and an options record
//!   and consumes a single result value.
//!
//! Core Capabilities
//! - Line alignment: minimal-edit (Myers) diff over both newline conventions,
//!   optionally ignoring whitespace runs.
//! - Row building: delete/insert runs pair positionally into changed rows,
//!   grouped into indexed change blocks with running statistics.
//! - Intra-line highlighting: independent per-side word/char spans that
//!   reconstruct each side's text exactly.
//! - Collapsible ranges: maximal unchanged runs longer than a threshold.
//! - JSON canonicalization: order-insensitive re-serialization so structurally
//!   equal JSON diffs as identical; non-JSON passes through untouched.
//! - Rendering: unified two-file patch plus plain-text and themed side-by-side
//!   HTML export.
//!
//! Modules
//! - `engine`: line differ, row builder, collapsible-range detector, and the
//!   [`build_diff`] entry point.
//! - `model`: typed rows, spans, statistics, and [`DiffResult`].
//! - `highlight`: secondary word/char diff for changed row pairs.
//! - `canonical`: deterministic JSON re-serialization.
//! - `patch` and `export`: unified patch, plain-text and HTML forms.
//! - `options`: per-call [`DiffOptions`] and the export [`Theme`].
//! - `errors`: unified error types.
//!
//! Typical Usage
//! - `build_diff(left, right, &DiffOptions::default())` for the structured
//!   result; `patch_to_html(&result.patch, Theme::Dark)` to export it.

pub mod canonical;
pub mod engine;
pub mod errors;
pub mod export;
pub mod highlight;
pub mod model;
pub mod options;
pub mod patch;

pub use canonical::{canonicalize, try_canonicalize};
pub use engine::{build_diff, collapsible_ranges, line_ops, split_lines};
pub use errors::DiffError;
pub use export::{patch_to_html, patch_to_plain_text};
pub use highlight::highlight_pair;
pub use model::{
    CollapsibleRange, DiffResult, DiffRow, DiffStats, HighlightSpan, LineOp, RowHighlights, RowKind,
    SpanKind,
};
pub use options::{DiffOptions, Granularity, Theme};
pub use patch::render_patch;
