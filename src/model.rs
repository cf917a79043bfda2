//! Result model produced by the engine: typed rows, highlight spans, change
//! statistics, collapsible ranges, and the aggregate [`DiffResult`].
//!
//! Row kinds are closed tagged variants and rows are built through the
//! constructors below, so the side-presence invariants (Added carries only the
//! right side, Removed only the left, Changed and Unchanged both) hold at
//! construction rather than by convention. Everything serializes with serde so
//! a host shell can transport results across an IPC or worker boundary as-is.

use serde::{Deserialize, Serialize};

/// One line-level edit produced by the line differ. Ordered, produced once,
/// never mutated.
///
/// `Equal` carries both raw texts: under whitespace-insensitive matching the
/// two sides of an equal pair may differ in their whitespace runs, and each
/// side's rows must still reconstruct that side's input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOp {
    Equal { left: String, right: String },
    Insert(String),
    Delete(String),
}

/// Classification of a [`DiffRow`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Unchanged,
    Added,
    Removed,
    Changed,
}

/// Classification of a [`HighlightSpan`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Added,
    Removed,
    Unchanged,
}

/// A run of text inside one side of a changed row pair.
///
/// Concatenating a side's spans in order yields that side's row text exactly;
/// zero-length spans never appear.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub kind: SpanKind,
}

/// Intra-line highlight spans for a changed row, one list per side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RowHighlights {
    pub left: Vec<HighlightSpan>,
    pub right: Vec<HighlightSpan>,
}

/// One row of the aligned diff view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiffRow {
    /// Stable, monotonically assigned per invocation.
    pub id: usize,
    /// 1-based line number in the left input, when the row has a left side.
    pub left_number: Option<usize>,
    /// 1-based line number in the right input, when the row has a right side.
    pub right_number: Option<usize>,
    pub left_text: Option<String>,
    pub right_text: Option<String>,
    pub kind: RowKind,
    /// Index of the change block this row belongs to; `None` for unchanged rows.
    pub block_index: Option<usize>,
    /// Present exactly on changed rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<RowHighlights>,
}

impl DiffRow {
    /// A row present and equal (under the active line equality) on both sides.
    pub fn unchanged(id: usize, left_number: usize, right_number: usize, left: String, right: String) -> Self {
        Self {
            id,
            left_number: Some(left_number),
            right_number: Some(right_number),
            left_text: Some(left),
            right_text: Some(right),
            kind: RowKind::Unchanged,
            block_index: None,
            highlights: None,
        }
    }

    /// A row present only in the right input.
    pub fn added(id: usize, right_number: usize, right: String, block_index: usize) -> Self {
        Self {
            id,
            left_number: None,
            right_number: Some(right_number),
            left_text: None,
            right_text: Some(right),
            kind: RowKind::Added,
            block_index: Some(block_index),
            highlights: None,
        }
    }

    /// A row present only in the left input.
    pub fn removed(id: usize, left_number: usize, left: String, block_index: usize) -> Self {
        Self {
            id,
            left_number: Some(left_number),
            right_number: None,
            left_text: Some(left),
            right_text: None,
            kind: RowKind::Removed,
            block_index: Some(block_index),
            highlights: None,
        }
    }

    /// A positionally paired modification: both sides present, texts differ.
    pub fn changed(
        id: usize,
        left_number: usize,
        right_number: usize,
        left: String,
        right: String,
        block_index: usize,
        highlights: RowHighlights,
    ) -> Self {
        Self {
            id,
            left_number: Some(left_number),
            right_number: Some(right_number),
            left_text: Some(left),
            right_text: Some(right),
            kind: RowKind::Changed,
            block_index: Some(block_index),
            highlights: Some(highlights),
        }
    }
}

/// Running tallies of produced rows. Unchanged rows contribute nothing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
    pub changes: usize,
}

/// Inclusive row-index range of a maximal unchanged run longer than the
/// configured collapse threshold.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsibleRange {
    pub start: usize,
    pub end: usize,
}

impl CollapsibleRange {
    /// Number of rows covered; at least 1, the range is inclusive.
    pub fn row_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Complete structured result of one engine invocation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub rows: Vec<DiffRow>,
    pub stats: DiffStats,
    /// First-row index of each change block, in block-index order.
    pub blocks: Vec<usize>,
    /// Unified two-file patch over the full (canonicalized-if-JSON) inputs.
    pub patch: String,
    pub collapsible: Vec<CollapsibleRange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_enforce_side_presence() {
        let added = DiffRow::added(0, 1, "x".into(), 0);
        assert!(added.left_text.is_none() && added.left_number.is_none());
        assert!(added.right_text.is_some() && added.right_number.is_some());

        let removed = DiffRow::removed(1, 1, "x".into(), 0);
        assert!(removed.left_text.is_some() && removed.left_number.is_some());
        assert!(removed.right_text.is_none() && removed.right_number.is_none());

        let unchanged = DiffRow::unchanged(2, 1, 1, "x".into(), "x".into());
        assert!(unchanged.block_index.is_none());
        assert!(unchanged.left_text.is_some() && unchanged.right_text.is_some());
    }

    #[test]
    fn row_serializes_camel_case() {
        let row = DiffRow::added(7, 3, "new".into(), 2);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["rightNumber"], 3);
        assert_eq!(json["blockIndex"], 2);
        assert_eq!(json["kind"], "added");
        assert!(json.get("highlights").is_none());
    }

    #[test]
    fn collapsible_range_len_is_inclusive() {
        let range = CollapsibleRange { start: 4, end: 23 };
        assert_eq!(range.row_count(), 20);
    }
}
