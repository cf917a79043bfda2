//! The diff engine: line alignment, row building, collapsible-range
//! detection, statistics, and the single blocking entry point [`build_diff`].
//!
//! The engine is a pure function of its inputs: no I/O, no shared state, no
//! suspension points. Identical inputs always yield identical results, and
//! every `(left, right, options)` triple produces a well-formed
//! [`DiffResult`] — there are no fatal paths. Callers that need
//! responsiveness run it off their interactive thread; concurrent invocations
//! need no coordination since each call owns its working state.

use similar::{Algorithm, DiffOp, TextDiff};

use crate::canonical::canonicalize;
use crate::highlight::highlight_pair;
use crate::model::{CollapsibleRange, DiffResult, DiffRow, DiffStats, LineOp, RowKind};
use crate::options::DiffOptions;
use crate::patch::render_patch;

/// Compute the full structured diff between `left` and `right`.
pub fn build_diff(left: &str, right: &str, options: &DiffOptions) -> DiffResult {
    let prepared_left = if options.json_mode { canonicalize(left, true) } else { left.to_string() };
    let prepared_right = if options.json_mode { canonicalize(right, true) } else { right.to_string() };

    let ops = line_ops(&prepared_left, &prepared_right, options.whitespace_sensitive);

    let mut builder = RowBuilder::new();
    for op in ops {
        builder.push_op(op, options);
    }
    let (rows, blocks, stats) = builder.finish(options);

    let collapsible = collapsible_ranges(&rows, options.collapse_threshold);
    let patch = render_patch(&prepared_left, &prepared_right);

    tracing::debug!(
        "diff built: {} rows, {} blocks, +{} -{} ~{}",
        rows.len(),
        blocks.len(),
        stats.additions,
        stats.deletions,
        stats.changes
    );

    DiffResult {
        rows,
        stats,
        blocks,
        patch,
        collapsible,
    }
}

/// Split text into lines on `\n` or `\r\n` identically. A single trailing
/// separator does not produce a spurious empty final line; the empty string
/// has no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Comparison key for a line when whitespace sensitivity is off: internal
/// whitespace runs collapse to a single space, edges are trimmed.
fn whitespace_key(line: &str) -> String {
    let mut key = String::with_capacity(line.len());
    for word in line.split_whitespace() {
        if !key.is_empty() {
            key.push(' ');
        }
        key.push_str(word);
    }
    key
}

/// Minimal-edit line alignment (Myers) between the two texts.
///
/// When `whitespace_sensitive` is off the diff runs over whitespace-normalized
/// keys while the emitted ops carry each side's original text, so equal pairs
/// may differ in raw whitespace. Deterministic; never reorders lines.
pub fn line_ops(left: &str, right: &str, whitespace_sensitive: bool) -> Vec<LineOp> {
    let left_lines = split_lines(left);
    let right_lines = split_lines(right);

    let left_keys: Vec<String>;
    let right_keys: Vec<String>;
    let (left_refs, right_refs): (Vec<&str>, Vec<&str>) = if whitespace_sensitive {
        (left_lines.clone(), right_lines.clone())
    } else {
        left_keys = left_lines.iter().map(|l| whitespace_key(l)).collect();
        right_keys = right_lines.iter().map(|l| whitespace_key(l)).collect();
        (
            left_keys.iter().map(String::as_str).collect(),
            right_keys.iter().map(String::as_str).collect(),
        )
    };

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&left_refs, &right_refs);

    let mut ops = Vec::with_capacity(left_lines.len().max(right_lines.len()));
    for op in diff.ops() {
        match *op {
            DiffOp::Equal { old_index, new_index, len } => {
                for offset in 0..len {
                    ops.push(LineOp::Equal {
                        left: left_lines[old_index + offset].to_string(),
                        right: right_lines[new_index + offset].to_string(),
                    });
                }
            }
            DiffOp::Delete { old_index, old_len, .. } => {
                for offset in 0..old_len {
                    ops.push(LineOp::Delete(left_lines[old_index + offset].to_string()));
                }
            }
            DiffOp::Insert { new_index, new_len, .. } => {
                for offset in 0..new_len {
                    ops.push(LineOp::Insert(right_lines[new_index + offset].to_string()));
                }
            }
            DiffOp::Replace { old_index, old_len, new_index, new_len } => {
                for offset in 0..old_len {
                    ops.push(LineOp::Delete(left_lines[old_index + offset].to_string()));
                }
                for offset in 0..new_len {
                    ops.push(LineOp::Insert(right_lines[new_index + offset].to_string()));
                }
            }
        }
    }
    ops
}

/// Accumulator threaded through the row-building pass.
///
/// Delete/insert lines buffer until the next equal line (or end of input),
/// then one flush zips them positionally into changed rows, spills the longer
/// side as pure removed/added rows, and stamps every row it produced with one
/// fresh block index.
struct RowBuilder {
    rows: Vec<DiffRow>,
    blocks: Vec<usize>,
    stats: DiffStats,
    next_block: usize,
    left_number: usize,
    right_number: usize,
    pending_removals: Vec<String>,
    pending_additions: Vec<String>,
}

impl RowBuilder {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            blocks: Vec::new(),
            stats: DiffStats::default(),
            next_block: 0,
            left_number: 1,
            right_number: 1,
            pending_removals: Vec::new(),
            pending_additions: Vec::new(),
        }
    }

    fn push_op(&mut self, op: LineOp, options: &DiffOptions) {
        match op {
            LineOp::Delete(line) => self.pending_removals.push(line),
            LineOp::Insert(line) => self.pending_additions.push(line),
            LineOp::Equal { left, right } => {
                self.flush(options);
                let id = self.rows.len();
                self.rows
                    .push(DiffRow::unchanged(id, self.left_number, self.right_number, left, right));
                self.left_number += 1;
                self.right_number += 1;
            }
        }
    }

    /// Drain the pending buffers into rows sharing one fresh block index.
    /// A no-op when nothing is pending, so equal runs with an empty buffer
    /// open no block.
    fn flush(&mut self, options: &DiffOptions) {
        if self.pending_removals.is_empty() && self.pending_additions.is_empty() {
            return;
        }

        let block = self.next_block;
        self.next_block += 1;
        self.blocks.push(self.rows.len());

        let removals = std::mem::take(&mut self.pending_removals);
        let additions = std::mem::take(&mut self.pending_additions);
        let mut removals = removals.into_iter();
        let mut additions = additions.into_iter();

        loop {
            let id = self.rows.len();
            match (removals.next(), additions.next()) {
                (Some(left), Some(right)) => {
                    let highlights = highlight_pair(&left, &right, options.granularity);
                    self.rows.push(DiffRow::changed(
                        id,
                        self.left_number,
                        self.right_number,
                        left,
                        right,
                        block,
                        highlights,
                    ));
                    self.left_number += 1;
                    self.right_number += 1;
                    self.stats.changes += 1;
                }
                (Some(left), None) => {
                    self.rows.push(DiffRow::removed(id, self.left_number, left, block));
                    self.left_number += 1;
                    self.stats.deletions += 1;
                }
                (None, Some(right)) => {
                    self.rows.push(DiffRow::added(id, self.right_number, right, block));
                    self.right_number += 1;
                    self.stats.additions += 1;
                }
                (None, None) => break,
            }
        }
    }

    fn finish(mut self, options: &DiffOptions) -> (Vec<DiffRow>, Vec<usize>, DiffStats) {
        self.flush(options);
        (self.rows, self.blocks, self.stats)
    }
}

/// Find maximal unchanged runs strictly longer than `threshold` rows.
/// Emitted in order; ranges never overlap. A threshold <= 0 collapses every
/// non-empty run.
pub fn collapsible_ranges(rows: &[DiffRow], threshold: i64) -> Vec<CollapsibleRange> {
    let mut ranges = Vec::new();
    let mut run_start: Option<usize> = None;

    for (index, row) in rows.iter().enumerate() {
        if row.kind == RowKind::Unchanged {
            run_start.get_or_insert(index);
        } else if let Some(start) = run_start.take() {
            push_if_long_enough(&mut ranges, start, index - 1, threshold);
        }
    }
    if let Some(start) = run_start {
        push_if_long_enough(&mut ranges, start, rows.len() - 1, threshold);
    }
    ranges
}

fn push_if_long_enough(ranges: &mut Vec<CollapsibleRange>, start: usize, end: usize, threshold: i64) {
    let run_len = (end - start + 1) as i64;
    // Strict excess: a run exactly equal to the threshold stays expanded.
    if run_len > threshold {
        ranges.push(CollapsibleRange { start, end });
    }
}
