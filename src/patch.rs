//! Unified two-file patch rendering.
//!
//! Streams a Myers line diff into hunks with a rolling prefix context, keeps
//! borrowed line slices while assembling, and derives each `@@` header by
//! scanning the finished hunk. Labels are fixed (`Original` / `Modified`)
//! with empty timestamps.

use std::{collections::VecDeque, fmt::Write};

use similar::{Algorithm, ChangeTag, TextDiff};

/// Label used for the left input in patch headers.
pub const ORIGINAL_LABEL: &str = "Original";
/// Label used for the right input in patch headers.
pub const MODIFIED_LABEL: &str = "Modified";

/// Lines of unchanged context around each hunk.
pub const CONTEXT_LINES: usize = 3;

/// Internal representation of diff lines used while assembling unified hunks.
#[derive(Debug, Clone, Copy)]
enum EditLine<'a> {
    // old_line, new_line, text
    Context(Option<usize>, Option<usize>, &'a str),
    // old_line, text
    Delete(usize, &'a str),
    // new_line, text
    Insert(usize, &'a str),
}

/// Render the standard unified two-file patch between `left` and `right` with
/// [`CONTEXT_LINES`] lines of context. Identical inputs yield only the two
/// header lines.
pub fn render_patch(left: &str, right: &str) -> String {
    let mut out = String::new();
    // Empty timestamps: nothing follows the labels.
    let _ = writeln!(out, "--- {ORIGINAL_LABEL}");
    let _ = writeln!(out, "+++ {MODIFIED_LABEL}");
    out.push_str(&unified_hunks(left, right, CONTEXT_LINES));
    out
}

/// Streaming unified diff body that minimizes allocations by borrowing lines.
fn unified_hunks(old_text: &str, new_text: &str, context: usize) -> String {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(old_text, new_text);

    let mut out = String::with_capacity(((old_text.len() + new_text.len()) / 16).max(256));

    // Rolling prefix context (last `context` equal lines when outside a hunk)
    let mut prefix_ctx: VecDeque<EditLine> = VecDeque::with_capacity(context);
    let mut cur_hunk: Vec<EditLine> = Vec::new();
    let mut eq_run: Vec<EditLine> = Vec::new(); // accumulating equal lines while in hunk
    let mut in_hunk = false;

    let mut last_old_seen = 0usize;
    let mut last_new_seen = 0usize;
    let mut old_line_no = 1usize;
    let mut new_line_no = 1usize;

    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches(['\r', '\n']);
        match change.tag() {
            ChangeTag::Equal => {
                let entry = EditLine::Context(Some(old_line_no), Some(new_line_no), line);
                old_line_no += 1;
                new_line_no += 1;
                if in_hunk {
                    eq_run.push(entry);
                    // Flush once trailing equal lines exceed 2*context
                    if eq_run.len() > context * 2 {
                        flush_hunk_to_out(
                            &mut out,
                            &mut cur_hunk,
                            &mut eq_run,
                            &mut prefix_ctx,
                            context,
                            &mut last_old_seen,
                            &mut last_new_seen,
                        );
                        in_hunk = false;
                    }
                } else {
                    if prefix_ctx.len() == context {
                        prefix_ctx.pop_front();
                    }
                    prefix_ctx.push_back(entry);
                }
            }
            ChangeTag::Delete => {
                let entry = EditLine::Delete(old_line_no, line);
                old_line_no += 1;
                if !in_hunk {
                    cur_hunk.extend(prefix_ctx.iter().copied());
                    prefix_ctx.clear();
                    in_hunk = true;
                }
                if !eq_run.is_empty() {
                    cur_hunk.append(&mut eq_run);
                }
                cur_hunk.push(entry);
            }
            ChangeTag::Insert => {
                let entry = EditLine::Insert(new_line_no, line);
                new_line_no += 1;
                if !in_hunk {
                    cur_hunk.extend(prefix_ctx.iter().copied());
                    prefix_ctx.clear();
                    in_hunk = true;
                }
                if !eq_run.is_empty() {
                    cur_hunk.append(&mut eq_run);
                }
                cur_hunk.push(entry);
            }
        }
    }

    if in_hunk {
        flush_hunk_to_out(
            &mut out,
            &mut cur_hunk,
            &mut eq_run,
            &mut prefix_ctx,
            context,
            &mut last_old_seen,
            &mut last_new_seen,
        );
    }

    out
}

// Flush the current hunk into the output; trailing context is in `eq_run`
fn flush_hunk_to_out<'a>(
    out: &mut String,
    cur_hunk: &mut Vec<EditLine<'a>>,
    eq_run: &mut Vec<EditLine<'a>>,
    prefix_ctx: &mut VecDeque<EditLine<'a>>,
    context: usize,
    last_old_seen: &mut usize,
    last_new_seen: &mut usize,
) {
    // 1. Append up to `context` trailing equal lines to the current hunk.
    let trail_to_take = eq_run.len().min(context);
    for entry in eq_run.iter().take(trail_to_take) {
        cur_hunk.push(*entry);
    }

    // 2. Compute header numbers (line ranges/counts) by scanning the hunk.
    let mut old_first: Option<usize> = None;
    let mut old_count: usize = 0;
    let mut new_first: Option<usize> = None;
    let mut new_count: usize = 0;

    for e in cur_hunk.iter() {
        match *e {
            EditLine::Context(o, n, _) => {
                if let Some(o) = o {
                    if old_first.is_none() {
                        old_first = Some(o);
                    }
                    old_count += 1;
                }
                if let Some(n) = n {
                    if new_first.is_none() {
                        new_first = Some(n);
                    }
                    new_count += 1;
                }
            }
            EditLine::Delete(o, _) => {
                if old_first.is_none() {
                    old_first = Some(o);
                }
                old_count += 1;
            }
            EditLine::Insert(n, _) => {
                if new_first.is_none() {
                    new_first = Some(n);
                }
                new_count += 1;
            }
        }
    }

    if old_count == 0 && new_count == 0 {
        cur_hunk.clear();
        eq_run.clear();
        return;
    }

    // A side absent from the hunk reports a zero-length range anchored before
    // the insertion point, matching standard unified-diff headers.
    let old_start = old_first.unwrap_or(*last_old_seen);
    let new_start = new_first.unwrap_or(*last_new_seen);

    let _ = writeln!(out, "@@ -{old_start},{old_count} +{new_start},{new_count} @@");

    // 3. Output the hunk in Myers change order
    for &e in cur_hunk.iter() {
        match e {
            EditLine::Context(o, n, txt) => {
                let _ = writeln!(out, " {txt}");
                if let Some(o) = o {
                    *last_old_seen = (*last_old_seen).max(o);
                }
                if let Some(n) = n {
                    *last_new_seen = (*last_new_seen).max(n);
                }
            }
            EditLine::Delete(o, txt) => {
                let _ = writeln!(out, "-{txt}");
                *last_old_seen = (*last_old_seen).max(o);
            }
            EditLine::Insert(n, txt) => {
                let _ = writeln!(out, "+{txt}");
                *last_new_seen = (*last_new_seen).max(n);
            }
        }
    }

    // 4. Preserve last `context` equal lines from eq_run for prefix of next hunk.
    prefix_ctx.clear();
    if context > 0 {
        let keep_start = eq_run.len().saturating_sub(context);
        for entry in eq_run.iter().skip(keep_start) {
            prefix_ctx.push_back(*entry);
        }
    }

    cur_hunk.clear();
    eq_run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_use_fixed_labels_with_empty_timestamps() {
        let patch = render_patch("a\n", "b\n");
        let mut lines = patch.lines();
        assert_eq!(lines.next(), Some("--- Original"));
        assert_eq!(lines.next(), Some("+++ Modified"));
    }

    #[test]
    fn identical_inputs_yield_headers_only() {
        let patch = render_patch("a\nb\n", "a\nb\n");
        assert_eq!(patch, "--- Original\n+++ Modified\n");
    }

    #[test]
    fn basic_change_markers() {
        let patch = render_patch("a\nb\nc\n", "a\nB\nc\nd\n");
        assert!(patch.contains("@@"));
        assert!(patch.contains("-b"));
        assert!(patch.contains("+B"));
        assert!(patch.contains("+d"));
        assert!(patch.contains(" a"));
        assert!(patch.contains(" c"));
    }

    #[test]
    fn hunk_header_ranges() {
        let patch = render_patch("a\nb\nc\nd\ne\n", "a\nb\nX\nd\ne\n");
        assert!(patch.contains("@@ -1,5 +1,5 @@"), "got: {patch}");
    }

    #[test]
    fn distant_changes_split_into_hunks() {
        let old: String = (0..30).map(|i| format!("line {i}\n")).collect();
        let new = old.replace("line 2\n", "LINE 2\n").replace("line 27\n", "LINE 27\n");
        let patch = render_patch(&old, &new);
        assert_eq!(patch.matches("@@").count(), 4, "two hunks, two markers each");
    }

    #[test]
    fn empty_to_content_has_zero_old_range() {
        let patch = render_patch("", "x\ny\n");
        assert!(patch.contains("@@ -0,0 +1,2 @@"), "got: {patch}");
        assert!(patch.contains("+x"));
        assert!(patch.contains("+y"));
    }
}
