//! Secondary word/character diff for changed row pairs.
//!
//! Each side is computed independently: the left side diffs left-against-right
//! and keeps its own removed/unchanged segments, the right side diffs
//! right-against-left and keeps its own added/unchanged segments. Segments
//! that exist only in the comparison text are dropped, so a side's spans
//! always concatenate to exactly that side's text.
//!
//! Whitespace-only differences are highlighted regardless of the engine's
//! whitespace-sensitivity flag.

use similar::{Algorithm, ChangeTag, TextDiff};

use crate::model::{HighlightSpan, RowHighlights, SpanKind};
use crate::options::Granularity;

/// Compute both sides' highlight spans for a changed row pair.
pub fn highlight_pair(left: &str, right: &str, granularity: Granularity) -> RowHighlights {
    RowHighlights {
        left: side_spans(left, right, granularity, SpanKind::Removed),
        right: side_spans(right, left, granularity, SpanKind::Added),
    }
}

/// Spans for one side. `own_kind` is the kind given to segments present only
/// in `source`; segments present only in `other` are skipped.
fn side_spans(source: &str, other: &str, granularity: Granularity, own_kind: SpanKind) -> Vec<HighlightSpan> {
    if granularity == Granularity::Line {
        if source.is_empty() {
            return Vec::new();
        }
        return vec![HighlightSpan {
            text: source.to_string(),
            kind: SpanKind::Unchanged,
        }];
    }

    let diff = match granularity {
        Granularity::Word => TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_words(source, other),
        Granularity::Char => TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_chars(source, other),
        Granularity::Line => unreachable!("handled above"),
    };

    let mut spans: Vec<HighlightSpan> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SpanKind::Unchanged,
            ChangeTag::Delete => own_kind,
            // Present only in the comparison text, not part of this side.
            ChangeTag::Insert => continue,
        };
        push_span(&mut spans, change.value(), kind);
    }
    spans
}

/// Append text to the span list, coalescing adjacent same-kind spans and
/// dropping empty ones.
fn push_span(spans: &mut Vec<HighlightSpan>, text: &str, kind: SpanKind) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut()
        && last.kind == kind
    {
        last.text.push_str(text);
        return;
    }
    spans.push(HighlightSpan {
        text: text.to_string(),
        kind,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(spans: &[HighlightSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn line_granularity_yields_single_unchanged_span() {
        let h = highlight_pair("hello world", "hello there", Granularity::Line);
        assert_eq!(h.left, vec![HighlightSpan { text: "hello world".into(), kind: SpanKind::Unchanged }]);
        assert_eq!(h.right, vec![HighlightSpan { text: "hello there".into(), kind: SpanKind::Unchanged }]);
    }

    #[test]
    fn line_granularity_drops_empty_side() {
        let h = highlight_pair("", "x", Granularity::Line);
        assert!(h.left.is_empty());
        assert_eq!(concat(&h.right), "x");
    }

    #[test]
    fn word_spans_reconstruct_each_side() {
        let left = "the quick brown fox";
        let right = "the slow brown cat";
        let h = highlight_pair(left, right, Granularity::Word);
        assert_eq!(concat(&h.left), left);
        assert_eq!(concat(&h.right), right);
    }

    #[test]
    fn word_spans_mark_own_segments() {
        let h = highlight_pair("keep removed keep", "keep inserted keep", Granularity::Word);
        assert!(h.left.iter().any(|s| s.kind == SpanKind::Removed && s.text.contains("removed")));
        assert!(h.left.iter().all(|s| s.kind != SpanKind::Added));
        assert!(h.right.iter().any(|s| s.kind == SpanKind::Added && s.text.contains("inserted")));
        assert!(h.right.iter().all(|s| s.kind != SpanKind::Removed));
    }

    #[test]
    fn char_spans_coalesce_adjacent_runs() {
        let h = highlight_pair("abcdef", "abXYef", Granularity::Char);
        assert_eq!(concat(&h.left), "abcdef");
        // "cd" comes out as one removed span, not two single-char spans.
        assert!(h.left.iter().any(|s| s.kind == SpanKind::Removed && s.text == "cd"));
        assert!(h.right.iter().any(|s| s.kind == SpanKind::Added && s.text == "XY"));
    }

    #[test]
    fn no_empty_spans() {
        let h = highlight_pair("a", "b", Granularity::Char);
        assert!(h.left.iter().all(|s| !s.text.is_empty()));
        assert!(h.right.iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn whitespace_only_differences_are_marked() {
        let h = highlight_pair("a  b", "a b", Granularity::Word);
        assert_eq!(concat(&h.left), "a  b");
        assert!(h.left.iter().any(|s| s.kind == SpanKind::Removed));
    }

    #[test]
    fn identical_texts_one_unchanged_span() {
        let h = highlight_pair("same", "same", Granularity::Word);
        assert_eq!(h.left, vec![HighlightSpan { text: "same".into(), kind: SpanKind::Unchanged }]);
        assert_eq!(h.right, h.left);
    }
}
