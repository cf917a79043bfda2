//! Export forms for a rendered patch: plain text (the patch verbatim) and a
//! self-contained HTML document.
//!
//! The HTML exporter is a generic unified-diff-to-HTML transform: it parses
//! the patch's hunks, pairs removal and addition runs line-wise, and renders a
//! side-by-side table wrapped in a minimal standalone document whose palette
//! follows the requested theme.

use std::fmt::Write;

use crate::options::Theme;

/// Plain-text export is the patch verbatim.
pub fn patch_to_plain_text(patch: &str) -> String {
    patch.to_string()
}

/// Render `patch` as a self-contained side-by-side HTML document.
pub fn patch_to_html(patch: &str, theme: Theme) -> String {
    let palette = Palette::for_theme(theme);
    let body = render_table(patch);
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Diff Export</title>
    <style>
      body {{ background: {bg}; color: {fg}; font-family: "JetBrains Mono", SFMono-Regular, Menlo, monospace; font-size: 13px; margin: 1rem; }}
      table.diff {{ border-collapse: collapse; width: 100%; table-layout: fixed; }}
      td {{ padding: 1px 8px; vertical-align: top; white-space: pre-wrap; word-break: break-all; }}
      td.num {{ width: 3.5em; text-align: right; color: {muted}; user-select: none; }}
      td.del {{ background: {del}; }}
      td.add {{ background: {add}; }}
      td.hunk {{ background: {hunk}; color: {muted}; }}
    </style>
  </head>
  <body>
    <table class="diff">
{body}    </table>
  </body>
</html>
"#,
        bg = palette.background,
        fg = palette.foreground,
        muted = palette.muted,
        del = palette.removed,
        add = palette.added,
        hunk = palette.hunk,
        body = body,
    )
}

struct Palette {
    background: &'static str,
    foreground: &'static str,
    muted: &'static str,
    removed: &'static str,
    added: &'static str,
    hunk: &'static str,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Self {
                background: "#020617",
                foreground: "#f8fafc",
                muted: "#64748b",
                removed: "rgba(239, 68, 68, 0.25)",
                added: "rgba(16, 185, 129, 0.25)",
                hunk: "#1e293b",
            }
        } else {
            Self {
                background: "#ffffff",
                foreground: "#020617",
                muted: "#94a3b8",
                removed: "#fee2e2",
                added: "#dcfce7",
                hunk: "#f1f5f9",
            }
        }
    }
}

/// One rendered table row: optional left and right cells.
enum SideRow<'a> {
    Hunk(&'a str),
    Cells {
        left: Option<(usize, &'a str)>,
        right: Option<(usize, &'a str)>,
        left_class: &'static str,
        right_class: &'static str,
    },
}

/// Parse the unified patch into side-by-side rows and render them as `<tr>`s.
fn render_table(patch: &str) -> String {
    let mut out = String::new();
    for row in side_rows(patch) {
        match row {
            SideRow::Hunk(header) => {
                let _ = writeln!(
                    out,
                    "      <tr><td class=\"hunk\" colspan=\"4\">{}</td></tr>",
                    escape_html(header)
                );
            }
            SideRow::Cells { left, right, left_class, right_class } => {
                let (lno, ltext) = match left {
                    Some((no, text)) => (no.to_string(), escape_html(text)),
                    None => (String::new(), String::new()),
                };
                let (rno, rtext) = match right {
                    Some((no, text)) => (no.to_string(), escape_html(text)),
                    None => (String::new(), String::new()),
                };
                let _ = writeln!(
                    out,
                    "      <tr><td class=\"num\">{lno}</td><td class=\"{left_class}\">{ltext}</td><td class=\"num\">{rno}</td><td class=\"{right_class}\">{rtext}</td></tr>",
                );
            }
        }
    }
    out
}

/// Walk the patch's hunks, pairing each removal run positionally with the
/// addition run that follows it (unpaired remainders become one-sided rows).
fn side_rows(patch: &str) -> Vec<SideRow<'_>> {
    let mut rows = Vec::new();
    let mut old_no = 0usize;
    let mut new_no = 0usize;
    let mut in_hunk = false;

    // Removal run awaiting pairing: (old line number, text), plus how many
    // of them an addition already claimed.
    let mut pending: Vec<(usize, &str)> = Vec::new();
    let mut paired = 0usize;

    for line in patch.lines() {
        if let Some(header) = line.strip_prefix("@@") {
            flush_pending(&mut rows, &mut pending, &mut paired);
            if let Some((old_start, new_start)) = parse_hunk_header(header) {
                old_no = old_start;
                new_no = new_start;
                in_hunk = true;
                rows.push(SideRow::Hunk(line));
            }
            continue;
        }
        if !in_hunk {
            // File headers and anything before the first hunk.
            continue;
        }
        if let Some(text) = line.strip_prefix('-') {
            pending.push((old_no, text));
            old_no += 1;
        } else if let Some(text) = line.strip_prefix('+') {
            if paired < pending.len() {
                let (lno, ltext) = pending[paired];
                paired += 1;
                rows.push(SideRow::Cells {
                    left: Some((lno, ltext)),
                    right: Some((new_no, text)),
                    left_class: "del",
                    right_class: "add",
                });
            } else {
                rows.push(SideRow::Cells {
                    left: None,
                    right: Some((new_no, text)),
                    left_class: "ctx",
                    right_class: "add",
                });
            }
            new_no += 1;
        } else {
            let text = line.strip_prefix(' ').unwrap_or(line);
            flush_pending(&mut rows, &mut pending, &mut paired);
            rows.push(SideRow::Cells {
                left: Some((old_no, text)),
                right: Some((new_no, text)),
                left_class: "ctx",
                right_class: "ctx",
            });
            old_no += 1;
            new_no += 1;
        }
    }
    flush_pending(&mut rows, &mut pending, &mut paired);
    rows
}

/// Emit left-only rows for removals no addition claimed.
fn flush_pending<'a>(rows: &mut Vec<SideRow<'a>>, pending: &mut Vec<(usize, &'a str)>, paired: &mut usize) {
    for &(no, text) in pending.iter().skip(*paired) {
        rows.push(SideRow::Cells {
            left: Some((no, text)),
            right: None,
            left_class: "del",
            right_class: "ctx",
        });
    }
    pending.clear();
    *paired = 0;
}

/// Extract the old/new start lines from the remainder of a `@@` header,
/// e.g. ` -12,3 +14,4 @@`.
fn parse_hunk_header(rest: &str) -> Option<(usize, usize)> {
    let mut old_start = None;
    let mut new_start = None;
    for part in rest.split_whitespace() {
        if let Some(range) = part.strip_prefix('-') {
            old_start = range.split(',').next()?.parse().ok();
        } else if let Some(range) = part.strip_prefix('+') {
            new_start = range.split(',').next()?.parse().ok();
        }
    }
    Some((old_start?, new_start?))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::render_patch;

    #[test]
    fn plain_text_is_identity() {
        let patch = render_patch("a\n", "b\n");
        assert_eq!(patch_to_plain_text(&patch), patch);
    }

    #[test]
    fn html_is_standalone_document() {
        let patch = render_patch("a\n", "b\n");
        let html = patch_to_html(&patch, Theme::Light);
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<meta charset=\"utf-8\" />"));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn theme_selects_palette() {
        let patch = render_patch("a\n", "b\n");
        let light = patch_to_html(&patch, Theme::Light);
        assert!(light.contains("background: #ffffff"));
        let dark = patch_to_html(&patch, Theme::Dark);
        assert!(dark.contains("background: #020617"));
        // System is resolved by the caller; unresolved it renders light.
        let system = patch_to_html(&patch, Theme::System);
        assert!(system.contains("background: #ffffff"));
    }

    #[test]
    fn changed_pair_lands_side_by_side() {
        let patch = render_patch("a\nb\nc\n", "a\nx\nc\n");
        let html = patch_to_html(&patch, Theme::Light);
        assert!(html.contains("<td class=\"del\">b</td><td class=\"num\">2</td><td class=\"add\">x</td>"));
    }

    #[test]
    fn pure_insert_has_empty_left_cell() {
        let patch = render_patch("a\n", "a\nb\n");
        let html = patch_to_html(&patch, Theme::Light);
        assert!(html.contains("<td class=\"num\"></td><td class=\"ctx\"></td><td class=\"num\">2</td><td class=\"add\">b</td>"));
    }

    #[test]
    fn content_is_html_escaped() {
        let patch = render_patch("<b>&\n", "\"quoted\"\n");
        let html = patch_to_html(&patch, Theme::Light);
        assert!(html.contains("&lt;b&gt;&amp;"));
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(!html.contains("<b>&"));
    }

    #[test]
    fn hunk_headers_become_separator_rows() {
        let patch = render_patch("a\nb\n", "a\nB\n");
        let html = patch_to_html(&patch, Theme::Light);
        assert!(html.contains("class=\"hunk\""));
        assert!(html.contains("@@ -1,2 +1,2 @@"));
    }
}
