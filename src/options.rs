//! Per-invocation options for the diff engine and the export theme flag.

use serde::{Deserialize, Serialize};

/// Unit used for intra-line highlight computation on changed row pairs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// No sub-line marking; each side of a changed pair is one unchanged span.
    Line,
    /// Word-level spans, whitespace tokens included.
    Word,
    /// Character-level spans.
    Char,
}

/// Options for a single [`build_diff`](crate::build_diff) call. Immutable per call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiffOptions {
    /// Intra-line highlight unit for changed rows.
    pub granularity: Granularity,
    /// Canonicalize both inputs as JSON before comparing (non-JSON input
    /// passes through untouched).
    pub json_mode: bool,
    /// When `false`, lines that differ only in whitespace runs compare equal.
    pub whitespace_sensitive: bool,
    /// An unchanged run longer than this many rows becomes collapsible.
    /// Values <= 0 make every non-empty unchanged run collapsible.
    pub collapse_threshold: i64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::Line,
            json_mode: false,
            whitespace_sensitive: true,
            collapse_threshold: 12,
        }
    }
}

/// Color palette selector for HTML export.
///
/// `System` is expected to be resolved to `Light` or `Dark` by the caller;
/// if it reaches the exporter unresolved it renders with the light palette.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Whether the dark palette applies.
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_defaults() {
        let opts = DiffOptions::default();
        assert_eq!(opts.granularity, Granularity::Line);
        assert!(!opts.json_mode);
        assert!(opts.whitespace_sensitive);
        assert_eq!(opts.collapse_threshold, 12);
    }

    #[test]
    fn options_round_trip_camel_case() {
        let json = r#"{"granularity":"word","jsonMode":true,"whitespaceSensitive":false,"collapseThreshold":0}"#;
        let opts: DiffOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.granularity, Granularity::Word);
        assert!(opts.json_mode);
        assert!(!opts.whitespace_sensitive);
        assert_eq!(opts.collapse_threshold, 0);
        assert_eq!(serde_json::to_string(&opts).unwrap(), json);
    }

    #[test]
    fn system_theme_is_not_dark() {
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::Light.is_dark());
        assert!(!Theme::System.is_dark());
    }
}
