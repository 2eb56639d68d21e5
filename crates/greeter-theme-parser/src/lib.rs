//! Parser for greeter theme documents.
//!
//! Turns a `<greeter>` XML document into an [`ItemTree`]. Built on
//! `roxmltree` for the document and `nom` for attribute values.

mod files;
mod loader;
mod locale;
mod stock;
mod theme;
mod values;

use std::path::Path;

pub use files::{natural_size, resolve_file};
pub use loader::{load_theme, load_with_fallback, theme_document, ThemeLoad};
pub use locale::{locale_preferences, locale_score, preferences_for, select_translation};
pub use stock::stock_label;
pub use theme::parse;

use greeter_theme_core::{ItemTree, ParseError};

/// Environment variables consulted for the locale list, highest priority
/// first.
const LOCALE_VARIABLES: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Locale names in preference order, ending in `C`.
    pub locales: Vec<String>,
    /// Read image files to learn their natural size.
    pub read_image_sizes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            locales: vec!["C".to_string()],
            read_image_sizes: true,
        }
    }
}

impl ParseOptions {
    /// Options for the given locale names (most preferred first).
    pub fn with_locales<'a>(locales: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            locales: preferences_for(locales),
            ..Self::default()
        }
    }

    /// Build the locale list from the process environment. `LANGUAGE` may
    /// hold a colon-separated list.
    pub fn from_env() -> Self {
        let values: Vec<String> = LOCALE_VARIABLES
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .filter(|value| !value.is_empty())
            .collect();
        Self::with_locales(values.iter().flat_map(|value| value.split(':')))
    }
}

/// Read and parse a theme document. Relative file references resolve
/// against the document's directory.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<ItemTree, ParseError> {
    let search_path = path.parent().unwrap_or_else(|| Path::new("."));
    parse_file_in(path, search_path, options)
}

pub(crate) fn parse_file_in(path: &Path, search_path: &Path, options: &ParseOptions) -> Result<ItemTree, ParseError> {
    let document = std::fs::read_to_string(path).map_err(|e| ParseError::NoFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse(&document, search_path, options)
}

/// Parse XML that may carry a DOCTYPE. Theme documents name `greeter.dtd`
/// and many SVG files declare the SVG DTD.
pub(crate) fn parse_xml(source: &str) -> Result<roxmltree::Document<'_>, roxmltree::Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(source, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.locales, vec!["C"]);
        assert!(options.read_image_sizes);
    }

    #[test]
    fn test_with_locales_expands_each_name() {
        let options = ParseOptions::with_locales(["sv_FI", "sv"]);
        assert_eq!(options.locales, vec!["sv_FI", "sv", "C"]);
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/nonexistent/theme.xml"), &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::NoFile { .. }));
    }
}
