//! Theme directory loading with default-theme fallback.

use std::fs;
use std::path::{Path, PathBuf};

use greeter_theme_core::{ItemTree, ParseError};

use crate::{parse_file_in, ParseOptions};

/// Descriptor file names tried in a theme directory, in order.
const DESCRIPTORS: [&str; 2] = ["MdmGreeterTheme.desktop", "GdmGreeterTheme.desktop"];

/// Outcome of [`load_with_fallback`].
#[derive(Debug)]
pub enum ThemeLoad {
    Themed {
        tree: ItemTree,
        /// Name of the theme that was actually loaded.
        theme: String,
        fallback_used: bool,
    },
    /// Neither theme could be parsed; the caller should use its non-themed
    /// interface.
    Unthemed { errors: Vec<(String, ParseError)> },
}

/// Path of the document a theme directory points at: the descriptor's
/// `Greeter=` key, or `<name>.xml`.
pub fn theme_document(theme_dir: &Path, name: &str) -> PathBuf {
    let greeter = DESCRIPTORS
        .iter()
        .find_map(|file| fs::read_to_string(theme_dir.join(file)).ok())
        .and_then(|desktop| greeter_key(&desktop));
    match greeter {
        Some(file) => theme_dir.join(file),
        None => theme_dir.join(format!("{name}.xml")),
    }
}

fn greeter_key(desktop: &str) -> Option<String> {
    desktop
        .lines()
        .map(str::trim)
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "Greeter")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Load `<themes_dir>/<name>`. The theme directory is the search path for
/// relative file references.
pub fn load_theme(themes_dir: &Path, name: &str, options: &ParseOptions) -> Result<ItemTree, ParseError> {
    let theme_dir = themes_dir.join(name);
    let document = theme_document(&theme_dir, name);
    log::debug!("loading theme {name} from {}", document.display());
    parse_file_in(&document, &theme_dir, options)
}

/// Load `name`, retrying with `default_name` when it fails.
pub fn load_with_fallback(themes_dir: &Path, name: &str, default_name: &str, options: &ParseOptions) -> ThemeLoad {
    let mut errors = Vec::new();
    for (theme, fallback_used) in [(name, false), (default_name, true)] {
        if fallback_used && theme == name {
            continue;
        }
        match load_theme(themes_dir, theme, options) {
            Ok(tree) => {
                return ThemeLoad::Themed {
                    tree,
                    theme: theme.to_string(),
                    fallback_used,
                }
            }
            Err(err) => {
                log::warn!("cannot load theme {theme}: {err}");
                errors.push((theme.to_string(), err));
            }
        }
    }
    ThemeLoad::Unthemed { errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<greeter><item type="rect" id="bg"/></greeter>"#;

    fn write_theme(root: &Path, name: &str, desktop: Option<&str>, file: &str, body: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(desktop) = desktop {
            fs::write(dir.join("GdmGreeterTheme.desktop"), desktop).unwrap();
        }
        fs::write(dir.join(file), body).unwrap();
    }

    #[test]
    fn test_greeter_key_from_descriptor() {
        let root = tempfile::tempdir().unwrap();
        write_theme(
            root.path(),
            "circles",
            Some("[GdmGreeterTheme]\nName=Circles\nGreeter=main.xml\n"),
            "main.xml",
            MINIMAL,
        );
        let tree = load_theme(root.path(), "circles", &ParseOptions::default()).unwrap();
        assert!(tree.lookup_id("bg").is_some());
    }

    #[test]
    fn test_default_document_name() {
        let root = tempfile::tempdir().unwrap();
        write_theme(root.path(), "plain", None, "plain.xml", MINIMAL);
        assert!(load_theme(root.path(), "plain", &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_missing_theme_is_no_file() {
        let root = tempfile::tempdir().unwrap();
        let err = load_theme(root.path(), "ghost", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::NoFile { .. }));
    }

    #[test]
    fn test_fallback_to_default_theme() {
        let root = tempfile::tempdir().unwrap();
        write_theme(root.path(), "broken", None, "broken.xml", "<greeter><item></greeter>");
        write_theme(root.path(), "happy", None, "happy.xml", MINIMAL);

        match load_with_fallback(root.path(), "broken", "happy", &ParseOptions::default()) {
            ThemeLoad::Themed { theme, fallback_used, .. } => {
                assert_eq!(theme, "happy");
                assert!(fallback_used);
            }
            other => panic!("Expected themed load, got {other:?}"),
        }
    }

    #[test]
    fn test_unthemed_carries_both_errors() {
        let root = tempfile::tempdir().unwrap();
        match load_with_fallback(root.path(), "a", "b", &ParseOptions::default()) {
            ThemeLoad::Unthemed { errors } => {
                let names: Vec<_> = errors.iter().map(|(name, _)| name.as_str()).collect();
                assert_eq!(names, ["a", "b"]);
            }
            other => panic!("Expected unthemed, got {other:?}"),
        }
    }
}
