//! Theme-relative file references and image size probing.

use std::path::{Path, PathBuf};

use glam::IVec2;
use greeter_theme_core::ImageFormat;

/// Resolve `name` against the theme's search path unless it is absolute.
pub fn resolve_file(search_path: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        search_path.join(path)
    }
}

/// Pick the file for one state element: the first `altfileN` (N = 1, 2, ...)
/// that exists on disk, else `file`.
pub fn select_file(node: roxmltree::Node<'_, '_>, search_path: &Path) -> Option<PathBuf> {
    let alternative = (1..)
        .map_while(|n| node.attribute(format!("altfile{n}").as_str()))
        .map(|name| resolve_file(search_path, name))
        .find(|path| path.exists());
    if let Some(path) = alternative {
        log::debug!("using alternative file {}", path.display());
        return Some(path);
    }
    node.attribute("file").map(|name| resolve_file(search_path, name))
}

/// Natural pixel size of an image file, if it can be determined cheaply.
pub fn natural_size(path: &Path, format: ImageFormat) -> Option<IVec2> {
    let size = match format {
        ImageFormat::Svg => svg_size(path),
        ImageFormat::Raster => raster_size(path),
    };
    if size.is_none() {
        log::warn!("cannot determine the size of {}", path.display());
    }
    size
}

#[cfg(feature = "image-size")]
fn raster_size(path: &Path) -> Option<IVec2> {
    let (w, h) = image::image_dimensions(path).ok()?;
    Some(IVec2::new(i32::try_from(w).ok()?, i32::try_from(h).ok()?))
}

#[cfg(not(feature = "image-size"))]
fn raster_size(_path: &Path) -> Option<IVec2> {
    None
}

/// Read the root `width`/`height` of an SVG document. Only absolute
/// user-unit or `px` lengths count.
fn svg_size(path: &Path) -> Option<IVec2> {
    let source = std::fs::read_to_string(path).ok()?;
    let doc = crate::parse_xml(&source).ok()?;
    let root = doc.root_element();
    let length = |name: &str| -> Option<i32> {
        let raw = root.attribute(name)?.trim();
        let raw = raw.strip_suffix("px").unwrap_or(raw);
        let v: f64 = raw.parse().ok()?;
        (v.is_finite() && v >= 0.0).then(|| v.round() as i32)
    };
    Some(IVec2::new(length("width")?, length("height")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_relative_and_absolute() {
        let base = Path::new("/usr/share/themes/circles");
        assert_eq!(resolve_file(base, "bg.png"), base.join("bg.png"));
        assert_eq!(resolve_file(base, "/opt/bg.png"), PathBuf::from("/opt/bg.png"));
    }

    #[test]
    fn test_first_existing_altfile_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("two.png"), b"x").unwrap();
        fs::write(dir.path().join("three.png"), b"x").unwrap();

        let xml = r#"<normal file="one.png" altfile1="missing.png" altfile2="two.png" altfile3="three.png"/>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let picked = select_file(doc.root_element(), dir.path());
        assert_eq!(picked, Some(dir.path().join("two.png")));
    }

    #[test]
    fn test_falls_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let xml = r#"<normal file="one.png" altfile1="missing.png"/>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        assert_eq!(select_file(doc.root_element(), dir.path()), Some(dir.path().join("one.png")));
    }

    #[test]
    fn test_svg_size_from_root_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.svg");
        fs::write(
            &path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="120px" height="48"></svg>"#,
        )
        .unwrap();
        assert_eq!(natural_size(&path, ImageFormat::Svg), Some(IVec2::new(120, 48)));

        fs::write(&path, r#"<svg xmlns="http://www.w3.org/2000/svg" width="50%" height="48"></svg>"#).unwrap();
        assert_eq!(natural_size(&path, ImageFormat::Svg), None);
    }

    #[test]
    fn test_svg_size_with_doctype() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.svg");
        fs::write(
            &path,
            r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" width="32" height="16"></svg>"#,
        )
        .unwrap();
        assert_eq!(natural_size(&path, ImageFormat::Svg), Some(IVec2::new(32, 16)));
    }
}
