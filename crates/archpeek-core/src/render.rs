//! Indented HTML listing of accepted entry paths.

use crate::catalog::AcceptedPaths;
use crate::security::entry_path;

/// Glyph markup preceding the archive name and directory entries.
pub const FOLDER_GLYPH: &str = r#"<span class="glyphicon glyphicon-folder-open"></span> "#;

/// Glyph markup preceding file entries.
pub const FILE_GLYPH: &str = r#"<span class="glyphicon glyphicon-file"></span> "#;

const INDENT_OPEN: &str = r#"<div class="indent">"#;
const INDENT_CLOSE: &str = "</div>";

/// Renders the peek listing for an archive.
///
/// Output starts with the folder glyph and `display_name`. Each path
/// (platform noise and desktop metadata are skipped) adds one indent `div`
/// per segment, a glyph, the last segment and the matching closing tags.
/// Double quotes are replaced with single quotes throughout.
///
/// Returns raw bytes: entry names carry no encoding guarantee.
///
/// # Examples
///
/// ```
/// use archpeek_core::catalog::AcceptedPaths;
/// use archpeek_core::render::render;
///
/// let paths: AcceptedPaths = ["test.txt"].into_iter().collect();
/// let html = render("test.zip", &paths);
/// assert_eq!(
///     html,
///     b"<span class='glyphicon glyphicon-folder-open'></span> test.zip\
///       <div class='indent'><span class='glyphicon glyphicon-file'></span> test.txt</div>"
/// );
/// ```
#[must_use]
pub fn render(display_name: &str, paths: &AcceptedPaths) -> Vec<u8> {
    let mut out = Vec::with_capacity(128 + paths.len() * 96);
    out.extend_from_slice(FOLDER_GLYPH.as_bytes());
    out.extend_from_slice(display_name.as_bytes());

    for path in paths.iter() {
        if entry_path::is_platform_noise(path) || entry_path::is_hidden_metadata(path) {
            continue;
        }

        let mut segments: Vec<&[u8]> = entry_path::segments(path).collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        for _ in 0..segments.len() {
            out.extend_from_slice(INDENT_OPEN.as_bytes());
        }

        let glyph = if entry_path::ends_in_separator(path) {
            FOLDER_GLYPH
        } else {
            FILE_GLYPH
        };
        out.extend_from_slice(glyph.as_bytes());
        out.extend_from_slice(segments.last().copied().unwrap_or_default());

        for _ in 0..segments.len() {
            out.extend_from_slice(INDENT_CLOSE.as_bytes());
        }
    }

    for byte in &mut out {
        if *byte == b'"' {
            *byte = b'\'';
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_str(name: &str, paths: &[&str]) -> String {
        let paths: AcceptedPaths = paths.iter().copied().collect();
        String::from_utf8(render(name, &paths)).unwrap_or_default()
    }

    #[test]
    fn test_single_file() {
        assert_eq!(
            render_str("test.zip", &["test.txt"]),
            "<span class='glyphicon glyphicon-folder-open'></span> test.zip\
             <div class='indent'><span class='glyphicon glyphicon-file'></span> test.txt</div>"
        );
    }

    #[test]
    fn test_nested_path() {
        assert_eq!(
            render_str("test-binary", &["test/path"]),
            "<span class='glyphicon glyphicon-folder-open'></span> test-binary\
             <div class='indent'><div class='indent'>\
             <span class='glyphicon glyphicon-file'></span> path</div></div>"
        );
    }

    #[test]
    fn test_trailing_separator_is_folder() {
        let html = render_str("a.tar", &["dir//"]);
        assert!(html.ends_with(
            "<div class='indent'><span class='glyphicon glyphicon-folder-open'></span> dir</div>"
        ));
    }

    #[test]
    fn test_skips_platform_artifacts() {
        assert_eq!(
            render_str("a.zip", &["__MACOSX/x", "dir/.DS_Store"]),
            "<span class='glyphicon glyphicon-folder-open'></span> a.zip"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            render_str("empty.zip", &[]),
            "<span class='glyphicon glyphicon-folder-open'></span> empty.zip"
        );
    }

    #[test]
    fn test_quotes_replaced() {
        let html = render_str("say \"hi\".zip", &["a\"b"]);
        assert!(!html.contains('"'));
        assert!(html.contains("say 'hi'.zip"));
        assert!(html.contains("a'b"));
    }

    #[test]
    fn test_non_utf8_passes_through() {
        let paths: AcceptedPaths = [&b"caf\xe9"[..]].into_iter().collect();
        let html = render("x.tar", &paths);
        assert!(String::from_utf8(html).is_err());
    }
}
