//! Inspection configuration.

use std::path::PathBuf;

/// Reader class a declared media subtype belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtypeClass {
    /// Zip-like containers, read with the container reader.
    Zip,
    /// Other archives (tar family, 7z), read with the generic reader.
    Archive,
    /// Gzip-compressed streams, possibly wrapping a tar container.
    Gzip,
}

impl SubtypeClass {
    /// Returns a short name for this class.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Archive => "archive",
            Self::Gzip => "gzip",
        }
    }
}

/// Membership table mapping declared media subtypes to reader classes.
///
/// Subtypes are compared case-insensitively. Classes are checked in the
/// order zip, archive, gzip; the first match wins.
///
/// # Examples
///
/// ```
/// use archpeek_core::config::SubtypeClass;
/// use archpeek_core::config::SubtypeClasses;
///
/// let classes = SubtypeClasses::default();
/// assert_eq!(classes.classify("zip"), Some(SubtypeClass::Zip));
/// assert_eq!(classes.classify("X-TAR"), Some(SubtypeClass::Archive));
/// assert_eq!(classes.classify("gzip"), Some(SubtypeClass::Gzip));
/// assert_eq!(classes.classify("pdf"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeClasses {
    /// Subtypes handled by the container-archive reader.
    pub zip: Vec<String>,
    /// Subtypes handled by the generic-archive reader.
    pub archive: Vec<String>,
    /// Subtypes handled by the compressed-stream reader.
    pub gzip: Vec<String>,
}

impl Default for SubtypeClasses {
    fn default() -> Self {
        Self {
            zip: to_strings(&["zip", "x-zip", "x-zip-compressed", "zip-compressed"]),
            archive: to_strings(&[
                "x-tar",
                "tar",
                "x-gtar",
                "x-ustar",
                "x-bzip-compressed-tar",
                "x-bzip2-compressed-tar",
                "x-xz-compressed-tar",
                "x-zstd-compressed-tar",
                "x-7z-compressed",
            ]),
            gzip: to_strings(&[
                "gzip",
                "x-gzip",
                "x-gzip-compressed",
                "gzip-compressed",
                "x-compressed-tar",
                "x-tgz",
            ]),
        }
    }
}

impl SubtypeClasses {
    /// Returns the class a subtype belongs to, if any.
    #[must_use]
    pub fn classify(&self, subtype: &str) -> Option<SubtypeClass> {
        let matches = |set: &[String]| set.iter().any(|s| s.eq_ignore_ascii_case(subtype));

        if matches(&self.zip) {
            Some(SubtypeClass::Zip)
        } else if matches(&self.archive) {
            Some(SubtypeClass::Archive)
        } else if matches(&self.gzip) {
            Some(SubtypeClass::Gzip)
        } else {
            None
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Default segment limit for file entries.
///
/// A path of this many one-byte segments stays well under `PATH_MAX` once
/// joined onto a staging directory.
pub const DEFAULT_MAX_PATH_DEPTH: usize = 1024;

/// Configuration for one inspection run.
///
/// # Examples
///
/// ```
/// use archpeek_core::InspectorConfig;
/// use std::path::PathBuf;
///
/// let config = InspectorConfig {
///     staging_dir: Some(PathBuf::from("/var/tmp/peek")),
///     ..Default::default()
/// };
/// assert_eq!(config.max_path_depth, archpeek_core::DEFAULT_MAX_PATH_DEPTH);
/// ```
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Declared-subtype classification table.
    pub classes: SubtypeClasses,

    /// Directory under which transient entry files are written.
    ///
    /// `None` uses the parent directory of the inspected file.
    pub staging_dir: Option<PathBuf>,

    /// Maximum number of path segments a file entry may have.
    ///
    /// Directory entries are never written, so only containment applies
    /// to them.
    pub max_path_depth: usize,
}

impl Default for InspectorConfig {
    /// Default values:
    /// - `classes`: [`SubtypeClasses::default`]
    /// - `staging_dir`: `None` (next to the inspected file)
    /// - `max_path_depth`: [`DEFAULT_MAX_PATH_DEPTH`]
    fn default() -> Self {
        Self {
            classes: SubtypeClasses::default(),
            staging_dir: None,
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InspectorConfig::default();
        assert!(config.staging_dir.is_none());
        assert_eq!(config.max_path_depth, DEFAULT_MAX_PATH_DEPTH);
    }

    #[test]
    fn test_classify_case_insensitive() {
        let classes = SubtypeClasses::default();
        assert_eq!(classes.classify("ZIP"), Some(SubtypeClass::Zip));
        assert_eq!(classes.classify("X-7z-Compressed"), Some(SubtypeClass::Archive));
        assert_eq!(classes.classify("X-GZIP"), Some(SubtypeClass::Gzip));
    }

    #[test]
    fn test_classify_unknown() {
        let classes = SubtypeClasses::default();
        assert_eq!(classes.classify("octet-stream"), None);
        assert_eq!(classes.classify("directory"), None);
        assert_eq!(classes.classify(""), None);
    }

    #[test]
    fn test_first_class_wins() {
        let classes = SubtypeClasses {
            zip: vec!["both".into()],
            archive: vec!["both".into()],
            gzip: Vec::new(),
        };
        assert_eq!(classes.classify("both"), Some(SubtypeClass::Zip));
    }

    #[test]
    fn test_injected_table() {
        let classes = SubtypeClasses {
            zip: Vec::new(),
            archive: vec!["vnd.custom-tar".into()],
            gzip: Vec::new(),
        };
        assert_eq!(classes.classify("zip"), None);
        assert_eq!(classes.classify("vnd.custom-tar"), Some(SubtypeClass::Archive));
    }

    #[test]
    fn test_class_names() {
        assert_eq!(SubtypeClass::Zip.name(), "zip");
        assert_eq!(SubtypeClass::Archive.name(), "archive");
        assert_eq!(SubtypeClass::Gzip.name(), "gzip");
    }
}
