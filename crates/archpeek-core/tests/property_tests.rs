//! Property-based tests for entry sanitization, rendering and path
//! containment.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use archpeek_core::InspectorConfig;
use archpeek_core::InspectionRequest;
use archpeek_core::Status;
use archpeek_core::StagingDir;
use archpeek_core::catalog::AcceptedPaths;
use archpeek_core::copy::CopyBuffer;
use archpeek_core::copy::copy_with_buffer;
use archpeek_core::inspect;
use archpeek_core::render::render;
use archpeek_core::security::entry_path;
use archpeek_core::security::validate_entry_path;
use archpeek_core::test_utils::create_test_tar;
use proptest::prelude::*;
use std::io::Cursor;
use tempfile::TempDir;

fn create_test_staging() -> (TempDir, StagingDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let staging = StagingDir::new(temp.path().to_path_buf()).expect("failed to create staging");
    (temp, staging)
}

proptest! {
    /// Sanitizing strips at most one trailing separator and never yields
    /// an empty path.
    #[test]
    fn prop_sanitize_strips_one_separator(raw in prop::collection::vec(any::<u8>(), 0..64)) {
        match entry_path::sanitize(&raw) {
            Some(clean) => {
                prop_assert!(!clean.is_empty());
                prop_assert!(raw.starts_with(clean));
                prop_assert!(raw.len() - clean.len() <= 1);
            }
            None => prop_assert!(raw.is_empty() || raw == b"/" || raw == b"\\"),
        }
    }

    /// The item name is always the final segment of the sanitized path.
    #[test]
    fn prop_item_name_is_last_segment(
        components in prop::collection::vec("[a-zA-Z0-9_.-]{1,12}", 1..6),
        trailing in any::<bool>()
    ) {
        let mut path = components.join("/");
        if trailing {
            path.push('/');
        }
        let name = entry_path::item_name(path.as_bytes()).expect("non-empty path");
        prop_assert_eq!(name, components.last().unwrap().as_bytes());
    }

    /// Any path under the macOS wrapper directory is excluded for every
    /// source format.
    #[test]
    fn prop_wrapper_dir_always_excluded(
        prefix in "([a-z]{1,8}/){0,3}",
        suffix in "(/[a-z._]{1,8}){0,3}",
        tar_derived in any::<bool>()
    ) {
        let path = format!("{prefix}__MACOSX{suffix}");
        prop_assert!(entry_path::is_excluded(path.as_bytes(), tar_derived));
    }

    /// Rendering is pure and emits one glyph per path plus the header.
    #[test]
    fn prop_render_glyph_count(
        paths in prop::collection::vec("[a-z]{1,8}(/[a-z]{1,8}){0,3}", 0..16),
        name in "[a-z]{1,12}\\.zip"
    ) {
        let accepted: AcceptedPaths = paths.iter().map(String::as_str).collect();
        let first = render(&name, &accepted);
        let second = render(&name, &accepted);
        prop_assert_eq!(&first, &second);

        let text = String::from_utf8(first).unwrap();
        prop_assert!(!text.contains('"'));
        prop_assert_eq!(text.matches("glyphicon-").count(), paths.len() + 1);
        prop_assert_eq!(text.matches("<div").count(), text.matches("</div>").count());
    }

    /// Any path with `..` is rejected.
    #[test]
    fn prop_parent_traversal_rejected(
        prefix in "([a-z]+/){0,5}",
        suffix in "([a-z]+/?){0,5}"
    ) {
        let (_temp, staging) = create_test_staging();
        let path = format!("{prefix}../{suffix}");
        prop_assert!(validate_entry_path(path.as_bytes(), &staging, 32).is_err());
    }

    /// Valid relative paths resolve inside the staging directory.
    #[test]
    fn prop_valid_relative_paths_contained(
        components in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..5)
    ) {
        let (_temp, staging) = create_test_staging();
        let path = components.join("/");
        let safe = validate_entry_path(path.as_bytes(), &staging, 32);
        prop_assert!(safe.is_ok());
        prop_assert!(staging.join(&safe.unwrap()).starts_with(staging.as_path()));
    }

    /// Copying reports exactly the number of bytes in the source.
    #[test]
    fn prop_copy_counts_bytes(data in prop::collection::vec(any::<u8>(), 0..200_000)) {
        let mut buffer = CopyBuffer::new();
        let mut out = Vec::new();
        let copied = copy_with_buffer(&mut Cursor::new(&data), &mut out, &mut buffer).unwrap();
        prop_assert_eq!(copied, data.len() as u64);
        prop_assert_eq!(out, data);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// The catalog and the rendered listing always agree on the entry count.
    #[test]
    fn prop_catalog_matches_listing(
        names in prop::collection::btree_set("[a-z]{1,8}\\.txt", 1..8)
    ) {
        let entries: Vec<(&str, &[u8])> =
            names.iter().map(|n| (n.as_str(), &b"data"[..])).collect();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("upload.tar");
        std::fs::write(&path, create_test_tar(&entries)).unwrap();

        let request = InspectionRequest::new("upload.tar", &path, "p", "application/x-tar");
        let result = inspect(request, &InspectorConfig::default());

        prop_assert_eq!(result.status, Status::Success);
        prop_assert_eq!(result.nested_items.len(), names.len());
        let text = result.peek_text.unwrap();
        prop_assert_eq!(text.matches("glyphicon-file").count(), names.len());
    }
}
