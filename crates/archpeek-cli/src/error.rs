//! Error conversion utilities for CLI.
//!
//! Converts archpeek-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use archpeek_core::InspectionError;

/// Converts `InspectionError` to a user-friendly anyhow error with context.
pub fn convert_inspection_error(err: InspectionError, media_type: &str) -> anyhow::Error {
    match err {
        InspectionError::InvalidMediaType { media_type } => {
            anyhow!(
                "Invalid media type '{media_type}'\n\
                 HINT: Media types have the form type/subtype, e.g. application/zip."
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing media type '{media_type}'")),
    }
}

/// Adds context to an error raised while handling a declared media type.
pub fn add_media_type_context<T>(
    result: Result<T, InspectionError>,
    media_type: &str,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_inspection_error(e, media_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_invalid_media_type() {
        let err = InspectionError::InvalidMediaType {
            media_type: "zip".to_string(),
        };
        let msg = format!("{:?}", convert_inspection_error(err, "zip"));
        assert!(msg.contains("Invalid media type 'zip'"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_other_errors_keep_context() {
        let err = InspectionError::InvalidArchive("truncated".to_string());
        let msg = format!("{:?}", convert_inspection_error(err, "application/zip"));
        assert!(msg.contains("application/zip"));
        assert!(msg.contains("truncated"));
    }
}
