//! Client-side pre-checks for candidate files
//!
//! The service re-validates uploads on its side; these checks exist so that
//! obviously bad files never reach the network layer.

use thiserror::Error;

use crate::constants::{ACCEPTED_IMAGE_TYPES, MAX_FILE_BYTES};
use crate::models::CandidateFile;

/// Why a candidate file was rejected. Messages are the user-facing text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a valid image file (JPEG, PNG, GIF, BMP, or WebP)")]
    InvalidType,
    #[error("File size must be less than 16MB")]
    TooLarge,
}

/// Check a candidate against the accepted type set and the size cap.
///
/// Type is checked before size, so an oversized file of the wrong type
/// reports the type problem.
pub fn validate(file: &CandidateFile) -> Result<(), ValidationError> {
    if !ACCEPTED_IMAGE_TYPES.contains(&file.mime_type.as_str()) {
        return Err(ValidationError::InvalidType);
    }
    if file.size_bytes() > MAX_FILE_BYTES {
        return Err(ValidationError::TooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str, size: usize) -> CandidateFile {
        CandidateFile {
            name: "test".to_string(),
            mime_type: mime.to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_accepts_all_listed_types() {
        for mime in ACCEPTED_IMAGE_TYPES {
            assert_eq!(validate(&file(mime, 1024)), Ok(()), "rejected {}", mime);
        }
    }

    #[test]
    fn test_rejects_invalid_type_regardless_of_size() {
        assert_eq!(
            validate(&file("application/pdf", 10)),
            Err(ValidationError::InvalidType)
        );
        assert_eq!(
            validate(&file("application/octet-stream", 1024)),
            Err(ValidationError::InvalidType)
        );
        assert_eq!(
            validate(&file("text/plain", 0)),
            Err(ValidationError::InvalidType)
        );
    }

    #[test]
    fn test_rejects_oversized_file() {
        assert_eq!(
            validate(&file("image/jpeg", MAX_FILE_BYTES + 1)),
            Err(ValidationError::TooLarge)
        );
    }

    #[test]
    fn test_accepts_file_at_exact_cap() {
        assert_eq!(validate(&file("image/png", MAX_FILE_BYTES)), Ok(()));
    }

    #[test]
    fn test_type_checked_before_size() {
        // Wrong type and too large: the type error wins.
        assert_eq!(
            validate(&file("application/pdf", MAX_FILE_BYTES + 1)),
            Err(ValidationError::InvalidType)
        );
    }

    #[test]
    fn test_rejection_messages_match_ui_text() {
        assert_eq!(
            ValidationError::InvalidType.to_string(),
            "Please select a valid image file (JPEG, PNG, GIF, BMP, or WebP)"
        );
        assert_eq!(
            ValidationError::TooLarge.to_string(),
            "File size must be less than 16MB"
        );
    }
}
