//! Input collection and validation
//!
//! Checks the credential and the file allow-list before anything is encoded
//! or sent. A single bad file rejects the whole batch.

use crate::models::{Credential, Submission, UploadedImage};
use crate::{Result, ValidationError};
use std::fs;
use std::path::Path;

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// A submission that passed validation and may be sent.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub credential: Credential,
    pub images: Vec<UploadedImage>,
}

/// Text after the last `.`, lower-cased. A name without a dot is its own
/// extension.
pub fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

pub fn is_allowed_extension(name: &str) -> bool {
    let ext = file_extension(name);
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}

fn check_batch<'a>(
    credential: &Credential,
    mut names: impl Iterator<Item = &'a str>,
) -> std::result::Result<(), ValidationError> {
    if credential.is_empty() {
        return Err(ValidationError::MissingCredential);
    }

    if let Some(bad) = names.find(|name| !is_allowed_extension(name)) {
        return Err(ValidationError::UnsupportedFileType {
            name: bad.to_string(),
        });
    }

    Ok(())
}

pub fn validate_submission(
    submission: Submission,
) -> std::result::Result<ValidatedSubmission, ValidationError> {
    check_batch(
        &submission.credential,
        submission.images.iter().map(|image| image.name.as_str()),
    )?;

    Ok(ValidatedSubmission {
        credential: submission.credential,
        images: submission.images,
    })
}

/// The upload name a path gets: its file name, or the whole path if it has
/// none.
pub fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Same checks as [`validate_submission`], run on paths before any file is
/// read.
pub fn validate_paths<P: AsRef<Path>>(
    credential: &Credential,
    paths: &[P],
) -> std::result::Result<(), ValidationError> {
    let names: Vec<String> = paths.iter().map(|path| upload_name(path.as_ref())).collect();
    check_batch(credential, names.iter().map(String::as_str))
}

/// Read image files from disk, naming each upload after its file name.
pub fn load_images<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<UploadedImage>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let bytes = fs::read(path)?;
            let name = upload_name(path);
            tracing::debug!("Loaded {} ({} bytes)", name, bytes.len());
            Ok(UploadedImage::new(name, bytes))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn submission(token: &str, names: &[&str]) -> Submission {
        Submission::new(
            Credential::new(token),
            names
                .iter()
                .map(|name| UploadedImage::new(*name, vec![1, 2, 3]))
                .collect(),
        )
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(is_allowed_extension("plan.PNG"));
        assert!(is_allowed_extension("Section.JpEg"));
        assert!(is_allowed_extension("detail.webp"));
        assert!(!is_allowed_extension("drawing.pdf"));
        assert!(!is_allowed_extension("drawing.png.zip"));
    }

    #[test]
    fn test_name_without_dot_is_its_own_extension() {
        assert_eq!(file_extension("gif"), "gif");
        assert!(is_allowed_extension("gif"));
        assert!(!is_allowed_extension("drawing"));
    }

    #[test]
    fn test_empty_credential_is_rejected_first() {
        let err = validate_submission(submission("", &["bad.pdf"])).unwrap_err();
        assert_eq!(err, ValidationError::MissingCredential);
        assert_eq!(err.to_string(), "API Key required");
    }

    #[test]
    fn test_first_unsupported_file_rejects_batch() {
        let err =
            validate_submission(submission("key", &["a.png", "b.tiff", "c.bmp"])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedFileType {
                name: "b.tiff".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Only .jpg, .png, .gif, or .webp are supported"
        );
    }

    #[test]
    fn test_valid_submission_keeps_upload_order() {
        let validated =
            validate_submission(submission("key", &["b.jpg", "a.png", "c.gif"])).unwrap();
        let names: Vec<&str> = validated.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b.jpg", "a.png", "c.gif"]);
    }

    #[test]
    fn test_no_files_is_valid() {
        let validated = validate_submission(submission("key", &[])).unwrap();
        assert!(validated.images.is_empty());
    }

    #[test]
    fn test_load_images_reads_bytes_and_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("floor-plan.png");
        fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let images = load_images(&[&path]).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].name, "floor-plan.png");
        assert_eq!(images[0].bytes, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_paths_are_checked_without_reading() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("drawing.pdf");

        let err = validate_paths(&Credential::new("key"), &[&missing]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedFileType {
                name: "drawing.pdf".to_string()
            }
        );

        let err = validate_paths(&Credential::new(""), &[&missing]).unwrap_err();
        assert_eq!(err, ValidationError::MissingCredential);

        assert!(validate_paths(&Credential::new("key"), &[dir.path().join("plan.JPG")]).is_ok());
    }

    #[test]
    fn test_load_images_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_images(&[dir.path().join("missing.png")]).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
