//! Input validation for the analyze endpoint.
//!
//! Pure checks over in-memory uploads. Runs before anything touches disk, so
//! a rejected request never creates a transient file.

use crate::analysis::models::UploadItem;
use crate::errors::AppError;

/// Per-file size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const PDF_CONTENT_TYPE: &str = "application/pdf";

pub fn validate_request(uploads: &[UploadItem], description: &str) -> Result<(), AppError> {
    if uploads.is_empty() {
        return Err(AppError::InvalidInput(
            "at least one PDF file is required".to_string(),
        ));
    }

    if description.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "job description must not be empty".to_string(),
        ));
    }

    for upload in uploads {
        if upload.content_type.as_deref() != Some(PDF_CONTENT_TYPE) {
            return Err(AppError::InvalidInput(format!(
                "'{}' is not a PDF (content type: {})",
                upload.filename,
                upload.content_type.as_deref().unwrap_or("missing"),
            )));
        }

        if upload.data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::InvalidInput(format!(
                "'{}' exceeds the {} MiB upload limit",
                upload.filename,
                MAX_UPLOAD_BYTES / (1024 * 1024),
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn pdf_upload(filename: &str, bytes: usize) -> UploadItem {
        UploadItem {
            filename: filename.to_string(),
            content_type: Some(PDF_CONTENT_TYPE.to_string()),
            data: Bytes::from(vec![0u8; bytes]),
        }
    }

    #[test]
    fn test_rejects_empty_upload_set() {
        let err = validate_request(&[], "Backend engineer").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_blank_description() {
        let uploads = vec![pdf_upload("r.pdf", 128)];
        let err = validate_request(&uploads, "   \n\t ").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_non_pdf_content_type() {
        let uploads = vec![UploadItem {
            filename: "notes.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            data: Bytes::from_static(b"plain text"),
        }];
        let err = validate_request(&uploads, "Backend engineer").unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert!(msg.contains("notes.txt")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_missing_content_type() {
        let uploads = vec![UploadItem {
            filename: "r.pdf".to_string(),
            content_type: None,
            data: Bytes::from_static(b"%PDF-1.4"),
        }];
        assert!(validate_request(&uploads, "Backend engineer").is_err());
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let uploads = vec![pdf_upload("big.pdf", MAX_UPLOAD_BYTES + 1)];
        let err = validate_request(&uploads, "Backend engineer").unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert!(msg.contains("10 MiB")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_pdf_at_exact_size_limit() {
        let uploads = vec![pdf_upload("r.pdf", MAX_UPLOAD_BYTES)];
        assert!(validate_request(&uploads, "Backend engineer").is_ok());
    }

    #[test]
    fn test_accepts_multiple_valid_pdfs() {
        let uploads = vec![pdf_upload("a.pdf", 64), pdf_upload("b.pdf", 64)];
        assert!(validate_request(&uploads, "Backend engineer").is_ok());
    }
}
