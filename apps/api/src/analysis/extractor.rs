//! PDF text extraction over transient scratch storage.
//!
//! Uploaded bytes are written to a uniquely named temp file inside the
//! configured upload directory, extracted with `pdf-extract`, and removed.
//! The `NamedTempFile` guard deletes the file on drop, which covers every
//! exit path: success, extraction failure, and any later pipeline failure.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Extracts the concatenated per-page text of a PDF, in page order.
/// `pdf-extract` joins pages directly, with no page-break marker.
pub async fn extract_resume_text(upload_dir: &Path, data: &Bytes) -> Result<String, AppError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".pdf")
        .tempfile_in(upload_dir)
        .context("failed to create transient upload file")?;

    file.write_all(data)
        .context("failed to write transient upload file")?;

    debug!(path = %file.path().display(), bytes = data.len(), "persisted upload for extraction");

    // pdf-extract is synchronous and can chew CPU on large documents.
    let path = file.path().to_owned();
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .context("extraction task panicked")?;

    // Dropping the guard unlinks the transient file.
    drop(file);

    // A document that cannot be opened or parsed is a client input problem.
    let text = extracted.map_err(|e| AppError::Extraction(e.to_string()))?;

    debug!(chars = text.len(), "extracted text from PDF");

    Ok(text)
}
