//! Axum route handler for the analyze endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::analysis::models::{AnalysisResult, RequestMeta, UploadItem};
use crate::analysis::pipeline::analyze;
use crate::errors::{AppError, RequestError};
use crate::state::AppState;

/// POST /analyze-resumes
///
/// Multipart form: one or more `files` parts (PDF) plus a `description`
/// text field. Returns the full `AnalysisResult` on success; every failure
/// is an error envelope carrying the same request id and timestamp.
pub async fn handle_analyze_resumes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, RequestError> {
    let meta = RequestMeta::new();
    info!(request_id = %meta.request_id, "starting resume analysis");

    let (uploads, description) = collect_form(multipart)
        .await
        .map_err(|e| RequestError::new(meta.clone(), e))?;

    let result = analyze(&state, &meta, uploads, &description)
        .await
        .map_err(|e| RequestError::new(meta.clone(), e))?;

    Ok(Json(result))
}

/// Drains the multipart stream into uploads and the description field.
/// Unknown fields are ignored.
async fn collect_form(mut multipart: Multipart) -> Result<(Vec<UploadItem>, String), AppError> {
    let mut uploads = Vec::new();
    let mut description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        // Capture part metadata before the field is consumed below.
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("files") => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("unreadable upload: {e}")))?;
                uploads.push(UploadItem {
                    filename,
                    content_type,
                    data,
                });
            }
            Some("description") => {
                description = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("unreadable description: {e}")))?;
            }
            _ => {}
        }
    }

    Ok((uploads, description))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::testing::StaticGateway;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "x-screener-test-boundary";

    fn test_state(upload_dir: &std::path::Path) -> AppState {
        AppState {
            gateway: Arc::new(StaticGateway("{}".to_string())),
            config: Config {
                ai_api_key: "test-key".to_string(),
                ai_api_endpoint: "http://localhost:0".to_string(),
                upload_dir: upload_dir.to_path_buf(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    fn file_part(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut part = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        part.extend_from_slice(data);
        part.extend_from_slice(b"\r\n");
        part
    }

    fn description_part(text: &str) -> Vec<u8> {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\n{text}\r\n"
        )
        .into_bytes()
    }

    fn multipart_request(parts: Vec<Vec<u8>>) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(&part);
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze-resumes")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_analysis_returns_typed_verdict() {
        let verdict = r#"{
            "job_summary": "Backend engineering role",
            "top_candidates": ["r.pdf"],
            "candidates": [
                {
                    "filename": "r.pdf",
                    "strengths": "deep backend experience",
                    "weaknesses": "no team lead experience",
                    "overall_score": 8.5,
                    "recommendation": "Highly recommended"
                }
            ]
        }"#;
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(dir.path());
        state.gateway = Arc::new(StaticGateway(verdict.to_string()));
        let app = build_router(state);

        let pdf = crate::analysis::extractor::fixtures::minimal_pdf(&[
            "Experienced backend engineer",
        ]);
        let request = multipart_request(vec![
            file_part("r.pdf", "application/pdf", &pdf),
            description_part("Looking for a backend engineer"),
        ]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["top_candidates"][0], "r.pdf");
        assert!((body["candidates"][0]["overall_score"].as_f64().unwrap() - 8.5).abs() < 1e-9);
        assert!(body.get("request_id").is_some());
        // Transient file is gone once the response is out.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_description_yields_400_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));

        let request = multipart_request(vec![file_part("r.pdf", "application/pdf", b"%PDF-1.4")]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body.get("request_id").is_some());
        assert!(body.get("timestamp").is_some());
        assert!(body.get("candidates").is_none());
    }

    #[tokio::test]
    async fn test_non_pdf_part_yields_400_before_any_disk_write() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));

        let request = multipart_request(vec![
            file_part("notes.txt", "text/plain", b"just some text"),
            description_part("Looking for a backend engineer"),
        ]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        // Rejected at validation: the scratch dir was never touched.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_pdf_yields_400_and_no_transient_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));

        let oversized = vec![0u8; crate::analysis::validation::MAX_UPLOAD_BYTES + 1];
        let request = multipart_request(vec![
            file_part("big.pdf", "application/pdf", &oversized),
            description_part("Looking for a backend engineer"),
        ]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_pdf_yields_400_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));

        let request = multipart_request(vec![
            file_part("r.pdf", "application/pdf", b"%PDF-1.4 truncated garbage"),
            description_part("Looking for a backend engineer"),
        ]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_health_endpoint_is_up() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
