//! Request-scoped data types for the analysis pipeline.
//!
//! Nothing here survives past a single request: uploads are destroyed after
//! extraction, records after the response is sent.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded file as received from the multipart form.
#[derive(Debug, Clone)]
pub struct UploadItem {
    pub filename: String,
    /// Content type declared by the client for this part, if any.
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A résumé after text extraction.
#[derive(Debug, Clone)]
pub struct ResumeRecord {
    pub filename: String,
    pub text: String,
}

/// Correlation metadata minted at request start and echoed in every response,
/// success or failure.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub request_id: Uuid,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
}

impl RequestMeta {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl Default for RequestMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-candidate verdict as returned by the model.
///
/// Only types are enforced here: `overall_score` has no canonical range and
/// `filename` is not cross-checked against the uploads. Whatever the model
/// returns is surfaced as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAnalysis {
    pub filename: String,
    pub strengths: String,
    pub weaknesses: String,
    pub overall_score: f64,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// The exact JSON object the prompt instructs the model to return.
/// A reply that does not match this shape is rejected as malformed rather
/// than forwarded blindly.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelVerdict {
    pub job_summary: String,
    pub top_candidates: Vec<String>,
    pub candidates: Vec<CandidateAnalysis>,
}

/// The 200 response body: the model's verdict plus request correlation data.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub request_id: Uuid,
    pub timestamp: String,
    pub job_summary: String,
    pub top_candidates: Vec<String>,
    pub candidates: Vec<CandidateAnalysis>,
}

impl AnalysisResult {
    pub fn from_verdict(meta: &RequestMeta, verdict: ModelVerdict) -> Self {
        Self {
            success: true,
            request_id: meta.request_id,
            timestamp: meta.timestamp.clone(),
            job_summary: verdict.job_summary,
            top_candidates: verdict.top_candidates,
            candidates: verdict.candidates,
        }
    }
}
