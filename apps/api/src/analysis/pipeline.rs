//! The analysis pipeline: validate, extract, build prompt, call upstream,
//! parse. Strictly sequential per request; no stage is retried or revisited.

use tracing::{debug, info};

use crate::analysis::extractor::extract_resume_text;
use crate::analysis::models::{AnalysisResult, RequestMeta, ResumeRecord, UploadItem};
use crate::analysis::parser::parse_verdict;
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::validation::validate_request;
use crate::errors::AppError;
use crate::llm_client::AiGateway;
use crate::state::AppState;

/// Runs the full pipeline for one request.
/// Uploads are consumed: the bytes only live on disk while their extraction
/// is in flight, and every transient file is gone by the time this returns.
pub async fn analyze(
    state: &AppState,
    meta: &RequestMeta,
    uploads: Vec<UploadItem>,
    description: &str,
) -> Result<AnalysisResult, AppError> {
    validate_request(&uploads, description)?;

    // Extraction order is upload order; the prompt depends on it.
    let mut resumes = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let text = extract_resume_text(&state.config.upload_dir, &upload.data).await?;
        info!(
            request_id = %meta.request_id,
            filename = %upload.filename,
            chars = text.len(),
            "extracted resume text"
        );
        resumes.push(ResumeRecord {
            filename: upload.filename,
            text,
        });
    }

    screen(state.gateway.as_ref(), meta, description, &resumes).await
}

/// The post-extraction half of the pipeline: prompt, upstream call, parse.
/// Split out so it can be exercised without real PDFs on disk.
pub async fn screen(
    gateway: &dyn AiGateway,
    meta: &RequestMeta,
    description: &str,
    resumes: &[ResumeRecord],
) -> Result<AnalysisResult, AppError> {
    let prompt = build_analysis_prompt(description, resumes);
    debug!(request_id = %meta.request_id, prompt_chars = prompt.len(), "sending prompt upstream");

    let completion = gateway.complete(&prompt).await?;
    let verdict = parse_verdict(&completion)?;

    info!(
        request_id = %meta.request_id,
        candidates = verdict.candidates.len(),
        "analysis complete"
    );

    Ok(AnalysisResult::from_verdict(meta, verdict))
}
