//! Prompt construction for résumé screening.
//! Pure string assembly: no network, no disk.

use crate::analysis::models::ResumeRecord;

const TASK_FRAMING: &str = "\
You are an AI recruitment assistant. Compare each of the following resumes \
against the job description and rank the candidates.";

const OUTPUT_CONTRACT: &str = r#"OUTPUT SCHEMA (return exactly this structure):
{
  "job_summary": "one-paragraph summary of the job description",
  "top_candidates": ["filename of each top candidate, best first"],
  "candidates": [
    {
      "filename": "string",
      "strengths": "string",
      "weaknesses": "string",
      "overall_score": number,
      "recommendation": "string",
      "comments": "string (optional)"
    }
  ]
}

RULES:
1. Include every resume exactly once in "candidates", keyed by its filename.
2. Judge strictly against the job description, not against an ideal candidate.
3. Return ONLY the JSON object. No prose, no markdown fences, no explanations."#;

/// Builds the single instruction prompt sent upstream.
///
/// Embeds the job description verbatim and every résumé's filename and text
/// in upload order. Ordering is part of the prompt's reproducibility, so
/// callers must pass records in the order the files were uploaded.
pub fn build_analysis_prompt(description: &str, resumes: &[ResumeRecord]) -> String {
    let mut prompt = String::new();

    prompt.push_str(TASK_FRAMING);
    prompt.push_str("\n\nJOB DESCRIPTION:\n");
    prompt.push_str(description);
    prompt.push_str("\n\nRESUMES:\n");

    for resume in resumes {
        prompt.push_str("\n--- Resume: ");
        prompt.push_str(&resume.filename);
        prompt.push_str(" ---\n");
        prompt.push_str(&resume.text);
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(OUTPUT_CONTRACT);

    prompt
}
