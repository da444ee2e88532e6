//! Single-pass résumé screening pipeline:
//! validate inputs, extract text, build a prompt, call the model, parse.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod validation;
