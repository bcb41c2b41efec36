//! Tailor turns the tailored-CV and cover-letter JSON produced by the agent
//! stage into per-application `.docx` documents under
//! `{output_root}/{company}-{job_title}/`.

pub mod config;
pub mod errors;
pub mod input;
pub mod materialize;
pub mod models;
pub mod partition;
pub mod render;
pub mod sanitize;
pub mod schema;
