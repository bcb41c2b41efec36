use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_JOB_TITLE: &str = "Unknown Job Title";

/// Anything addressed to one (company, job title) application.
pub trait ApplicationTarget {
    fn company_name(&self) -> Option<&str>;
    fn job_title(&self) -> Option<&str>;

    /// Company name, or `"Unknown Company"` when absent or blank.
    fn company_label(&self) -> &str {
        non_blank(self.company_name()).unwrap_or(UNKNOWN_COMPANY)
    }

    /// Job title, or `"Unknown Job Title"` when absent or blank.
    fn job_title_label(&self) -> &str {
        non_blank(self.job_title()).unwrap_or(UNKNOWN_JOB_TITLE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredCv {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    pub job_url: String,
    pub tailored_cv_content: Resume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredCvs {
    pub tailored_cvs: Vec<TailoredCv>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredCoverLetter {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    pub job_url: String,
    #[serde(default)]
    pub cover_letter_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredCoverLetters {
    pub tailored_cover_letters: Vec<TailoredCoverLetter>,
}

impl ApplicationTarget for TailoredCv {
    fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    fn job_title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }
}

impl ApplicationTarget for TailoredCoverLetter {
    fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    fn job_title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }
}
