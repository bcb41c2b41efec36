use serde::{Deserialize, Serialize};

/// A single job posting found by the upstream search stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub job_url: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostings {
    pub job_postings: Vec<JobPosting>,
}
