//! Structured candidate profile, both as parsed from the source résumé and as the
//! tailored payload embedded in each `TailoredCv`.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_JOB_TITLE: &str = "Job Title";
pub const DEFAULT_COMPANY: &str = "Unknown Company";
pub const DEFAULT_DATES: &str = "N/A";

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub contact_info: ContactInfo,
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Skills,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub location: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl ContactInfo {
    /// Present fields as `(field name, value)` in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("name", self.name.as_str()),
            ("location", self.location.as_str()),
            ("email", self.email.as_str()),
        ];
        if let Some(linkedin) = self.linkedin.as_deref() {
            fields.push(("linkedin", linkedin));
        }
        if let Some(github) = self.github.as_deref() {
            fields.push(("github", github));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responsibilities: Vec<String>,
}

impl WorkExperience {
    pub fn job_title_or_default(&self) -> &str {
        self.job_title.as_deref().unwrap_or(DEFAULT_JOB_TITLE)
    }

    pub fn company_or_default(&self) -> &str {
        self.company_name.as_deref().unwrap_or(DEFAULT_COMPANY)
    }

    pub fn dates_or_default(&self) -> &str {
        self.dates.as_deref().unwrap_or(DEFAULT_DATES)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub score: Option<String>,
}

/// Four fixed skill buckets. Bucket order is part of the rendered output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical_tools: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_knowledge: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_management: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
}

impl Skills {
    pub fn buckets(&self) -> [(&'static str, &[String]); 4] {
        [
            ("technical_tools", &self.technical_tools),
            ("domain_knowledge", &self.domain_knowledge),
            ("project_management", &self.project_management),
            ("languages", &self.languages),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}
