//! Schema validation for the JSON records produced by the upstream stages.
//!
//! Shape (required fields, primitive types) is enforced by the serde derives on the
//! model types; `Schema::check` adds the rules serde cannot express: non-empty
//! required scalars and non-empty top-level collections.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ArtifactError;
use crate::models::{JobPostings, Resume, TailoredCoverLetters, TailoredCvs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Resume,
    JobPostings,
    TailoredCvs,
    TailoredCoverLetters,
}

impl SchemaKind {
    /// Name of the top-level array field for collection schemas.
    pub fn collection_field(self) -> Option<&'static str> {
        match self {
            SchemaKind::Resume => None,
            SchemaKind::JobPostings => Some("job_postings"),
            SchemaKind::TailoredCvs => Some("tailored_cvs"),
            SchemaKind::TailoredCoverLetters => Some("tailored_cover_letters"),
        }
    }
}

/// A validated record of any schema kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Resume(Resume),
    JobPostings(JobPostings),
    TailoredCvs(TailoredCvs),
    TailoredCoverLetters(TailoredCoverLetters),
}

pub trait Schema: DeserializeOwned {
    const KIND: SchemaKind;

    /// Semantic checks run after deserialization succeeds.
    fn check(&self) -> Result<(), ArtifactError>;
}

/// Validates raw JSON against the given schema kind.
pub fn validate(raw: Value, kind: SchemaKind) -> Result<Record, ArtifactError> {
    match kind {
        SchemaKind::Resume => validate_as::<Resume>(raw).map(Record::Resume),
        SchemaKind::JobPostings => validate_as::<JobPostings>(raw).map(Record::JobPostings),
        SchemaKind::TailoredCvs => validate_as::<TailoredCvs>(raw).map(Record::TailoredCvs),
        SchemaKind::TailoredCoverLetters => {
            validate_as::<TailoredCoverLetters>(raw).map(Record::TailoredCoverLetters)
        }
    }
}

/// Typed variant of [`validate`].
pub fn validate_as<T: Schema>(raw: Value) -> Result<T, ArtifactError> {
    let record: T =
        serde_json::from_value(raw).map_err(|e| ArtifactError::Validation(e.to_string()))?;
    record.check()?;
    Ok(record)
}

fn require_non_empty(value: &str, path: &str) -> Result<(), ArtifactError> {
    if value.trim().is_empty() {
        return Err(ArtifactError::Validation(format!(
            "required field '{path}' is empty"
        )));
    }
    Ok(())
}

fn require_records<T>(records: &[T], kind: SchemaKind) -> Result<(), ArtifactError> {
    if records.is_empty() {
        let field = kind.collection_field().unwrap_or("records");
        return Err(ArtifactError::EmptyCollection(field.to_string()));
    }
    Ok(())
}

fn check_resume(resume: &Resume, prefix: &str) -> Result<(), ArtifactError> {
    require_non_empty(
        &resume.contact_info.name,
        &format!("{prefix}contact_info.name"),
    )?;
    require_non_empty(
        &resume.contact_info.email,
        &format!("{prefix}contact_info.email"),
    )?;
    require_non_empty(&resume.summary, &format!("{prefix}summary"))
}

impl Schema for Resume {
    const KIND: SchemaKind = SchemaKind::Resume;

    fn check(&self) -> Result<(), ArtifactError> {
        check_resume(self, "")
    }
}

impl Schema for JobPostings {
    const KIND: SchemaKind = SchemaKind::JobPostings;

    fn check(&self) -> Result<(), ArtifactError> {
        require_records(&self.job_postings, Self::KIND)
    }
}

impl Schema for TailoredCvs {
    const KIND: SchemaKind = SchemaKind::TailoredCvs;

    fn check(&self) -> Result<(), ArtifactError> {
        require_records(&self.tailored_cvs, Self::KIND)?;
        for (i, cv) in self.tailored_cvs.iter().enumerate() {
            check_resume(
                &cv.tailored_cv_content,
                &format!("tailored_cvs[{i}].tailored_cv_content."),
            )?;
        }
        Ok(())
    }
}

impl Schema for TailoredCoverLetters {
    const KIND: SchemaKind = SchemaKind::TailoredCoverLetters;

    fn check(&self) -> Result<(), ArtifactError> {
        require_records(&self.tailored_cover_letters, Self::KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Skills;
    use serde_json::json;

    fn resume_json() -> Value {
        json!({
            "contact_info": { "name": "Ada Lovelace", "location": "London", "email": "ada@example.com" },
            "summary": "Analytical engine programmer",
            "work_experience": [
                { "job_title": "Analyst", "company_name": "Babbage & Co", "dates": "1842 - 1843",
                  "responsibilities": ["Wrote notes", "Designed algorithm", "Published translation"] }
            ],
            "skills": { "technical_tools": ["Difference engine", "Analytical engine"], "languages": ["English", "French"] }
        })
    }

    #[test]
    fn test_valid_resume_accepted() {
        let record = validate(resume_json(), SchemaKind::Resume).unwrap();
        let Record::Resume(resume) = record else {
            panic!("expected resume record");
        };
        assert_eq!(resume.contact_info.name, "Ada Lovelace");
        assert!(resume.contact_info.linkedin.is_none());
    }

    #[test]
    fn test_list_order_preserved() {
        let resume: Resume = validate_as(resume_json()).unwrap();
        assert_eq!(
            resume.work_experience[0].responsibilities,
            vec!["Wrote notes", "Designed algorithm", "Published translation"]
        );
        assert_eq!(
            resume.skills.technical_tools,
            vec!["Difference engine", "Analytical engine"]
        );
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let mut raw = resume_json();
        raw.as_object_mut().unwrap().remove("summary");
        let err = validate(raw, SchemaKind::Resume).unwrap_err();
        assert!(matches!(err, ArtifactError::Validation(ref m) if m.contains("summary")));
    }

    #[test]
    fn test_wrong_primitive_type_rejected() {
        let mut raw = resume_json();
        raw["summary"] = json!(42);
        assert!(matches!(
            validate(raw, SchemaKind::Resume),
            Err(ArtifactError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_required_scalar_rejected() {
        let mut raw = resume_json();
        raw["contact_info"]["email"] = json!("  ");
        let err = validate(raw, SchemaKind::Resume).unwrap_err();
        assert_eq!(
            err,
            ArtifactError::Validation("required field 'contact_info.email' is empty".to_string())
        );
    }

    #[test]
    fn test_empty_cv_collection_rejected() {
        let err = validate(json!({ "tailored_cvs": [] }), SchemaKind::TailoredCvs).unwrap_err();
        assert_eq!(err, ArtifactError::EmptyCollection("tailored_cvs".to_string()));
    }

    #[test]
    fn test_empty_job_postings_rejected() {
        let err = validate(json!({ "job_postings": [] }), SchemaKind::JobPostings).unwrap_err();
        assert_eq!(err, ArtifactError::EmptyCollection("job_postings".to_string()));
    }

    #[test]
    fn test_missing_collection_field_is_validation_error() {
        let err = validate(json!({}), SchemaKind::TailoredCoverLetters).unwrap_err();
        assert!(matches!(err, ArtifactError::Validation(_)));
    }

    #[test]
    fn test_job_posting_optional_date() {
        let raw = json!({ "job_postings": [{
            "job_title": "Backend Engineer", "company_name": "Acme Corp", "location": "Remote",
            "job_url": "https://acme.example/jobs/1", "description": "Build services"
        }]});
        let postings: JobPostings = validate_as(raw).unwrap();
        assert_eq!(postings.job_postings[0].posted_date, None);
    }

    #[test]
    fn test_nested_cv_error_names_path() {
        let raw = json!({ "tailored_cvs": [
            { "company_name": "Acme", "job_title": "Dev", "job_url": "u", "tailored_cv_content": resume_json() },
            { "company_name": "Acme", "job_title": "Ops", "job_url": "u",
              "tailored_cv_content": { "contact_info": { "name": "", "location": "", "email": "a@b.c" }, "summary": "s" } }
        ]});
        let err = validate(raw, SchemaKind::TailoredCvs).unwrap_err();
        assert_eq!(
            err,
            ArtifactError::Validation(
                "required field 'tailored_cvs[1].tailored_cv_content.contact_info.name' is empty"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_cover_letter_without_body_accepted() {
        let raw = json!({ "tailored_cover_letters": [
            { "company_name": "Acme", "job_title": "Dev", "job_url": "u" }
        ]});
        let letters: TailoredCoverLetters = validate_as(raw).unwrap();
        assert!(letters.tailored_cover_letters[0].cover_letter_content.is_none());
    }

    #[test]
    fn test_null_lists_treated_as_empty() {
        let mut content = resume_json();
        content["certifications"] = Value::Null;
        content["skills"] = Value::Null;
        content["work_experience"][0]["responsibilities"] = Value::Null;
        let raw = json!({ "tailored_cvs": [
            { "company_name": "Acme", "job_title": "Dev", "job_url": "u", "tailored_cv_content": content },
            { "company_name": "Acme", "job_title": "Ops", "job_url": "u", "tailored_cv_content": resume_json() }
        ]});

        let Record::TailoredCvs(cvs) = validate(raw, SchemaKind::TailoredCvs).unwrap() else {
            panic!("expected tailored cvs record");
        };
        assert_eq!(cvs.tailored_cvs.len(), 2);
        let first = &cvs.tailored_cvs[0].tailored_cv_content;
        assert!(first.certifications.is_empty());
        assert_eq!(first.skills, Skills::default());
        assert!(first.work_experience[0].responsibilities.is_empty());
    }
}
