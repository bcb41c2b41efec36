//! CV renderer. Section order is fixed and every section heading is always
//! emitted, even when the underlying list is empty.

use crate::models::Resume;
use crate::render::blocks::Document;

pub const SECTION_ORDER: [&str; 8] = [
    "Contact Information",
    "Professional Summary",
    "Work Experience",
    "Education",
    "Certifications",
    "Skills",
    "Projects",
    "Interests",
];

pub fn render_cv(resume: &Resume) -> Document {
    let mut doc = Document::new();

    doc.heading(1, SECTION_ORDER[0]);
    for (field, value) in resume.contact_info.fields() {
        doc.paragraph(format!("{}: {}", capitalize(field), value));
    }

    doc.heading(1, SECTION_ORDER[1]);
    doc.paragraph(resume.summary.trim());

    doc.heading(1, SECTION_ORDER[2]);
    for job in &resume.work_experience {
        doc.heading(2, job.job_title_or_default())
            .paragraph(format!("Company: {}", job.company_or_default()))
            .paragraph(format!("Date: {}", job.dates_or_default()))
            .paragraph("Responsibilities:");
        for responsibility in &job.responsibilities {
            doc.bullet(responsibility.trim());
        }
    }

    doc.heading(1, SECTION_ORDER[3]);
    for edu in &resume.education {
        doc.heading(2, edu.degree.as_deref().unwrap_or_default())
            .paragraph(format!(
                "School: {}",
                edu.university.as_deref().unwrap_or_default()
            ))
            .paragraph(format!("Date: {}", edu.dates.as_deref().unwrap_or_default()));
    }

    doc.heading(1, SECTION_ORDER[4]);
    for cert in &resume.certifications {
        doc.paragraph(format!(
            "{}: {}",
            cert.name,
            cert.score.as_deref().unwrap_or_default()
        ));
    }

    doc.heading(1, SECTION_ORDER[5]);
    for (bucket, values) in resume.skills.buckets() {
        doc.paragraph(format!("{}: {}", bucket_label(bucket), values.join(", ")));
    }

    doc.heading(1, SECTION_ORDER[6]);
    for project in &resume.projects {
        doc.heading(2, project.project_name.as_deref().unwrap_or_default())
            .paragraph(project.description.as_deref().unwrap_or_default())
            .paragraph(format!(
                "Link: {}",
                project.link.as_deref().unwrap_or_default()
            ));
    }

    doc.heading(1, SECTION_ORDER[7]);
    for interest in &resume.interests {
        doc.bullet(interest.trim());
    }

    doc
}

/// First character upper-cased, the rest lower-cased (`"linkedin"` → `"Linkedin"`).
fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `"technical_tools"` → `"Technical tools"`.
fn bucket_label(bucket: &str) -> String {
    capitalize(&bucket.replace('_', " "))
}
