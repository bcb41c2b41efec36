pub mod job;
pub mod resume;
pub mod tailored;

pub use job::{JobPosting, JobPostings};
pub use resume::{Certification, ContactInfo, Education, Project, Resume, Skills, WorkExperience};
pub use tailored::{
    ApplicationTarget, TailoredCoverLetter, TailoredCoverLetters, TailoredCv, TailoredCvs,
};
