// Résumé input: locate the candidate's source file and extract its text.

pub mod extractor;
pub mod resolver;

pub use extractor::{DocumentTextExtractor, ExtractError, TextExtractor};
pub use resolver::{resolve_resume, InputError, ResolvedResume};
