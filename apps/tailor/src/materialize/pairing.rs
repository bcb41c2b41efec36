//! Explicit join of CV and cover-letter partitions by application key.
//! Unmatched keys on either side are valid applications.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub key: String,
    pub has_cv: bool,
    pub has_cover_letter: bool,
}

impl Application {
    pub fn is_complete(&self) -> bool {
        self.has_cv && self.has_cover_letter
    }
}

/// One row per distinct key: CV keys in first-seen order, then keys that only
/// have a cover letter.
pub fn index_applications<'a>(
    cv_keys: impl IntoIterator<Item = &'a str>,
    cover_letter_keys: impl IntoIterator<Item = &'a str>,
) -> Vec<Application> {
    let mut rows: Vec<Application> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for key in cv_keys {
        if index.contains_key(key) {
            continue;
        }
        index.insert(key, rows.len());
        rows.push(Application {
            key: key.to_string(),
            has_cv: true,
            has_cover_letter: false,
        });
    }

    for key in cover_letter_keys {
        match index.get(key) {
            Some(&i) => rows[i].has_cover_letter = true,
            None => {
                index.insert(key, rows.len());
                rows.push(Application {
                    key: key.to_string(),
                    has_cv: false,
                    has_cover_letter: true,
                });
            }
        }
    }

    rows
}
