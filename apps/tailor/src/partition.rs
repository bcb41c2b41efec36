//! Groups tailored records by application key, preserving first-seen key order
//! and source order within each key.

use std::collections::HashMap;

use crate::models::ApplicationTarget;
use crate::sanitize::sanitize;

/// Partition key `"{company}-{job_title}"`, both halves sanitized after the
/// fallback labels have been applied.
pub fn application_key<T: ApplicationTarget + ?Sized>(record: &T) -> String {
    format!(
        "{}-{}",
        sanitize(record.company_label()),
        sanitize(record.job_title_label())
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    pub key: String,
    pub records: Vec<T>,
}

/// Ordered mapping from key to the records that share it.
#[derive(Debug, Clone)]
pub struct Partitions<T> {
    groups: Vec<Partition<T>>,
}

impl<T> Partitions<T> {
    pub fn iter(&self) -> impl Iterator<Item = &Partition<T>> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

impl<T> IntoIterator for Partitions<T> {
    type Item = Partition<T>;
    type IntoIter = std::vec::IntoIter<Partition<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

pub fn partition<T, F>(records: impl IntoIterator<Item = T>, key_fn: F) -> Partitions<T>
where
    F: Fn(&T) -> String,
{
    let mut groups: Vec<Partition<T>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = key_fn(&record);
        match index.get(&key) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Partition {
                    key,
                    records: vec![record],
                });
            }
        }
    }

    Partitions { groups }
}

/// Partitions tailored records by [`application_key`].
pub fn partition_by_application<T: ApplicationTarget>(
    records: impl IntoIterator<Item = T>,
) -> Partitions<T> {
    partition(records, |r| application_key(r))
}

/// A key that more than one distinct raw (company, job title) pair maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub key: String,
    pub sources: Vec<(String, String)>,
}

/// Finds keys whose records came from distinct raw (company, job title) pairs.
/// Those records overwrite each other on disk.
pub fn find_collisions<T: ApplicationTarget>(partitions: &Partitions<T>) -> Vec<Collision> {
    partitions
        .iter()
        .filter_map(|group| {
            let mut sources: Vec<(String, String)> = Vec::new();
            for record in &group.records {
                let pair = (
                    record.company_label().to_string(),
                    record.job_title_label().to_string(),
                );
                if !sources.contains(&pair) {
                    sources.push(pair);
                }
            }
            (sources.len() > 1).then(|| Collision {
                key: group.key.clone(),
                sources,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TailoredCoverLetter;

    fn letter(company: Option<&str>, title: Option<&str>, body: &str) -> TailoredCoverLetter {
        TailoredCoverLetter {
            company_name: company.map(String::from),
            job_title: title.map(String::from),
            job_url: "https://jobs.example.com".to_string(),
            cover_letter_content: Some(body.to_string()),
        }
    }

    fn bodies(records: &[TailoredCoverLetter]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.cover_letter_content.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_application_key_sanitizes_both_halves() {
        let l = letter(Some("Acme Corp"), Some("Backend Engineer"), "");
        assert_eq!(application_key(&l), "Acme_Corp-Backend_Engineer");
    }

    #[test]
    fn test_application_key_fallbacks() {
        let l = letter(None, Some(" "), "");
        assert_eq!(application_key(&l), "Unknown_Company-Unknown_Job_Title");
    }

    #[test]
    fn test_first_seen_key_order() {
        let records = vec![
            letter(Some("B"), Some("x"), "1"),
            letter(Some("A"), Some("x"), "2"),
            letter(Some("B"), Some("x"), "3"),
            letter(Some("C"), Some("x"), "4"),
        ];
        let parts = partition_by_application(records);
        let keys: Vec<_> = parts.keys().collect();
        assert_eq!(keys, vec!["B-x", "A-x", "C-x"]);
    }

    #[test]
    fn test_source_order_within_key() {
        let records = vec![
            letter(Some("B"), Some("x"), "1"),
            letter(Some("A"), Some("x"), "2"),
            letter(Some("B"), Some("x"), "3"),
        ];
        let parts = partition_by_application(records);
        let grouped: Vec<_> = parts
            .iter()
            .map(|p| (p.key.as_str(), bodies(&p.records)))
            .collect();
        assert_eq!(grouped, vec![("B-x", vec!["1", "3"]), ("A-x", vec!["2"])]);
    }

    #[test]
    fn test_partition_completeness() {
        let records: Vec<_> = (0..10)
            .map(|i| letter(Some(&format!("Co{}", i % 3)), Some("Dev"), &i.to_string()))
            .collect();
        let parts = partition_by_application(records);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.record_count(), 10);

        let mut seen: Vec<usize> = parts
            .into_iter()
            .flat_map(|p| p.records)
            .map(|r| r.cover_letter_content.unwrap().parse().unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_case_variants_are_separate_keys() {
        let records = vec![
            letter(Some("Acme Corp"), Some("Dev"), "a"),
            letter(Some("acme corp"), Some("Dev"), "b"),
        ];
        let parts = partition_by_application(records);
        let keys: Vec<_> = parts.keys().collect();
        assert_eq!(keys, vec!["Acme_Corp-Dev", "acme_corp-Dev"]);
    }

    #[test]
    fn test_collision_detected_for_distinct_raw_pairs() {
        let records = vec![
            letter(Some("Acme Corp"), Some("Dev"), "a"),
            letter(Some("Acme/Corp"), Some("Dev"), "b"),
            letter(Some("Acme Corp"), Some("Dev"), "c"),
        ];
        let parts = partition_by_application(records);
        assert_eq!(parts.len(), 2);

        let records = vec![
            letter(Some("Acme Corp"), Some("Dev"), "a"),
            letter(Some("Acme  Corp "), Some("Dev"), "b"),
        ];
        let parts = partition_by_application(records);
        assert_eq!(parts.len(), 2, "double space keeps a distinct key");

        let records = vec![
            letter(Some("Acme: Corp"), Some("Dev"), "a"),
            letter(Some("Acme Corp"), Some("Dev"), "b"),
            letter(Some("Acme Corp"), Some("Dev"), "c"),
        ];
        let parts = partition_by_application(records);
        let collisions = find_collisions(&parts);
        assert_eq!(
            collisions,
            vec![Collision {
                key: "Acme_Corp-Dev".to_string(),
                sources: vec![
                    ("Acme: Corp".to_string(), "Dev".to_string()),
                    ("Acme Corp".to_string(), "Dev".to_string()),
                ],
            }]
        );
    }

    #[test]
    fn test_repeated_identical_pair_is_not_a_collision() {
        let records = vec![
            letter(Some("Acme"), Some("Dev"), "a"),
            letter(Some("Acme"), Some("Dev"), "b"),
        ];
        assert!(find_collisions(&partition_by_application(records)).is_empty());
    }
}
