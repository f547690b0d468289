//! Recency resolver for updateable records
//!
//! An edit to an opportunity or cause is republished as a brand-new post
//! carrying the same application-assigned id. This module collapses such a
//! set down to the authoritative edits: per identity, only the record(s)
//! created at the group's maximum timestamp survive.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::record::UpdateableRecord;

/// Keep only the most recently created record per identity.
///
/// Ties on the maximum timestamp all survive; simultaneous edits are not
/// arbitrarily broken. Input order is preserved for the survivors, and the
/// operation is idempotent.
pub fn most_recent<T: UpdateableRecord>(records: Vec<T>) -> Vec<T> {
    let mut newest: HashMap<String, DateTime<Utc>> = HashMap::new();
    for record in &records {
        newest
            .entry(record.identity().to_string())
            .and_modify(|max| {
                if record.created_at() > *max {
                    *max = record.created_at();
                }
            })
            .or_insert_with(|| record.created_at());
    }

    records
        .into_iter()
        .filter(|record| newest.get(record.identity()) == Some(&record.created_at()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{OpportunityRecord, ProfileId, RecordHeader};
    use crate::tag::RecordTag;
    use chrono::TimeZone;

    fn opportunity(publication_id: &str, opportunity_id: &str, secs: i64) -> OpportunityRecord {
        OpportunityRecord {
            header: RecordHeader {
                version: "1.0.1".into(),
                tag: RecordTag::OrgPublishOpportunity,
                publication_id: publication_id.into(),
                created_at: Utc.timestamp_opt(secs, 0).unwrap(),
                author: ProfileId::new("org"),
            },
            opportunity_id: opportunity_id.into(),
            name: "cleanup".into(),
            start_date: String::new(),
            end_date: String::new(),
            hours_per_week: String::new(),
            category: String::new(),
            website: String::new(),
            description: String::new(),
            image_url: String::new(),
            location: String::new(),
        }
    }

    #[test]
    fn test_newest_edit_wins() {
        let resolved = most_recent(vec![
            opportunity("pub-1", "op-1", 100),
            opportunity("pub-2", "op-1", 200),
        ]);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].header.publication_id, "pub-2");
    }

    #[test]
    fn test_equal_timestamps_all_survive() {
        let resolved = most_recent(vec![
            opportunity("pub-1", "op-1", 100),
            opportunity("pub-2", "op-1", 100),
        ]);

        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_distinct_identities_untouched() {
        let resolved = most_recent(vec![
            opportunity("pub-1", "op-1", 100),
            opportunity("pub-2", "op-2", 50),
        ]);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].opportunity_id, "op-1");
        assert_eq!(resolved[1].opportunity_id, "op-2");
    }

    #[test]
    fn test_idempotent() {
        let once = most_recent(vec![
            opportunity("pub-1", "op-1", 100),
            opportunity("pub-2", "op-1", 200),
            opportunity("pub-3", "op-2", 10),
        ]);
        let twice = most_recent(once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        let resolved = most_recent(Vec::<OpportunityRecord>::new());
        assert!(resolved.is_empty());
    }
}
