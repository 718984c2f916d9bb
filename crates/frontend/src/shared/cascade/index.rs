use super::id::OptionId;
use super::record::DomainRecord;
use std::collections::HashMap;

/// Bidirectional label ↔ id map over one option list.
///
/// Built from scratch for every list; never patched. Within one snapshot a
/// label maps to exactly one id and an id to exactly one label. When two
/// records share a label the later one wins and the label is remembered as
/// ambiguous.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelIdIndex {
    by_label: HashMap<String, OptionId>,
    by_id: HashMap<OptionId, String>,
    /// Surviving labels in option-list order, for deterministic loose matching
    order: Vec<String>,
    ambiguous: Vec<String>,
}

impl LabelIdIndex {
    pub fn build(records: &[DomainRecord]) -> Self {
        let mut index = Self::default();

        for record in records {
            if let Some(previous_id) = index.by_label.get(&record.label).cloned() {
                if previous_id != record.id {
                    log::warn!(
                        "label \"{}\" is shared by ids {} and {}; keeping {}",
                        record.label,
                        previous_id,
                        record.id,
                        record.id
                    );
                    if !index.ambiguous.contains(&record.label) {
                        index.ambiguous.push(record.label.clone());
                    }
                    index.by_id.remove(&previous_id);
                }
            }
            if let Some(previous_label) = index.by_id.get(&record.id).cloned() {
                if previous_label != record.label {
                    index.by_label.remove(&previous_label);
                }
            }
            index.by_label.insert(record.label.clone(), record.id.clone());
            index.by_id.insert(record.id.clone(), record.label.clone());
        }

        let mut seen = std::collections::HashSet::new();
        index.order = records
            .iter()
            .rev()
            .filter(|r| index.by_label.get(&r.label) == Some(&r.id))
            .filter(|r| seen.insert(r.label.clone()))
            .map(|r| r.label.clone())
            .collect();
        index.order.reverse();

        index
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    pub fn id_for(&self, label: &str) -> Option<&OptionId> {
        self.by_label.get(label)
    }

    pub fn label_for(&self, id: &OptionId) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Case-insensitive, whitespace-trimmed label lookup
    pub fn find_loose(&self, label: &str) -> Option<(&OptionId, &str)> {
        let wanted = normalize(label);
        if wanted.is_empty() {
            return None;
        }
        self.order
            .iter()
            .find(|candidate| normalize(candidate) == wanted)
            .and_then(|candidate| {
                self.by_label
                    .get_key_value(candidate.as_str())
                    .map(|(label, id)| (id, label.as_str()))
            })
    }

    /// Finds the option whose id has the given textual form
    pub fn find_id_key(&self, key: &str) -> Option<(&OptionId, &str)> {
        self.by_id
            .iter()
            .find(|(id, _)| id.matches_key(key))
            .map(|(id, label)| (id, label.as_str()))
    }

    pub fn ambiguous_labels(&self) -> &[String] {
        &self.ambiguous
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn record(id: i64, label: &str) -> DomainRecord {
        DomainRecord {
            id: OptionId::from(id),
            label: label.to_string(),
            raw: Value::Null,
        }
    }

    #[test]
    fn test_unique_labels_round_trip() {
        let records: Vec<DomainRecord> = (1..=20)
            .map(|i| record(i, &format!("Campus {i}")))
            .collect();
        let index = LabelIdIndex::build(&records);
        assert_eq!(index.len(), 20);
        for r in &records {
            let id = index.id_for(&r.label).unwrap();
            assert_eq!(id, &r.id);
            assert_eq!(index.label_for(id), Some(r.label.as_str()));
        }
        assert!(index.ambiguous_labels().is_empty());
    }

    #[test]
    fn test_duplicate_label_last_write_wins() {
        let records = vec![record(1, "Hyderabad"), record(2, "Warangal"), record(3, "Hyderabad")];
        let index = LabelIdIndex::build(&records);
        assert_eq!(index.id_for("Hyderabad"), Some(&OptionId::from(3)));
        assert_eq!(index.label_for(&OptionId::from(1)), None);
        assert_eq!(index.len(), 2);
        assert_eq!(index.ambiguous_labels(), &["Hyderabad".to_string()]);
    }

    #[test]
    fn test_duplicate_id_keeps_one_label() {
        let records = vec![record(5, "Old name"), record(5, "New name")];
        let index = LabelIdIndex::build(&records);
        assert_eq!(index.id_for("Old name"), None);
        assert_eq!(index.label_for(&OptionId::from(5)), Some("New name"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_find_loose() {
        let index = LabelIdIndex::build(&[record(1, "Hyderabad Central"), record(2, "Kukatpally")]);
        let (id, label) = index.find_loose("  hyderabad central ").unwrap();
        assert_eq!(id, &OptionId::from(1));
        assert_eq!(label, "Hyderabad Central");
        assert!(index.find_loose("Hyderabad").is_none());
        assert!(index.find_loose("   ").is_none());
    }

    #[test]
    fn test_find_id_key() {
        let index = LabelIdIndex::build(&[record(10, "MPC"), record(11, "BiPC")]);
        assert_eq!(index.find_id_key("11").map(|(_, l)| l), Some("BiPC"));
        assert!(index.find_id_key("12").is_none());
    }

    #[test]
    fn test_rebuild_drops_stale_entries() {
        let first = LabelIdIndex::build(&[record(1, "Day Scholar")]);
        let second = LabelIdIndex::build(&[record(2, "Hosteller")]);
        assert!(first.id_for("Day Scholar").is_some());
        assert!(second.id_for("Day Scholar").is_none());
    }
}
