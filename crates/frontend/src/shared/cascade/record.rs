use super::id::OptionId;
use super::probe::ProbeTable;
use serde_json::Value;

/// Envelope keys tried, in order, when a list endpoint wraps its result
const ENVELOPE_KEYS: &[&str] = &["data", "results", "items"];

/// Wrappers are unwrapped at most this many times (`{"data": {"items": [...]}}`)
const MAX_ENVELOPE_DEPTH: usize = 3;

/// One selectable option, as returned by an option source
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecord {
    pub id: OptionId,
    pub label: String,
    pub raw: Value,
}

impl DomainRecord {
    /// Builds a record through the probe table.
    ///
    /// Records without an id cannot be selected and are dropped. A record
    /// with an id but no usable label is shown under its id.
    pub fn from_value(value: Value, probe: &ProbeTable) -> Option<Self> {
        let object = value.as_object()?;
        let id = probe.probe_id(object)?;
        let label = probe
            .probe_label(object)
            .unwrap_or_else(|| id.as_key());
        Some(Self {
            id,
            label,
            raw: value,
        })
    }
}

/// Flattens whatever envelope the endpoint used into the bare list of records
pub fn normalize_envelope(value: Value) -> Vec<Value> {
    unwrap_envelope(value, 0)
}

fn unwrap_envelope(value: Value, depth: usize) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut object) if depth < MAX_ENVELOPE_DEPTH => {
            match ENVELOPE_KEYS.iter().find_map(|key| object.remove(*key)) {
                Some(inner) => unwrap_envelope(inner, depth + 1),
                None => {
                    log::warn!(
                        "list response has no known envelope (keys: {:?})",
                        object.keys().collect::<Vec<_>>()
                    );
                    Vec::new()
                }
            }
        }
        Value::Null => Vec::new(),
        other => {
            log::warn!("list response is not a list: {}", other);
            Vec::new()
        }
    }
}

/// Converts raw records, skipping the ones the probe table cannot identify
pub fn records_from_values(values: Vec<Value>, probe: &ProbeTable) -> Vec<DomainRecord> {
    let total = values.len();
    let records: Vec<DomainRecord> = values
        .into_iter()
        .filter_map(|value| DomainRecord::from_value(value, probe))
        .collect();
    if records.len() < total {
        log::warn!(
            "{}: skipped {} of {} records without a recognizable id",
            probe.entity,
            total - records.len(),
            total
        );
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::cascade::probe::EntityKind;
    use serde_json::json;

    #[test]
    fn test_bare_array_and_envelopes() {
        let bare = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(normalize_envelope(bare).len(), 2);

        for key in ["data", "results", "items"] {
            let mut wrapped = serde_json::Map::new();
            wrapped.insert(key.to_string(), json!([{"id": 1}]));
            wrapped.insert("count".to_string(), json!(1));
            assert_eq!(
                normalize_envelope(Value::Object(wrapped)).len(),
                1,
                "envelope {key}"
            );
        }
    }

    #[test]
    fn test_nested_envelope() {
        let nested = json!({"data": {"items": [{"id": 1}, {"id": 2}, {"id": 3}], "total": 3}});
        assert_eq!(normalize_envelope(nested).len(), 3);
    }

    #[test]
    fn test_unknown_shapes_give_empty_list() {
        assert!(normalize_envelope(json!(null)).is_empty());
        assert!(normalize_envelope(json!({"rows": [{"id": 1}]})).is_empty());
        assert!(normalize_envelope(json!("oops")).is_empty());
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let values = vec![
            json!({"schoolId": 1, "schoolName": "Sri Chaitanya"}),
            json!({"schoolName": "No Id School"}),
            json!({"schoolId": "S-9"}),
            json!(42),
        ];
        let records = records_from_values(values, EntityKind::School.probe());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "Sri Chaitanya");
        assert_eq!(records[1].id, OptionId::from("S-9"));
        assert_eq!(records[1].label, "S-9");
    }
}
