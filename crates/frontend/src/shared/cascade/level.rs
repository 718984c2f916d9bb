use super::id::OptionId;
use super::index::LabelIdIndex;
use super::probe::EntityKind;
use super::record::DomainRecord;
use serde_json::{Map, Value};

/// Declarative description of one dropdown in a chain.
///
/// `parents` are indices of earlier levels whose selected ids parameterize
/// this level's option source, in the order the source expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: EntityKind,
    pub parents: &'static [usize],
    pub required: bool,
    /// Key the resolved id is written under in the outbound payload
    pub payload_key: &'static str,
    /// Keys that may carry this level's id in saved data, most specific first
    pub saved_id_keys: &'static [&'static str],
    /// Keys that may carry this level's display label in saved data
    pub saved_label_keys: &'static [&'static str],
}

/// How a saved value should be matched first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefHint {
    Id,
    Label,
}

/// A value from saved data that still has to be matched against options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRef {
    pub text: String,
    pub hint: RefHint,
}

impl SavedRef {
    pub fn id(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: RefHint::Id,
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: RefHint::Label,
        }
    }

    /// Picks this level's reference out of a saved-data object.
    ///
    /// Id keys win over label keys. A number under a label key is still an id.
    pub fn extract(spec: &LevelSpec, saved: &Map<String, Value>) -> Option<Self> {
        let from_id_key = spec
            .saved_id_keys
            .iter()
            .find_map(|key| saved.get(*key).and_then(OptionId::from_value))
            .map(|id| SavedRef::id(id.as_key()));

        from_id_key.or_else(|| {
            spec.saved_label_keys
                .iter()
                .find_map(|key| match saved.get(*key) {
                    Some(Value::Number(n)) => Some(SavedRef::id(n.to_string())),
                    Some(Value::String(s)) if !s.trim().is_empty() => Some(SavedRef::label(s.clone())),
                    _ => None,
                })
        })
    }
}

/// Saved reference waiting for its option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRef {
    pub reference: SavedRef,
    /// Option refreshes that did not contain a match
    pub misses: u32,
    /// Retry bound reached; no longer matched, reported at submit
    pub exhausted: bool,
}

impl PendingRef {
    pub fn new(reference: SavedRef) -> Self {
        Self {
            reference,
            misses: 0,
            exhausted: false,
        }
    }
}

/// State of one level, owned by the resolver
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeLevel {
    pub(super) spec: LevelSpec,
    pub(super) selected_id: Option<OptionId>,
    pub(super) selected_label: String,
    pub(super) options: Vec<DomainRecord>,
    pub(super) index: LabelIdIndex,
    pub(super) loading: bool,
    pub(super) load_error: Option<String>,
    pub(super) pending: Option<PendingRef>,
    /// The selected id is a placeholder for a label the index did not know
    pub(super) inconsistent: bool,
    /// Sequence number of the latest fetch issued for this level
    pub(super) seq: u64,
    /// Parent ids the current options (or in-flight fetch) belong to
    pub(super) fetched_for: Option<Vec<OptionId>>,
}

impl CascadeLevel {
    pub fn new(spec: LevelSpec) -> Self {
        Self {
            spec,
            selected_id: None,
            selected_label: String::new(),
            options: Vec::new(),
            index: LabelIdIndex::default(),
            loading: false,
            load_error: None,
            pending: None,
            inconsistent: false,
            seq: 0,
            fetched_for: None,
        }
    }

    pub fn spec(&self) -> &LevelSpec {
        &self.spec
    }

    pub fn selected_id(&self) -> Option<&OptionId> {
        self.selected_id.as_ref()
    }

    pub fn selected_label(&self) -> &str {
        &self.selected_label
    }

    pub fn options(&self) -> &[DomainRecord] {
        &self.options
    }

    pub fn index(&self) -> &LabelIdIndex {
        &self.index
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn pending(&self) -> Option<&PendingRef> {
        self.pending.as_ref()
    }

    pub fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    /// Resolved: has an id that came from the option list
    pub fn is_resolved(&self) -> bool {
        self.selected_id.is_some() && !self.inconsistent
    }

    pub(super) fn set_selection(&mut self, id: OptionId, label: String, inconsistent: bool) {
        self.selected_id = Some(id);
        self.selected_label = label;
        self.inconsistent = inconsistent;
    }

    /// Downstream invalidation. Pending saved references survive with a fresh
    /// retry budget, since the next option list belongs to a new parent chain.
    pub(super) fn invalidate(&mut self) {
        self.selected_id = None;
        self.selected_label.clear();
        self.options.clear();
        self.index = LabelIdIndex::default();
        self.loading = false;
        self.load_error = None;
        self.inconsistent = false;
        self.fetched_for = None;
        if let Some(pending) = self.pending.as_mut() {
            pending.misses = 0;
            pending.exhausted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CAMPUS: LevelSpec = LevelSpec {
        key: "campus",
        title: "Branch",
        kind: EntityKind::Campus,
        parents: &[0],
        required: true,
        payload_key: "campusId",
        saved_id_keys: &["campusId", "branchId"],
        saved_label_keys: &["campusName", "branchName"],
    };

    fn saved(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_extract_prefers_id_keys() {
        let data = saved(json!({"branchName": "Hyderabad Central", "branchId": 14}));
        assert_eq!(SavedRef::extract(&CAMPUS, &data), Some(SavedRef::id("14")));
    }

    #[test]
    fn test_extract_label_keys_in_order() {
        let data = saved(json!({"branchName": "Kukatpally", "campusName": "Hyderabad Central"}));
        assert_eq!(
            SavedRef::extract(&CAMPUS, &data),
            Some(SavedRef::label("Hyderabad Central"))
        );
    }

    #[test]
    fn test_extract_number_under_label_key_is_an_id() {
        let data = saved(json!({"campusName": 14}));
        assert_eq!(SavedRef::extract(&CAMPUS, &data), Some(SavedRef::id("14")));
    }

    #[test]
    fn test_extract_ignores_blank_values() {
        let data = saved(json!({"campusId": "", "branchName": "  "}));
        assert_eq!(SavedRef::extract(&CAMPUS, &data), None);
    }
}
