use super::error::{CascadeError, PayloadError};
use super::id::OptionId;
use super::index::LabelIdIndex;
use super::level::{CascadeLevel, LevelSpec, PendingRef, SavedRef};
use super::reconcile::{reconcile_level, Reconciliation};
use super::record::records_from_values;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeSettings {
    /// Option refreshes a saved reference may miss before it is reported
    pub max_reconcile_attempts: u32,
}

impl Default for CascadeSettings {
    fn default() -> Self {
        Self {
            max_reconcile_attempts: 3,
        }
    }
}

/// One fetch the host has to run against the level's option source.
///
/// Handed back with the response; a ticket whose sequence number or parent
/// ids no longer match the level is stale and its response is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub level: usize,
    pub seq: u64,
    pub parents: Vec<OptionId>,
}

/// What a selection changed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionOutcome {
    pub fetches: Vec<FetchTicket>,
    /// Levels that were cleared; derived fields keyed off them are stale too
    pub invalidated: Range<usize>,
    /// The chosen label was not in the level's index
    pub inconsistent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Stale,
    Applied {
        reconciliation: Reconciliation,
        fetches: Vec<FetchTicket>,
    },
}

/// Drives an N-level dependent dropdown chain.
///
/// The resolver does no I/O. Every operation returns the fetches it wants
/// issued; the host runs them and feeds the responses back through
/// [`CascadeResolver::on_options_loaded`] or
/// [`CascadeResolver::on_options_failed`]. Event handlers never fail: fetch
/// errors and unmatched saved values become level state, and only
/// [`CascadeResolver::resolved_payload`] turns them into errors.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeResolver {
    levels: Vec<CascadeLevel>,
    settings: CascadeSettings,
    next_seq: u64,
}

impl CascadeResolver {
    pub fn new(specs: &[LevelSpec], settings: CascadeSettings) -> Result<Self, CascadeError> {
        for (position, spec) in specs.iter().enumerate() {
            if let Some(&parent) = spec.parents.iter().find(|&&p| p >= position) {
                return Err(CascadeError::InvalidParent {
                    level: spec.key,
                    parent,
                });
            }
            if specs[..position].iter().any(|other| other.key == spec.key) {
                return Err(CascadeError::DuplicateLevel(spec.key));
            }
        }
        Ok(Self {
            levels: specs.iter().copied().map(CascadeLevel::new).collect(),
            settings,
            next_seq: 0,
        })
    }

    /// A chain without levels; used when a definition fails to validate
    pub fn empty() -> Self {
        Self {
            levels: Vec::new(),
            settings: CascadeSettings::default(),
            next_seq: 0,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[CascadeLevel] {
        &self.levels
    }

    pub fn level(&self, level: usize) -> Option<&CascadeLevel> {
        self.levels.get(level)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.spec.key == key)
    }

    pub fn settings(&self) -> CascadeSettings {
        self.settings
    }

    pub fn selected_id(&self, level: usize) -> Option<&OptionId> {
        self.levels.get(level).and_then(|l| l.selected_id())
    }

    /// Resolved ids of the level's parents, in declaration order.
    /// `None` while any parent is unselected or holds a placeholder id.
    pub fn parent_ids(&self, level: usize) -> Option<Vec<OptionId>> {
        let spec = self.levels.get(level)?.spec;
        spec.parents
            .iter()
            .map(|&p| {
                let parent = &self.levels[p];
                if parent.is_resolved() {
                    parent.selected_id.clone()
                } else {
                    None
                }
            })
            .collect()
    }

    /// All parents resolved, so the level's option source can be queried
    pub fn is_eligible(&self, level: usize) -> bool {
        self.parent_ids(level).is_some()
    }

    /// `(id key, label)` pairs for rendering `<option>` elements.
    ///
    /// Only records the index kept are offered, so every rendered option can
    /// be selected back by its key.
    pub fn option_pairs(&self, level: usize) -> Vec<(String, String)> {
        let Some(l) = self.levels.get(level) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        l.options
            .iter()
            .filter(|o| l.index.label_for(&o.id) == Some(o.label.as_str()))
            .filter(|o| seen.insert(o.id.as_key()))
            .map(|o| (o.id.as_key(), o.label.clone()))
            .collect()
    }

    /// `(title, selected label)` for every selected level
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        self.levels
            .iter()
            .filter(|l| l.selected_id.is_some())
            .map(|l| (l.spec.title, l.selected_label.clone()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Fetches for every level that is eligible and not loaded yet
    pub fn start(&mut self) -> Vec<FetchTicket> {
        self.fetch_eligible(0..self.levels.len())
    }

    /// User picked `chosen_label` at `level`.
    ///
    /// Every later level is cleared before anything is fetched, so no level
    /// can show options that belong to an old parent chain.
    pub fn select_level(&mut self, level: usize, chosen_label: &str) -> SelectionOutcome {
        let Some(current) = self.levels.get_mut(level) else {
            log::warn!("select on unknown level #{}", level);
            return SelectionOutcome::default();
        };

        let (id, inconsistent) = match current.index.id_for(chosen_label) {
            Some(id) => (id.clone(), false),
            None => {
                log::warn!(
                    "{}: \"{}\" is not in the current option list; keeping it as a placeholder",
                    current.spec.key,
                    chosen_label
                );
                (OptionId::Text(chosen_label.to_string()), true)
            }
        };
        current.pending = None;
        current.set_selection(id, chosen_label.to_string(), inconsistent);

        let invalidated = self.invalidate_after(level);
        let fetches = self.fetch_eligible(invalidated.clone());
        SelectionOutcome {
            fetches,
            invalidated,
            inconsistent,
        }
    }

    /// Selection by `<option value>`; an empty key clears the level
    pub fn select_by_key(&mut self, level: usize, key: &str) -> SelectionOutcome {
        if key.trim().is_empty() {
            return self.clear_level(level);
        }
        let label = self
            .levels
            .get(level)
            .and_then(|l| l.index.find_id_key(key).map(|(_, label)| label.to_string()));
        match label {
            Some(label) => self.select_level(level, &label),
            None => self.select_level(level, key),
        }
    }

    /// User reset the level to "not selected"
    pub fn clear_level(&mut self, level: usize) -> SelectionOutcome {
        let Some(current) = self.levels.get_mut(level) else {
            return SelectionOutcome::default();
        };
        current.selected_id = None;
        current.selected_label.clear();
        current.inconsistent = false;
        current.pending = None;
        let invalidated = self.invalidate_after(level);
        SelectionOutcome {
            fetches: Vec::new(),
            invalidated,
            inconsistent: false,
        }
    }

    /// Option source for `ticket.level` answered.
    ///
    /// Downstream levels are fetched only when reconciliation produced an id
    /// here; a plain load never triggers them.
    pub fn on_options_loaded(&mut self, ticket: &FetchTicket, values: Vec<Value>) -> LoadOutcome {
        if !self.is_current(ticket) {
            log::debug!(
                "dropping stale response for level #{} (seq {})",
                ticket.level,
                ticket.seq
            );
            return LoadOutcome::Stale;
        }

        let max_attempts = self.settings.max_reconcile_attempts;
        let level = &mut self.levels[ticket.level];
        level.options = records_from_values(values, level.spec.kind.probe());
        level.index = LabelIdIndex::build(&level.options);
        level.loading = false;
        level.load_error = None;

        let reconciliation = reconcile_level(level, max_attempts);
        let fetches = if reconciliation.is_match() {
            self.fetch_eligible(ticket.level + 1..self.levels.len())
        } else {
            Vec::new()
        };
        LoadOutcome::Applied {
            reconciliation,
            fetches,
        }
    }

    /// Option source for `ticket.level` failed. Returns `false` for stale tickets.
    pub fn on_options_failed(&mut self, ticket: &FetchTicket, error: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let level = &mut self.levels[ticket.level];
        let error = error.into();
        log::warn!("{}: options failed to load: {}", level.spec.key, error);
        level.options.clear();
        level.index = LabelIdIndex::default();
        level.loading = false;
        level.load_error = Some(error);
        true
    }

    /// Re-issues the fetch of a level whose last load failed or came back empty
    pub fn retry(&mut self, level: usize) -> Option<FetchTicket> {
        let current = self.levels.get(level)?;
        if current.selected_id.is_some() || current.loading {
            return None;
        }
        self.issue_fetch(level)
    }

    /// Queues saved selections (ids or labels) for every level that has no
    /// selection yet and reconciles the levels whose options are already here.
    pub fn apply_saved(&mut self, saved: &Map<String, Value>) -> Vec<FetchTicket> {
        let max_attempts = self.settings.max_reconcile_attempts;
        let mut fetches = Vec::new();

        for position in 0..self.levels.len() {
            let level = &mut self.levels[position];
            if level.selected_id.is_some() {
                continue;
            }
            let Some(reference) = SavedRef::extract(&level.spec, saved) else {
                continue;
            };
            log::debug!("{}: queued saved value {:?}", level.spec.key, reference);
            level.pending = Some(PendingRef::new(reference));

            if reconcile_level(level, max_attempts).is_match() {
                fetches.extend(self.fetch_eligible(position + 1..self.levels.len()));
            }
        }
        fetches
    }

    /// Back to a blank chain; returns the root fetches
    pub fn reset(&mut self) -> Vec<FetchTicket> {
        for position in 0..self.levels.len() {
            let seq = self.bump_seq();
            let level = &mut self.levels[position];
            level.invalidate();
            level.pending = None;
            level.seq = seq;
        }
        self.start()
    }

    // ------------------------------------------------------------------
    // Payload
    // ------------------------------------------------------------------

    /// `payload_key -> id` for every selected level.
    ///
    /// Fails on the first level that is required but empty, still waits on a
    /// saved reference, or holds a placeholder id.
    pub fn resolved_payload(&self) -> Result<Map<String, Value>, PayloadError> {
        let mut payload = Map::new();
        for level in &self.levels {
            let spec = level.spec;
            if level.selected_id.is_none() {
                if let Some(pending) = &level.pending {
                    return Err(PayloadError::UnresolvedReference {
                        level: spec.key.to_string(),
                        title: spec.title.to_string(),
                        label: pending.reference.text.clone(),
                    });
                }
            }
            match &level.selected_id {
                Some(_) if level.inconsistent => {
                    return Err(PayloadError::InconsistentSelection {
                        level: spec.key.to_string(),
                        title: spec.title.to_string(),
                        label: level.selected_label.clone(),
                    });
                }
                Some(id) => {
                    payload.insert(spec.payload_key.to_string(), id.to_value());
                }
                None if spec.required => {
                    return Err(PayloadError::MissingSelection {
                        level: spec.key.to_string(),
                        title: spec.title.to_string(),
                    });
                }
                None => {}
            }
        }
        Ok(payload)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn invalidate_after(&mut self, level: usize) -> Range<usize> {
        let range = (level + 1).min(self.levels.len())..self.levels.len();
        for position in range.clone() {
            let seq = self.bump_seq();
            let downstream = &mut self.levels[position];
            downstream.invalidate();
            downstream.seq = seq;
        }
        range
    }

    fn fetch_eligible(&mut self, range: Range<usize>) -> Vec<FetchTicket> {
        let mut fetches = Vec::new();
        for position in range {
            let level = &self.levels[position];
            if level.selected_id.is_some() {
                continue;
            }
            let Some(parents) = self.parent_ids(position) else {
                continue;
            };
            if level.fetched_for.as_ref() == Some(&parents) {
                continue;
            }
            if let Some(ticket) = self.issue_fetch(position) {
                fetches.push(ticket);
            }
        }
        fetches
    }

    fn issue_fetch(&mut self, position: usize) -> Option<FetchTicket> {
        let parents = self.parent_ids(position)?;
        let seq = self.bump_seq();
        let level = &mut self.levels[position];
        level.seq = seq;
        level.loading = true;
        level.load_error = None;
        level.fetched_for = Some(parents.clone());
        Some(FetchTicket {
            level: position,
            seq,
            parents,
        })
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        let Some(level) = self.levels.get(ticket.level) else {
            return false;
        };
        level.loading
            && level.seq == ticket.seq
            && self.parent_ids(ticket.level).as_ref() == Some(&ticket.parents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::cascade::probe::EntityKind;
    use serde_json::json;

    const STATE: usize = 0;
    const DISTRICT: usize = 1;
    const SCHOOL_TYPE: usize = 2;
    const SCHOOL: usize = 3;

    const CHAIN: &[LevelSpec] = &[
        LevelSpec {
            key: "state",
            title: "State",
            kind: EntityKind::State,
            parents: &[],
            required: true,
            payload_key: "stateId",
            saved_id_keys: &["stateId"],
            saved_label_keys: &["stateName"],
        },
        LevelSpec {
            key: "district",
            title: "District",
            kind: EntityKind::District,
            parents: &[0],
            required: true,
            payload_key: "districtId",
            saved_id_keys: &["districtId"],
            saved_label_keys: &["districtName"],
        },
        LevelSpec {
            key: "schoolType",
            title: "School type",
            kind: EntityKind::SchoolType,
            parents: &[1],
            required: true,
            payload_key: "schoolTypeId",
            saved_id_keys: &["schoolTypeId"],
            saved_label_keys: &["schoolTypeName"],
        },
        LevelSpec {
            key: "school",
            title: "School name",
            kind: EntityKind::School,
            parents: &[1, 2],
            required: true,
            payload_key: "schoolId",
            saved_id_keys: &["schoolId"],
            saved_label_keys: &["schoolName"],
        },
    ];

    fn resolver() -> CascadeResolver {
        CascadeResolver::new(CHAIN, CascadeSettings::default()).unwrap()
    }

    fn options(items: &[(i64, &str)]) -> Vec<Value> {
        items
            .iter()
            .map(|(id, name)| json!({"id": id, "name": name}))
            .collect()
    }

    fn only(fetches: Vec<FetchTicket>) -> FetchTicket {
        assert_eq!(fetches.len(), 1, "expected exactly one fetch: {fetches:?}");
        fetches.into_iter().next().unwrap()
    }

    fn applied_fetches(outcome: LoadOutcome) -> Vec<FetchTicket> {
        match outcome {
            LoadOutcome::Applied { fetches, .. } => fetches,
            LoadOutcome::Stale => panic!("response was treated as stale"),
        }
    }

    /// Resolver with state, district and school type selected
    fn filled() -> (CascadeResolver, FetchTicket) {
        let mut r = resolver();
        let t = only(r.start());
        r.on_options_loaded(&t, options(&[(36, "Telangana"), (28, "Andhra Pradesh")]));
        let t = only(r.select_level(STATE, "Telangana").fetches);
        r.on_options_loaded(&t, options(&[(501, "Hyderabad"), (502, "Warangal")]));
        let t = only(r.select_level(DISTRICT, "Hyderabad").fetches);
        r.on_options_loaded(&t, options(&[(1, "Private"), (2, "Government")]));
        let school = only(r.select_level(SCHOOL_TYPE, "Private").fetches);
        (r, school)
    }

    #[test]
    fn test_invalid_chain_definitions_are_rejected() {
        let mut specs = CHAIN.to_vec();
        specs[1].parents = &[1];
        assert_eq!(
            CascadeResolver::new(&specs, CascadeSettings::default()),
            Err(CascadeError::InvalidParent {
                level: "district",
                parent: 1
            })
        );

        let mut specs = CHAIN.to_vec();
        specs[2].key = "state";
        assert_eq!(
            CascadeResolver::new(&specs, CascadeSettings::default()),
            Err(CascadeError::DuplicateLevel("state"))
        );
    }

    #[test]
    fn test_start_fetches_only_root_levels() {
        let mut r = resolver();
        let ticket = only(r.start());
        assert_eq!(ticket.level, STATE);
        assert!(ticket.parents.is_empty());
        assert!(r.level(STATE).unwrap().is_loading());
        assert!(!r.is_eligible(DISTRICT));
        // A second start while the root is in flight issues nothing new
        assert!(r.start().is_empty());
    }

    #[test]
    fn test_select_fetches_next_level_with_parent_ids() {
        let mut r = resolver();
        let t = only(r.start());
        r.on_options_loaded(&t, options(&[(36, "Telangana")]));
        let outcome = r.select_level(STATE, "Telangana");
        assert_eq!(outcome.invalidated, 1..4);
        let ticket = only(outcome.fetches);
        assert_eq!(ticket.level, DISTRICT);
        assert_eq!(ticket.parents, vec![OptionId::from(36)]);
        assert_eq!(r.selected_id(STATE), Some(&OptionId::from(36)));
    }

    #[test]
    fn test_school_name_depends_on_two_parents() {
        let (_, school) = filled();
        assert_eq!(school.level, SCHOOL);
        assert_eq!(school.parents, vec![OptionId::from(501), OptionId::from(1)]);
    }

    #[test]
    fn test_downstream_invalidation_from_every_level() {
        for changed in [STATE, DISTRICT, SCHOOL_TYPE] {
            let (mut r, school) = filled();
            r.on_options_loaded(&school, options(&[(9, "St. Mary's High School")]));
            r.select_level(SCHOOL, "St. Mary's High School");

            let label = r.level(changed).unwrap().options()[1 % r.level(changed).unwrap().options().len()]
                .label
                .clone();
            let outcome = r.select_level(changed, &label);

            assert_eq!(outcome.invalidated, changed + 1..4);
            for downstream in changed + 1..4 {
                let level = r.level(downstream).unwrap();
                assert_eq!(level.selected_id(), None, "level {downstream} after change at {changed}");
                assert_eq!(level.selected_label(), "");
                if downstream > changed + 1 {
                    assert!(level.options().is_empty());
                }
            }
        }
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut r = resolver();
        let t = only(r.start());
        r.on_options_loaded(&t, options(&[(36, "Telangana"), (28, "Andhra Pradesh")]));

        let for_telangana = only(r.select_level(STATE, "Telangana").fetches);
        let for_andhra = only(r.select_level(STATE, "Andhra Pradesh").fetches);

        assert_eq!(
            r.on_options_loaded(&for_telangana, options(&[(501, "Hyderabad")])),
            LoadOutcome::Stale
        );
        assert!(r.level(DISTRICT).unwrap().options().is_empty());
        assert!(r.level(DISTRICT).unwrap().is_loading());

        applied_fetches(r.on_options_loaded(&for_andhra, options(&[(601, "Guntur")])));
        assert_eq!(r.option_pairs(DISTRICT), vec![("601".to_string(), "Guntur".to_string())]);

        // Late failure of the old request does not touch the new list either
        assert!(!r.on_options_failed(&for_telangana, "timeout"));
        assert_eq!(r.level(DISTRICT).unwrap().options().len(), 1);
    }

    #[test]
    fn test_fetch_failure_is_recoverable() {
        let mut r = resolver();
        let t = only(r.start());
        r.on_options_loaded(&t, options(&[(36, "Telangana")]));
        r.apply_saved(&json!({"districtName": "Hyderabad"}).as_object().cloned().unwrap());
        let district = only(r.select_level(STATE, "Telangana").fetches);

        assert!(r.on_options_failed(&district, "HTTP 502"));
        let level = r.level(DISTRICT).unwrap();
        assert!(!level.is_loading());
        assert!(level.options().is_empty());
        assert_eq!(level.load_error(), Some("HTTP 502"));
        assert_eq!(level.pending().unwrap().misses, 0);
        assert!(!r.is_eligible(SCHOOL_TYPE));

        let retry = r.retry(DISTRICT).unwrap();
        assert_ne!(retry.seq, district.seq);
        applied_fetches(r.on_options_loaded(&retry, options(&[(501, "Hyderabad")])));
        assert_eq!(r.selected_id(DISTRICT), Some(&OptionId::from(501)));
    }

    #[test]
    fn test_saved_school_name_waits_for_its_own_list() {
        let mut r = resolver();
        let t = only(r.start());
        r.on_options_loaded(&t, options(&[(36, "Telangana")]));
        let districts = only(r.select_level(STATE, "Telangana").fetches);
        for level in [DISTRICT, SCHOOL_TYPE, SCHOOL] {
            assert_eq!(r.selected_id(level), None);
        }

        r.on_options_loaded(&districts, options(&[(501, "Hyderabad"), (502, "Warangal")]));
        let types = only(r.select_level(DISTRICT, "Hyderabad").fetches);
        assert_eq!(types.level, SCHOOL_TYPE);
        assert_eq!(r.selected_id(SCHOOL), None);

        // Saved data lands before the school-type list does
        let saved = json!({"schoolName": "St. Mary's High School"});
        assert!(r.apply_saved(saved.as_object().unwrap()).is_empty());
        assert_eq!(r.selected_id(SCHOOL), None);
        assert!(r.level(SCHOOL).unwrap().pending().is_some());

        r.on_options_loaded(&types, options(&[(1, "Private")]));
        assert_eq!(r.selected_id(SCHOOL), None);

        let schools = only(r.select_level(SCHOOL_TYPE, "Private").fetches);
        assert!(r.level(SCHOOL).unwrap().pending().is_some());

        r.on_options_loaded(&schools, options(&[(8, "Oakridge"), (9, "St. Mary's High School")]));
        let level = r.level(SCHOOL).unwrap();
        assert_eq!(level.selected_id(), Some(&OptionId::from(9)));
        assert_eq!(level.selected_label(), "St. Mary's High School");
        assert!(level.pending().is_none());
    }

    #[test]
    fn test_saved_chain_resolves_level_by_level() {
        let mut r = resolver();
        let states = only(r.start());
        let saved = json!({
            "stateId": 36,
            "districtName": "hyderabad",
            "schoolTypeId": "1",
            "schoolName": "St. Mary's High School"
        });
        assert!(r.apply_saved(saved.as_object().unwrap()).is_empty());

        let districts = only(applied_fetches(
            r.on_options_loaded(&states, options(&[(36, "Telangana")])),
        ));
        let types = only(applied_fetches(
            r.on_options_loaded(&districts, options(&[(501, "Hyderabad")])),
        ));
        assert_eq!(r.level(DISTRICT).unwrap().selected_label(), "Hyderabad");
        let schools = only(applied_fetches(
            r.on_options_loaded(&types, options(&[(1, "Private"), (2, "Government")])),
        ));
        assert_eq!(schools.parents, vec![OptionId::from(501), OptionId::from(1)]);
        assert!(applied_fetches(
            r.on_options_loaded(&schools, options(&[(9, "St. Mary's High School")]))
        )
        .is_empty());

        let payload = r.resolved_payload().unwrap();
        assert_eq!(payload["stateId"], json!(36));
        assert_eq!(payload["districtId"], json!(501));
        assert_eq!(payload["schoolTypeId"], json!(1));
        assert_eq!(payload["schoolId"], json!(9));
    }

    #[test]
    fn test_reconciliation_does_not_duplicate_downstream_fetch() {
        let (mut r, school) = filled();
        // Saved data for an already-selected level is ignored
        let saved = json!({"schoolTypeName": "Government", "schoolName": "Oakridge"});
        assert!(r.apply_saved(saved.as_object().unwrap()).is_empty());
        assert_eq!(r.level(SCHOOL_TYPE).unwrap().selected_label(), "Private");
        assert!(r.retry(SCHOOL).is_none());
        applied_fetches(r.on_options_loaded(&school, options(&[(8, "Oakridge")])));
        assert_eq!(r.selected_id(SCHOOL), Some(&OptionId::from(8)));
    }

    #[test]
    fn test_reconciliation_is_idempotent() {
        let (mut r, school) = filled();
        r.apply_saved(json!({"schoolName": "Oakridge"}).as_object().unwrap());
        r.on_options_loaded(&school, options(&[(8, "Oakridge")]));
        let before = r.clone();
        assert!(r.apply_saved(&Map::new()).is_empty());
        assert_eq!(r, before);
    }

    #[test]
    fn test_unresolved_label_fails_payload() {
        let settings = CascadeSettings {
            max_reconcile_attempts: 2,
        };
        let mut r = CascadeResolver::new(CHAIN, settings).unwrap();
        let t = only(r.start());
        r.apply_saved(json!({"stateName": "Karnataka"}).as_object().unwrap());
        r.on_options_loaded(&t, options(&[(36, "Telangana")]));
        assert!(!r.level(STATE).unwrap().pending().unwrap().exhausted);

        let again = r.retry(STATE).unwrap();
        match r.on_options_loaded(&again, options(&[(36, "Telangana")])) {
            LoadOutcome::Applied { reconciliation, .. } => assert_eq!(
                reconciliation,
                Reconciliation::Exhausted {
                    reference: SavedRef::label("Karnataka")
                }
            ),
            LoadOutcome::Stale => panic!("stale"),
        }

        assert_eq!(
            r.resolved_payload(),
            Err(PayloadError::UnresolvedReference {
                level: "state".into(),
                title: "State".into(),
                label: "Karnataka".into(),
            })
        );
    }

    #[test]
    fn test_unknown_label_becomes_flagged_placeholder() {
        let mut r = resolver();
        let t = only(r.start());
        r.on_options_loaded(&t, options(&[(36, "Telangana")]));
        let outcome = r.select_level(STATE, "Goa");
        assert!(outcome.inconsistent);
        assert!(outcome.fetches.is_empty());
        assert_eq!(r.selected_id(STATE), Some(&OptionId::from("Goa")));
        assert!(!r.is_eligible(DISTRICT));
        assert!(matches!(
            r.resolved_payload(),
            Err(PayloadError::InconsistentSelection { ref level, .. }) if level == "state"
        ));
    }

    #[test]
    fn test_missing_required_level() {
        let (r, _) = filled();
        assert_eq!(
            r.resolved_payload(),
            Err(PayloadError::MissingSelection {
                level: "school".into(),
                title: "School name".into(),
            })
        );
    }

    #[test]
    fn test_select_by_key_and_clear() {
        let mut r = resolver();
        let t = only(r.start());
        r.on_options_loaded(&t, options(&[(36, "Telangana"), (28, "Andhra Pradesh")]));
        let outcome = r.select_by_key(STATE, "28");
        assert!(!outcome.inconsistent);
        assert_eq!(r.level(STATE).unwrap().selected_label(), "Andhra Pradesh");

        let cleared = r.select_by_key(STATE, "");
        assert!(cleared.fetches.is_empty());
        assert_eq!(r.selected_id(STATE), None);
        assert!(!r.level(DISTRICT).unwrap().is_loading());
    }

    #[test]
    fn test_shared_label_offers_only_the_kept_option() {
        let mut r = resolver();
        let t = only(r.start());
        r.on_options_loaded(&t, options(&[(36, "Telangana")]));
        let t = only(r.select_level(STATE, "Telangana").fetches);
        r.on_options_loaded(
            &t,
            options(&[(1, "Hyderabad"), (2, "Warangal"), (3, "Hyderabad")]),
        );

        let pairs = r.option_pairs(DISTRICT);
        assert_eq!(
            pairs,
            vec![
                ("2".to_string(), "Warangal".to_string()),
                ("3".to_string(), "Hyderabad".to_string()),
            ]
        );
        for (key, label) in pairs {
            let outcome = r.select_by_key(DISTRICT, &key);
            assert!(!outcome.inconsistent, "{key} could not be selected back");
            assert_eq!(r.level(DISTRICT).unwrap().selected_label(), label);
        }
        let payload = r.resolved_payload();
        assert!(matches!(
            payload,
            Err(PayloadError::MissingSelection { ref level, .. }) if level == "schoolType"
        ));
    }

    #[test]
    fn test_reset_drops_in_flight_responses() {
        let (mut r, school) = filled();
        let roots = r.reset();
        assert_eq!(only(roots).level, STATE);
        assert_eq!(
            r.on_options_loaded(&school, options(&[(8, "Oakridge")])),
            LoadOutcome::Stale
        );
        assert!(r.summary().is_empty());
    }
}
