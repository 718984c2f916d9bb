//! Matching saved references against a freshly loaded option list.

use super::id::OptionId;
use super::index::LabelIdIndex;
use super::level::{CascadeLevel, RefHint, SavedRef};

/// Result of one reconciliation pass over one level
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Preconditions not met: no pending reference, no options, already
    /// selected, or the reference is exhausted
    Skipped,
    Matched { id: OptionId, label: String },
    Missed { misses: u32 },
    /// This miss used up the retry budget
    Exhausted { reference: SavedRef },
}

impl Reconciliation {
    pub fn is_match(&self) -> bool {
        matches!(self, Reconciliation::Matched { .. })
    }
}

/// Looks a saved reference up in an index.
///
/// Ids are tried first for id-hinted references and last for label-hinted
/// ones; labels are matched exactly, then case-insensitively after trimming.
pub fn match_reference(index: &LabelIdIndex, reference: &SavedRef) -> Option<(OptionId, String)> {
    let by_id = || {
        index
            .find_id_key(&reference.text)
            .map(|(id, label)| (id.clone(), label.to_string()))
    };
    let by_label = || {
        index
            .id_for(&reference.text)
            .map(|id| (id.clone(), reference.text.clone()))
            .or_else(|| {
                index
                    .find_loose(&reference.text)
                    .map(|(id, label)| (id.clone(), label.to_string()))
            })
    };

    match reference.hint {
        RefHint::Id => by_id().or_else(by_label),
        RefHint::Label => by_label().or_else(by_id),
    }
}

/// Runs the pass on one level. Safe to call on every options update: a level
/// that already holds an id is never touched.
pub(super) fn reconcile_level(level: &mut CascadeLevel, max_attempts: u32) -> Reconciliation {
    if level.selected_id.is_some() || level.options.is_empty() {
        return Reconciliation::Skipped;
    }
    let Some(pending) = level.pending.as_mut() else {
        return Reconciliation::Skipped;
    };
    if pending.exhausted {
        return Reconciliation::Skipped;
    }

    match match_reference(&level.index, &pending.reference) {
        Some((id, label)) => {
            log::debug!(
                "{}: saved value \"{}\" resolved to id {}",
                level.spec.key,
                pending.reference.text,
                id
            );
            level.pending = None;
            level.set_selection(id.clone(), label.clone(), false);
            Reconciliation::Matched { id, label }
        }
        None => {
            pending.misses += 1;
            if pending.misses >= max_attempts.max(1) {
                pending.exhausted = true;
                log::warn!(
                    "{}: saved value \"{}\" matched none of {} options after {} attempts",
                    level.spec.key,
                    pending.reference.text,
                    level.options.len(),
                    pending.misses
                );
                Reconciliation::Exhausted {
                    reference: pending.reference.clone(),
                }
            } else {
                Reconciliation::Missed {
                    misses: pending.misses,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::cascade::level::{LevelSpec, PendingRef};
    use crate::shared::cascade::probe::EntityKind;
    use crate::shared::cascade::record::DomainRecord;
    use serde_json::Value;

    const SCHOOL: LevelSpec = LevelSpec {
        key: "school",
        title: "School",
        kind: EntityKind::School,
        parents: &[],
        required: true,
        payload_key: "schoolId",
        saved_id_keys: &["schoolId"],
        saved_label_keys: &["schoolName"],
    };

    fn level_with(options: &[(i64, &str)], pending: Option<SavedRef>) -> CascadeLevel {
        let mut level = CascadeLevel::new(SCHOOL);
        level.options = options
            .iter()
            .map(|(id, label)| DomainRecord {
                id: OptionId::from(*id),
                label: label.to_string(),
                raw: Value::Null,
            })
            .collect();
        level.index = LabelIdIndex::build(&level.options);
        level.pending = pending.map(PendingRef::new);
        level
    }

    #[test]
    fn test_exact_match() {
        let mut level = level_with(
            &[(1, "St. Mary's High School"), (2, "Oakridge")],
            Some(SavedRef::label("St. Mary's High School")),
        );
        let outcome = reconcile_level(&mut level, 3);
        assert!(outcome.is_match());
        assert_eq!(level.selected_id(), Some(&OptionId::from(1)));
        assert!(level.pending().is_none());
    }

    #[test]
    fn test_case_insensitive_trimmed_match_takes_option_label() {
        let mut level = level_with(&[(2, "Oakridge International")], Some(SavedRef::label(" oakridge international")));
        reconcile_level(&mut level, 3);
        assert_eq!(level.selected_label(), "Oakridge International");
    }

    #[test]
    fn test_id_reference() {
        let mut level = level_with(&[(7, "Sri Chaitanya"), (8, "Narayana")], Some(SavedRef::id("8")));
        reconcile_level(&mut level, 3);
        assert_eq!(level.selected_id(), Some(&OptionId::from(8)));
        assert_eq!(level.selected_label(), "Narayana");
    }

    #[test]
    fn test_label_hint_falls_back_to_id() {
        let mut level = level_with(&[(7, "Sri Chaitanya")], Some(SavedRef::label("7")));
        reconcile_level(&mut level, 3);
        assert_eq!(level.selected_id(), Some(&OptionId::from(7)));
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let mut level = level_with(&[(1, "Oakridge")], Some(SavedRef::label("Oakridge")));
        reconcile_level(&mut level, 3);
        let snapshot = level.clone();
        assert_eq!(reconcile_level(&mut level, 3), Reconciliation::Skipped);
        assert_eq!(level, snapshot);
    }

    #[test]
    fn test_misses_are_bounded() {
        let mut level = level_with(&[(1, "Oakridge")], Some(SavedRef::label("Gitanjali")));
        assert_eq!(reconcile_level(&mut level, 2), Reconciliation::Missed { misses: 1 });
        assert_eq!(
            reconcile_level(&mut level, 2),
            Reconciliation::Exhausted {
                reference: SavedRef::label("Gitanjali")
            }
        );
        assert_eq!(reconcile_level(&mut level, 2), Reconciliation::Skipped);
        assert!(level.pending().unwrap().exhausted);
        assert!(level.selected_id().is_none());
    }

    #[test]
    fn test_empty_options_do_not_count_as_a_miss() {
        let mut level = level_with(&[], Some(SavedRef::label("Oakridge")));
        assert_eq!(reconcile_level(&mut level, 1), Reconciliation::Skipped);
        assert_eq!(level.pending().unwrap().misses, 0);
    }
}
