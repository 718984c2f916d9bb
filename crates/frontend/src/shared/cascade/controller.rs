use super::error::PayloadError;
use super::level::LevelSpec;
use super::resolver::{CascadeResolver, CascadeSettings, FetchTicket, LoadOutcome, SelectionOutcome};
use super::source::OptionSource;
use leptos::prelude::*;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Reactive host for a [`CascadeResolver`].
///
/// Owns the resolver in a signal and runs the fetch tickets it hands out.
/// `Copy`, so it can be moved into any number of view closures.
#[derive(Clone, Copy)]
pub struct CascadeController {
    state: RwSignal<CascadeResolver>,
    sources: StoredValue<Vec<Arc<dyn OptionSource>>>,
}

impl CascadeController {
    /// One source per level, in level order
    pub fn new(
        specs: &[LevelSpec],
        sources: Vec<Arc<dyn OptionSource>>,
        settings: CascadeSettings,
    ) -> Self {
        let resolver = match CascadeResolver::new(specs, settings) {
            Ok(resolver) => resolver,
            Err(e) => {
                log::error!("cascade definition rejected: {}", e);
                CascadeResolver::empty()
            }
        };
        if sources.len() != resolver.len() {
            log::error!(
                "cascade has {} levels but {} option sources",
                resolver.len(),
                sources.len()
            );
        }
        Self {
            state: RwSignal::new(resolver),
            sources: StoredValue::new(sources),
        }
    }

    /// Reactive read access
    pub fn with<R>(&self, f: impl FnOnce(&CascadeResolver) -> R) -> R {
        self.state.with(f)
    }

    pub fn with_untracked<R>(&self, f: impl FnOnce(&CascadeResolver) -> R) -> R {
        self.state.with_untracked(f)
    }

    pub fn start(&self) {
        let tickets = self.state.try_update(|r| r.start()).unwrap_or_default();
        self.dispatch(tickets);
    }

    /// `key` is the `<option value>`; empty clears the level
    pub fn select(&self, level: usize, key: &str) -> SelectionOutcome {
        let outcome = self
            .state
            .try_update(|r| r.select_by_key(level, key))
            .unwrap_or_default();
        self.dispatch(outcome.fetches.clone());
        outcome
    }

    pub fn apply_saved(&self, saved: &Map<String, Value>) {
        let tickets = self.state.try_update(|r| r.apply_saved(saved)).unwrap_or_default();
        self.dispatch(tickets);
    }

    pub fn retry(&self, level: usize) {
        if let Some(ticket) = self.state.try_update(|r| r.retry(level)).flatten() {
            self.dispatch(vec![ticket]);
        }
    }

    pub fn reset(&self) {
        let tickets = self.state.try_update(|r| r.reset()).unwrap_or_default();
        self.dispatch(tickets);
    }

    pub fn payload(&self) -> Result<Map<String, Value>, PayloadError> {
        self.state.with_untracked(|r| r.resolved_payload())
    }

    fn dispatch(&self, tickets: Vec<FetchTicket>) {
        for ticket in tickets {
            let source = self
                .sources
                .try_with_value(|sources| sources.get(ticket.level).cloned())
                .flatten();
            let Some(source) = source else {
                log::error!("no option source for level #{}", ticket.level);
                continue;
            };

            let controller = *self;
            wasm_bindgen_futures::spawn_local(async move {
                let follow_ups = match source.fetch(&ticket.parents).await {
                    Ok(values) => match controller
                        .state
                        .try_update(|r| r.on_options_loaded(&ticket, values))
                    {
                        Some(LoadOutcome::Applied { fetches, .. }) => fetches,
                        _ => Vec::new(),
                    },
                    Err(e) => {
                        controller
                            .state
                            .try_update(|r| r.on_options_failed(&ticket, e));
                        Vec::new()
                    }
                };
                controller.dispatch(follow_ups);
            });
        }
    }
}
