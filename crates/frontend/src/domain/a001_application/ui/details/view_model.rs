//! ViewModel for the school / college application form

use super::model::{self, FormStep, PlainSections};
use crate::domain::a001_application::levels::{
    academic_levels, academic_sources, orientation_sources, ORIENTATION, ORIENTATION_LEVELS,
    STUDENT_TYPE,
};
use crate::shared::cascade::{
    CascadeController, CascadeResolver, CascadeSettings, OptionId, PayloadError,
};
use contracts::domain::a001_application::aggregate::{
    AcademicDetails, ApplicationOverview, ConcessionDetails, ParentDetails, PersonalDetails,
    SiblingDetails,
};
use contracts::enums::Track;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ApplicationDetailsVm {
    pub track: Track,
    pub application_no: RwSignal<Option<String>>,

    // === Cascades ===
    pub academic: CascadeController,
    pub orientation: CascadeController,

    // === Plain sections ===
    pub personal: RwSignal<PersonalDetails>,
    pub parents: RwSignal<ParentDetails>,
    pub siblings: RwSignal<Vec<SiblingDetails>>,
    pub academic_details: RwSignal<AcademicDetails>,
    pub concession: RwSignal<ConcessionDetails>,

    // === Derived fee ===
    pub fee: RwSignal<Option<f64>>,
    pub fee_loading: RwSignal<bool>,
    pub fee_error: RwSignal<Option<String>>,

    // === UI State ===
    pub step: RwSignal<FormStep>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ApplicationDetailsVm {
    pub fn new(track: Track) -> Self {
        let settings = CascadeSettings::default();
        let vm = Self {
            track,
            application_no: RwSignal::new(None),
            academic: CascadeController::new(
                academic_levels(track),
                academic_sources(track),
                settings,
            ),
            orientation: CascadeController::new(
                ORIENTATION_LEVELS,
                orientation_sources(track),
                settings,
            ),
            personal: RwSignal::new(PersonalDetails::default()),
            parents: RwSignal::new(ParentDetails::default()),
            siblings: RwSignal::new(Vec::new()),
            academic_details: RwSignal::new(AcademicDetails::default()),
            concession: RwSignal::new(ConcessionDetails::default()),
            fee: RwSignal::new(None),
            fee_loading: RwSignal::new(false),
            fee_error: RwSignal::new(None),
            step: RwSignal::new(FormStep::default()),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        };
        vm.watch_fee();
        vm
    }

    // === Data loading ===

    /// Starts both cascades; with saved data, queues it for reconciliation
    pub fn start(&self, saved: Option<ApplicationOverview>) {
        if let Some(overview) = saved {
            log::info!(
                "editing application {} ({} saved keys)",
                overview.application_no,
                overview.data.len()
            );
            let sections = PlainSections::from_saved(&overview.data);
            self.personal.set(sections.personal);
            self.parents.set(sections.parents);
            self.siblings.set(sections.siblings);
            self.academic_details.set(sections.academic);
            self.concession.set(sections.concession);
            self.application_no.set(Some(overview.application_no));

            self.academic.apply_saved(&overview.data);
            self.orientation.apply_saved(&overview.data);
        }
        self.academic.start();
        self.orientation.start();
    }

    /// Fee is derived from the resolved orientation and student type.
    ///
    /// Refetched whenever that pair changes, cleared when either is
    /// invalidated, and a late answer for an old pair is dropped.
    fn watch_fee(&self) {
        let orientation = self.orientation;
        let fee = self.fee;
        let fee_loading = self.fee_loading;
        let fee_error = self.fee_error;

        Effect::new(move |previous: Option<Option<(OptionId, OptionId)>>| {
            let key = fee_key(orientation);
            if previous.as_ref() == Some(&key) {
                return key;
            }
            fee.set(None);
            fee_error.set(None);
            let Some((orientation_id, student_type_id)) = key.clone() else {
                fee_loading.set(false);
                return key;
            };

            fee_loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = model::fetch_fee(&orientation_id, &student_type_id).await;
                let still_current =
                    fee_key_untracked(orientation) == Some((orientation_id, student_type_id));
                if !still_current {
                    log::debug!("dropping fee for a superseded orientation");
                    return;
                }
                fee_loading.set(false);
                match result {
                    Ok(amount) => fee.set(Some(amount)),
                    Err(e) => fee_error.set(Some(e)),
                }
            });
            key
        });
    }

    // === Siblings ===

    pub fn add_sibling(&self) {
        self.siblings.update(|rows| rows.push(SiblingDetails::default()));
    }

    pub fn remove_sibling(&self, index: usize) {
        self.siblings.update(|rows| {
            if index < rows.len() {
                rows.remove(index);
            }
        });
    }

    pub fn update_sibling(&self, index: usize, f: impl FnOnce(&mut SiblingDetails)) {
        self.siblings.update(|rows| {
            if let Some(row) = rows.get_mut(index) {
                f(row);
            }
        });
    }

    // === Navigation ===

    pub fn validate_step(&self, step: FormStep) -> Result<(), PayloadError> {
        match step {
            FormStep::Personal => self.personal.with_untracked(model::validate_personal),
            FormStep::Parents => {
                let siblings = self.siblings.get_untracked();
                self.parents
                    .with_untracked(|p| model::validate_parents(p, &siblings))
            }
            FormStep::Academic => {
                self.academic.payload()?;
                self.academic_details.with_untracked(model::validate_academic)
            }
            FormStep::Orientation => {
                self.orientation.payload()?;
                let fee = self.fee.get_untracked();
                self.concession
                    .with_untracked(|c| model::validate_concession(c, fee))
            }
            FormStep::Review => Ok(()),
        }
    }

    pub fn next_step(&self) {
        let current = self.step.get_untracked();
        match self.validate_step(current) {
            Ok(()) => {
                self.error.set(None);
                if let Some(next) = current.next() {
                    self.step.set(next);
                }
            }
            Err(e) => self.error.set(Some(e.to_string())),
        }
    }

    pub fn prev_step(&self) {
        self.error.set(None);
        if let Some(prev) = self.step.get_untracked().prev() {
            self.step.set(prev);
        }
    }

    /// Jump straight to an earlier step; later steps stay behind validation
    pub fn go_to(&self, step: FormStep) {
        let all = FormStep::all();
        let target = all.iter().position(|s| *s == step);
        let current = all.iter().position(|s| *s == self.step.get_untracked());
        if target <= current {
            self.error.set(None);
            self.step.set(step);
        }
    }

    // === Commands ===

    pub fn sections(&self) -> PlainSections {
        PlainSections {
            personal: self.personal.get_untracked(),
            parents: self.parents.get_untracked(),
            siblings: self.siblings.get_untracked(),
            academic: self.academic_details.get_untracked(),
            concession: self.concession.get_untracked(),
        }
    }

    pub fn submit(&self, on_submitted: Callback<String>) {
        let sections = self.sections();
        let submission = self.academic.with_untracked(|academic| {
            self.orientation.with_untracked(|orientation| {
                model::build_submission(
                    self.track,
                    self.application_no.get_untracked(),
                    academic,
                    orientation,
                    &sections,
                    self.fee.get_untracked(),
                )
            })
        });
        let submission = match submission {
            Ok(s) => s,
            Err(e) => {
                log::warn!("application payload rejected: {}", e);
                self.error.set(Some(e.to_string()));
                return;
            }
        };

        let this = *self;
        this.saving.set(true);
        this.error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match model::submit_application(&submission).await {
                Ok(response) => {
                    log::info!("application {} saved", response.application_no);
                    this.saving.set(false);
                    this.application_no.set(Some(response.application_no.clone()));
                    on_submitted.run(response.application_no);
                }
                Err(e) => {
                    this.saving.set(false);
                    this.error.set(Some(e));
                }
            }
        });
    }
}

fn fee_key_from(r: &CascadeResolver) -> Option<(OptionId, OptionId)> {
    let orientation = r.level(ORIENTATION).filter(|l| l.is_resolved())?;
    let student_type = r.level(STUDENT_TYPE).filter(|l| l.is_resolved())?;
    Some((
        orientation.selected_id()?.clone(),
        student_type.selected_id()?.clone(),
    ))
}

fn fee_key(orientation: CascadeController) -> Option<(OptionId, OptionId)> {
    orientation.with(fee_key_from)
}

fn fee_key_untracked(orientation: CascadeController) -> Option<(OptionId, OptionId)> {
    orientation.with_untracked(fee_key_from)
}
