//! Application form page (EditDetails MVVM Standard)

use super::model::FormStep;
use super::steps::{AcademicStep, OrientationStep, ParentsStep, PersonalStep, ReviewStep};
use super::view_model::ApplicationDetailsVm;
use crate::shared::components::ui::ErrorBanner;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a001_application::aggregate::ApplicationOverview;
use contracts::enums::Track;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ApplicationDetails(
    track: Track,
    /// Overview data of an application being edited
    saved: Option<ApplicationOverview>,
    #[prop(into)] on_submitted: Callback<String>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ApplicationDetailsVm::new(track);
    vm.start(saved);

    view! {
        <PageFrame page_id="a001_application--detail" category=PAGE_CAT_DETAIL>
            <Header vm=vm on_cancel=on_cancel />
            <StepBar vm=vm />
            <div class="page__content">
                <ErrorBanner error=vm.error />
                <StepContent vm=vm />
                <Footer vm=vm on_submitted=on_submitted />
            </div>
        </PageFrame>
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

#[component]
fn Header(vm: ApplicationDetailsVm, on_cancel: Callback<()>) -> impl IntoView {
    let application_no = vm.application_no;
    let track = vm.track;

    view! {
        <div class="page__header">
            <div class="page__header-left">
                {icon(match track {
                    Track::School => "school",
                    Track::College => "college",
                })}
                <h1 class="page__title">
                    {move || match application_no.get() {
                        Some(no) => format!("Application {}", no),
                        None => format!("New {} application", track.display_name().to_lowercase()),
                    }}
                </h1>
            </div>
            <div class="page__header-right">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                >
                    {icon("x")} " Close"
                </Button>
            </div>
        </div>
    }
}

// ── Step bar ──────────────────────────────────────────────────────────────────

#[component]
fn StepBar(vm: ApplicationDetailsVm) -> impl IntoView {
    let step = vm.step;

    view! {
        <div class="page__tabs">
            {FormStep::all()
                .into_iter()
                .map(|s| view! {
                    <button
                        class="page__tab"
                        class:page__tab--active=move || step.get() == s
                        on:click=move |_| vm.go_to(s)
                    >
                        {s.display_name()}
                    </button>
                })
                .collect_view()}
        </div>
    }
}

// ── Step content ──────────────────────────────────────────────────────────────

#[component]
fn StepContent(vm: ApplicationDetailsVm) -> impl IntoView {
    let step = vm.step;

    // Steps stay mounted so field state and pending fetches survive navigation
    let shown = move |s: FormStep| move || if step.get() == s { "" } else { "display: none;" };

    view! {
        <div style=shown(FormStep::Personal)><PersonalStep vm=vm /></div>
        <div style=shown(FormStep::Parents)><ParentsStep vm=vm /></div>
        <div style=shown(FormStep::Academic)><AcademicStep vm=vm /></div>
        <div style=shown(FormStep::Orientation)><OrientationStep vm=vm /></div>
        <div style=shown(FormStep::Review)><ReviewStep vm=vm /></div>
    }
}

// ── Footer ────────────────────────────────────────────────────────────────────

#[component]
fn Footer(vm: ApplicationDetailsVm, on_submitted: Callback<String>) -> impl IntoView {
    let step = vm.step;
    let saving = vm.saving;
    let is_first = move || step.get().prev().is_none();
    let is_last = move || step.get().next().is_none();

    view! {
        <div class="page__footer" style="display: flex; gap: var(--spacing-sm); justify-content: flex-end;">
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(is_first)
                on_click=move |_| vm.prev_step()
            >
                {icon("chevron-left")} " Back"
            </Button>
            <Show
                when=is_last
                fallback=move || view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.next_step()
                    >
                        "Next " {icon("chevron-right")}
                    </Button>
                }
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get())
                    on_click=move |_| vm.submit(on_submitted)
                >
                    {icon("save")}
                    {move || if saving.get() { " Saving..." } else { " Submit" }}
                </Button>
            </Show>
        </div>
    }
}
