pub mod global_context;
pub mod top_header;

use crate::domain::a001_application::ui::details::ApplicationDetails;
use crate::domain::a001_application::ui::overview::model::fetch_overview;
use crate::domain::a001_application::ui::overview::ApplicationOverviewPage;
use crate::shared::components::ui::ErrorBanner;
use contracts::domain::a001_application::aggregate::ApplicationOverview;
use contracts::enums::Track;
use global_context::{AppGlobalContext, Screen};
use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell: top bar plus the screen selected in [`AppGlobalContext`]
#[component]
pub fn Shell() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-main">
                {move || match ctx.screen.get() {
                    Screen::Home => view! { <Home /> }.into_any(),
                    Screen::NewApplication(track) => view! {
                        <ApplicationForm track=track saved=None />
                    }.into_any(),
                    Screen::Overview(no) => view! {
                        <ApplicationOverviewPage
                            application_no=no
                            on_edit=move |overview: ApplicationOverview| ctx.edit(overview)
                            on_close=move |_: ()| ctx.open(Screen::Home)
                        />
                    }.into_any(),
                    Screen::Edit(no) => view! { <EditApplication application_no=no /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn Home() -> impl IntoView {
    view! {
        <div class="page">
            <div class="page__content">
                <p>"Start a new school or college application, or open a saved one by its number."</p>
            </div>
        </div>
    }
}

/// Form wired to navigation: submit opens the overview, close goes home
#[component]
fn ApplicationForm(track: Track, saved: Option<ApplicationOverview>) -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <ApplicationDetails
            track=track
            saved=saved
            on_submitted=move |no: String| ctx.open(Screen::Overview(no))
            on_cancel=move |_: ()| ctx.open(Screen::Home)
        />
    }
}

/// Uses the overview handed over by the overview screen, or loads it when
/// the edit screen was opened straight from the URL
#[component]
fn EditApplication(application_no: String) -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let saved = RwSignal::new(ctx.take_draft(&application_no));
    let error = RwSignal::new(None::<String>);

    if saved.get_untracked().is_none() {
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_overview(&application_no).await {
                Ok(overview) => saved.set(Some(overview)),
                Err(e) => error.set(Some(e)),
            }
        });
    }

    view! {
        <ErrorBanner error=error />
        {move || saved.get().map(|overview| {
            let track = overview.track;
            view! { <ApplicationForm track=track saved=Some(overview) /> }
        })}
    }
}
