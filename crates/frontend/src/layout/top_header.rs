//! Top navigation bar: new application shortcuts and lookup by number

use crate::layout::global_context::{AppGlobalContext, Screen};
use crate::shared::icons::icon;
use contracts::enums::Track;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let lookup = RwSignal::new(String::new());

    let open_lookup = move || {
        let no = lookup.get_untracked().trim().to_uppercase();
        if !no.is_empty() {
            ctx.open(Screen::Overview(no));
        }
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Admissions"</span>
            </div>
            <div class="top-header__actions">
                {Track::all()
                    .into_iter()
                    .map(|track| view! {
                        <button
                            class="top-header__btn"
                            on:click=move |_| ctx.open(Screen::NewApplication(track))
                        >
                            {icon(track.code())}
                            {format!(" New {} application", track.display_name().to_lowercase())}
                        </button>
                    })
                    .collect_view()}
                <input
                    class="top-header__search"
                    placeholder="Application number"
                    prop:value=move || lookup.get()
                    on:input=move |ev| lookup.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            open_lookup();
                        }
                    }
                />
                <button class="top-header__icon-btn" title="Open" on:click=move |_| open_lookup()>
                    {icon("search")}
                </button>
            </div>
        </div>
    }
}
