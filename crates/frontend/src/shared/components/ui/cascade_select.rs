use crate::shared::cascade::{CascadeController, CascadeResolver};
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonSize};

/// `(value, text)` of the extra `<option>` that shows a placeholder selection
/// the current list does not contain
pub fn placeholder_option(r: &CascadeResolver, level: usize) -> Option<(String, String)> {
    let l = r.level(level).filter(|l| l.is_inconsistent())?;
    let value = l.selected_id()?.as_key();
    Some((value, l.selected_label().to_string()))
}

/// Dropdown bound to one level of a cascade.
///
/// Disabled until every parent level holds a resolved id. Shows the loading
/// state, a retry button after a failed load and the saved value that could
/// not be matched.
#[component]
pub fn CascadeSelect(controller: CascadeController, level: usize) -> impl IntoView {
    let title = controller.with_untracked(|r| r.level(level).map(|l| l.spec().title).unwrap_or(""));
    let required = controller.with_untracked(|r| r.level(level).map(|l| l.spec().required).unwrap_or(false));
    let select_id = controller.with_untracked(|r| {
        r.level(level)
            .map(|l| format!("cascade-{}", l.spec().key))
            .unwrap_or_default()
    });

    let options = move || controller.with(|r| r.option_pairs(level));
    let selected_key = move || {
        controller.with(|r| {
            r.level(level)
                .and_then(|l| l.selected_id().map(|id| id.as_key()))
                .unwrap_or_default()
        })
    };
    let is_loading = move || controller.with(|r| r.level(level).is_some_and(|l| l.is_loading()));
    let is_disabled = move || !controller.with(|r| r.is_eligible(level)) || is_loading();
    let load_error = move || controller.with(|r| r.level(level).and_then(|l| l.load_error().map(str::to_string)));
    let unresolved = move || {
        controller.with(|r| {
            r.level(level)
                .and_then(|l| l.pending())
                .filter(|p| p.exhausted)
                .map(|p| p.reference.text.clone())
        })
    };
    let inconsistent = move || {
        controller.with(|r| {
            r.level(level)
                .filter(|l| l.is_inconsistent())
                .map(|l| l.selected_label().to_string())
        })
    };
    let empty_text = move || if is_loading() { "Loading..." } else { "Select" };

    view! {
        <div class="form__group cascade-select">
            <label class="form__label" for=select_id.clone()>
                {title}
                {required.then_some(" *")}
            </label>
            <select
                id=select_id
                class="form__select"
                disabled=is_disabled
                on:change=move |ev| {
                    controller.select(level, &event_target_value(&ev));
                }
            >
                <option value="" selected=move || selected_key().is_empty()>
                    {empty_text}
                </option>
                <For
                    each=options
                    key=|(val, _)| val.clone()
                    children=move |(val, text)| {
                        let current = val.clone();
                        let is_selected = move || selected_key() == current;
                        view! {
                            <option value=val selected=is_selected>
                                {text}
                            </option>
                        }
                    }
                />
                {move || controller.with(|r| placeholder_option(r, level)).map(|(value, text)| view! {
                    <option value=value selected=true>{text}</option>
                })}
            </select>
            {move || load_error().map(|e| view! {
                <div class="form__error">
                    <span>{format!("Could not load {}: {}", title.to_lowercase(), e)}</span>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| controller.retry(level)
                    >
                        "Retry"
                    </Button>
                </div>
            })}
            {move || unresolved().map(|text| view! {
                <div class="form__error">{format!("Saved value \"{}\" is not available, please choose again", text)}</div>
            })}
            {move || inconsistent().map(|label| view! {
                <div class="form__warning">{format!("\"{}\" is not in the current list", label)}</div>
            })}
        </div>
    }
}
