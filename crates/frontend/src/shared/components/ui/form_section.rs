use leptos::prelude::*;
use thaw::Card;

/// Titled card holding one group of form fields
#[component]
pub fn FormSection(
    #[prop(into)] title: String,
    /// Grid columns for the field layout
    #[prop(optional)]
    columns: Option<u8>,
    children: Children,
) -> impl IntoView {
    let grid_class = match columns.unwrap_or(3) {
        1 => "details-grid--1col",
        2 => "details-grid--2col",
        _ => "details-grid--3col",
    };

    view! {
        <Card attr:style="margin-bottom: var(--spacing-md);">
            <h4 class="details-section__title">{title}</h4>
            <div class=grid_class>
                {children()}
            </div>
        </Card>
    }
}

/// Error banner, hidden while `error` is `None`
#[component]
pub fn ErrorBanner(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || error.get().map(|e| view! {
            <div
                class="warning-box"
                style="background: var(--color-error-50); border-color: var(--color-error-100); margin-bottom: var(--spacing-md);"
            >
                <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
                <span class="warning-box__text" style="color: var(--color-error);">{e}</span>
            </div>
        })}
    }
}
