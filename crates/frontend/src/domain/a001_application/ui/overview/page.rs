//! Read-only overview of a saved application, with payments

use super::model::{balance, fetch_overview, overview_sections};
use crate::domain::a002_payment::ui::popup::PaymentPopup;
use crate::shared::components::ui::{format_amount, ErrorBanner, FormSection};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a001_application::aggregate::ApplicationOverview;
use contracts::domain::a002_payment::aggregate::PaymentReceipt;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ApplicationOverviewPage(
    application_no: String,
    /// Opens the form with the overview as saved data
    #[prop(into)] on_edit: Callback<ApplicationOverview>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let overview = RwSignal::new(None::<ApplicationOverview>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let paying = RwSignal::new(false);

    let number = application_no.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_overview(&number).await {
            Ok(data) => overview.set(Some(data)),
            Err(e) => {
                log::error!("overview {}: {}", number, e);
                error.set(Some(e));
            }
        }
        loading.set(false);
    });

    let handle_edit = move |_: leptos::ev::MouseEvent| {
        if let Some(data) = overview.get_untracked() {
            on_edit.run(data);
        }
    };

    view! {
        <PageFrame page_id="a001_application--overview" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("overview")}
                    <h1 class="page__title">{format!("Application {}", application_no)}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || overview.with(|o| o.is_none()))
                        on_click=move |_| paying.set(true)
                    >
                        {icon("payments")} " Add payment"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || overview.with(|o| o.is_none()))
                        on_click=handle_edit
                    >
                        {icon("edit")} " Edit"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                    >
                        {icon("x")} " Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner error=error />
                <Show when=move || loading.get()>
                    <div class="page__placeholder">"Loading..."</div>
                </Show>
                {move || overview.get().map(|data| view! { <OverviewBody overview=data /> })}
            </div>

            <Show when=move || paying.get()>
                {move || overview.get_untracked().map(|data| view! {
                    <PaymentPopup
                        application_no=data.application_no.clone()
                        suggested_amount=balance(&data).unwrap_or(0.0)
                        on_paid=move |receipt: PaymentReceipt| {
                            overview.update(|o| {
                                if let Some(o) = o.as_mut() {
                                    o.payments.push(receipt);
                                }
                            });
                            paying.set(false);
                        }
                        on_close=move |_: ()| paying.set(false)
                    />
                })}
            </Show>
        </PageFrame>
    }
}

#[component]
fn OverviewBody(overview: ApplicationOverview) -> impl IntoView {
    let sections = overview_sections(overview.track)
        .into_iter()
        .map(|section| {
            let rows = section
                .fields
                .iter()
                .filter_map(|(key, title)| {
                    overview.display_value(key).map(|value| view! {
                        <div class="form__group">
                            <label class="form__label">{*title}</label>
                            <div class="form__static">{value}</div>
                        </div>
                    })
                })
                .collect_view();
            view! { <FormSection title=section.title>{rows}</FormSection> }
        })
        .collect_view();

    let total_paid = overview.total_paid();
    let outstanding = balance(&overview);
    let payments = overview
        .payments
        .iter()
        .map(|p| view! {
            <tr>
                <td>{p.paid_at.format("%d.%m.%Y %H:%M").to_string()}</td>
                <td>{p.mode.display_name()}</td>
                <td>{p.reference_no.clone()}</td>
                <td style="text-align: right;">{format_amount(Some(p.amount))}</td>
            </tr>
        })
        .collect_view();

    view! {
        {sections}
        <FormSection title="Payments" columns=1>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Mode"</th>
                        <th>"Reference"</th>
                        <th style="text-align: right;">"Amount"</th>
                    </tr>
                </thead>
                <tbody>{payments}</tbody>
            </table>
            <div class="form__static">
                {format!("Paid: ₹ {}", format_amount(Some(total_paid)))}
                {outstanding.map(|b| format!(" · Balance: ₹ {}", format_amount(Some(b))))}
            </div>
        </FormSection>
    }
}
