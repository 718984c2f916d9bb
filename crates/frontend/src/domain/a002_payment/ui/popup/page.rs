//! Payment popup: mode, amount, reference and (for cheque / DD) the bank cascade

use super::model::reference_title;
use super::view_model::PaymentPopupVm;
use crate::domain::a002_payment::levels::BANK_LEVELS;
use crate::shared::components::ui::{
    enum_options, format_amount, parse_amount, CascadeSelect, ChoiceSelect, ErrorBanner,
    FormSection, KeyFilter, TextField,
};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_POPUP};
use contracts::domain::a002_payment::aggregate::PaymentReceipt;
use contracts::enums::PaymentMode;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn PaymentPopup(
    application_no: String,
    /// Pre-filled amount, usually the outstanding balance
    #[prop(optional)]
    suggested_amount: Option<f64>,
    #[prop(into)] on_paid: Callback<PaymentReceipt>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = PaymentPopupVm::new(application_no, suggested_amount);
    let mode = vm.mode;
    let saving = vm.saving;
    let needs_bank = move || mode.get().needs_bank();

    view! {
        <ModalFrame on_close=on_close modal_style="width: min(640px, 95vw);".to_string()>
            <PageFrame page_id="a002_payment--popup" category=PAGE_CAT_POPUP>
                <div class="page__header">
                    <div class="page__header-left">
                        {icon("payments")}
                        <h2 class="page__title">
                            {move || format!("Payment for {}", vm.application_no.get_value())}
                        </h2>
                    </div>
                    <div class="page__header-right">
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || saving.get())
                            on_click=move |_| vm.submit(on_paid)
                        >
                            {icon("save")} " Record"
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
                    <ErrorBanner error=vm.error />
                    <FormSection title="Payment" columns=2>
                        <ChoiceSelect
                            label="Mode"
                            required=true
                            placeholder="Select mode"
                            options=Signal::derive(|| enum_options(
                                &PaymentMode::all(),
                                PaymentMode::code,
                                PaymentMode::display_name,
                            ))
                            value=Signal::derive(move || mode.get().code().to_string())
                            on_change=Callback::new(move |code: String| vm.set_mode(&code))
                        />
                        <TextField
                            label="Amount"
                            required=true
                            filter=KeyFilter::Decimal
                            value=Signal::derive(move || format_amount(vm.amount.get()))
                            on_input=Callback::new(move |v: String| vm.amount.set(parse_amount(&v)))
                        />
                        <TextField
                            label=Signal::derive(move || Some(reference_title(mode.get()).to_string()))
                            value=Signal::derive(move || vm.reference_no.get())
                            on_input=Callback::new(move |v: String| vm.reference_no.set(v))
                        />
                    </FormSection>

                    <Show when=needs_bank>
                        <FormSection title="Drawn on" columns=1>
                            {(0..BANK_LEVELS.len())
                                .map(|level| view! { <CascadeSelect controller=vm.bank level=level /> })
                                .collect_view()}
                        </FormSection>
                    </Show>
                </div>
            </PageFrame>
        </ModalFrame>
    }
}
