use super::super::view_model::ApplicationDetailsVm;
use crate::shared::components::ui::{
    format_amount, parse_amount, CascadeSelect, ChoiceSelect, FormSection, KeyFilter, TextField,
};
use leptos::prelude::*;

fn concession_options() -> Vec<(String, String)> {
    [
        ("staff", "Staff ward"),
        ("sibling", "Sibling studying with us"),
        ("merit", "Merit"),
        ("management", "Management quota"),
    ]
    .iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

#[component]
pub fn OrientationStep(vm: ApplicationDetailsVm) -> impl IntoView {
    let levels = vm.orientation.with_untracked(|r| r.len());
    let concession = vm.concession;
    let fee = vm.fee;
    let fee_loading = vm.fee_loading;
    let fee_error = vm.fee_error;

    let fee_text = move || {
        if fee_loading.get() {
            "Loading fee...".to_string()
        } else if let Some(e) = fee_error.get() {
            format!("Fee unavailable: {}", e)
        } else {
            match fee.get() {
                Some(amount) => format!("₹ {}", format_amount(Some(amount))),
                None => "Select orientation and student type".to_string(),
            }
        }
    };
    let net_text = move || {
        let discount = concession.with(|c| if c.is_requested() { c.amount.unwrap_or(0.0) } else { 0.0 });
        fee.get()
            .map(|amount| format!("₹ {}", format_amount(Some((amount - discount).max(0.0)))))
            .unwrap_or_default()
    };
    let concession_requested = move || concession.with(|c| c.is_requested());

    view! {
        <FormSection title="Admission">
            {(0..levels)
                .map(|level| view! { <CascadeSelect controller=vm.orientation level=level /> })
                .collect_view()}
        </FormSection>

        <FormSection title="Fee & concession">
            <div class="form__group">
                <label class="form__label">"Course fee"</label>
                <div class="form__static">{fee_text}</div>
            </div>
            <ChoiceSelect
                label="Concession"
                placeholder="No concession"
                options=Signal::derive(concession_options)
                value=Signal::derive(move || concession.with(|c| c.concession_type.clone()))
                on_change=Callback::new(move |v: String| concession.update(|c| c.concession_type = v))
            />
            <TextField
                label="Concession amount"
                filter=KeyFilter::Decimal
                disabled=Signal::derive(move || !concession_requested())
                value=Signal::derive(move || concession.with(|c| format_amount(c.amount)))
                on_input=Callback::new(move |v: String| concession.update(|c| c.amount = parse_amount(&v)))
            />
            <TextField
                label="Reason"
                disabled=Signal::derive(move || !concession_requested())
                value=Signal::derive(move || concession.with(|c| c.reason.clone()))
                on_input=Callback::new(move |v: String| concession.update(|c| c.reason = v))
            />
            <TextField
                label="Referred by"
                value=Signal::derive(move || concession.with(|c| c.referred_by.clone()))
                on_input=Callback::new(move |v: String| concession.update(|c| c.referred_by = v))
            />
            <div class="form__group">
                <label class="form__label">"Net payable"</label>
                <div class="form__static">{net_text}</div>
            </div>
        </FormSection>
    }
}
