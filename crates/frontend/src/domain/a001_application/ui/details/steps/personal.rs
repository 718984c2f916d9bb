//! Student step: name, gender, date of birth, identity and contact

use super::super::view_model::ApplicationDetailsVm;
use crate::shared::components::ui::{ChoiceSelect, FormSection, KeyFilter, TextField};
use chrono::NaiveDate;
use leptos::prelude::*;

pub fn gender_options() -> Vec<(String, String)> {
    [("M", "Male"), ("F", "Female"), ("O", "Other")]
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect()
}

#[component]
pub fn PersonalStep(vm: ApplicationDetailsVm) -> impl IntoView {
    let personal = vm.personal;

    view! {
        <FormSection title="Student details">
            <TextField
                label="First name"
                required=true
                filter=KeyFilter::Name
                value=Signal::derive(move || personal.with(|p| p.first_name.clone()))
                on_input=Callback::new(move |v: String| personal.update(|p| p.first_name = v))
            />
            <TextField
                label="Last name"
                required=true
                filter=KeyFilter::Name
                value=Signal::derive(move || personal.with(|p| p.last_name.clone()))
                on_input=Callback::new(move |v: String| personal.update(|p| p.last_name = v))
            />
            <ChoiceSelect
                label="Gender"
                required=true
                options=Signal::derive(gender_options)
                value=Signal::derive(move || personal.with(|p| p.gender.clone()))
                on_change=Callback::new(move |v: String| personal.update(|p| p.gender = v))
            />
            <TextField
                label="Date of birth"
                required=true
                input_type="date"
                value=Signal::derive(move || {
                    personal.with(|p| p.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default())
                })
                on_input=Callback::new(move |v: String| {
                    personal.update(|p| p.date_of_birth = NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
                })
            />
            <TextField
                label="Aadhaar number"
                filter=KeyFilter::Digits
                max_length=12
                value=Signal::derive(move || personal.with(|p| p.aadhaar_no.clone()))
                on_input=Callback::new(move |v: String| personal.update(|p| p.aadhaar_no = v))
            />
            <TextField
                label="Mobile"
                required=true
                filter=KeyFilter::Digits
                max_length=10
                value=Signal::derive(move || personal.with(|p| p.mobile.clone()))
                on_input=Callback::new(move |v: String| personal.update(|p| p.mobile = v))
            />
            <TextField
                label="E-mail"
                input_type="email"
                value=Signal::derive(move || personal.with(|p| p.email.clone()))
                on_input=Callback::new(move |v: String| personal.update(|p| p.email = v))
            />
        </FormSection>
    }
}
