use super::super::view_model::ApplicationDetailsVm;
use crate::shared::components::ui::{
    format_amount, parse_amount, ChoiceSelect, FormSection, KeyFilter, TextField,
};
use crate::shared::icons::icon;
use contracts::domain::a001_application::aggregate::SiblingDetails;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonSize};

fn relation_options() -> Vec<(String, String)> {
    ["Brother", "Sister"]
        .iter()
        .map(|r| (r.to_string(), r.to_string()))
        .collect()
}

#[component]
pub fn ParentsStep(vm: ApplicationDetailsVm) -> impl IntoView {
    let parents = vm.parents;
    let siblings = vm.siblings;

    view! {
        <FormSection title="Parents">
            <TextField
                label="Father's name"
                required=true
                filter=KeyFilter::Name
                value=Signal::derive(move || parents.with(|p| p.father_name.clone()))
                on_input=Callback::new(move |v: String| parents.update(|p| p.father_name = v))
            />
            <TextField
                label="Father's mobile"
                required=true
                filter=KeyFilter::Digits
                max_length=10
                value=Signal::derive(move || parents.with(|p| p.father_mobile.clone()))
                on_input=Callback::new(move |v: String| parents.update(|p| p.father_mobile = v))
            />
            <TextField
                label="Father's occupation"
                value=Signal::derive(move || parents.with(|p| p.father_occupation.clone()))
                on_input=Callback::new(move |v: String| parents.update(|p| p.father_occupation = v))
            />
            <TextField
                label="Mother's name"
                required=true
                filter=KeyFilter::Name
                value=Signal::derive(move || parents.with(|p| p.mother_name.clone()))
                on_input=Callback::new(move |v: String| parents.update(|p| p.mother_name = v))
            />
            <TextField
                label="Mother's mobile"
                filter=KeyFilter::Digits
                max_length=10
                value=Signal::derive(move || parents.with(|p| p.mother_mobile.clone()))
                on_input=Callback::new(move |v: String| parents.update(|p| p.mother_mobile = v))
            />
            <TextField
                label="Annual income"
                filter=KeyFilter::Decimal
                value=Signal::derive(move || parents.with(|p| format_amount(p.annual_income)))
                on_input=Callback::new(move |v: String| parents.update(|p| p.annual_income = parse_amount(&v)))
            />
        </FormSection>

        <FormSection title="Siblings" columns=1>
            <For
                each=move || 0..siblings.with(|rows| rows.len())
                key=|index| *index
                children=move |index| view! { <SiblingRow vm=vm index=index /> }
            />
            <div>
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=move |_| vm.add_sibling()
                >
                    {icon("plus")} " Add sibling"
                </Button>
            </div>
        </FormSection>
    }
}

#[component]
fn SiblingRow(vm: ApplicationDetailsVm, index: usize) -> impl IntoView {
    let siblings = vm.siblings;
    let field = move |get: fn(&SiblingDetails) -> String| {
        Signal::derive(move || {
            siblings.with(|rows| rows.get(index).map(get).unwrap_or_default())
        })
    };

    view! {
        <div class="details-grid--3col sibling-row">
            <TextField
                label="Full name"
                required=true
                filter=KeyFilter::Name
                value=field(|s| s.full_name.clone())
                on_input=Callback::new(move |v: String| vm.update_sibling(index, |s| s.full_name = v))
            />
            <ChoiceSelect
                label="Relation"
                required=true
                options=Signal::derive(relation_options)
                value=field(|s| s.relation.clone())
                on_change=Callback::new(move |v: String| vm.update_sibling(index, |s| s.relation = v))
            />
            <TextField
                label="Class"
                value=field(|s| s.class_name.clone())
                on_input=Callback::new(move |v: String| vm.update_sibling(index, |s| s.class_name = v))
            />
            <TextField
                label="School / college"
                value=field(|s| s.institution.clone())
                on_input=Callback::new(move |v: String| vm.update_sibling(index, |s| s.institution = v))
            />
            <div class="form__group" style="align-self: end;">
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| vm.remove_sibling(index)
                >
                    {icon("x")} " Remove"
                </Button>
            </div>
        </div>
    }
}
