use super::super::view_model::ApplicationDetailsVm;
use crate::shared::cascade::CascadeController;
use crate::shared::components::ui::{format_amount, FormSection};
use leptos::prelude::*;

fn rows(pairs: Vec<(String, String)>) -> impl IntoView {
    pairs
        .into_iter()
        .map(|(title, value)| {
            view! {
                <div class="form__group">
                    <label class="form__label">{title}</label>
                    <div class="form__static">{value}</div>
                </div>
            }
        })
        .collect_view()
}

#[component]
pub fn ReviewStep(vm: ApplicationDetailsVm) -> impl IntoView {
    let student = move || {
        vm.personal.with(|p| {
            vec![
                ("Student".to_string(), format!("{} {}", p.first_name, p.last_name)),
                (
                    "Date of birth".to_string(),
                    p.date_of_birth.map(|d| d.format("%d.%m.%Y").to_string()).unwrap_or_default(),
                ),
                ("Mobile".to_string(), p.mobile.clone()),
            ]
        })
    };
    let parents = move || {
        vm.parents.with(|p| {
            vec![
                ("Father".to_string(), p.father_name.clone()),
                ("Mother".to_string(), p.mother_name.clone()),
                ("Siblings".to_string(), vm.siblings.with(|s| s.len().to_string())),
            ]
        })
    };
    let cascade = |controller: CascadeController| {
        move || {
            controller.with(|r| {
                r.summary()
                    .into_iter()
                    .map(|(title, label)| (title.to_string(), label))
                    .collect::<Vec<_>>()
            })
        }
    };
    let fee = move || {
        let mut pairs = vec![("Course fee".to_string(), format_amount(vm.fee.get()))];
        vm.concession.with(|c| {
            if c.is_requested() {
                pairs.push(("Concession".to_string(), format_amount(c.amount)));
            }
        });
        pairs
    };

    view! {
        <FormSection title="Student">{move || rows(student())}</FormSection>
        <FormSection title="Parents">{move || rows(parents())}</FormSection>
        <FormSection title="Previous education">{
            let academic = cascade(vm.academic);
            move || rows(academic())
        }</FormSection>
        <FormSection title="Admission">{
            let orientation = cascade(vm.orientation);
            move || rows(orientation())
        }</FormSection>
        <FormSection title="Fee">{move || rows(fee())}</FormSection>
    }
}
