use super::super::view_model::ApplicationDetailsVm;
use crate::shared::components::ui::{
    format_amount, parse_amount, CascadeSelect, FormSection, KeyFilter, TextField,
};
use contracts::enums::Track;
use leptos::prelude::*;

#[component]
pub fn AcademicStep(vm: ApplicationDetailsVm) -> impl IntoView {
    let details = vm.academic_details;
    let levels = vm.academic.with_untracked(|r| r.len());
    let title = match vm.track {
        Track::School => "Previous school",
        Track::College => "Previous college",
    };

    view! {
        <FormSection title=title columns=2>
            {(0..levels)
                .map(|level| view! { <CascadeSelect controller=vm.academic level=level /> })
                .collect_view()}
        </FormSection>

        <FormSection title="Academic record">
            <TextField
                label="Previous class"
                required=true
                value=Signal::derive(move || details.with(|d| d.previous_class.clone()))
                on_input=Callback::new(move |v: String| details.update(|d| d.previous_class = v))
            />
            <TextField
                label="Hall ticket number"
                value=Signal::derive(move || details.with(|d| d.hall_ticket_no.clone()))
                on_input=Callback::new(move |v: String| details.update(|d| d.hall_ticket_no = v))
            />
            <TextField
                label="Marks (%)"
                filter=KeyFilter::Decimal
                max_length=6
                value=Signal::derive(move || details.with(|d| format_amount(d.marks_percentage)))
                on_input=Callback::new(move |v: String| details.update(|d| d.marks_percentage = parse_amount(&v)))
            />
        </FormSection>
    }
}
