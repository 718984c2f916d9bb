pub mod cascade_select;
pub mod form_section;
pub mod input;
pub mod select;

pub use cascade_select::CascadeSelect;
pub use form_section::{ErrorBanner, FormSection};
pub use input::{format_amount, parse_amount, KeyFilter, TextField};
pub use select::{enum_options, ChoiceSelect};
