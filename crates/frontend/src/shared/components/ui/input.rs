use leptos::prelude::*;

/// Which characters a field accepts while typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFilter {
    #[default]
    Any,
    Digits,
    /// Digits and one decimal point
    Decimal,
    /// Letters, spaces and `.`
    Name,
}

impl KeyFilter {
    /// Drops the characters the filter rejects
    pub fn apply(&self, raw: &str) -> String {
        match self {
            KeyFilter::Any => raw.to_string(),
            KeyFilter::Digits => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
            KeyFilter::Decimal => {
                let mut seen_point = false;
                raw.chars()
                    .filter(|c| {
                        if *c == '.' && !seen_point {
                            seen_point = true;
                            true
                        } else {
                            c.is_ascii_digit()
                        }
                    })
                    .collect()
            }
            KeyFilter::Name => raw
                .chars()
                .filter(|c| c.is_alphabetic() || *c == ' ' || *c == '.')
                .collect(),
        }
    }
}

/// Text input with label and keystroke filter
#[component]
pub fn TextField(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    /// Receives the filtered value
    on_input: Callback<String>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// "text" (default), "date", "email", ...
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    #[prop(optional)]
    filter: KeyFilter,
    #[prop(optional)]
    max_length: Option<usize>,
    #[prop(optional)]
    required: bool,
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let input_placeholder = move || placeholder.get().unwrap_or_default();
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label">
                    {l}
                    {required.then_some(" *")}
                </label>
            })}
            <input
                class="form__input"
                type=input_t
                prop:value=move || value.get()
                placeholder=input_placeholder
                maxlength=max_length.map(|m| m.to_string())
                disabled=move || disabled.get()
                on:input=move |ev| {
                    let mut filtered = filter.apply(&event_target_value(&ev));
                    if let Some(max) = max_length {
                        filtered = filtered.chars().take(max).collect();
                    }
                    on_input.run(filtered);
                }
            />
        </div>
    }
}

/// Parses an optional number field; empty or invalid text becomes `None`
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        text.parse().ok()
    }
}

/// Renders an optional number without a trailing `.0`
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_filters() {
        assert_eq!(KeyFilter::Digits.apply("98a76-54"), "987654");
        assert_eq!(KeyFilter::Decimal.apply("12.5.0x"), "12.50");
        assert_eq!(KeyFilter::Name.apply("K. Ravi 2"), "K. Ravi ");
        assert_eq!(KeyFilter::Any.apply("a-1"), "a-1");
    }

    #[test]
    fn test_amounts() {
        assert_eq!(parse_amount(" 42500 "), Some(42500.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(format_amount(Some(42500.0)), "42500");
        assert_eq!(format_amount(Some(99.5)), "99.5");
        assert_eq!(format_amount(None), "");
    }
}
