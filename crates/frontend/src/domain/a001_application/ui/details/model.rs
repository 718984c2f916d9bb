use crate::domain::a001_application::levels::fee_path;
use crate::shared::api_utils::{get_json, post_json};
use crate::shared::cascade::shell::{
    optional_aadhaar, optional_email, percentage, require_mobile, require_text,
};
use crate::shared::cascade::{CascadeResolver, OptionId, PayloadBuilder, PayloadError};
use contracts::domain::a001_application::aggregate::{
    AcademicDetails, ApplicationSubmission, ConcessionDetails, ParentDetails, PersonalDetails,
    SiblingDetails, SubmitApplicationResponse,
};
use contracts::enums::Track;
use contracts::shared::catalog::FeeRecord;
use serde_json::{Map, Value};

// ============================================================================
// Steps
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStep {
    #[default]
    Personal,
    Parents,
    Academic,
    Orientation,
    Review,
}

impl FormStep {
    pub fn code(&self) -> &'static str {
        match self {
            FormStep::Personal => "personal",
            FormStep::Parents => "parents",
            FormStep::Academic => "academic",
            FormStep::Orientation => "orientation",
            FormStep::Review => "review",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FormStep::Personal => "Student",
            FormStep::Parents => "Parents & siblings",
            FormStep::Academic => "Previous education",
            FormStep::Orientation => "Admission & fee",
            FormStep::Review => "Review",
        }
    }

    pub fn all() -> Vec<FormStep> {
        vec![
            FormStep::Personal,
            FormStep::Parents,
            FormStep::Academic,
            FormStep::Orientation,
            FormStep::Review,
        ]
    }

    pub fn next(&self) -> Option<FormStep> {
        let all = Self::all();
        let position = all.iter().position(|s| s == self)?;
        all.get(position + 1).copied()
    }

    pub fn prev(&self) -> Option<FormStep> {
        let all = Self::all();
        let position = all.iter().position(|s| s == self)?;
        position.checked_sub(1).and_then(|p| all.get(p).copied())
    }
}

// ============================================================================
// Plain sections
// ============================================================================

/// Snapshot of every plain (non-cascade) field of the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlainSections {
    pub personal: PersonalDetails,
    pub parents: ParentDetails,
    pub siblings: Vec<SiblingDetails>,
    pub academic: AcademicDetails,
    pub concession: ConcessionDetails,
}

impl PlainSections {
    /// Reads sections back out of a stored payload. Unknown keys are ignored
    /// and missing ones fall back to defaults.
    pub fn from_saved(data: &Map<String, Value>) -> Self {
        let object = Value::Object(data.clone());
        Self {
            personal: section_from(&object),
            parents: section_from(&object),
            siblings: data
                .get("siblings")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
            academic: section_from(&object),
            concession: section_from(&object),
        }
    }
}

fn section_from<T: serde::de::DeserializeOwned + Default>(object: &Value) -> T {
    match serde_json::from_value(object.clone()) {
        Ok(section) => section,
        Err(e) => {
            log::warn!("saved section could not be read: {}", e);
            T::default()
        }
    }
}

pub fn validate_personal(p: &PersonalDetails) -> Result<(), PayloadError> {
    require_text("firstName", "First name", &p.first_name)?;
    require_text("lastName", "Last name", &p.last_name)?;
    require_text("gender", "Gender", &p.gender)?;
    if p.date_of_birth.is_none() {
        return Err(PayloadError::InvalidField {
            field: "dateOfBirth".into(),
            title: "Date of birth".into(),
            message: "this field is required".into(),
        });
    }
    optional_aadhaar("aadhaarNo", "Aadhaar number", &p.aadhaar_no)?;
    require_mobile("mobile", "Mobile", &p.mobile)?;
    optional_email("email", "E-mail", &p.email)
}

pub fn validate_parents(p: &ParentDetails, siblings: &[SiblingDetails]) -> Result<(), PayloadError> {
    require_text("fatherName", "Father's name", &p.father_name)?;
    require_mobile("fatherMobile", "Father's mobile", &p.father_mobile)?;
    require_text("motherName", "Mother's name", &p.mother_name)?;
    if !p.mother_mobile.trim().is_empty() {
        require_mobile("motherMobile", "Mother's mobile", &p.mother_mobile)?;
    }
    if matches!(p.annual_income, Some(income) if income < 0.0) {
        return Err(PayloadError::InvalidField {
            field: "annualIncome".into(),
            title: "Annual income".into(),
            message: "cannot be negative".into(),
        });
    }
    for (i, sibling) in siblings.iter().enumerate() {
        let title = format!("Sibling {}", i + 1);
        require_text("siblings", &format!("{} name", title), &sibling.full_name)?;
        require_text("siblings", &format!("{} relation", title), &sibling.relation)?;
    }
    Ok(())
}

pub fn validate_academic(a: &AcademicDetails) -> Result<(), PayloadError> {
    require_text("previousClass", "Previous class", &a.previous_class)?;
    percentage("marksPercentage", "Marks (%)", a.marks_percentage)
}

pub fn validate_concession(c: &ConcessionDetails, fee: Option<f64>) -> Result<(), PayloadError> {
    if !c.is_requested() {
        return Ok(());
    }
    let invalid = |message: &str| PayloadError::InvalidField {
        field: "concessionAmount".into(),
        title: "Concession amount".into(),
        message: message.into(),
    };
    match c.amount {
        None => return Err(invalid("this field is required")),
        Some(amount) if amount <= 0.0 => return Err(invalid("must be greater than zero")),
        Some(amount) if fee.is_some_and(|fee| amount > fee) => {
            return Err(invalid("cannot exceed the fee"))
        }
        Some(_) => {}
    }
    require_text("concessionReason", "Concession reason", &c.reason)
}

/// Full outbound record; fails on the first invalid part in form order
pub fn build_submission(
    track: Track,
    application_no: Option<String>,
    academic: &CascadeResolver,
    orientation: &CascadeResolver,
    sections: &PlainSections,
    fee: Option<f64>,
) -> Result<ApplicationSubmission, PayloadError> {
    let mut builder = PayloadBuilder::new()
        .check(validate_personal(&sections.personal))
        .check(validate_parents(&sections.parents, &sections.siblings))
        .cascade(academic)
        .check(validate_academic(&sections.academic))
        .cascade(orientation)
        .check(validate_concession(&sections.concession, fee))
        .section(&sections.personal)
        .section(&sections.parents)
        .list("siblings", &sections.siblings)
        .section(&sections.academic);
    if sections.concession.is_requested() {
        builder = builder.section(&sections.concession);
    }
    if let Some(fee) = fee {
        builder = builder.field("feeAmount", fee);
    }

    Ok(ApplicationSubmission {
        application_no,
        track,
        payload: builder.build()?,
    })
}

// ============================================================================
// API
// ============================================================================

pub async fn submit_application(
    submission: &ApplicationSubmission,
) -> Result<SubmitApplicationResponse, String> {
    post_json("/api/applications", submission).await
}

pub async fn fetch_fee(orientation: &OptionId, student_type: &OptionId) -> Result<f64, String> {
    let fee: FeeRecord = get_json(&fee_path(orientation, student_type)).await?;
    Ok(fee.amount)
}
