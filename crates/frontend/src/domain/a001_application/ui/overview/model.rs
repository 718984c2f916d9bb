use crate::shared::api_utils::get_json;
use contracts::domain::a001_application::aggregate::ApplicationOverview;
use contracts::enums::Track;

/// One block of the overview: title and `(data key, field title)` rows
pub struct OverviewSection {
    pub title: &'static str,
    pub fields: &'static [(&'static str, &'static str)],
}

const STUDENT: OverviewSection = OverviewSection {
    title: "Student",
    fields: &[
        ("firstName", "First name"),
        ("lastName", "Last name"),
        ("gender", "Gender"),
        ("dateOfBirth", "Date of birth"),
        ("aadhaarNo", "Aadhaar"),
        ("mobile", "Mobile"),
        ("email", "E-mail"),
    ],
};

const PARENTS: OverviewSection = OverviewSection {
    title: "Parents",
    fields: &[
        ("fatherName", "Father"),
        ("fatherMobile", "Father's mobile"),
        ("fatherOccupation", "Occupation"),
        ("motherName", "Mother"),
        ("motherMobile", "Mother's mobile"),
        ("annualIncome", "Annual income"),
    ],
};

const PREVIOUS_SCHOOL: OverviewSection = OverviewSection {
    title: "Previous school",
    fields: &[
        ("stateName", "State"),
        ("districtName", "District"),
        ("schoolType", "School type"),
        ("schoolName", "School"),
        ("previousClass", "Class"),
        ("hallTicketNo", "Hall ticket"),
        ("marksPercentage", "Marks (%)"),
    ],
};

const PREVIOUS_COLLEGE: OverviewSection = OverviewSection {
    title: "Previous college",
    fields: &[
        ("stateName", "State"),
        ("districtName", "District"),
        ("collegeType", "College type"),
        ("collegeName", "College"),
        ("previousClass", "Class"),
        ("hallTicketNo", "Hall ticket"),
        ("marksPercentage", "Marks (%)"),
    ],
};

const ADMISSION: OverviewSection = OverviewSection {
    title: "Admission",
    fields: &[
        ("cityName", "City"),
        ("branchName", "Branch"),
        ("joiningClass", "Joining class"),
        ("orientationName", "Orientation"),
        ("studentType", "Student type"),
        ("feeAmount", "Course fee"),
        ("concessionType", "Concession"),
        ("amount", "Concession amount"),
        ("referredBy", "Referred by"),
    ],
};

pub fn overview_sections(track: Track) -> [OverviewSection; 4] {
    let previous = match track {
        Track::School => PREVIOUS_SCHOOL,
        Track::College => PREVIOUS_COLLEGE,
    };
    [STUDENT, PARENTS, previous, ADMISSION]
}

/// Fee minus concession minus everything paid so far; `None` without a fee
pub fn balance(overview: &ApplicationOverview) -> Option<f64> {
    let fee = overview.data.get("feeAmount")?.as_f64()?;
    let concession = overview
        .data
        .get("amount")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Some((fee - concession - overview.total_paid()).max(0.0))
}

pub async fn fetch_overview(application_no: &str) -> Result<ApplicationOverview, String> {
    get_json(&format!(
        "/api/applications/{}/overview",
        urlencoding::encode(application_no)
    ))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::domain::a002_payment::aggregate::PaymentReceipt;
    use contracts::enums::PaymentMode;
    use serde_json::{json, Map};
    use uuid::Uuid;

    fn overview(data: serde_json::Value, paid: &[f64]) -> ApplicationOverview {
        ApplicationOverview {
            application_no: "SCH-2026-00001".into(),
            track: Track::School,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            data: data.as_object().cloned().unwrap_or_else(Map::new),
            payments: paid
                .iter()
                .map(|amount| PaymentReceipt {
                    receipt_id: Uuid::new_v4(),
                    application_no: "SCH-2026-00001".into(),
                    mode: PaymentMode::Cash,
                    amount: *amount,
                    reference_no: String::new(),
                    paid_at: Utc::now(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_balance() {
        let o = overview(json!({"feeAmount": 45000.0, "amount": 5000.0}), &[10000.0, 2500.0]);
        assert_eq!(balance(&o), Some(27500.0));
        assert_eq!(balance(&overview(json!({}), &[])), None);
        assert_eq!(balance(&overview(json!({"feeAmount": 100}), &[150.0])), Some(0.0));
    }

    #[test]
    fn test_sections_follow_track() {
        assert_eq!(overview_sections(Track::College)[2].title, "Previous college");
        assert!(overview_sections(Track::School)[2]
            .fields
            .iter()
            .any(|(key, _)| *key == "schoolName"));
    }
}
