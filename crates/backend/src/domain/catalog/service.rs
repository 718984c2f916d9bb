//! In-memory catalog behind the option-list endpoints.
//!
//! Loaded once at startup from the embedded seed or from the file named in
//! `[catalog] path`. Every query filters by its parent ids; an unknown parent
//! is an error, a known parent without children is an empty list.

use contracts::enums::Track;
use contracts::shared::catalog::*;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

const EMBEDDED_SEED: &str = include_str!("seed.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("catalog seed is invalid: {0}")]
    InvalidSeed(#[from] serde_json::Error),
    #[error("cannot read catalog seed: {0}")]
    Io(#[from] std::io::Error),
}

fn not_found(entity: &'static str, id: impl ToString) -> CatalogError {
    CatalogError::NotFound {
        entity,
        id: id.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    seed: CatalogSeed,
}

impl Catalog {
    pub fn new(seed: CatalogSeed) -> Self {
        Self { seed }
    }

    pub fn embedded() -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_str(EMBEDDED_SEED)?))
    }

    /// Seed file when configured, otherwise the embedded seed
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                tracing::info!("Loading catalog from: {}", path.display());
                let contents = std::fs::read_to_string(path)?;
                Ok(Self::new(serde_json::from_str(&contents)?))
            }
            None => {
                tracing::info!("Using embedded catalog seed");
                Self::embedded()
            }
        }
    }

    pub fn seed(&self) -> &CatalogSeed {
        &self.seed
    }

    // ========================================================================
    // Academic background
    // ========================================================================

    pub fn states(&self) -> Vec<StateRecord> {
        self.seed.states.clone()
    }

    pub fn districts(&self, state_id: i64) -> Result<Vec<DistrictRecord>, CatalogError> {
        self.state(state_id)?;
        Ok(self
            .seed
            .districts
            .iter()
            .filter(|d| d.state_id == state_id)
            .cloned()
            .collect())
    }

    /// Types with at least one school in the district
    pub fn school_types(&self, district_id: i64) -> Result<Vec<InstitutionTypeRecord>, CatalogError> {
        self.district(district_id)?;
        Ok(self
            .seed
            .school_types
            .iter()
            .filter(|t| {
                self.seed
                    .schools
                    .iter()
                    .any(|s| s.district_id == district_id && s.school_type_id == t.id)
            })
            .cloned()
            .collect())
    }

    pub fn schools(&self, district_id: i64, type_id: i64) -> Result<Vec<SchoolRecord>, CatalogError> {
        self.district(district_id)?;
        self.find_type(&self.seed.school_types, "school type", type_id)?;
        Ok(self
            .seed
            .schools
            .iter()
            .filter(|s| s.district_id == district_id && s.school_type_id == type_id)
            .cloned()
            .collect())
    }

    pub fn college_types(&self, district_id: i64) -> Result<Vec<InstitutionTypeRecord>, CatalogError> {
        self.district(district_id)?;
        Ok(self
            .seed
            .college_types
            .iter()
            .filter(|t| {
                self.seed
                    .colleges
                    .iter()
                    .any(|c| c.district_id == district_id && c.college_type_id == t.id)
            })
            .cloned()
            .collect())
    }

    pub fn colleges(&self, district_id: i64, type_id: i64) -> Result<Vec<CollegeRecord>, CatalogError> {
        self.district(district_id)?;
        self.find_type(&self.seed.college_types, "college type", type_id)?;
        Ok(self
            .seed
            .colleges
            .iter()
            .filter(|c| c.district_id == district_id && c.college_type_id == type_id)
            .cloned()
            .collect())
    }

    // ========================================================================
    // Orientation
    // ========================================================================

    pub fn cities(&self) -> Vec<CityRecord> {
        self.seed.cities.clone()
    }

    /// Campuses of a city, optionally only those selling the given track
    pub fn campuses(&self, city_id: i64, track: Option<Track>) -> Result<Vec<CampusRecord>, CatalogError> {
        if !self.seed.cities.iter().any(|c| c.id == city_id) {
            return Err(not_found("city", city_id));
        }
        Ok(self
            .seed
            .campuses
            .iter()
            .filter(|c| c.city_id == city_id && track.map_or(true, |t| c.track == t))
            .cloned()
            .collect())
    }

    pub fn classes(&self, campus_id: i64) -> Result<Vec<ClassRecord>, CatalogError> {
        let campus = self.campus(campus_id)?;
        Ok(self
            .seed
            .classes
            .iter()
            .filter(|k| campus.class_ids.contains(&k.class_id))
            .cloned()
            .collect())
    }

    pub fn orientations(&self, campus_id: i64, class_id: i64) -> Result<Vec<OrientationRecord>, CatalogError> {
        self.campus(campus_id)?;
        if !self.seed.classes.iter().any(|k| k.class_id == class_id) {
            return Err(not_found("class", class_id));
        }
        Ok(self
            .seed
            .orientations
            .iter()
            .filter(|o| o.campus_id == campus_id && o.class_id == class_id)
            .cloned()
            .collect())
    }

    pub fn student_types(&self, orientation_id: i64) -> Result<Vec<StudentTypeRecord>, CatalogError> {
        let orientation = self.orientation(orientation_id)?;
        Ok(self
            .seed
            .student_types
            .iter()
            .filter(|s| orientation.student_type_ids.contains(&s.value))
            .cloned()
            .collect())
    }

    pub fn fee(&self, orientation_id: i64, student_type_id: &str) -> Result<FeeRecord, CatalogError> {
        self.seed
            .fees
            .iter()
            .find(|f| f.orientation_id == orientation_id && f.student_type_id == student_type_id)
            .cloned()
            .ok_or_else(|| not_found("fee", format!("{}/{}", orientation_id, student_type_id)))
    }

    // ========================================================================
    // Payment banks
    // ========================================================================

    pub fn organizations(&self) -> Vec<OrganizationRecord> {
        self.seed.organizations.clone()
    }

    pub fn banks(&self, org_id: i64) -> Result<Vec<BankRecord>, CatalogError> {
        if !self.seed.organizations.iter().any(|o| o.org_id == org_id) {
            return Err(not_found("organization", org_id));
        }
        Ok(self
            .seed
            .banks
            .iter()
            .filter(|b| b.org_id == org_id)
            .cloned()
            .collect())
    }

    pub fn bank_branches(&self, bank_id: i64) -> Result<Vec<BankBranchRecord>, CatalogError> {
        if !self.seed.banks.iter().any(|b| b.bank_id == bank_id) {
            return Err(not_found("bank", bank_id));
        }
        Ok(self
            .seed
            .bank_branches
            .iter()
            .filter(|b| b.bank_id == bank_id)
            .cloned()
            .collect())
    }

    // ========================================================================
    // Overview labels
    // ========================================================================

    /// Adds display labels for stored ids under the key names the overview
    /// has always used. School, college, campus and orientation ids are
    /// dropped afterwards; readers get the label only.
    pub fn enrich_overview(&self, data: &mut Map<String, Value>) {
        let id = |data: &Map<String, Value>, key: &str| -> Option<i64> {
            match data.get(key)? {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }
        };
        let text = |data: &Map<String, Value>, key: &str| -> Option<String> {
            match data.get(key)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        };

        let mut labels: Vec<(&str, String)> = Vec::new();
        if let Some(s) = id(data, "stateId").and_then(|v| self.state(v).ok()) {
            labels.push(("stateName", s.state_name.clone()));
        }
        if let Some(d) = id(data, "districtId").and_then(|v| self.district(v).ok()) {
            labels.push(("districtName", d.district_name.clone()));
        }
        if let Some(t) = id(data, "schoolTypeId")
            .and_then(|v| self.find_type(&self.seed.school_types, "school type", v).ok())
        {
            labels.push(("schoolType", t.name.clone()));
        }
        if let Some(s) = id(data, "schoolId")
            .and_then(|v| self.seed.schools.iter().find(|s| s.school_id == v))
        {
            labels.push(("schoolName", s.school_name.clone()));
        }
        if let Some(t) = id(data, "collegeTypeId")
            .and_then(|v| self.find_type(&self.seed.college_types, "college type", v).ok())
        {
            labels.push(("collegeType", t.name.clone()));
        }
        if let Some(c) = id(data, "collegeId")
            .and_then(|v| self.seed.colleges.iter().find(|c| c.college_id == v))
        {
            labels.push(("collegeName", c.college_name.clone()));
        }
        if let Some(c) = id(data, "cityId").and_then(|v| self.seed.cities.iter().find(|c| c.id == v)) {
            labels.push(("cityName", c.name.clone()));
        }
        if let Some(c) = id(data, "campusId").and_then(|v| self.campus(v).ok()) {
            labels.push(("branchName", c.campus_name.clone()));
        }
        if let Some(k) = id(data, "classId")
            .and_then(|v| self.seed.classes.iter().find(|k| k.class_id == v))
        {
            labels.push(("joiningClass", k.class_name.clone()));
        }
        if let Some(o) = id(data, "orientationId").and_then(|v| self.orientation(v).ok()) {
            labels.push(("orientationName", o.orientation_name.clone()));
        }
        if let Some(s) = text(data, "studentTypeId")
            .and_then(|v| self.seed.student_types.iter().find(|s| s.value == v))
        {
            labels.push(("studentType", s.label.clone()));
        }

        for (key, label) in labels {
            data.insert(key.to_string(), Value::String(label));
        }
        for key in ["schoolId", "collegeId", "campusId", "orientationId"] {
            data.remove(key);
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    fn state(&self, state_id: i64) -> Result<&StateRecord, CatalogError> {
        self.seed
            .states
            .iter()
            .find(|s| s.state_id == state_id)
            .ok_or_else(|| not_found("state", state_id))
    }

    fn district(&self, district_id: i64) -> Result<&DistrictRecord, CatalogError> {
        self.seed
            .districts
            .iter()
            .find(|d| d.district_id == district_id)
            .ok_or_else(|| not_found("district", district_id))
    }

    fn find_type<'a>(
        &self,
        types: &'a [InstitutionTypeRecord],
        entity: &'static str,
        type_id: i64,
    ) -> Result<&'a InstitutionTypeRecord, CatalogError> {
        types
            .iter()
            .find(|t| t.id == type_id)
            .ok_or_else(|| not_found(entity, type_id))
    }

    fn campus(&self, campus_id: i64) -> Result<&CampusRecord, CatalogError> {
        self.seed
            .campuses
            .iter()
            .find(|c| c.campus_id == campus_id)
            .ok_or_else(|| not_found("campus", campus_id))
    }

    fn orientation(&self, orientation_id: i64) -> Result<&OrientationRecord, CatalogError> {
        self.seed
            .orientations
            .iter()
            .find(|o| o.orientation_id == orientation_id)
            .ok_or_else(|| not_found("orientation", orientation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_embedded_seed_loads() {
        let catalog = catalog();
        assert!(!catalog.seed().is_empty());
        assert_eq!(catalog.states().len(), 2);
    }

    #[test]
    fn test_school_types_only_with_schools_in_district() {
        let types = catalog().school_types(502).unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "CBSE");
    }

    #[test]
    fn test_schools_filter_by_district_and_type() {
        let schools = catalog().schools(501, 2).unwrap();
        assert_eq!(schools.len(), 1);
        assert_eq!(schools[0].school_name, "Oakridge International School");
        assert!(catalog().schools(501, 99).is_err());
    }

    #[test]
    fn test_unknown_parent_is_not_found() {
        assert!(matches!(
            catalog().districts(99),
            Err(CatalogError::NotFound { entity: "state", .. })
        ));
        assert!(catalog().bank_branches(404).is_err());
    }

    #[test]
    fn test_campuses_by_track() {
        let school = catalog().campuses(1, Some(Track::School)).unwrap();
        assert!(school.iter().all(|c| c.track == Track::School));
        assert_eq!(school.len(), 2);
        assert_eq!(catalog().campuses(1, None).unwrap().len(), 3);
    }

    #[test]
    fn test_student_types_and_fee() {
        let catalog = catalog();
        let types = catalog.student_types(3).unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(catalog.fee(3, "SEMI").unwrap().amount, 110000.0);
        assert!(catalog.fee(4, "RES").is_err());
    }

    #[test]
    fn test_enrich_overview_uses_legacy_keys_and_drops_ids() {
        let mut data = json!({
            "stateId": 36,
            "districtId": 501,
            "schoolTypeId": 2,
            "schoolId": 9002,
            "cityId": 1,
            "campusId": 101,
            "classId": 9,
            "orientationId": 2,
            "studentTypeId": "RES"
        })
        .as_object()
        .cloned()
        .unwrap();
        catalog().enrich_overview(&mut data);

        assert_eq!(data["stateName"], json!("Telangana"));
        assert_eq!(data["schoolType"], json!("CBSE"));
        assert_eq!(data["schoolName"], json!("Oakridge International School"));
        assert_eq!(data["branchName"], json!("Madhapur"));
        assert_eq!(data["joiningClass"], json!("Class IX"));
        assert_eq!(data["orientationName"], json!("IIT Foundation"));
        assert_eq!(data["studentType"], json!("Residential"));
        assert!(data.get("schoolId").is_none());
        assert!(data.get("campusId").is_none());
        assert!(data.get("orientationId").is_none());
        assert_eq!(data["cityId"], json!(1));
    }
}
