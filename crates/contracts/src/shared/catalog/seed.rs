use super::records::*;
use serde::{Deserialize, Serialize};

/// Full catalog snapshot, as stored in the seed JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CatalogSeed {
    pub states: Vec<StateRecord>,
    pub districts: Vec<DistrictRecord>,
    pub school_types: Vec<InstitutionTypeRecord>,
    pub schools: Vec<SchoolRecord>,
    pub college_types: Vec<InstitutionTypeRecord>,
    pub colleges: Vec<CollegeRecord>,
    pub cities: Vec<CityRecord>,
    pub campuses: Vec<CampusRecord>,
    pub classes: Vec<ClassRecord>,
    pub orientations: Vec<OrientationRecord>,
    pub student_types: Vec<StudentTypeRecord>,
    pub fees: Vec<FeeRecord>,
    pub organizations: Vec<OrganizationRecord>,
    pub banks: Vec<BankRecord>,
    pub bank_branches: Vec<BankBranchRecord>,
}

impl CatalogSeed {
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.cities.is_empty() && self.organizations.is_empty()
    }
}
