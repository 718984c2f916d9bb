//! Field-name probe tables.
//!
//! The admissions endpoints do not agree on what they call the label and id
//! of a record: states come back as `stateId`/`stateName`, school types as
//! `id`/`name`, student types as `value`/`label`, and the same campus is a
//! `campus` in one payload and a `branch` in another. Every entity kind owns
//! one ordered list of candidate keys; the first key present wins.
//!
//! | kind          | label keys (in order)                                | id keys (in order)                     |
//! |---------------|------------------------------------------------------|----------------------------------------|
//! | State         | stateName, name, label                               | stateId, id, value                     |
//! | District      | districtName, name, label                            | districtId, id, value                  |
//! | SchoolType    | schoolTypeName, typeName, name, label                | schoolTypeId, typeId, id, value        |
//! | School        | schoolName, name, label                              | schoolId, id, value                    |
//! | CollegeType   | collegeTypeName, typeName, name, label               | collegeTypeId, typeId, id, value       |
//! | College       | collegeName, name, label                             | collegeId, id, value                   |
//! | City          | cityName, name, label                                | cityId, id, value                      |
//! | Campus        | campusName, branchName, name, label                  | campusId, branchId, id, value          |
//! | Class         | className, courseName, name, label                   | classId, courseId, id, value           |
//! | Orientation   | orientationName, name, label                         | orientationId, id, value               |
//! | StudentType   | studentTypeName, studentType, name, label            | studentTypeId, id, value               |
//! | Organization  | orgName, organizationName, name, label               | orgId, organizationId, id, value       |
//! | Bank          | bankName, name, label                                | bankId, id, value                      |
//! | BankBranch    | branchName, name, label                              | branchId, ifsc, id, value              |
//!
//! When no label key matches, the first string-valued field that is not an
//! id-like key is used.

use super::id::OptionId;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    State,
    District,
    SchoolType,
    School,
    CollegeType,
    College,
    City,
    Campus,
    Class,
    Orientation,
    StudentType,
    Organization,
    Bank,
    BankBranch,
}

/// Ordered candidate keys for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTable {
    pub entity: &'static str,
    pub label_keys: &'static [&'static str],
    pub id_keys: &'static [&'static str],
}

impl EntityKind {
    pub fn probe(&self) -> &'static ProbeTable {
        match self {
            EntityKind::State => &STATE,
            EntityKind::District => &DISTRICT,
            EntityKind::SchoolType => &SCHOOL_TYPE,
            EntityKind::School => &SCHOOL,
            EntityKind::CollegeType => &COLLEGE_TYPE,
            EntityKind::College => &COLLEGE,
            EntityKind::City => &CITY,
            EntityKind::Campus => &CAMPUS,
            EntityKind::Class => &CLASS,
            EntityKind::Orientation => &ORIENTATION,
            EntityKind::StudentType => &STUDENT_TYPE,
            EntityKind::Organization => &ORGANIZATION,
            EntityKind::Bank => &BANK,
            EntityKind::BankBranch => &BANK_BRANCH,
        }
    }
}

static STATE: ProbeTable = ProbeTable {
    entity: "state",
    label_keys: &["stateName", "name", "label"],
    id_keys: &["stateId", "id", "value"],
};
static DISTRICT: ProbeTable = ProbeTable {
    entity: "district",
    label_keys: &["districtName", "name", "label"],
    id_keys: &["districtId", "id", "value"],
};
static SCHOOL_TYPE: ProbeTable = ProbeTable {
    entity: "schoolType",
    label_keys: &["schoolTypeName", "typeName", "name", "label"],
    id_keys: &["schoolTypeId", "typeId", "id", "value"],
};
static SCHOOL: ProbeTable = ProbeTable {
    entity: "school",
    label_keys: &["schoolName", "name", "label"],
    id_keys: &["schoolId", "id", "value"],
};
static COLLEGE_TYPE: ProbeTable = ProbeTable {
    entity: "collegeType",
    label_keys: &["collegeTypeName", "typeName", "name", "label"],
    id_keys: &["collegeTypeId", "typeId", "id", "value"],
};
static COLLEGE: ProbeTable = ProbeTable {
    entity: "college",
    label_keys: &["collegeName", "name", "label"],
    id_keys: &["collegeId", "id", "value"],
};
static CITY: ProbeTable = ProbeTable {
    entity: "city",
    label_keys: &["cityName", "name", "label"],
    id_keys: &["cityId", "id", "value"],
};
static CAMPUS: ProbeTable = ProbeTable {
    entity: "campus",
    label_keys: &["campusName", "branchName", "name", "label"],
    id_keys: &["campusId", "branchId", "id", "value"],
};
static CLASS: ProbeTable = ProbeTable {
    entity: "class",
    label_keys: &["className", "courseName", "name", "label"],
    id_keys: &["classId", "courseId", "id", "value"],
};
static ORIENTATION: ProbeTable = ProbeTable {
    entity: "orientation",
    label_keys: &["orientationName", "name", "label"],
    id_keys: &["orientationId", "id", "value"],
};
static STUDENT_TYPE: ProbeTable = ProbeTable {
    entity: "studentType",
    label_keys: &["studentTypeName", "studentType", "name", "label"],
    id_keys: &["studentTypeId", "id", "value"],
};
static ORGANIZATION: ProbeTable = ProbeTable {
    entity: "organization",
    label_keys: &["orgName", "organizationName", "name", "label"],
    id_keys: &["orgId", "organizationId", "id", "value"],
};
static BANK: ProbeTable = ProbeTable {
    entity: "bank",
    label_keys: &["bankName", "name", "label"],
    id_keys: &["bankId", "id", "value"],
};
static BANK_BRANCH: ProbeTable = ProbeTable {
    entity: "bankBranch",
    label_keys: &["branchName", "name", "label"],
    id_keys: &["branchId", "ifsc", "id", "value"],
};

impl ProbeTable {
    pub fn probe_id(&self, record: &Map<String, Value>) -> Option<OptionId> {
        self.id_keys
            .iter()
            .find_map(|key| record.get(*key).and_then(OptionId::from_value))
    }

    pub fn probe_label(&self, record: &Map<String, Value>) -> Option<String> {
        let listed = self.label_keys.iter().find_map(|key| match record.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        });
        listed.or_else(|| {
            record.iter().find_map(|(key, value)| match value {
                Value::String(s) if !s.trim().is_empty() && !self.is_id_like(key) => {
                    Some(s.clone())
                }
                _ => None,
            })
        })
    }

    fn is_id_like(&self, key: &str) -> bool {
        self.id_keys.contains(&key) || key.ends_with("Id") || key.ends_with("_id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_entity_specific_keys_win() {
        let record = object(json!({"id": 1, "stateId": 36, "name": "TS", "stateName": "Telangana"}));
        let probe = EntityKind::State.probe();
        assert_eq!(probe.probe_id(&record), Some(OptionId::from(36)));
        assert_eq!(probe.probe_label(&record).as_deref(), Some("Telangana"));
    }

    #[test]
    fn test_campus_accepts_branch_keys() {
        let record = object(json!({"branchId": 7, "branchName": "Hyderabad Central"}));
        let probe = EntityKind::Campus.probe();
        assert_eq!(probe.probe_id(&record), Some(OptionId::from(7)));
        assert_eq!(probe.probe_label(&record).as_deref(), Some("Hyderabad Central"));
    }

    #[test]
    fn test_value_label_pairs() {
        let record = object(json!({"value": "2", "label": "Hosteller"}));
        let probe = EntityKind::StudentType.probe();
        assert_eq!(probe.probe_id(&record), Some(OptionId::from("2")));
        assert_eq!(probe.probe_label(&record).as_deref(), Some("Hosteller"));
    }

    #[test]
    fn test_label_falls_back_to_first_plain_string() {
        let record = object(json!({"districtId": 4, "parentStateId": "36", "title": "Warangal"}));
        let probe = EntityKind::District.probe();
        assert_eq!(probe.probe_label(&record).as_deref(), Some("Warangal"));
    }

    #[test]
    fn test_blank_label_is_skipped() {
        let record = object(json!({"schoolId": 9, "schoolName": " ", "name": "St. Mary's High School"}));
        let probe = EntityKind::School.probe();
        assert_eq!(probe.probe_label(&record).as_deref(), Some("St. Mary's High School"));
    }
}
