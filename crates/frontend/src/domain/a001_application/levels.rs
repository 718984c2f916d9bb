//! Cascade definitions for the school and college application forms.
//!
//! Two chains per form: the academic chain (where the student studied before)
//! and the orientation chain (campus and course being sold). Saved-data keys
//! list every name the overview endpoint has been seen to use for a level.

use crate::shared::cascade::source::segment;
use crate::shared::cascade::{EntityKind, HttpOptionSource, LevelSpec, OptionId, OptionSource};
use contracts::enums::Track;
use std::sync::Arc;

type PathFn = fn(&[OptionId]) -> String;

// ============================================================================
// Academic chain
// ============================================================================

pub const STATE: usize = 0;
pub const DISTRICT: usize = 1;
pub const INSTITUTION_TYPE: usize = 2;
pub const INSTITUTION: usize = 3;

const STATE_LEVEL: LevelSpec = LevelSpec {
    key: "state",
    title: "State",
    kind: EntityKind::State,
    parents: &[],
    required: true,
    payload_key: "stateId",
    saved_id_keys: &["stateId"],
    saved_label_keys: &["stateName", "state"],
};

const DISTRICT_LEVEL: LevelSpec = LevelSpec {
    key: "district",
    title: "District",
    kind: EntityKind::District,
    parents: &[STATE],
    required: true,
    payload_key: "districtId",
    saved_id_keys: &["districtId"],
    saved_label_keys: &["districtName", "district"],
};

pub const SCHOOL_LEVELS: &[LevelSpec] = &[
    STATE_LEVEL,
    DISTRICT_LEVEL,
    LevelSpec {
        key: "schoolType",
        title: "School type",
        kind: EntityKind::SchoolType,
        parents: &[DISTRICT],
        required: true,
        payload_key: "schoolTypeId",
        saved_id_keys: &["schoolTypeId"],
        saved_label_keys: &["schoolTypeName", "schoolType"],
    },
    LevelSpec {
        key: "school",
        title: "School name",
        kind: EntityKind::School,
        parents: &[DISTRICT, INSTITUTION_TYPE],
        required: true,
        payload_key: "schoolId",
        saved_id_keys: &["schoolId"],
        saved_label_keys: &["schoolName", "school"],
    },
];

pub const COLLEGE_LEVELS: &[LevelSpec] = &[
    STATE_LEVEL,
    DISTRICT_LEVEL,
    LevelSpec {
        key: "collegeType",
        title: "College type",
        kind: EntityKind::CollegeType,
        parents: &[DISTRICT],
        required: true,
        payload_key: "collegeTypeId",
        saved_id_keys: &["collegeTypeId"],
        saved_label_keys: &["collegeTypeName", "collegeType"],
    },
    LevelSpec {
        key: "college",
        title: "College name",
        kind: EntityKind::College,
        parents: &[DISTRICT, INSTITUTION_TYPE],
        required: true,
        payload_key: "collegeId",
        saved_id_keys: &["collegeId"],
        saved_label_keys: &["collegeName", "college"],
    },
];

pub fn academic_levels(track: Track) -> &'static [LevelSpec] {
    match track {
        Track::School => SCHOOL_LEVELS,
        Track::College => COLLEGE_LEVELS,
    }
}

fn states_path(_: &[OptionId]) -> String {
    "/api/catalog/states".to_string()
}

fn districts_path(parents: &[OptionId]) -> String {
    format!("/api/catalog/states/{}/districts", segment(parents, 0))
}

fn school_types_path(parents: &[OptionId]) -> String {
    format!("/api/catalog/districts/{}/school-types", segment(parents, 0))
}

fn schools_path(parents: &[OptionId]) -> String {
    format!(
        "/api/catalog/districts/{}/school-types/{}/schools",
        segment(parents, 0),
        segment(parents, 1)
    )
}

fn college_types_path(parents: &[OptionId]) -> String {
    format!("/api/catalog/districts/{}/college-types", segment(parents, 0))
}

fn colleges_path(parents: &[OptionId]) -> String {
    format!(
        "/api/catalog/districts/{}/college-types/{}/colleges",
        segment(parents, 0),
        segment(parents, 1)
    )
}

pub fn academic_sources(track: Track) -> Vec<Arc<dyn OptionSource>> {
    let (types, institutions) = match track {
        Track::School => (school_types_path as PathFn, schools_path as PathFn),
        Track::College => (college_types_path as PathFn, colleges_path as PathFn),
    };
    vec![
        http(states_path),
        http(districts_path),
        http(types),
        http(institutions),
    ]
}

fn http(path: PathFn) -> Arc<dyn OptionSource> {
    Arc::new(HttpOptionSource::new(path))
}

// ============================================================================
// Orientation chain
// ============================================================================

pub const CITY: usize = 0;
pub const CAMPUS: usize = 1;
pub const CLASS: usize = 2;
pub const ORIENTATION: usize = 3;
pub const STUDENT_TYPE: usize = 4;

pub const ORIENTATION_LEVELS: &[LevelSpec] = &[
    LevelSpec {
        key: "city",
        title: "City",
        kind: EntityKind::City,
        parents: &[],
        required: true,
        payload_key: "cityId",
        saved_id_keys: &["cityId"],
        saved_label_keys: &["cityName", "city"],
    },
    LevelSpec {
        key: "campus",
        title: "Branch",
        kind: EntityKind::Campus,
        parents: &[CITY],
        required: true,
        payload_key: "campusId",
        saved_id_keys: &["campusId", "branchId"],
        saved_label_keys: &["campusName", "branchName", "branch"],
    },
    LevelSpec {
        key: "class",
        title: "Joining class",
        kind: EntityKind::Class,
        parents: &[CAMPUS],
        required: true,
        payload_key: "classId",
        saved_id_keys: &["classId", "joiningClassId"],
        saved_label_keys: &["className", "joiningClass"],
    },
    LevelSpec {
        key: "orientation",
        title: "Orientation",
        kind: EntityKind::Orientation,
        parents: &[CAMPUS, CLASS],
        required: true,
        payload_key: "orientationId",
        saved_id_keys: &["orientationId"],
        saved_label_keys: &["orientationName", "orientation"],
    },
    LevelSpec {
        key: "studentType",
        title: "Student type",
        kind: EntityKind::StudentType,
        parents: &[ORIENTATION],
        required: true,
        payload_key: "studentTypeId",
        saved_id_keys: &["studentTypeId"],
        saved_label_keys: &["studentType", "studentTypeName"],
    },
];

fn cities_path(_: &[OptionId]) -> String {
    "/api/catalog/cities".to_string()
}

fn school_campuses_path(parents: &[OptionId]) -> String {
    format!("/api/catalog/cities/{}/campuses?track=school", segment(parents, 0))
}

fn college_campuses_path(parents: &[OptionId]) -> String {
    format!("/api/catalog/cities/{}/campuses?track=college", segment(parents, 0))
}

fn classes_path(parents: &[OptionId]) -> String {
    format!("/api/catalog/campuses/{}/classes", segment(parents, 0))
}

fn orientations_path(parents: &[OptionId]) -> String {
    format!(
        "/api/catalog/campuses/{}/classes/{}/orientations",
        segment(parents, 0),
        segment(parents, 1)
    )
}

fn student_types_path(parents: &[OptionId]) -> String {
    format!("/api/catalog/orientations/{}/student-types", segment(parents, 0))
}

pub fn orientation_sources(track: Track) -> Vec<Arc<dyn OptionSource>> {
    let campuses: PathFn = match track {
        Track::School => school_campuses_path,
        Track::College => college_campuses_path,
    };
    vec![
        http(cities_path),
        http(campuses),
        http(classes_path),
        http(orientations_path),
        http(student_types_path),
    ]
}

/// Fee lookup path for a resolved orientation and student type
pub fn fee_path(orientation: &OptionId, student_type: &OptionId) -> String {
    let parents = [orientation.clone(), student_type.clone()];
    format!(
        "/api/catalog/orientations/{}/student-types/{}/fee",
        segment(&parents, 0),
        segment(&parents, 1)
    )
}
