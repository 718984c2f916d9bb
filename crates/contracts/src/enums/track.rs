use serde::{Deserialize, Serialize};

/// Admission track an application belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    School,
    College,
}

impl Track {
    /// Code used in query strings and in stored records
    pub fn code(&self) -> &'static str {
        match self {
            Track::School => "school",
            Track::College => "college",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Track::School => "School",
            Track::College => "College",
        }
    }

    pub fn all() -> Vec<Track> {
        vec![Track::School, Track::College]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "school" => Some(Track::School),
            "college" => Some(Track::College),
            _ => None,
        }
    }
}

impl Default for Track {
    fn default() -> Self {
        Track::School
    }
}
