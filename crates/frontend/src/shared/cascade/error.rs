use thiserror::Error;

/// Chain definition errors, caught when a resolver is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CascadeError {
    #[error("level `{level}` depends on level #{parent}, which does not come before it")]
    InvalidParent { level: &'static str, parent: usize },
    #[error("level `{0}` is defined twice")]
    DuplicateLevel(&'static str),
}

/// Why a form could not produce its payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("{title}: please select a value")]
    MissingSelection { level: String, title: String },

    #[error("{title}: saved value \"{label}\" does not match any available option")]
    UnresolvedReference {
        level: String,
        title: String,
        label: String,
    },

    #[error("{title}: \"{label}\" is no longer offered, please choose again")]
    InconsistentSelection {
        level: String,
        title: String,
        label: String,
    },

    #[error("{title}: {message}")]
    InvalidField {
        field: String,
        title: String,
        message: String,
    },

    #[error("could not serialize form section: {0}")]
    Serialization(String),
}

impl PayloadError {
    /// Level key or field name the error belongs to
    pub fn field(&self) -> Option<&str> {
        match self {
            PayloadError::MissingSelection { level, .. }
            | PayloadError::UnresolvedReference { level, .. }
            | PayloadError::InconsistentSelection { level, .. } => Some(level),
            PayloadError::InvalidField { field, .. } => Some(field),
            PayloadError::Serialization(_) => None,
        }
    }
}
