use std::fmt;
use thiserror::Error;

/// A structural defect that makes a profile unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileDefect {
    EmptyCriteria,
    ThresholdOutOfRange { pass_threshold: usize, total: usize },
}

impl fmt::Display for ProfileDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileDefect::EmptyCriteria => write!(f, "the criterion list is empty"),
            ProfileDefect::ThresholdOutOfRange {
                pass_threshold,
                total,
            } => write!(
                f,
                "pass threshold {pass_threshold} is outside the range 0..={total}"
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Profile '{profile}' is invalid: {defect}")]
    Invalid {
        profile: String,
        defect: ProfileDefect,
    },

    #[error("A profile named '{0}' is already registered")]
    DuplicateProfile(String),

    #[error("No profile named '{0}' is registered")]
    UnknownProfile(String),
}
