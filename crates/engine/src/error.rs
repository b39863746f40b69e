use profiles::ProfileDefect;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Cannot evaluate profile '{profile}': {defect}")]
    InvalidProfile {
        profile: String,
        defect: ProfileDefect,
    },
}
