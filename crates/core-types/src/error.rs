use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown criterion: {0}")]
    UnknownCriterion(String),
}
