use thiserror::Error;

pub type NavigatorResult<T> = Result<T, NavigatorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigatorError {
    #[error("invalid navigator config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("page source failure: {0}")]
    Source(String),
}
