use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no series at index {index} (series count {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("illegal state: {0}")]
    IllegalState(String),
}
