use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatrolError {
    /// Invalid controller inputs.  A controller that failed with this error
    /// was never created.
    #[error("patrol configuration error: {0}")]
    Config(String),

    #[error("route parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PatrolResult<T> = Result<T, PatrolError>;
