use pt_core::PtError;
use pt_patrol::PatrolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] PtError),

    #[error("patrol setup failed: {0}")]
    Patrol(#[from] PatrolError),
}

pub type SimResult<T> = Result<T, SimError>;
