use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SealError {
    #[error("no nonce satisfied difficulty {difficulty} within {attempts} attempts")]
    Exhausted { difficulty: usize, attempts: u64 },

    #[error("difficulty {0} exceeds the {max} hex digits of a digest", max = crate::sealer::MAX_DIFFICULTY)]
    Unreachable(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("block {index} hash does not match its contents")]
    InvalidHash { index: usize },

    #[error("block {index} does not link to its predecessor")]
    BrokenLinkage { index: usize },
}

impl ChainError {
    pub fn index(&self) -> usize {
        match self {
            ChainError::InvalidHash { index } | ChainError::BrokenLinkage { index } => *index,
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("difficulty must be between 1 and {max}, got {0}", max = crate::sealer::MAX_DIFFICULTY)]
    InvalidDifficulty(usize),

    #[error("voter {0} has already voted")]
    DuplicateVote(String),

    #[error("block does not extend the current tip")]
    StaleTip,

    #[error("block hash does not meet difficulty {0}")]
    Unsealed(usize),

    #[error("sealing failed: {0}")]
    Seal(#[from] SealError),

    #[error("sealing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
