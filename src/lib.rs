pub mod api;
pub mod config;
pub mod error;
pub mod hasher;
pub mod ledger;
pub mod models;
pub mod sealer;
pub mod service;
pub mod verifier;

pub use config::Config;
pub use error::{ChainError, ConfigError, LedgerError, SealError};
pub use ledger::Ledger;
pub use models::{Block, BlockReport, CandidateResult, ChainSnapshot, ChainStatus, VoteReceipt};
pub use service::VotingService;
pub use verifier::verify_chain;
