use std::collections::BTreeMap;
use std::sync::Arc;

use log::info;
use tokio::sync::{Mutex, RwLock};

use crate::error::LedgerError;
use crate::ledger::{receipt_for, Ledger};
use crate::models::{Block, BlockReport, CandidateResult, ChainSnapshot, ChainStatus, VoteReceipt};
use crate::sealer::seal;

/// Shared handle to one [`Ledger`].
///
/// Writers are serialized by a submission gate. Sealing runs on the blocking
/// pool with no ledger lock held, so reads proceed until the final append.
#[derive(Clone)]
pub struct VotingService {
    ledger: Arc<RwLock<Ledger>>,
    submit_gate: Arc<Mutex<()>>,
}

impl VotingService {
    pub fn new(ledger: Ledger) -> Self {
        VotingService {
            ledger: Arc::new(RwLock::new(ledger)),
            submit_gate: Arc::new(Mutex::new(())),
        }
    }

    pub async fn submit_vote(&self, voter_id: &str, candidate: &str) -> VoteReceipt {
        match self.try_submit_vote(voter_id, candidate).await {
            Ok(()) => VoteReceipt::accepted(candidate),
            Err(err) => receipt_for(&err),
        }
    }

    /// Like [`VotingService::submit_vote`] but keeps the failure kind.
    pub async fn try_submit_vote(&self, voter_id: &str, candidate: &str) -> Result<(), LedgerError> {
        let _gate = self.submit_gate.lock().await;
        info!("Processing vote from {} for {}", voter_id, candidate);

        let (mut block, difficulty, max_attempts) = {
            let ledger = self.ledger.read().await;
            let block = ledger.prepare_vote(voter_id, candidate)?;
            (block, ledger.difficulty(), ledger.max_seal_attempts())
        };

        let block = tokio::task::spawn_blocking(move || {
            seal(&mut block, difficulty, max_attempts).map(|_| block)
        })
        .await??;

        self.ledger.write().await.commit_vote(block)
    }

    pub async fn get_results(&self) -> Vec<CandidateResult> {
        self.ledger.read().await.get_results()
    }

    pub async fn get_total_votes(&self) -> usize {
        self.ledger.read().await.get_total_votes()
    }

    pub async fn get_voter_ids(&self) -> Vec<String> {
        self.ledger.read().await.get_voter_ids()
    }

    pub async fn get_latest_block(&self) -> Option<Block> {
        self.ledger.read().await.get_latest_block().cloned()
    }

    pub async fn chain_len(&self) -> usize {
        self.ledger.read().await.chain_len()
    }

    pub async fn candidate_votes(&self) -> BTreeMap<String, u64> {
        self.ledger.read().await.candidate_votes().clone()
    }

    pub async fn is_chain_valid(&self) -> ChainStatus {
        self.ledger.read().await.is_chain_valid()
    }

    pub async fn snapshot(&self) -> ChainSnapshot {
        self.ledger.read().await.snapshot()
    }

    pub async fn history(&self) -> Vec<BlockReport> {
        self.ledger.read().await.history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MSG_VOTE_DUPLICATE;

    #[tokio::test]
    async fn submit_then_read() {
        let service = VotingService::new(Ledger::new(1).unwrap());
        assert!(service.submit_vote("v1", "Alice").await.success);

        assert_eq!(service.chain_len().await, 2);
        assert_eq!(service.get_total_votes().await, 1);
        assert_eq!(service.get_voter_ids().await, vec!["v1".to_string()]);
        assert_eq!(service.get_latest_block().await.unwrap().voter_id, "v1");
        assert!(service.is_chain_valid().await.valid);
    }

    #[tokio::test]
    async fn duplicate_rejected_through_service() {
        let service = VotingService::new(Ledger::new(1).unwrap());
        service.submit_vote("v1", "Alice").await;
        let receipt = service.submit_vote("v1", "Bob").await;

        assert_eq!(receipt.message, MSG_VOTE_DUPLICATE);
        assert_eq!(service.candidate_votes().await.get("Bob"), None);
    }

    #[tokio::test]
    async fn failure_kind_survives() {
        let service = VotingService::new(Ledger::with_seal_limit(64, Some(3)).unwrap());
        assert!(matches!(
            service.try_submit_vote("v1", "Alice").await,
            Err(LedgerError::Seal(_))
        ));
        assert_eq!(service.chain_len().await, 1);
    }
}
