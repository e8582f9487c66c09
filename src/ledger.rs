use std::collections::{BTreeMap, HashSet};

use log::{debug, error, info, warn};

use crate::error::{ChainError, LedgerError};
use crate::models::{
    now_millis, Block, BlockReport, CandidateResult, ChainSnapshot, ChainStatus, VoteReceipt,
    GENESIS_PREVIOUS_HASH,
};
use crate::sealer::{meets_difficulty, seal, MAX_DIFFICULTY};
use crate::verifier::verify_chain;

pub const DEFAULT_DIFFICULTY: usize = 2;

/// Append-only chain of sealed votes with the voter set and tally derived from it.
///
/// `chain.len() == voters.len() + 1` and the tally sums to `voters.len()` after
/// every call.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    difficulty: usize,
    max_seal_attempts: Option<u64>,
    voters: HashSet<String>,
    candidates: BTreeMap<String, u64>,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::build(DEFAULT_DIFFICULTY, None)
    }
}

impl Ledger {
    /// Fails with [`LedgerError::InvalidDifficulty`] unless
    /// `1 <= difficulty <= MAX_DIFFICULTY`.
    pub fn new(difficulty: usize) -> Result<Self, LedgerError> {
        Ledger::with_seal_limit(difficulty, None)
    }

    pub fn with_seal_limit(
        difficulty: usize,
        max_seal_attempts: Option<u64>,
    ) -> Result<Self, LedgerError> {
        if !(1..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(LedgerError::InvalidDifficulty(difficulty));
        }
        Ok(Ledger::build(difficulty, max_seal_attempts))
    }

    fn build(difficulty: usize, max_seal_attempts: Option<u64>) -> Self {
        let genesis = Block::genesis();
        info!(
            "Blockchain initialized with genesis block {}... (difficulty {})",
            genesis.short_hash(),
            difficulty
        );
        Ledger {
            chain: vec![genesis],
            difficulty,
            max_seal_attempts,
            voters: HashSet::new(),
            candidates: BTreeMap::new(),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn max_seal_attempts(&self) -> Option<u64> {
        self.max_seal_attempts
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn chain_len(&self) -> usize {
        self.chain.len()
    }

    pub fn get_latest_block(&self) -> Option<&Block> {
        self.chain.last()
    }

    fn tip_hash(&self) -> &str {
        match self.chain.last() {
            Some(block) => &block.hash,
            None => GENESIS_PREVIOUS_HASH,
        }
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.voters.contains(voter_id)
    }

    /// Records a vote: rejects repeat voters, seals a new block onto the tip,
    /// then appends it and updates the tally. State is untouched on failure.
    pub fn submit_vote(&mut self, voter_id: &str, candidate: &str) -> VoteReceipt {
        match self.try_submit_vote(voter_id, candidate) {
            Ok(()) => VoteReceipt::accepted(candidate),
            Err(err) => receipt_for(&err),
        }
    }

    pub fn try_submit_vote(&mut self, voter_id: &str, candidate: &str) -> Result<(), LedgerError> {
        info!("Processing vote from {} for {}", voter_id, candidate);
        let mut block = self.prepare_vote(voter_id, candidate)?;
        seal(&mut block, self.difficulty, self.max_seal_attempts)?;
        self.commit_vote(block)
    }

    /// Builds an unsealed block for `voter_id` on top of the current tip.
    pub fn prepare_vote(&self, voter_id: &str, candidate: &str) -> Result<Block, LedgerError> {
        if self.has_voted(voter_id) {
            return Err(LedgerError::DuplicateVote(voter_id.to_string()));
        }
        debug!("Creating new block for vote...");
        Ok(Block::new(
            voter_id,
            candidate,
            now_millis(),
            self.tip_hash(),
        ))
    }

    /// Appends a sealed block and records its voter and vote.
    ///
    /// All checks run before any mutation.
    pub fn commit_vote(&mut self, block: Block) -> Result<(), LedgerError> {
        if self.has_voted(&block.voter_id) {
            return Err(LedgerError::DuplicateVote(block.voter_id));
        }
        if block.previous_hash != self.tip_hash() {
            return Err(LedgerError::StaleTip);
        }
        if block.hash != block.calculate_hash() || !meets_difficulty(&block.hash, self.difficulty) {
            return Err(LedgerError::Unsealed(self.difficulty));
        }

        self.voters.insert(block.voter_id.clone());
        *self.candidates.entry(block.vote.clone()).or_insert(0) += 1;
        info!(
            "Vote recorded for {}: block {}... chain length {}, total votes {}",
            block.vote,
            block.short_hash(),
            self.chain.len() + 1,
            self.voters.len()
        );
        self.chain.push(block);
        Ok(())
    }

    /// Per-candidate tallies, most votes first. Ties keep candidate-name order.
    pub fn get_results(&self) -> Vec<CandidateResult> {
        let total: u64 = self.candidates.values().sum();
        let mut results: Vec<CandidateResult> = self
            .candidates
            .iter()
            .map(|(candidate, &votes)| CandidateResult {
                candidate: candidate.clone(),
                votes,
                percentage: percentage(votes, total),
            })
            .collect();
        results.sort_by(|a, b| b.votes.cmp(&a.votes));
        results
    }

    pub fn get_total_votes(&self) -> usize {
        self.voters.len()
    }

    pub fn get_voter_ids(&self) -> Vec<String> {
        self.voters.iter().cloned().collect()
    }

    pub fn candidate_votes(&self) -> &BTreeMap<String, u64> {
        &self.candidates
    }

    pub fn verify(&self) -> Result<(), ChainError> {
        verify_chain(&self.chain)
    }

    pub fn is_chain_valid(&self) -> ChainStatus {
        ChainStatus::from(self.verify())
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            chain_length: self.chain.len(),
            last_block: self.get_latest_block().cloned(),
            total_voters: self.voters.len(),
            candidate_votes: self.candidates.clone(),
        }
    }

    /// Self-consistency report for the block at `index`, if any.
    pub fn validate_block(&self, index: usize) -> Option<BlockReport> {
        self.chain.get(index).map(BlockReport::from)
    }

    pub fn history(&self) -> Vec<BlockReport> {
        self.chain.iter().map(BlockReport::from).collect()
    }
}

fn percentage(votes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (votes as f64 * 1000.0 / total as f64).round() / 10.0
}

pub fn receipt_for(err: &LedgerError) -> VoteReceipt {
    match err {
        LedgerError::DuplicateVote(voter_id) => {
            warn!("Duplicate vote attempt: {}", voter_id);
            VoteReceipt::duplicate()
        }
        other => {
            error!("Error processing vote: {}", other);
            VoteReceipt::failed()
        }
    }
}
