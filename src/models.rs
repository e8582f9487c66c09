use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::hasher::calculate_hash;

pub const GENESIS_VOTER_ID: &str = "0";
pub const GENESIS_VOTE: &str = "Genesis Block";
pub const GENESIS_PREVIOUS_HASH: &str = "0";

pub const MSG_VOTE_DUPLICATE: &str = "Error: You have already voted!";
pub const MSG_VOTE_FAILED: &str = "Error: Failed to process vote. Please try again.";
pub const MSG_CHAIN_VALID: &str = "Blockchain is valid! No tampering detected.";
pub const MSG_INVALID_HASH: &str = "Error: Current hash is invalid!";
pub const MSG_BROKEN_LINKAGE: &str = "Error: Chain linkage is broken!";

/// One vote sealed into the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub voter_id: String,
    pub vote: String,
    pub timestamp: u128,
    pub previous_hash: String,
    pub nonce: u64,
    pub hash: String,
}

impl Block {
    /// Builds an unsealed block with `nonce = 0` and a hash matching its fields.
    pub fn new(voter_id: &str, vote: &str, timestamp: u128, previous_hash: &str) -> Self {
        let mut block = Block {
            voter_id: voter_id.to_string(),
            vote: vote.to_string(),
            timestamp,
            previous_hash: previous_hash.to_string(),
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.calculate_hash();
        block
    }

    pub fn genesis() -> Self {
        Block::new(GENESIS_VOTER_ID, GENESIS_VOTE, now_millis(), GENESIS_PREVIOUS_HASH)
    }

    pub fn calculate_hash(&self) -> String {
        calculate_hash(
            &self.voter_id,
            &self.vote,
            self.timestamp,
            &self.previous_hash,
            self.nonce,
        )
    }

    /// First 16 hex characters, the form used in log lines.
    pub fn short_hash(&self) -> &str {
        short(&self.hash)
    }
}

pub(crate) fn short(hash: &str) -> &str {
    hash.get(..16).unwrap_or(hash)
}

pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub success: bool,
    pub message: String,
}

impl VoteReceipt {
    pub fn accepted(candidate: &str) -> Self {
        VoteReceipt {
            success: true,
            message: format!("Vote successfully cast for {}!", candidate),
        }
    }

    pub fn duplicate() -> Self {
        VoteReceipt {
            success: false,
            message: MSG_VOTE_DUPLICATE.to_string(),
        }
    }

    pub fn failed() -> Self {
        VoteReceipt {
            success: false,
            message: MSG_VOTE_FAILED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStatus {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub candidate: String,
    pub votes: u64,
    /// Share of all votes, rounded to one decimal place.
    pub percentage: f64,
}

/// Point-in-time view of the ledger for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSnapshot {
    pub chain_length: usize,
    pub last_block: Option<Block>,
    pub total_voters: usize,
    pub candidate_votes: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockReport {
    pub hash: String,
    pub previous_hash: String,
    pub timestamp: u128,
    pub is_valid: bool,
}

impl From<&Block> for BlockReport {
    fn from(block: &Block) -> Self {
        BlockReport {
            hash: block.hash.clone(),
            previous_hash: block.previous_hash.clone(),
            timestamp: block.timestamp,
            is_valid: block.hash == block.calculate_hash(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub voter_id: String,
    pub candidate: String,
}
