use std::time::Instant;

use log::{debug, info};

use crate::error::SealError;
use crate::models::Block;

/// Hex length of a SHA-256 digest; no higher difficulty can be met.
pub const MAX_DIFFICULTY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealStats {
    pub attempts: u64,
    pub elapsed_ms: u128,
}

/// True when `hash` starts with `difficulty` hex zeros.
pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}

/// Searches nonces from zero until the block's hash meets `difficulty`.
///
/// `max_attempts` bounds the search; on exhaustion the block keeps its last
/// tried nonce and must not be appended.
pub fn seal(
    block: &mut Block,
    difficulty: usize,
    max_attempts: Option<u64>,
) -> Result<SealStats, SealError> {
    if difficulty > MAX_DIFFICULTY {
        return Err(SealError::Unreachable(difficulty));
    }
    debug!("Mining block with difficulty {}...", difficulty);
    let start = Instant::now();

    block.nonce = 0;
    block.hash = block.calculate_hash();
    let mut attempts = 1;

    while !meets_difficulty(&block.hash, difficulty) {
        if let Some(limit) = max_attempts {
            if attempts >= limit {
                return Err(SealError::Exhausted {
                    difficulty,
                    attempts,
                });
            }
        }
        block.nonce += 1;
        block.hash = block.calculate_hash();
        attempts += 1;
    }

    let elapsed_ms = start.elapsed().as_millis();
    info!(
        "Block mined in {}ms after {} attempts. Hash: {}...",
        elapsed_ms,
        attempts,
        block.short_hash()
    );
    Ok(SealStats {
        attempts,
        elapsed_ms,
    })
}
