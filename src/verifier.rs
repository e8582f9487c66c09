use log::{debug, error, info};

use crate::error::ChainError;
use crate::models::{short, Block, ChainStatus, MSG_BROKEN_LINKAGE, MSG_CHAIN_VALID, MSG_INVALID_HASH};

/// Walks the chain from index 1, checking each block's stored hash against its
/// contents and then its link to the predecessor. Stops at the first failure.
///
/// Proof-of-work difficulty is not re-checked here.
pub fn verify_chain(chain: &[Block]) -> Result<(), ChainError> {
    debug!("Verifying blockchain integrity...");
    for (index, pair) in chain.windows(2).enumerate() {
        let index = index + 1;
        let (previous, current) = (&pair[0], &pair[1]);
        debug!(
            "Verifying block {}: hash {}... previous {}...",
            index,
            current.short_hash(),
            short(&current.previous_hash)
        );

        let calculated = current.calculate_hash();
        if current.hash != calculated {
            error!(
                "Invalid block hash detected at {}: stored {} calculated {}",
                index, current.hash, calculated
            );
            return Err(ChainError::InvalidHash { index });
        }

        if current.previous_hash != previous.hash {
            error!(
                "Chain linkage broken at {}: previous block {} recorded {}",
                index, previous.hash, current.previous_hash
            );
            return Err(ChainError::BrokenLinkage { index });
        }
    }
    info!("Blockchain verification completed over {} blocks", chain.len());
    Ok(())
}

impl From<Result<(), ChainError>> for ChainStatus {
    fn from(result: Result<(), ChainError>) -> Self {
        let (valid, message) = match result {
            Ok(()) => (true, MSG_CHAIN_VALID),
            Err(ChainError::InvalidHash { .. }) => (false, MSG_INVALID_HASH),
            Err(ChainError::BrokenLinkage { .. }) => (false, MSG_BROKEN_LINKAGE),
        };
        ChainStatus {
            valid,
            message: message.to_string(),
        }
    }
}
