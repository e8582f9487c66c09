use sha2::{Digest, Sha256};

/// SHA-256 over the decimal-text concatenation of a block's fields, as lowercase hex.
pub fn calculate_hash(
    voter_id: &str,
    vote: &str,
    timestamp: u128,
    previous_hash: &str,
    nonce: u64,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(voter_id.as_bytes());
    hasher.update(vote.as_bytes());
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(previous_hash.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}
