//! ID generation and timestamp utilities.

use chrono::{DateTime, SubsecRound, Utc};
use sha2::{Digest, Sha256};

use crate::model::Issue;

/// Shortest id handed out.
pub const MIN_ID_LENGTH: usize = 8;

/// Longest hash-only id before falling back to a nonce suffix.
pub const MAX_ID_LENGTH: usize = 12;

// ============================================================================
// Timestamps
// ============================================================================

/// Current time truncated to milliseconds, the precision of the wire format.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

// ============================================================================
// ID Generation
// ============================================================================

/// Generate a unique issue id.
///
/// Uses SHA256 hashing with base36 encoding. The `exists` closure checks
/// for collisions across the whole store.
pub fn generate_id<F>(project: &str, issue: &Issue, issue_count: usize, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut length = optimal_hash_length(issue_count);

    loop {
        for nonce in 0..10 {
            let seed = generate_id_seed(project, issue, nonce);
            let id = compute_id_hash(&seed, length);
            if !exists(&id) {
                return id;
            }
        }

        if length < MAX_ID_LENGTH {
            length += 1;
        } else {
            let mut nonce = 10u32;
            loop {
                let seed = generate_id_seed(project, issue, nonce);
                let hash_str = compute_id_hash(&seed, MAX_ID_LENGTH);
                // Suffix the nonce once plain hashes are exhausted.
                let candidate = if nonce > 1000 {
                    format!("{hash_str}{nonce}")
                } else {
                    hash_str
                };
                if !exists(&candidate) {
                    return candidate;
                }
                nonce = nonce.wrapping_add(1);
            }
        }
    }
}

/// Compute the optimal hash length for a given issue count.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
fn optimal_hash_length(issue_count: usize) -> usize {
    let n = issue_count as f64;
    let max_prob = 0.01;

    for len in MIN_ID_LENGTH..=MAX_ID_LENGTH {
        let space = 36_f64.powi(len as i32);
        let prob = 1.0 - (-n * n / (2.0 * space)).exp();
        if prob < max_prob {
            return len;
        }
    }
    MAX_ID_LENGTH
}

fn generate_id_seed(project: &str, issue: &Issue, nonce: u32) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        project,
        issue.issue_title,
        issue.issue_text,
        issue.created_by,
        issue.created_on.timestamp_nanos_opt().unwrap_or(0),
        nonce
    )
}

fn compute_id_hash(input: &str, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();

    let mut num = 0u64;
    for &byte in result.iter().take(8) {
        num = (num << 8) | u64::from(byte);
    }

    let mut encoded = base36_encode(num);
    if encoded.len() < length {
        encoded = format!("{encoded:0>length$}");
    }
    encoded.chars().take(length).collect()
}

fn base36_encode(mut num: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while num > 0 {
        chars.push(ALPHABET[(num % 36) as usize] as char);
        num /= 36;
    }
    chars.into_iter().rev().collect()
}
