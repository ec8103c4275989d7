//! Domain entities for the tracker.

pub mod entry;
pub mod tab;

use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a short random hex suffix for identifiers.
pub(crate) fn random_suffix(len: usize) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_nanos();
    format!("{:x}", now % (16_u128.pow(len as u32)))
        .chars()
        .take(len)
        .collect()
}
