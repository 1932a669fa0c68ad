//! Content fingerprints for change detection
//!
//! Same bytes = same fingerprint, on every platform and in every process.
//! Not suitable for anything security related.

use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

/// Fingerprint of (a prefix of) a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Length of the hex encoding
    pub const LEN: usize = 16;

    /// Wrap a stored fingerprint string, rejecting anything that is not one
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() == Self::LEN && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(s.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Get the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint all of `bytes`
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    Fingerprint(format!("{:016x}", xxh3_64(bytes)))
}

/// Fingerprint at most the first `limit` bytes
pub fn fingerprint_sampled(bytes: &[u8], limit: usize) -> Fingerprint {
    fingerprint(&bytes[..bytes.len().min(limit)])
}
