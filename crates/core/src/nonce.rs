//! Nonce generation for authorization commands
//!
//! Each AUTH command carries an 8-byte nonce, hex-encoded on the wire. The
//! nonce is generated but never verified on this side; uniqueness checking
//! is entirely the remote terminal's concern, so this is not a
//! replay-protection mechanism.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Nonce size in bytes
pub const NONCE_SIZE: usize = 8;

/// An 8-byte authorization nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Export as a 16-character lowercase hex string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// Source of nonces for a session
///
/// Injected into the session so tests can supply a deterministic double.
pub trait NonceSource {
    fn next_nonce(&mut self) -> Nonce;
}

/// Process-scoped PRNG source
///
/// Seeded once from OS entropy at construction and owned for the process
/// lifetime; never re-seeded per authorization.
pub struct StdNonceSource {
    rng: StdRng,
}

impl StdNonceSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for StdNonceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceSource for StdNonceSource {
    fn next_nonce(&mut self) -> Nonce {
        let mut bytes = [0u8; NONCE_SIZE];
        self.rng.fill(&mut bytes);
        Nonce(bytes)
    }
}

/// Fixed source returning the same nonce every time, for deterministic tests
pub struct FixedNonceSource {
    bytes: [u8; NONCE_SIZE],
}

impl FixedNonceSource {
    pub fn new(bytes: [u8; NONCE_SIZE]) -> Self {
        Self { bytes }
    }
}

impl NonceSource for FixedNonceSource {
    fn next_nonce(&mut self) -> Nonce {
        Nonce(self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_hex_length() {
        let mut source = StdNonceSource::new();
        let nonce = source.next_nonce();
        assert_eq!(nonce.to_hex().len(), NONCE_SIZE * 2);
    }

    #[test]
    fn test_nonce_hex_lowercase() {
        let nonce = Nonce::from_bytes([0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45, 0x67, 0x89]);
        assert_eq!(nonce.to_hex(), "abcdef0123456789");
    }

    #[test]
    fn test_nonces_differ_across_draws() {
        let mut source = StdNonceSource::new();
        let a = source.next_nonce();
        let b = source.next_nonce();
        assert_ne!(a, b, "consecutive nonces should not repeat");
    }

    #[test]
    fn test_fixed_source_is_deterministic() {
        let mut source = FixedNonceSource::new([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(source.next_nonce(), source.next_nonce());
        assert_eq!(source.next_nonce().to_hex(), "0102030405060708");
    }
}
