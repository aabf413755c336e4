//! Authorization command construction

use std::time::{SystemTime, UNIX_EPOCH};

use crate::nonce::{Nonce, NonceSource};
use crate::protocol::FrameCodec;

/// One AUTH command: `AUTH|<amount>|<unixTimeSeconds>|<nonceHex>`
///
/// The amount is the caller-supplied decimal string; it is sent as-is,
/// numeric validation being the caller's responsibility.
#[derive(Debug, Clone)]
pub struct AuthCommand {
    pub amount: String,
    pub timestamp: u64,
    pub nonce: Nonce,
}

impl AuthCommand {
    /// Build a command stamped with the current Unix time and a fresh nonce
    pub fn new(amount: &str, nonces: &mut dyn NonceSource) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            amount: amount.to_string(),
            timestamp,
            nonce: nonces.next_nonce(),
        }
    }

    /// Encode as a newline-terminated wire line
    pub fn encode(&self) -> String {
        let timestamp = self.timestamp.to_string();
        let nonce = self.nonce.to_hex();
        let line = FrameCodec::encode(&["AUTH", &self.amount, &timestamp, &nonce]);
        format!("{line}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonce::FixedNonceSource;

    #[test]
    fn test_command_wire_shape() {
        let mut nonces = FixedNonceSource::new([0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6, 0xa7, 0xb8]);
        let cmd = AuthCommand {
            amount: "10.00".to_string(),
            timestamp: 1_700_000_000,
            nonce: nonces.next_nonce(),
        };
        assert_eq!(cmd.encode(), "AUTH|10.00|1700000000|a1b2c3d4e5f6a7b8\n");
    }

    #[test]
    fn test_command_stamps_current_time() {
        let mut nonces = FixedNonceSource::new([0; 8]);
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let cmd = AuthCommand::new("5.00", &mut nonces);
        assert!(cmd.timestamp >= before);
    }

    #[test]
    fn test_command_amount_not_validated() {
        let mut nonces = FixedNonceSource::new([0; 8]);
        let cmd = AuthCommand::new("not-a-number", &mut nonces);
        assert!(cmd.encode().starts_with("AUTH|not-a-number|"));
    }
}
