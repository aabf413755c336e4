//! Posgw Core - POS terminal authorization client and transaction ledger
//!
//! This crate provides:
//! - Pipe-delimited wire protocol framing
//! - Terminal link (TCP transport with versioned handshake)
//! - Durable transaction ledger (SQLite)
//! - Authorization session orchestration
//! - Error types

/// Protocol version announced in the gateway handshake
pub const PROTOCOL_VERSION: &str = "1.0";

pub mod error;
pub mod ledger;
pub mod nonce;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod types;

// Re-export common types
pub use error::{ConnectError, ReceiveError, StoreError};
pub use ledger::LedgerStore;
pub use nonce::{FixedNonceSource, Nonce, NonceSource, StdNonceSource};
pub use protocol::FrameCodec;
pub use session::AuthSession;
pub use transport::{LinkConfig, TerminalLink};
pub use types::{AuthCommand, AuthResult, Frame, LedgerEntry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_version_defined() {
        assert_eq!(PROTOCOL_VERSION, "1.0");
    }
}
