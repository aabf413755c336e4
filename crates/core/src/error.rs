//! Error types for posgw-core

use thiserror::Error;

/// Errors from establishing the terminal link
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Cannot create socket: {0}")]
    SocketCreateFailed(#[source] std::io::Error),

    #[error("Invalid terminal address: {0}")]
    InvalidAddress(String),

    #[error("Connection refused: {0}")]
    ConnectionRefused(#[source] std::io::Error),

    #[error("Connect timed out after {0}ms")]
    ConnectTimeout(u64),

    #[error("Handshake rejected: {0}")]
    HandshakeRejected(String),
}

/// Errors from receiving a reply frame
#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Response timeout after {0}ms")]
    Timeout(u64),

    #[error("Frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: usize },
}

/// Errors from the transaction ledger
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot open ledger database: {0}")]
    OpenFailed(#[source] rusqlite::Error),

    #[error("Ledger statement failed: {0}")]
    ExecFailed(#[from] rusqlite::Error),
}
