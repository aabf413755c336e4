//! Domain types for terminal authorization

mod command;
mod message;

pub use command::AuthCommand;
pub use message::{AuthResult, Frame, LedgerEntry};
pub use message::{REASON_CANNOT_CONNECT, REASON_TIMEOUT, STATUS_APPROVED, STATUS_DECLINED};
