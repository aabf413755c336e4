//! Authorization session orchestration
//!
//! One session authorizes sales against one terminal. Link errors are
//! never propagated: every network problem is translated into a terminal
//! `AuthResult` so the caller always gets a decision. Persistence is the
//! caller's explicit follow-up call to the ledger, not a side effect here.

use crate::nonce::{NonceSource, StdNonceSource};
use crate::transport::{LinkConfig, TerminalLink};
use crate::types::{AuthCommand, AuthResult, REASON_CANNOT_CONNECT, REASON_TIMEOUT};

/// One authorization session against a terminal at `(host, port)`
///
/// The link is created lazily on the first authorization and reused for
/// the rest of the session. No retry is attempted on any failure; retry
/// policy belongs to the operator.
pub struct AuthSession {
    host: String,
    port: u16,
    config: LinkConfig,
    link: Option<TerminalLink>,
    nonces: Box<dyn NonceSource + Send>,
}

impl AuthSession {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            config: LinkConfig::default(),
            link: None,
            nonces: Box::new(StdNonceSource::new()),
        }
    }

    /// Override the link timeouts
    pub fn with_config(mut self, config: LinkConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a nonce source (deterministic doubles in tests)
    pub fn with_nonce_source(mut self, nonces: Box<dyn NonceSource + Send>) -> Self {
        self.nonces = nonces;
        self
    }

    /// Authorize one sale amount
    ///
    /// Always produces a decision: connect failures become
    /// `DECLINED`/`CANNOT CONNECT`, exchange failures become
    /// `DECLINED`/`TIMEOUT`, and anything else is the terminal's answer.
    pub async fn authorize(&mut self, amount: &str) -> AuthResult {
        if self.link.is_none() {
            self.link = Some(TerminalLink::with_config(&self.host, self.port, self.config));
        }
        let Some(link) = self.link.as_mut() else {
            return AuthResult::declined(REASON_CANNOT_CONNECT);
        };

        if let Err(e) = link.connect().await {
            tracing::warn!(error = %e, "cannot connect to terminal");
            return AuthResult::declined(REASON_CANNOT_CONNECT);
        }

        let command = AuthCommand::new(amount, &mut *self.nonces);
        if let Err(e) = link.send(&command.encode()).await {
            tracing::warn!(error = %e, "auth command not sent");
            return AuthResult::declined(REASON_TIMEOUT);
        }

        match link.receive().await {
            Ok(frame) => AuthResult::from_frame(&frame),
            Err(e) => {
                tracing::warn!(error = %e, "no authorization reply");
                AuthResult::declined(REASON_TIMEOUT)
            }
        }
    }
}
