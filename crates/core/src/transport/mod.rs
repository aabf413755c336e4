//! TCP transport to the payment terminal

pub mod link;

pub use link::TerminalLink;

use std::time::Duration;

/// Timeout configuration for a terminal link
///
/// Defaults match the deployed terminal fleet: a short send bound, a long
/// receive bound (the terminal may wait on cardholder input), and a
/// connect bound so an unreachable terminal cannot hang the process.
#[derive(Debug, Clone, Copy)]
pub struct LinkConfig {
    /// Bound on establishing the TCP connection
    pub connect_timeout: Duration,

    /// Bound on writing one command
    pub send_timeout: Duration,

    /// Bound on waiting for one reply frame
    pub receive_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            send_timeout: Duration::from_secs(2),
            receive_timeout: Duration::from_secs(20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_config_default() {
        let config = LinkConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.send_timeout, Duration::from_secs(2));
        assert_eq!(config.receive_timeout, Duration::from_secs(20));
    }
}
