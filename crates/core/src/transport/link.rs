//! Terminal link: one TCP connection with a versioned handshake
//!
//! The link owns the socket and the read accumulator. Replies are read
//! incrementally until a newline or EOF, so a frame split across TCP
//! segments is reassembled instead of truncated.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::LinkConfig;
use crate::error::{ConnectError, ReceiveError};
use crate::protocol::FrameCodec;
use crate::types::Frame;
use crate::PROTOCOL_VERSION;

/// Upper bound on one reply frame
pub const MAX_FRAME_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Disconnected,
    Ready,
    Failed,
}

/// One TCP connection to a payment terminal
pub struct TerminalLink {
    address: String,
    port: u16,
    config: LinkConfig,
    state: LinkState,
    stream: Option<BufReader<TcpStream>>,
    line: Vec<u8>,
}

impl TerminalLink {
    pub fn new(address: &str, port: u16) -> Self {
        Self::with_config(address, port, LinkConfig::default())
    }

    pub fn with_config(address: &str, port: u16, config: LinkConfig) -> Self {
        Self {
            address: address.to_string(),
            port,
            config,
            state: LinkState::Disconnected,
            stream: None,
            line: Vec::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Ready
    }

    /// Connect and perform the `HELLO|GW|1.0` handshake
    ///
    /// Idempotent: a ready link returns immediately without reopening the
    /// socket. Only dotted-quad IPv4 addresses are accepted; hostname
    /// resolution is out of contract.
    pub async fn connect(&mut self) -> Result<(), ConnectError> {
        if self.state == LinkState::Ready {
            return Ok(());
        }

        let ip: Ipv4Addr = match self.address.parse() {
            Ok(ip) => ip,
            Err(_) => {
                self.state = LinkState::Failed;
                return Err(ConnectError::InvalidAddress(self.address.clone()));
            }
        };
        let addr = SocketAddr::from((ip, self.port));

        tracing::debug!(%addr, "connecting to terminal");
        let connect_ms = self.config.connect_timeout.as_millis() as u64;
        let stream = match timeout(self.config.connect_timeout, TcpStream::connect(addr)).await {
            Err(_) => {
                self.state = LinkState::Failed;
                return Err(ConnectError::ConnectTimeout(connect_ms));
            }
            Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => {
                self.state = LinkState::Failed;
                return Err(ConnectError::ConnectionRefused(e));
            }
            Ok(Err(e)) => {
                self.state = LinkState::Failed;
                return Err(ConnectError::SocketCreateFailed(e));
            }
            Ok(Ok(stream)) => stream,
        };
        self.stream = Some(BufReader::new(stream));

        let hello = format!("{}\n", FrameCodec::encode(&["HELLO", "GW", PROTOCOL_VERSION]));
        if let Err(e) = self.send(&hello).await {
            self.fail();
            return Err(ConnectError::HandshakeRejected(format!(
                "greeting not sent: {e}"
            )));
        }

        let reply = match self.receive().await {
            Ok(frame) => frame,
            Err(e) => {
                self.fail();
                return Err(ConnectError::HandshakeRejected(format!(
                    "no greeting reply: {e}"
                )));
            }
        };
        if !reply.is_handshake_reply() {
            self.fail();
            return Err(ConnectError::HandshakeRejected(format!(
                "unexpected reply: {:?}",
                reply.fields()
            )));
        }

        self.state = LinkState::Ready;
        tracing::debug!("terminal link ready");
        Ok(())
    }

    /// Write one wire line, bounded by the send timeout
    pub async fn send(&mut self, line: &str) -> io::Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "link is not connected"))?;

        tracing::debug!(line = line.trim_end(), "send");
        match timeout(self.config.send_timeout, stream.get_mut().write_all(line.as_bytes())).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(io::ErrorKind::TimedOut, "send timed out")),
        }
    }

    /// Wait for one reply frame, bounded by the receive timeout
    ///
    /// The accumulator is cleared first so frames never leak across calls.
    /// A quiet socket yields `Timeout`, never `Io`; EOF with buffered bytes
    /// terminates the frame, EOF with none is an I/O error.
    pub async fn receive(&mut self) -> Result<Frame, ReceiveError> {
        let receive_ms = self.config.receive_timeout.as_millis() as u64;
        let Self {
            stream,
            line,
            config,
            ..
        } = self;
        let reader = stream.as_mut().ok_or_else(|| {
            ReceiveError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "link is not connected",
            ))
        })?;

        line.clear();
        match timeout(config.receive_timeout, read_frame(reader, line)).await {
            Err(_) => Err(ReceiveError::Timeout(receive_ms)),
            Ok(Err(e)) => Err(e),
            Ok(Ok(())) => {
                let frame = FrameCodec::decode(line);
                tracing::debug!(fields = ?frame.fields(), "receive");
                Ok(frame)
            }
        }
    }

    fn fail(&mut self) {
        // dropping the stream closes the socket
        self.stream = None;
        self.state = LinkState::Failed;
    }
}

/// Accumulate bytes into `line` until a newline or EOF
async fn read_frame(
    reader: &mut BufReader<TcpStream>,
    line: &mut Vec<u8>,
) -> Result<(), ReceiveError> {
    loop {
        let consumed = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                if line.is_empty() {
                    return Err(ReceiveError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "terminal closed the connection",
                    )));
                }
                // EOF terminates a partial frame
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    line.extend_from_slice(&available[..=pos]);
                    pos + 1
                }
                None => {
                    line.extend_from_slice(available);
                    available.len()
                }
            }
        };
        reader.consume(consumed);

        if line.len() > MAX_FRAME_SIZE {
            return Err(ReceiveError::FrameTooLarge {
                size: line.len(),
                max: MAX_FRAME_SIZE,
            });
        }
        if line.ends_with(b"\n") {
            return Ok(());
        }
    }
}
