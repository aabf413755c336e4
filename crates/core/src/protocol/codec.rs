//! Pipe-delimited codec for terminal messages
//!
//! The protocol is positional: fields carry meaning by index, not by name,
//! and no escaping of `|` inside a field is supported.

use crate::types::Frame;

/// Frame codec for encoding/decoding wire lines
pub struct FrameCodec;

impl FrameCodec {
    /// Encode fields into one wire line
    ///
    /// Joins fields with `|`. No terminator is appended; callers include
    /// the trailing `\n` themselves.
    pub fn encode(fields: &[&str]) -> String {
        fields.join("|")
    }

    /// Decode one inbound chunk into a Frame
    ///
    /// The chunk is treated as a single text line (the protocol is ASCII;
    /// anything else is replaced lossily) and split on `|`. The last field
    /// keeps whatever terminator the peer sent. An empty chunk decodes to
    /// an empty frame.
    pub fn decode(buf: &[u8]) -> Frame {
        if buf.is_empty() {
            return Frame::default();
        }

        let text = String::from_utf8_lossy(buf);
        Frame::new(text.split('|').map(str::to_string).collect())
    }
}
