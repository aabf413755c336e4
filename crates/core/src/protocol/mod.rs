//! Pipe-delimited wire protocol framing

pub mod codec;

pub use codec::FrameCodec;
