//! DVB-S error types.
//!
//! The codec stages themselves (scramble, Reed-Solomon, interleave, puncture)
//! are total over their fixed-size buffers and never fail. `DvbsError` exists
//! for the boundary the pure transform does not cover: turning arbitrary file
//! or stream bytes into well-formed 188-byte transport-stream packets.

use thiserror::Error;

/// Top-level error type for DVB-S encoder boundary operations.
#[derive(Debug, Error)]
pub enum DvbsError {
    #[error("transport-stream input length {actual} is not a multiple of {expected}")]
    InvalidPacketLength { expected: usize, actual: usize },

    #[error("packet {packet_index} has sync byte {byte:#04x}, expected 0x47")]
    UnexpectedSyncByte { packet_index: usize, byte: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for DVB-S boundary operations.
pub type Result<T> = std::result::Result<T, DvbsError>;
