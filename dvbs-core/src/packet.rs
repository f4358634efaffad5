//! Fixed-size buffer types shared by the codec stages.

use crate::errors::{DvbsError, Result};

/// MPEG-TS sync byte expected at the start of every 188-byte input packet.
pub const TS_SYNC: u8 = 0x47;

/// Length in bytes of an incoming MPEG transport-stream packet.
pub const TS_PACKET_LEN: usize = 188;

/// Length in bytes of an RS(204,188) codeword: 188 message bytes + 16 parity.
pub const RS_PACKET_LEN: usize = 204;

/// Number of Reed-Solomon parity bytes appended per codeword (2t, t=8).
pub const RS_PARITY_LEN: usize = 16;

/// Scratch buffer for one RS(204,188) codeword as it moves through the
/// scramble -> Reed-Solomon -> interleave pipeline. Bytes `[0, 188)` are the
/// (scrambled) transport-stream payload; bytes `[188, 204)` are RS parity.
pub type Packet = [u8; RS_PACKET_LEN];

/// A validated 188-byte MPEG transport-stream packet.
///
/// Constructed only at the file/stream ingestion boundary; the codec stages
/// themselves take a plain `&[u8; 188]` and never see malformed input.
#[derive(Debug, Clone, Copy)]
pub struct TsPacket([u8; TS_PACKET_LEN]);

impl TsPacket {
    /// Validate `bytes` as a single TS packet: correct length and (always,
    /// not just in debug builds -- the CLI needs this to report which packet
    /// in a file is corrupt) the `0x47` sync byte.
    pub fn parse(bytes: &[u8], packet_index: usize) -> Result<Self> {
        let array: [u8; TS_PACKET_LEN] =
            bytes
                .try_into()
                .map_err(|_| DvbsError::InvalidPacketLength {
                    expected: TS_PACKET_LEN,
                    actual: bytes.len(),
                })?;
        if array[0] != TS_SYNC {
            return Err(DvbsError::UnexpectedSyncByte {
                packet_index,
                byte: array[0],
            });
        }
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; TS_PACKET_LEN] {
        &self.0
    }
}
