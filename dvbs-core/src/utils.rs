//! Buffer-chunking helpers shared by the encoder and its callers.

use crate::errors::{DvbsError, Result};
use crate::packet::TS_PACKET_LEN;

/// Split a byte buffer into 188-byte transport-stream packets, checking that
/// the buffer length is a whole number of packets.
pub fn split_ts_packets(data: &[u8]) -> Result<impl Iterator<Item = &[u8]>> {
    if data.len() % TS_PACKET_LEN != 0 {
        return Err(DvbsError::InvalidPacketLength {
            expected: TS_PACKET_LEN,
            actual: data.len(),
        });
    }
    Ok(data.chunks_exact(TS_PACKET_LEN))
}
