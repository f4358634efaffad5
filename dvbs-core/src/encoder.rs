//! Top-level DVB-S channel encoder: scramble -> Reed-Solomon -> interleave ->
//! punctured convolutional code.
//!
//! [`DvbsEncoder`] owns all cross-packet state for the pipeline. Packets must
//! be fed in transmission order; the scrambler's group-of-8 sync-byte
//! inversion and the interleaver's per-branch delay lines both depend on it.
//! The four stages are total over their fixed-size buffers: `encode_packet`
//! never returns an error. Sizing `iq_out` too small to hold the current
//! rate's output is a programmer error and panics via ordinary slice bounds
//! checking, exactly as an out-of-range index would anywhere else.

use crate::config::EncoderConfig;
use crate::convolutional::{CodeRate, ConvolutionalEncoder};
use crate::interleaver::Interleaver;
use crate::logging::{LogConfig, SignalLogger};
use crate::packet::{Packet, RS_PACKET_LEN, TS_PACKET_LEN};
use crate::reed_solomon;
use crate::scrambler::Scrambler;

/// Running counters for an encoder instance, exposed for CLI progress
/// reporting and diagnostics. Bookkeeping only; reading it never mutates
/// encoder state or affects the bit-exact codec path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderStats {
    pub packets_encoded: u64,
    pub iq_symbols_emitted: u64,
    pub sync_inversions: u64,
    pub code_rate_switches: u64,
}

/// Stateful DVB-S channel encoder. Single-writer: `Send` but not `Sync`.
pub struct DvbsEncoder {
    code_rate: CodeRate,
    scrambler: Scrambler,
    interleaver: Interleaver,
    convolutional: ConvolutionalEncoder,
    logger: SignalLogger,
    stats: EncoderStats,
}

impl DvbsEncoder {
    /// Construct with zeroed state, `CodeRate::R1_2`, and a default
    /// (non-verbose) logger.
    pub fn new() -> Self {
        Self::with_logger(LogConfig::default())
    }

    /// Construct with an explicit logging configuration.
    pub fn with_logger(log: LogConfig) -> Self {
        Self {
            code_rate: CodeRate::default(),
            scrambler: Scrambler::new(),
            interleaver: Interleaver::new(),
            convolutional: ConvolutionalEncoder::new(),
            logger: SignalLogger::new(log),
            stats: EncoderStats::default(),
        }
    }

    /// Construct from a full [`EncoderConfig`] (code rate + logging).
    pub fn from_config(config: EncoderConfig) -> Self {
        let mut encoder = Self::with_logger(config.log);
        encoder.code_rate = config.code_rate;
        encoder
    }

    /// Change the inner code rate. Per the puncturing reset semantics, this
    /// clears the convolutional encoder's delay line, puncture phase, and
    /// any carried half symbol; the scrambler and interleaver are untouched,
    /// since rate changes don't affect the outer coding stages.
    pub fn set_code_rate(&mut self, rate: CodeRate) {
        if rate != self.code_rate {
            self.logger.info(
                "CONV",
                format!("code rate changed: {:?} -> {:?}", self.code_rate, rate),
            );
            self.stats.code_rate_switches += 1;
        }
        self.code_rate = rate;
        self.convolutional.reset_for_rate_change();
    }

    /// Full state reset: scrambler PRBS phase, interleaver FIFOs, and the
    /// convolutional encoder's delay line. Equivalent to starting a fresh
    /// transport stream. The configured code rate and accumulated stats are
    /// left untouched.
    pub fn reset(&mut self) {
        self.scrambler.reset();
        self.interleaver.reset();
        self.convolutional.reset();
        self.logger.info("ENCODER", "encoder state reset");
    }

    pub fn code_rate(&self) -> CodeRate {
        self.code_rate
    }

    pub fn stats(&self) -> &EncoderStats {
        &self.stats
    }

    pub fn logger(&self) -> &SignalLogger {
        &self.logger
    }

    /// Encode one 188-byte MPEG transport-stream packet into `iq_out`,
    /// returning the number of (I, Q) symbol pairs written.
    ///
    /// `iq_out` must have capacity for at least `self.code_rate().max_iq_capacity()`
    /// entries; each entry is a single `0`/`1` bit, laid out as consecutive
    /// `I0, Q0, I1, Q1, ...` pairs.
    pub fn encode_packet(&mut self, ts_in: &[u8; TS_PACKET_LEN], iq_out: &mut [u8]) -> usize {
        let mut packet: Packet = [0u8; RS_PACKET_LEN];
        let mut scrambled = [0u8; TS_PACKET_LEN];
        self.scrambler.scramble(ts_in, &mut scrambled);
        if scrambled[0] != ts_in[0] {
            self.stats.sync_inversions += 1;
            self.logger.debug("PRBS", "sync byte inverted");
        }
        packet[..TS_PACKET_LEN].copy_from_slice(&scrambled);
        self.logger.trace("PRBS", "packet scrambled");

        reed_solomon::encode(&mut packet);
        self.logger.trace("RS", "parity computed");

        self.interleaver.interleave(&mut packet);
        self.logger.trace("INTERLEAVE", "packet interleaved");

        let symbols = self.convolutional.encode(&packet, self.code_rate, iq_out);
        self.logger
            .debug("CONV", format!("emitted {symbols} IQ symbols"));

        self.stats.packets_encoded += 1;
        self.stats.iq_symbols_emitted += symbols as u64;

        symbols
    }
}

impl Default for DvbsEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::TS_SYNC;

    #[test]
    fn encodes_valid_packet_and_updates_stats() {
        let mut encoder = DvbsEncoder::new();
        let mut packet = [0u8; TS_PACKET_LEN];
        packet[0] = TS_SYNC;
        let mut iq = vec![0u8; encoder.code_rate().max_iq_capacity()];
        let symbols = encoder.encode_packet(&packet, &mut iq);
        assert_eq!(symbols, RS_PACKET_LEN * 8);
        assert_eq!(encoder.stats().packets_encoded, 1);
        assert_eq!(encoder.stats().iq_symbols_emitted, symbols as u64);
    }

    #[test]
    fn reset_preserves_stats_and_code_rate() {
        let mut encoder = DvbsEncoder::new();
        let mut packet = [0u8; TS_PACKET_LEN];
        packet[0] = TS_SYNC;
        let mut iq = vec![0u8; encoder.code_rate().max_iq_capacity()];
        encoder.encode_packet(&packet, &mut iq);
        let packets_before = encoder.stats().packets_encoded;

        encoder.reset();
        assert_eq!(encoder.stats().packets_encoded, packets_before);
        assert_eq!(encoder.code_rate(), CodeRate::R1_2);
    }

    #[test]
    fn set_code_rate_resets_convolutional_state_only() {
        let mut encoder = DvbsEncoder::new();
        let mut packet = [0u8; TS_PACKET_LEN];
        packet[0] = TS_SYNC;
        let mut iq = vec![0u8; CodeRate::R7_8.max_iq_capacity()];
        encoder.encode_packet(&packet, &mut iq);
        let packets_before = encoder.stats().packets_encoded;

        encoder.set_code_rate(CodeRate::R7_8);
        assert_eq!(encoder.code_rate(), CodeRate::R7_8);
        assert_eq!(encoder.stats().code_rate_switches, 1);
        // Stats (and thus scrambler/interleaver progress) survive a rate
        // change; only the convolutional encoder's internal state resets.
        assert_eq!(encoder.stats().packets_encoded, packets_before);
    }

    #[test]
    fn every_eighth_packet_inverts_sync_byte() {
        let mut encoder = DvbsEncoder::new();
        let mut packet = [0u8; TS_PACKET_LEN];
        packet[0] = TS_SYNC;
        let mut iq = vec![0u8; encoder.code_rate().max_iq_capacity()];
        for _ in 0..16 {
            encoder.encode_packet(&packet, &mut iq);
        }
        assert_eq!(encoder.stats().sync_inversions, 2);
    }
}
