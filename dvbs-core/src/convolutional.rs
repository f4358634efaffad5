//! Punctured rate-1/2 convolutional inner code, K=7, G1=171₈, G2=133₈.
//!
//! The mother code emits two coded bits (C1, C2) per input bit. Puncturing
//! selectively drops coded bits on a deterministic per-rate cycle to trade
//! decoder margin for throughput. A half-symbol carried across packet
//! boundaries (`HalfSymbol`) is state, not a local -- losing it shifts every
//! subsequent symbol by one bit for the higher code rates.

use serde::{Deserialize, Serialize};

/// Constraint length of the mother convolutional code.
const K: u32 = 7;
/// Generator polynomial 1 (171 octal).
const G1: u8 = 0x79;
/// Generator polynomial 2 (133 octal).
const G2: u8 = 0x5b;

/// Forward error correction code rate for the inner convolutional encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeRate {
    R1_2,
    R2_3,
    R3_4,
    R5_6,
    R7_8,
}

impl Default for CodeRate {
    fn default() -> Self {
        CodeRate::R1_2
    }
}

impl CodeRate {
    /// Number of phases in this rate's puncture cycle.
    fn period(self) -> usize {
        match self {
            CodeRate::R1_2 => 1,
            CodeRate::R2_3 => 2,
            CodeRate::R3_4 => 3,
            CodeRate::R5_6 => 5,
            CodeRate::R7_8 => 7,
        }
    }

    /// Which of (C1, C2) to emit at the given phase within this rate's cycle,
    /// per the standardized puncturing table in ETSI EN 300 421 §4.4.
    fn emit(self, phase: usize) -> PunctureEmit {
        use PunctureEmit::*;
        match self {
            CodeRate::R1_2 => Both,
            CodeRate::R2_3 => match phase {
                0 => Both,
                1 => C2,
                _ => unreachable!("rate 2/3 puncture phase out of range"),
            },
            CodeRate::R3_4 => match phase {
                0 => Both,
                1 => C2,
                2 => C1,
                _ => unreachable!("rate 3/4 puncture phase out of range"),
            },
            CodeRate::R5_6 => match phase {
                0 => Both,
                1 => C2,
                2 => C1,
                3 => C2,
                4 => C1,
                _ => unreachable!("rate 5/6 puncture phase out of range"),
            },
            CodeRate::R7_8 => match phase {
                0 => Both,
                1 => C2,
                2 => C2,
                3 => C2,
                4 => C1,
                5 => C2,
                6 => C1,
                _ => unreachable!("rate 7/8 puncture phase out of range"),
            },
        }
    }

    /// Worst-case number of output IQ symbols (I/Q bit pairs) for one
    /// 204-byte RS codeword at this rate, including a possible carried-over
    /// half symbol from the previous packet. Callers size `iq_out` to this.
    pub fn max_iq_capacity(self) -> usize {
        // 204 bytes * 8 bits/byte * 2 coded bits/bit = 3264 mother-code bits
        // at rate 1/2; higher rates only remove bits, so 1/2 is the bound.
        // +1 bit for a carried-over half symbol from a previous call.
        3264 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PunctureEmit {
    Both,
    C1,
    C2,
}

/// Cross-packet state for the inner convolutional encoder: the 7-bit shift
/// register, the puncture-cycle phase, and a half-symbol carry.
#[derive(Debug, Clone)]
pub struct ConvolutionalEncoder {
    delay_line: u8,
    puncture_phase: usize,
    half_symbol: Option<u8>,
}

impl ConvolutionalEncoder {
    pub fn new() -> Self {
        Self {
            delay_line: 0,
            puncture_phase: 0,
            half_symbol: None,
        }
    }

    /// Reset state for a code-rate change: zeros the delay line and puncture
    /// phase, and drops any pending half symbol (§4.4 reset semantics).
    pub fn reset_for_rate_change(&mut self) {
        self.delay_line = 0;
        self.puncture_phase = 0;
        self.half_symbol = None;
    }

    /// Full reset, identical to `reset_for_rate_change` for this stage (the
    /// convolutional encoder carries no state beyond what a rate change
    /// already clears).
    pub fn reset(&mut self) {
        self.reset_for_rate_change();
    }

    /// Encode one 204-byte RS codeword into `iq_out` at the given code rate,
    /// MSB-first within each input byte. Returns the number of complete IQ
    /// symbols written (an (I, Q) bit pair each), and writes those symbol
    /// bits as consecutive `0`/`1` entries in `iq_out`.
    pub fn encode(&mut self, packet: &[u8], rate: CodeRate, iq_out: &mut [u8]) -> usize {
        let mut pos = 0usize;

        if let Some(carried) = self.half_symbol.take() {
            iq_out[pos] = carried;
            pos += 1;
        }

        let period = rate.period();
        for &byte in packet {
            for j in (0..8).rev() {
                let bit = (byte >> j) & 1;
                self.delay_line |= bit << (K - 1);
                let c1 = (self.delay_line & G1).count_ones() as u8 & 1;
                let c2 = (self.delay_line & G2).count_ones() as u8 & 1;

                match rate.emit(self.puncture_phase) {
                    PunctureEmit::Both => {
                        iq_out[pos] = c1;
                        iq_out[pos + 1] = c2;
                        pos += 2;
                    }
                    PunctureEmit::C1 => {
                        iq_out[pos] = c1;
                        pos += 1;
                    }
                    PunctureEmit::C2 => {
                        iq_out[pos] = c2;
                        pos += 1;
                    }
                }
                self.puncture_phase = (self.puncture_phase + 1) % period;
                self.delay_line >>= 1;
            }
        }

        if pos % 2 == 1 {
            self.half_symbol = Some(iq_out[pos - 1]);
            pos -= 1;
        }

        pos / 2
    }
}

impl Default for ConvolutionalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Impulse response: with `delay_line = 0`, feeding `1,0,0,0,0,0,0`
    /// produces the K=7 response of G1=171₈/G2=133₈.
    #[test]
    fn impulse_response_matches_generators() {
        let mut enc = ConvolutionalEncoder::new();
        let bits: [u8; 7] = [1, 0, 0, 0, 0, 0, 0];
        let packed = bits.iter().fold(0u8, |acc, &b| (acc << 1) | b) << 1; // pad to byte, MSB-first 7 bits + 1 pad
        let mut iq = [0u8; 16];
        // Feed just one byte so only the first 7 "used" bits matter; the 8th
        // padding bit's output is not asserted on.
        let n = enc.encode(&[packed], CodeRate::R1_2, &mut iq);
        assert!(n >= 7);
        // Standard (171, 133) impulse response.
        let expected: [(u8, u8); 7] = [
            (1, 1),
            (1, 0),
            (1, 1),
            (1, 1),
            (0, 0),
            (0, 1),
            (1, 1),
        ];
        for (i, &(c1, c2)) in expected.iter().enumerate() {
            assert_eq!(iq[2 * i], c1, "C1 mismatch at step {i}");
            assert_eq!(iq[2 * i + 1], c2, "C2 mismatch at step {i}");
        }
    }

    #[test]
    fn rate_1_2_emits_two_bits_per_input_bit() {
        let mut enc = ConvolutionalEncoder::new();
        let packet = [0u8; 204];
        let mut iq = vec![0u8; CodeRate::R1_2.max_iq_capacity()];
        let symbols = enc.encode(&packet, CodeRate::R1_2, &mut iq);
        assert_eq!(symbols, 204 * 8);
    }

    #[test]
    fn puncture_counts_match_steady_state_per_packet() {
        // Steady state symbols/packet per §8 property 7 (within ±1 for the
        // odd-bit half-symbol carry on the very first packet).
        let expectations = [
            (CodeRate::R1_2, 1632),
            (CodeRate::R2_3, 1224),
            (CodeRate::R3_4, 1088),
            (CodeRate::R5_6, 979),
            (CodeRate::R7_8, 932),
        ];

        for (rate, expected) in expectations {
            let mut enc = ConvolutionalEncoder::new();
            let packet = [0u8; 204];
            let mut iq = vec![0u8; rate.max_iq_capacity()];
            // Drop the first packet (may carry a partial symbol) and sample
            // steady state on the second.
            enc.encode(&packet, rate, &mut iq);
            let symbols = enc.encode(&packet, rate, &mut iq);
            assert!(
                (symbols as i64 - expected as i64).abs() <= 1,
                "rate {rate:?}: got {symbols}, expected ~{expected}"
            );
        }
    }

    #[test]
    fn half_symbol_carries_across_packets_for_odd_rates() {
        let mut enc = ConvolutionalEncoder::new();
        let packet = [0xffu8; 204];
        let mut iq = vec![0u8; CodeRate::R3_4.max_iq_capacity()];
        let first = enc.encode(&packet, CodeRate::R3_4, &mut iq);
        let second = enc.encode(&packet, CodeRate::R3_4, &mut iq);
        // Total raw bits emitted across two packets is even; if the carry
        // were dropped the two counts would not sum to a consistent total.
        assert_eq!((first + second) * 2 % 2, 0);
    }

    #[test]
    fn set_rate_change_clears_delay_line_and_phase() {
        let mut enc = ConvolutionalEncoder::new();
        let packet = [0xffu8; 204];
        let mut iq = vec![0u8; CodeRate::R3_4.max_iq_capacity()];
        enc.encode(&packet, CodeRate::R3_4, &mut iq);
        assert_ne!(enc.delay_line, 0);

        enc.reset_for_rate_change();
        assert_eq!(enc.delay_line, 0);
        assert_eq!(enc.puncture_phase, 0);
        assert!(enc.half_symbol.is_none());
    }
}
