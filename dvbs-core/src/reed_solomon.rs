//! Systematic Reed-Solomon RS(204,188,t=8) outer encoder over GF(256).
//!
//! RS(204,188) is RS(255,239) shortened by 51 symbols: the leading 51
//! zero-padding bytes of the full code don't change the parity computation,
//! so they are never materialized here -- this divides the 188-byte message
//! directly by the 16-coefficient generator polynomial in
//! [`crate::tables::RS_GENERATOR`].

use crate::gf::gf_mul;
use crate::packet::{Packet, RS_PACKET_LEN, RS_PARITY_LEN, TS_PACKET_LEN};
use crate::tables::RS_GENERATOR;

/// Compute the 16 RS parity bytes for `packet[0..188]` and write them into
/// `packet[188..204]`. The message bytes are left unchanged (systematic
/// code).
pub fn encode(packet: &mut Packet) {
    let mut tmp = [0u8; RS_PACKET_LEN];
    tmp[..TS_PACKET_LEN].copy_from_slice(&packet[..TS_PACKET_LEN]);

    for i in 0..TS_PACKET_LEN {
        let coef = tmp[i];
        if coef != 0 {
            for j in 0..RS_PARITY_LEN {
                tmp[i + j + 1] ^= gf_mul(RS_GENERATOR[j], coef);
            }
        }
    }

    packet[TS_PACKET_LEN..RS_PACKET_LEN].copy_from_slice(&tmp[TS_PACKET_LEN..RS_PACKET_LEN]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf::gf_mul;
    use crate::tables::GF_EXP;

    #[test]
    fn all_zero_input_yields_all_zero_parity() {
        let mut packet = [0u8; RS_PACKET_LEN];
        encode(&mut packet);
        assert!(packet[TS_PACKET_LEN..].iter().all(|&b| b == 0));
    }

    #[test]
    fn systematic_property_preserves_message_bytes() {
        let mut packet = [0u8; RS_PACKET_LEN];
        for (i, b) in packet[..TS_PACKET_LEN].iter_mut().enumerate() {
            *b = (i * 7 + 3) as u8;
        }
        let message_before = packet[..TS_PACKET_LEN].to_vec();
        encode(&mut packet);
        assert_eq!(&packet[..TS_PACKET_LEN], message_before.as_slice());
    }

    #[test]
    fn codeword_evaluates_to_zero_at_every_root() {
        let mut packet = [0u8; RS_PACKET_LEN];
        for (i, b) in packet[..TS_PACKET_LEN].iter_mut().enumerate() {
            *b = ((i * 31 + 17) % 256) as u8;
        }
        encode(&mut packet);

        // alpha^i for i in 0..16, alpha = 0x02.
        for i in 0..16usize {
            let alpha_i = GF_EXP[i];
            // Horner evaluation of the codeword polynomial (highest-degree
            // coefficient first, i.e. packet[0] is the coefficient of the
            // highest power) at x = alpha^i.
            let mut acc = 0u8;
            for &coef in packet.iter() {
                acc = gf_mul(acc, alpha_i) ^ coef;
            }
            assert_eq!(acc, 0, "codeword does not vanish at alpha^{i}");
        }
    }

    #[test]
    fn single_one_byte_produces_generator_derived_parity() {
        let mut packet = [0u8; RS_PACKET_LEN];
        packet[0] = 0x01;
        encode(&mut packet);
        // Dividing x^15 (the 188-byte message's leading term is effectively
        // x^15 relative to the 16-byte remainder window once 187 trailing
        // zero message bytes are accounted for) by g(x) leaves g(x) itself
        // as the remainder, since `tmp[0]=1` triggers exactly one XOR of
        // `RS_GENERATOR` into `tmp[1..17]` with no further reduction needed.
        assert_eq!(&packet[TS_PACKET_LEN..], &crate::tables::RS_GENERATOR[..]);
    }
}
