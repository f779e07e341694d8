//! Property- and scenario-based exercise of the codec end to end: round-trip,
//! error/erasure sweeps, and the concrete fixtures that pin exact diagnostic
//! counts. Colocated as a `#[cfg(test)]`-only module rather than under every
//! individual component file, since it drives several of them together.

#![cfg(test)]

use std::sync::Arc;

use itertools::Itertools;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::block::Block;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::erasure_channel::{decode_stack, encode_stack};
use crate::field::Field;
use crate::generator::build_generator;
use crate::polynomial::FieldPolynomial;
use crate::shortened::{ShortenedDecoder, ShortenedEncoder};

const GF16_POLY: [u8; 5] = [1, 1, 0, 0, 1];
const GF256_POLY: [u8; 9] = [1, 1, 1, 0, 0, 0, 0, 1, 1];

fn gf16() -> Arc<Field> {
    Arc::new(Field::new(4, &GF16_POLY).unwrap())
}

fn gf256() -> Arc<Field> {
    Arc::new(Field::new(8, &GF256_POLY).unwrap())
}

fn codec(field: Arc<Field>, i0: u32, r: usize) -> (Encoder, Decoder) {
    let n = field.size() as usize;
    let g = build_generator(&field, i0, r).unwrap();
    let enc = Encoder::new(field.clone(), g, n).unwrap();
    let dec = Decoder::new(field, n, r, i0).unwrap();
    (enc, dec)
}

fn encode_data(enc: &Encoder, data: &[u32]) -> Block {
    let mut block = Block::new(enc.k(), enc.r());
    block.data_mut().copy_from_slice(data);
    enc.encode(&mut block).unwrap();
    block
}

fn random_poly(field: &Arc<Field>, rng: &mut StdRng, deg: usize) -> FieldPolynomial {
    let coeffs: Vec<u32> = (0..=deg).map(|_| rng.gen_range(0..=field.mask())).collect();
    FieldPolynomial::from_coeffs(field.clone(), coeffs)
}

/// Fingerprints the data region of every block in `stack`, so a stack-wide
/// comparison is one hash check instead of a per-symbol loop.
fn fingerprint_stack_data(stack: &[Block]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for block in stack {
        for &s in block.data() {
            hasher.update(s.to_le_bytes());
        }
    }
    hasher.finalize().into()
}

proptest! {
    #[test]
    fn invariant1_round_trip_without_corruption(data in proptest::collection::vec(0u32..16, 9)) {
        let (enc, dec) = codec(gf16(), 1, 6);
        let mut block = encode_data(&enc, &data);
        let original = block.as_slice().to_vec();
        prop_assert!(dec.decode(&mut block, &[]).unwrap());
        prop_assert_eq!(block.as_slice(), original.as_slice());
        prop_assert_eq!(block.diagnostics.errors_detected, 0);
        prop_assert_eq!(block.diagnostics.errors_corrected, 0);
    }

    #[test]
    fn invariant2_burst_errors_up_to_half_r(
        data in proptest::collection::vec(0u32..16, 9),
        start in 0usize..15,
        burst in 1usize..=3,
    ) {
        let (enc, dec) = codec(gf16(), 1, 6);
        let mut block = encode_data(&enc, &data);
        let original = block.as_slice().to_vec();
        let n = block.n();
        for offset in 0..burst {
            block[(start + offset) % n] ^= 0x0F;
        }
        let ok = dec.decode(&mut block, &[]).unwrap();
        prop_assert!(ok);
        prop_assert_eq!(block.as_slice(), original.as_slice());
        prop_assert_eq!(block.diagnostics.errors_detected, burst);
        prop_assert_eq!(block.diagnostics.errors_corrected, burst);
    }

    #[test]
    fn invariant3_burst_erasures_up_to_r(
        data in proptest::collection::vec(0u32..16, 9),
        start in 0usize..15,
        burst in 1usize..=6,
    ) {
        let (enc, dec) = codec(gf16(), 1, 6);
        let mut block = encode_data(&enc, &data);
        let original = block.as_slice().to_vec();
        let n = block.n();
        let positions: Vec<usize> = (0..burst).map(|o| (start + o) % n).collect();
        for &p in &positions {
            block[p] = 0;
        }
        let ok = dec.decode(&mut block, &positions).unwrap();
        prop_assert!(ok);
        prop_assert_eq!(block.as_slice(), original.as_slice());
        prop_assert_eq!(block.diagnostics.errors_detected, burst);
        prop_assert_eq!(
            block.diagnostics.errors_detected,
            block.diagnostics.errors_corrected + block.diagnostics.zero_numerators
        );
    }

    #[test]
    fn invariant5_over_capacity_is_err_or_unrecoverable(
        data in proptest::collection::vec(0u32..16, 9),
        extra_errors in 4usize..=7,
    ) {
        // 2E + S > R (R = 6, t = 3): the codec must not panic and must not
        // claim any outcome beyond "rejected" or "silently miscorrected".
        let (enc, dec) = codec(gf16(), 1, 6);
        let mut block = encode_data(&enc, &data);
        for i in 0..extra_errors {
            block[i] ^= 0x0F;
        }
        match dec.decode(&mut block, &[]) {
            Ok(true) => {}
            Ok(false) => prop_assert!(block.diagnostics.unrecoverable),
            Err(_) => prop_assert!(block.diagnostics.unrecoverable),
        }
    }
}

#[test]
fn invariant4_mixed_errors_and_erasures_every_spacing() {
    let (enc, dec) = codec(gf16(), 1, 6);
    let data: Vec<u32> = (0..9).map(|i| (i + 1) as u32 & 0xF).collect();
    let n = enc.n();

    for e_count in 0..=3usize {
        for s_count in 0..=(6 - 2 * e_count) {
            if e_count + s_count == 0 {
                continue;
            }
            for spacing in 0..=10usize {
                let mut cursor = 0usize;
                let positions: Vec<usize> = (0..(e_count + s_count))
                    .map(|_| {
                        let p = cursor % n;
                        cursor += spacing + 1;
                        p
                    })
                    .collect();
                if positions.iter().unique().count() != positions.len() {
                    continue;
                }

                let mut block = encode_data(&enc, &data);
                let original = block.as_slice().to_vec();
                let (error_positions, erasure_positions) = positions.split_at(e_count);
                for &p in error_positions {
                    block[p] ^= 0x0F;
                }
                for &p in erasure_positions {
                    block[p] = 0;
                }

                let ok = dec.decode(&mut block, erasure_positions).unwrap();
                assert!(ok, "E={e_count} S={s_count} spacing={spacing}");
                assert_eq!(block.as_slice(), original.as_slice());
            }
        }
    }
}

#[test]
fn invariant6_derivative_identity_random_polynomials() {
    let field = gf16();
    let mut rng = StdRng::seed_from_u64(0xD00D);
    for _ in 0..200 {
        let p_deg = rng.gen_range(0..6);
        let p = random_poly(&field, &mut rng, p_deg);
        let q_deg = rng.gen_range(0..6);
        let q = random_poly(&field, &mut rng, q_deg);
        let lhs = (&p * &q).derivative();
        let rhs = &(&p.derivative() * &q) + &(&p * &q.derivative());
        assert_eq!(lhs.coeffs(), rhs.coeffs());
    }
}

#[test]
fn invariant8_erasure_channel_recovers_every_subset_up_to_r_missing_rows() {
    let field = Arc::new(Field::new(3, &[1, 1, 0, 1]).unwrap());
    let r = 3;
    let (enc, dec) = codec(field.clone(), 1, r);
    let n = enc.n();

    let mut rng = StdRng::seed_from_u64(0xFEED);
    let mut stack: Vec<Block> = (0..n)
        .map(|_| {
            let data: Vec<u32> = (0..enc.k()).map(|_| rng.gen_range(0..=field.mask())).collect();
            Block::from_data(&data, enc.r())
        })
        .collect();
    let expected = fingerprint_stack_data(&stack);

    encode_stack(&enc, &mut stack).unwrap();
    let encoded = stack.clone();

    for s in 0..=r {
        for missing in (0..n).combinations(s) {
            let mut trial = encoded.clone();
            for &row in &missing {
                trial[row].as_mut_slice().iter_mut().for_each(|v| *v = 0);
            }
            let ok = decode_stack(&dec, &missing, &mut trial).unwrap();
            assert!(ok, "missing={missing:?}");
            assert_eq!(fingerprint_stack_data(&trial), expected, "missing={missing:?}");
        }
    }
}

#[test]
fn invariant9_shortened_equivalent_to_zero_padded_natural_codec() {
    let field = gf16();
    let r = 4;
    let natural_n = field.size() as usize;
    let natural_k = natural_n - r;
    let k = 7;
    let padding = natural_k - k;

    let data: Vec<u32> = (0..k).map(|i| (i as u32 * 5 + 3) & field.mask()).collect();

    let g = build_generator(&field, 1, r).unwrap();
    let natural_enc = Encoder::new(field.clone(), g, natural_n).unwrap();
    let shortened_enc = ShortenedEncoder::new(natural_enc, k).unwrap();
    let mut shortened_block = Block::new(k, r);
    shortened_block.data_mut().copy_from_slice(&data);
    shortened_enc.encode(&mut shortened_block).unwrap();

    let mut padded = vec![0u32; padding];
    padded.extend_from_slice(&data);
    let g2 = build_generator(&field, 1, r).unwrap();
    let natural_enc2 = Encoder::new(field, g2, natural_n).unwrap();
    let mut natural_block = Block::new(natural_k, r);
    natural_block.data_mut().copy_from_slice(&padded);
    natural_enc2.encode(&mut natural_block).unwrap();

    assert_eq!(shortened_block.data(), &natural_block.data()[padding..]);
    assert_eq!(shortened_block.fec(), natural_block.fec());
}

#[test]
fn s1_small_field_round_trip() {
    let field = gf16();
    let (enc, dec) = codec(field, 0, 7);
    assert_eq!(enc.k(), 8);
    let data = vec![3u32; 8];
    let mut block = encode_data(&enc, &data);
    let original = block.as_slice().to_vec();
    block[0] ^= 0x0F;
    block[3] ^= 0x0F;
    block[6] ^= 0x0F;

    let ok = dec.decode(&mut block, &[]).unwrap();
    assert!(ok);
    assert_eq!(block.as_slice(), original.as_slice());
    assert_eq!(block.diagnostics.errors_detected, 3);
    assert_eq!(block.diagnostics.errors_corrected, 3);
}

#[test]
fn s2_full_erasure_burst() {
    let field = gf256();
    let (enc, dec) = codec(field, 120, 32);
    let message = b"A professional is a person who knows more and more about less and less until they know everything about nothing";
    let mut data: Vec<u32> = message.iter().map(|&b| b as u32).collect();
    data.resize(enc.k(), 0);
    let mut block = encode_data(&enc, &data);

    let erasures: Vec<usize> = (0..32).map(|i| i * 2).collect();
    for &p in &erasures {
        block[p] = 0;
    }

    let ok = dec.decode(&mut block, &erasures).unwrap();
    assert!(ok);
    let recovered: Vec<u8> = block.data()[..message.len()].iter().map(|&s| s as u8).collect();
    assert_eq!(recovered, message);
}

#[test]
fn s3_mixed_burst() {
    let field = gf256();
    let (enc, dec) = codec(field, 120, 32);
    let message = b"A professional is a person who knows more and more about less and less until they know everything about nothing";
    let mut data: Vec<u32> = message.iter().map(|&b| b as u32).collect();
    data.resize(enc.k(), 0);
    let mut block = encode_data(&enc, &data);

    for p in 0..11 {
        block[p] ^= 0xFF;
    }
    let erasures: Vec<usize> = (11..=20).collect();
    for &p in &erasures {
        block[p] = 0;
    }

    let ok = dec.decode(&mut block, &erasures).unwrap();
    assert!(ok);
    let recovered: Vec<u8> = block.data()[..message.len()].iter().map(|&s| s as u8).collect();
    assert_eq!(recovered, message);
}

#[test]
fn s4_shortened_code() {
    let field = gf256();
    let r = 10;
    let natural_n = field.size() as usize;
    let g = build_generator(&field, 120, r).unwrap();
    let natural_enc = Encoder::new(field.clone(), g, natural_n).unwrap();
    let natural_dec = Decoder::new(field, natural_n, r, 120).unwrap();
    let k = 62;
    let shortened_enc = ShortenedEncoder::new(natural_enc, k).unwrap();
    let shortened_dec = ShortenedDecoder::new(natural_dec, k).unwrap();

    let message = b"Where did I come from, and what am I supposed to be doing...";
    let mut data: Vec<u32> = message.iter().map(|&b| b as u32).collect();
    data.resize(k, 0);
    let mut block = Block::new(k, r);
    block.data_mut().copy_from_slice(&data);
    shortened_enc.encode(&mut block).unwrap();
    let original = block.as_slice().to_vec();

    for &p in &[0usize, 8, 16, 24, 32] {
        block[p] ^= 0xFF;
    }

    let ok = shortened_dec.decode(&mut block, &[]).unwrap();
    assert!(ok);
    assert_eq!(block.as_slice(), original.as_slice());
}

#[test]
fn s5_erasure_channel() {
    let field = gf256();
    let r = 20;
    let (enc, dec) = codec(field.clone(), 120, r);
    let n = enc.n();

    let mut rng = StdRng::seed_from_u64(0x5_E5A5_E);
    let mut stack: Vec<Block> = (0..n)
        .map(|_| {
            let data: Vec<u32> = (0..enc.k()).map(|_| rng.gen_range(0..=field.mask())).collect();
            Block::from_data(&data, enc.r())
        })
        .collect();
    let expected = fingerprint_stack_data(&stack);

    encode_stack(&enc, &mut stack).unwrap();

    let missing: Vec<usize> = (0..20).map(|i| i * 3).collect();
    for &row in &missing {
        stack[row].as_mut_slice().iter_mut().for_each(|v| *v = 0);
    }

    let ok = decode_stack(&dec, &missing, &mut stack).unwrap();
    assert!(ok);
    assert_eq!(fingerprint_stack_data(&stack), expected);
}

#[test]
fn s6_zero_syndrome_short_circuit() {
    let (enc, dec) = codec(gf16(), 1, 6);
    let data: Vec<u32> = (0..enc.k()).map(|i| (i as u32 * 3 + 1) & 0xF).collect();
    let mut block = encode_data(&enc, &data);
    let original = block.as_slice().to_vec();

    let ok = dec.decode(&mut block, &[]).unwrap();
    assert!(ok);
    assert_eq!(block.diagnostics.errors_detected, 0);
    assert_eq!(block.as_slice(), original.as_slice());
}
