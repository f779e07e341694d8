//! 2D interleaved erasure-channel stack codec.
//!
//! A stack of `n` codewords is transposed so that whole missing rows (e.g.
//! lost packets) become per-column erasures that line up identically across
//! every transposed row. Grounded in `schifra_erasure_channel.hpp`:
//! `erasure_channel_stack_encode`/`_decode` plus the `erasure_code_decoder`
//! fast path used when exactly `r` rows are missing.

use crate::block::Block;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::RsError;
use crate::interleaver::interleave;
use crate::polynomial::FieldPolynomial;

/// Encodes every row of `stack` and transposes the result.
pub fn encode_stack(encoder: &Encoder, stack: &mut [Block]) -> Result<(), RsError> {
    for block in stack.iter_mut() {
        encoder.encode(block)?;
    }
    interleave(stack);
    Ok(())
}

/// Decodes an interleaved stack given the set of rows known to be missing
/// (zeroed) before transposition. Dispatches to the `r`-erasure fast path
/// when `missing_rows.len() == decoder.r()`, else to `r` independent general
/// decodes, one per transposed row.
pub fn decode_stack(decoder: &Decoder, missing_rows: &[usize], stack: &mut [Block]) -> Result<bool, RsError> {
    if missing_rows.is_empty() {
        interleave(stack);
        return Ok(true);
    }

    if missing_rows.len() == decoder.r() {
        interleave(stack);
        return decode_stack_fast(decoder, missing_rows, stack);
    }

    interleave(stack);
    for row in stack.iter_mut() {
        decoder.decode(row, missing_rows)?;
    }
    Ok(true)
}

/// Fast path: every transposed row is missing exactly the same `r` columns
/// and otherwise error-free, so a single shared Gamma/root search serves
/// every row and the modified Berlekamp-Massey step is skipped entirely.
fn decode_stack_fast(decoder: &Decoder, missing_rows: &[usize], stack: &mut [Block]) -> Result<bool, RsError> {
    let data_len = decoder.k();

    let mut syndromes = Vec::with_capacity(stack.len());
    for row in stack.iter() {
        let received = decoder.load_message(row);
        syndromes.push(decoder.compute_syndrome(&received));
    }

    let erasure_locations = decoder.prepare_erasure_list(missing_rows);
    let gamma = decoder.compute_gamma(&erasure_locations);
    let gamma_roots = decoder.find_roots(&gamma, data_len);

    let r = decoder.r();
    let omegas: Vec<FieldPolynomial> = syndromes.iter().map(|s| (&gamma * s).rem_power(r)).collect();
    let gamma_derivative = gamma.derivative();

    let field = decoder.field();
    let root_exponent_table = decoder.root_exponent_table();

    for &location in &gamma_roots {
        let alpha_inverse = field.alpha(location as u32);
        let denominator = gamma_derivative.eval(alpha_inverse);
        if denominator == 0 {
            log::warn!("erasure-channel fast path: zero Gamma-derivative at location {location}");
            return Ok(false);
        }
        for (row, omega) in stack.iter_mut().zip(omegas.iter()) {
            let numerator = field.mul(omega.eval(alpha_inverse), root_exponent_table[location]);
            if numerator != 0 {
                row[location - 1] ^= field.div(numerator, denominator);
            }
        }
    }

    Ok(true)
}
