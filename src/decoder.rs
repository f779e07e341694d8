//! Syndrome-based decoder: modified Berlekamp-Massey, Chien search, Forney.
//!
//! Step numbering in comments follows `schifra_reed_solomon_decoder.hpp::decoder::decode`.
//! The erasure-channel fast path in [`crate::erasure_channel`] reuses the
//! `pub(crate)` steps below rather than re-deriving them.

use std::sync::Arc;

use crate::block::Block;
use crate::error::{ErrorKind, RsError};
use crate::field::Field;
use crate::polynomial::FieldPolynomial;

/// Immutable, `Arc`-shareable decoder for a fixed `(field, generator root range)` code.
pub struct Decoder {
    field: Arc<Field>,
    n: usize,
    r: usize,
    i0: u32,
    /// `root_exponent_table[i] = alpha(n - i) ^ (1 - i0)`, indexed by Chien/Forney location `i`.
    root_exponent_table: Vec<u32>,
    /// `syndrome_exponent_table[i] = alpha(i0 + i)`, for `i` in `[0, r)`.
    syndrome_exponent_table: Vec<u32>,
    /// `gamma_table[i] = 1 + alpha(i) * x`, one erasure factor per field element.
    gamma_table: Vec<FieldPolynomial>,
}

impl Decoder {
    pub fn new(field: Arc<Field>, n: usize, r: usize, i0: u32) -> Result<Self, RsError> {
        if field.size() as usize != n || r == 0 || r > n {
            return Err(RsError::InvalidGeometry { n, r });
        }

        let size = field.size() as i64;
        let mut root_exponent_table = Vec::with_capacity(n + 1);
        for i in 0..=n as i64 {
            let base = field.alpha(normalize_u32(n as i64 - i, size));
            root_exponent_table.push(field.exp(base, 1 - i0 as i64));
        }

        let mut syndrome_exponent_table = Vec::with_capacity(r);
        for i in 0..r {
            syndrome_exponent_table.push(field.alpha(i0 + i as u32));
        }

        let mut gamma_table = Vec::with_capacity(n + 1);
        for i in 0..=n as u32 {
            gamma_table.push(FieldPolynomial::from_coeffs(field.clone(), vec![1, field.alpha(i)]));
        }

        Ok(Decoder {
            field,
            n,
            r,
            i0,
            root_exponent_table,
            syndrome_exponent_table,
            gamma_table,
        })
    }

    pub fn field(&self) -> &Arc<Field> {
        &self.field
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn k(&self) -> usize {
        self.n - self.r
    }

    /// Decodes `block` in place. `erasures` are 0-indexed positions within
    /// the codeword (data followed by parity) known to be wrong.
    pub fn decode(&self, block: &mut Block, erasures: &[usize]) -> Result<bool, RsError> {
        if block.n() != self.n || erasures.len() > self.r {
            block.diagnostics.unrecoverable = true;
            block.diagnostics.error = ErrorKind::DecoderMisconfigured;
            return Err(RsError::DecoderMisconfigured {
                field_size: self.field.size(),
                n: block.n(),
                erasures: erasures.len(),
                r: self.r,
            });
        }
        for (idx, &pos) in erasures.iter().enumerate() {
            if pos >= self.n {
                return Err(RsError::ErasureOutOfRange { position: pos, n: self.n });
            }
            if erasures[..idx].contains(&pos) {
                return Err(RsError::DuplicateErasure { position: pos });
            }
        }

        let received = self.load_message(block);
        let syndrome = self.compute_syndrome(&received);

        if syndrome.coeffs().iter().all(|&c| c == 0) {
            block.diagnostics = Default::default();
            log::debug!("decode: zero syndrome, no correction needed");
            return Ok(true);
        }

        let mut lambda = FieldPolynomial::from_coeffs(self.field.clone(), vec![1]);

        if !erasures.is_empty() {
            let erasure_locations = self.prepare_erasure_list(erasures);
            lambda = self.compute_gamma(&erasure_locations);
        }

        if erasures.len() < self.r {
            lambda = self.modified_berlekamp_massey(lambda, &syndrome, erasures.len());
        }

        let error_locations = self.find_roots(&lambda, self.n);

        if error_locations.is_empty() {
            block.diagnostics.errors_detected = 0;
            block.diagnostics.errors_corrected = 0;
            block.diagnostics.zero_numerators = 0;
            block.diagnostics.unrecoverable = true;
            block.diagnostics.error = ErrorKind::DecoderSyndromeUnlocatable;
            log::warn!("decode: non-zero syndrome but no roots found, too many errors");
            return Err(RsError::DecoderSyndromeUnlocatable);
        }

        let two_e_plus_s = 2 * error_locations.len() as i64 - erasures.len() as i64;
        if two_e_plus_s > self.r as i64 {
            block.diagnostics.errors_detected = error_locations.len();
            block.diagnostics.errors_corrected = 0;
            block.diagnostics.zero_numerators = 0;
            block.diagnostics.unrecoverable = true;
            block.diagnostics.error = ErrorKind::DecoderTooManyErrors;
            return Err(RsError::DecoderTooManyErrors {
                two_e_plus_s: two_e_plus_s.max(0) as usize,
                r: self.r,
            });
        }
        block.diagnostics.errors_detected = error_locations.len();

        self.forney(&error_locations, &lambda, &syndrome, block)
    }

    /// Step 2: load the codeword into a polynomial in reverse symbol order.
    pub(crate) fn load_message(&self, block: &Block) -> FieldPolynomial {
        let n = self.n;
        let mut coeffs = vec![0u32; n];
        for i in 0..n {
            coeffs[n - 1 - i] = block[i];
        }
        FieldPolynomial::from_coeffs(self.field.clone(), coeffs)
    }

    /// Step 3: evaluate `received` at each syndrome root.
    pub(crate) fn compute_syndrome(&self, received: &FieldPolynomial) -> FieldPolynomial {
        let coeffs: Vec<u32> = self
            .syndrome_exponent_table
            .iter()
            .map(|&root| received.eval(root))
            .collect();
        FieldPolynomial::from_coeffs(self.field.clone(), coeffs)
    }

    /// Converts codeword-space erasure positions into the reversed index
    /// space the gamma table is keyed on.
    pub(crate) fn prepare_erasure_list(&self, erasures: &[usize]) -> Vec<usize> {
        erasures.iter().map(|&p| self.n - 1 - p).collect()
    }

    /// Step 4: `Gamma(x) = prod (1 + alpha(loc) * x)` over the erasure set.
    pub(crate) fn compute_gamma(&self, erasure_locations: &[usize]) -> FieldPolynomial {
        let mut gamma = FieldPolynomial::from_coeffs(self.field.clone(), vec![1]);
        for &loc in erasure_locations {
            gamma = &gamma * &self.gamma_table[loc];
        }
        gamma
    }

    /// Step 6: modified Berlekamp-Massey, seeded with `erasure_count` to
    /// account for the erasure locator already folded into `lambda`.
    pub(crate) fn modified_berlekamp_massey(
        &self,
        mut lambda: FieldPolynomial,
        syndrome: &FieldPolynomial,
        erasure_count: usize,
    ) -> FieldPolynomial {
        let field = &self.field;
        let mut i: i64 = -1;
        let mut l: i64 = erasure_count as i64;
        let mut previous_lambda = lambda.shl(1);

        for round in erasure_count..self.r {
            let round_i64 = round as i64;
            let upper_bound = l.min(lambda.deg() as i64);

            let mut discrepancy = 0u32;
            if upper_bound >= 0 {
                for k in 0..=upper_bound as usize {
                    let syn_idx = round_i64 - k as i64;
                    if syn_idx < 0 {
                        continue;
                    }
                    discrepancy = field.add(discrepancy, field.mul(lambda.coeff(k), syndrome.coeff(syn_idx as usize)));
                }
            }

            if discrepancy != 0 {
                let tau = &lambda - &(&previous_lambda * discrepancy);

                if l < (round_i64 - i) {
                    let tmp = round_i64 - i;
                    i = round_i64 - l;
                    l = tmp;
                    previous_lambda = scalar_div(&lambda, discrepancy, field);
                }

                lambda = tau;
            }

            previous_lambda = previous_lambda.shl(1);
        }

        lambda
    }

    /// Step 7: Chien search, restricted to locations `1..=limit`.
    pub(crate) fn find_roots(&self, poly: &FieldPolynomial, limit: usize) -> Vec<usize> {
        let mut roots = Vec::new();
        let degree = poly.deg();
        if degree <= 0 {
            return roots;
        }
        for i in 1..=limit {
            if poly.eval(self.field.alpha(i as u32)) == 0 {
                roots.push(i);
                if roots.len() as isize == degree {
                    break;
                }
            }
        }
        roots
    }

    pub(crate) fn gamma_table(&self) -> &[FieldPolynomial] {
        &self.gamma_table
    }

    pub(crate) fn root_exponent_table(&self) -> &[u32] {
        &self.root_exponent_table
    }

    /// Step 8/9: Forney's algorithm, applying corrections to `block` in place.
    fn forney(
        &self,
        error_locations: &[usize],
        lambda: &FieldPolynomial,
        syndrome: &FieldPolynomial,
        block: &mut Block,
    ) -> Result<bool, RsError> {
        let field = &self.field;
        let omega = (lambda * syndrome).rem_power(self.r);
        let lambda_derivative = lambda.derivative();

        block.diagnostics.errors_corrected = 0;
        block.diagnostics.zero_numerators = 0;

        for &location in error_locations {
            let alpha_inverse = field.alpha(location as u32);
            let numerator = field.mul(omega.eval(alpha_inverse), self.root_exponent_table[location]);
            let denominator = lambda_derivative.eval(alpha_inverse);

            if numerator != 0 {
                if denominator != 0 {
                    block[location - 1] ^= field.div(numerator, denominator);
                    block.diagnostics.errors_corrected += 1;
                } else {
                    block.diagnostics.unrecoverable = true;
                    block.diagnostics.error = ErrorKind::DecoderBadSymbol;
                    return Err(RsError::DecoderBadSymbol { location });
                }
            } else {
                block.diagnostics.zero_numerators += 1;
            }
        }

        if lambda.deg() == block.diagnostics.errors_detected as isize {
            block.diagnostics.unrecoverable = false;
            Ok(true)
        } else {
            block.diagnostics.unrecoverable = true;
            block.diagnostics.error = ErrorKind::DecoderBadCodeword;
            Err(RsError::DecoderBadCodeword {
                lambda_deg: lambda.deg(),
                errors_detected: block.diagnostics.errors_detected,
            })
        }
    }
}

fn scalar_div(p: &FieldPolynomial, scalar: u32, field: &Arc<Field>) -> FieldPolynomial {
    let coeffs: Vec<u32> = p.coeffs().iter().map(|&c| field.div(c, scalar)).collect();
    FieldPolynomial::from_coeffs(field.clone(), coeffs)
}

fn normalize_u32(x: i64, size: i64) -> u32 {
    let mut x = x % size;
    if x < 0 {
        x += size;
    }
    x as u32
}
