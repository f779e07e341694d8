//! Systematic Reed-Solomon encoder.
//!
//! Grounded in `schifra_reed_solomon_encoder.hpp::encoder::encode`: build
//! the message polynomial from `Block::data()`, reduce by the generator,
//! and write the remainder back as parity, reversed.

use std::sync::Arc;

use crate::block::Block;
use crate::error::{ErrorKind, RsError};
use crate::field::Field;
use crate::polynomial::FieldPolynomial;

/// Immutable, `Arc`-shareable systematic encoder for a fixed `(field, generator)` code.
pub struct Encoder {
    field: Arc<Field>,
    generator: FieldPolynomial,
    n: usize,
    r: usize,
}

impl Encoder {
    /// `n` must equal the field's size (`2^m - 1`); `generator.deg() == r - 1`.
    pub fn new(field: Arc<Field>, generator: FieldPolynomial, n: usize) -> Result<Self, RsError> {
        if field.size() as usize != n {
            return Err(RsError::EncoderMisconfigured { field_size: field.size(), n });
        }
        let r = generator.deg() as usize + 1;
        Ok(Encoder { field, generator, n, r })
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

    pub fn field(&self) -> &Arc<Field> {
        &self.field
    }

    /// Encodes `block` in place, writing its parity symbols.
    pub fn encode(&self, block: &mut Block) -> Result<(), RsError> {
        if block.n() != self.n {
            block.diagnostics.unrecoverable = true;
            block.diagnostics.error = ErrorKind::EncoderMisconfigured;
            return Err(RsError::EncoderMisconfigured { field_size: self.field.size(), n: block.n() });
        }

        let message = self.msg_poly(block);
        let parities = message.rem(&self.generator);
        let mask = self.field.mask();

        if parities.deg() != self.r as isize - 1 {
            block.diagnostics.unrecoverable = true;
            block.diagnostics.error = ErrorKind::EncoderBadGenerator;
            return Err(RsError::EncoderBadGenerator {
                expected: self.r - 1,
                got: parities.deg(),
            });
        }

        for i in 0..self.r {
            block.fec_mut()[i] = parities.coeff(self.r - 1 - i) & mask;
        }

        Ok(())
    }

    /// Message polynomial with `Block::data()[i]` placed at `x^(n-1-i)`, i.e.
    /// the data occupies the high-degree terms above the parity region.
    fn msg_poly(&self, block: &Block) -> FieldPolynomial {
        let mut coeffs = vec![0u32; self.n];
        let data = block.data();
        for (offset, &d) in data.iter().enumerate() {
            let i = self.n - 1 - offset;
            coeffs[i] = d;
        }
        FieldPolynomial::from_coeffs(self.field.clone(), coeffs)
    }
}
