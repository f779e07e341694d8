//! Generator polynomial construction: `g(x) = prod_{j=0}^{r-1} (x + alpha^(i0+j))`.

use std::sync::Arc;

use crate::error::RsError;
use crate::field::Field;
use crate::polynomial::FieldPolynomial;

/// Builds the degree-`r` generator polynomial with consecutive roots
/// `alpha^i0, ..., alpha^(i0 + r - 1)`.
pub fn build_generator(field: &Arc<Field>, i0: u32, r: usize) -> Result<FieldPolynomial, RsError> {
    if i0 as usize + r > field.size() as usize {
        return Err(RsError::InvalidGenerator {
            i0,
            i0_plus_r: i0 + r as u32,
            size: field.size(),
        });
    }

    let mut g = FieldPolynomial::from_coeffs(field.clone(), vec![1]);
    for j in 0..r {
        let root = field.alpha(i0 + j as u32);
        let factor = FieldPolynomial::from_coeffs(field.clone(), vec![root, 1]);
        g = &g * &factor;
    }
    Ok(g)
}
