//! Polynomials over a [`Field`], coefficients stored constant-term first.
//!
//! Ground truth for the arithmetic is `schifra_galois_field_polynomial.hpp`:
//! `operator*=` is plain convolution, `operator/=`/`operator%=` share one
//! long-division loop, and `derivative()` keeps only even-indexed terms
//! (the formal derivative over GF(2) kills every odd-degree term's
//! coefficient contribution, since `2*c = 0`).

use std::ops::{Add, Mul, Sub};
use std::sync::Arc;

use crate::field::Field;

/// A polynomial over `field`, coefficients `coeffs[i]` is the coefficient of `x^i`.
///
/// Always kept trimmed: `coeffs` is empty only to represent a fresh/zero
/// polynomial of unspecified degree; otherwise the last entry is nonzero
/// unless the whole polynomial is the zero polynomial `[0]`.
#[derive(Clone)]
pub struct FieldPolynomial {
    field: Arc<Field>,
    coeffs: Vec<u32>,
}

impl FieldPolynomial {
    pub fn zero(field: Arc<Field>) -> Self {
        FieldPolynomial { field, coeffs: vec![0] }
    }

    pub fn from_coeffs(field: Arc<Field>, coeffs: Vec<u32>) -> Self {
        let mut p = FieldPolynomial { field, coeffs };
        p.simplify();
        p
    }

    /// A degree-`deg` polynomial with all-zero coefficients, i.e. allocated
    /// storage for `deg + 1` terms (mirrors the Schifra `(field, degree)` ctor).
    pub fn with_degree(field: Arc<Field>, deg: usize) -> Self {
        FieldPolynomial { field, coeffs: vec![0; deg + 1] }
    }

    pub fn field(&self) -> &Arc<Field> {
        &self.field
    }

    fn simplify(&mut self) {
        while self.coeffs.len() > 1 && *self.coeffs.last().unwrap() == 0 {
            self.coeffs.pop();
        }
        if self.coeffs.is_empty() {
            self.coeffs.push(0);
        }
    }

    /// `-1` for the zero polynomial, matching Schifra's `deg()` convention.
    pub fn deg(&self) -> isize {
        if self.coeffs.len() == 1 && self.coeffs[0] == 0 {
            -1
        } else {
            self.coeffs.len() as isize - 1
        }
    }

    pub fn is_zero(&self) -> bool {
        self.deg() < 0
    }

    pub fn coeffs(&self) -> &[u32] {
        &self.coeffs
    }

    pub fn coeff(&self, i: usize) -> u32 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    pub fn set_coeff(&mut self, i: usize, v: u32) {
        if i >= self.coeffs.len() {
            self.coeffs.resize(i + 1, 0);
        }
        self.coeffs[i] = v;
        self.simplify();
    }

    /// Horner evaluation at a field element.
    pub fn eval(&self, x: u32) -> u32 {
        let mut acc = 0u32;
        for &c in self.coeffs.iter().rev() {
            acc = self.field.add(self.field.mul(acc, x), c);
        }
        acc
    }

    /// Formal derivative over GF(2): only even-indexed coefficients survive,
    /// shifted down by one degree.
    pub fn derivative(&self) -> FieldPolynomial {
        let mut out = Vec::new();
        let mut i = 0;
        while i + 1 < self.coeffs.len() {
            out.push(self.coeffs[i + 1]);
            i += 2;
        }
        if out.is_empty() {
            out.push(0);
        }
        FieldPolynomial::from_coeffs(self.field.clone(), out)
    }

    /// `self * x^n`.
    pub fn shl(&self, n: usize) -> FieldPolynomial {
        let mut out = vec![0u32; n];
        out.extend_from_slice(&self.coeffs);
        FieldPolynomial::from_coeffs(self.field.clone(), out)
    }

    /// `self / x^n`, truncating.
    pub fn shr(&self, n: usize) -> FieldPolynomial {
        if n >= self.coeffs.len() {
            FieldPolynomial::zero(self.field.clone())
        } else {
            FieldPolynomial::from_coeffs(self.field.clone(), self.coeffs[n..].to_vec())
        }
    }

    /// `self mod x^power`: truncates to the low `power` coefficients.
    pub fn truncate(&self, power: usize) -> FieldPolynomial {
        let mut c = self.coeffs.clone();
        c.truncate(power);
        if c.is_empty() {
            c.push(0);
        }
        FieldPolynomial::from_coeffs(self.field.clone(), c)
    }

    /// Long division, returning `(quotient, remainder)`. Mirrors the shared
    /// loop behind `operator/=`/`operator%=` in Schifra's polynomial class.
    pub fn div_rem(&self, divisor: &FieldPolynomial) -> (FieldPolynomial, FieldPolynomial) {
        assert!(!divisor.is_zero(), "division by zero polynomial");
        let f = &self.field;
        let mut rem = self.coeffs.clone();
        let div_deg = divisor.deg() as usize;
        let div_lead = divisor.coeff(div_deg);
        let div_lead_inv = f.inverse(div_lead);

        if (rem.len() as isize - 1) < divisor.deg() {
            return (FieldPolynomial::zero(f.clone()), self.clone());
        }

        let mut quot = vec![0u32; rem.len() - div_deg];

        for i in (0..quot.len()).rev() {
            let rem_deg = i + div_deg;
            let lead = rem[rem_deg];
            if lead == 0 {
                continue;
            }
            let q = f.mul(lead, div_lead_inv);
            quot[i] = q;
            for j in 0..=div_deg {
                rem[i + j] = f.sub(rem[i + j], f.mul(q, divisor.coeff(j)));
            }
        }

        (
            FieldPolynomial::from_coeffs(f.clone(), quot),
            FieldPolynomial::from_coeffs(f.clone(), rem),
        )
    }

    pub fn rem(&self, divisor: &FieldPolynomial) -> FieldPolynomial {
        self.div_rem(divisor).1
    }

    /// `self mod x^power`, via [`FieldPolynomial::truncate`]; named to mirror
    /// the `operator%=(unsigned int)` overload in Schifra.
    pub fn rem_power(&self, power: usize) -> FieldPolynomial {
        self.truncate(power)
    }

    /// Euclidean GCD, used for malfunction analysis / shared-factor checks.
    pub fn gcd(a: &FieldPolynomial, b: &FieldPolynomial) -> FieldPolynomial {
        let mut a = a.clone();
        let mut b = b.clone();
        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }
        a
    }
}

impl Add for &FieldPolynomial {
    type Output = FieldPolynomial;
    fn add(self, rhs: &FieldPolynomial) -> FieldPolynomial {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        let mut out = vec![0u32; n];
        for i in 0..n {
            out[i] = self.field.add(self.coeff(i), rhs.coeff(i));
        }
        FieldPolynomial::from_coeffs(self.field.clone(), out)
    }
}

impl Sub for &FieldPolynomial {
    type Output = FieldPolynomial;
    fn sub(self, rhs: &FieldPolynomial) -> FieldPolynomial {
        // XOR field: addition and subtraction coincide.
        self.add(rhs)
    }
}

impl Mul for &FieldPolynomial {
    type Output = FieldPolynomial;
    fn mul(self, rhs: &FieldPolynomial) -> FieldPolynomial {
        if self.is_zero() || rhs.is_zero() {
            return FieldPolynomial::zero(self.field.clone());
        }
        let mut out = vec![0u32; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                out[i + j] = self.field.add(out[i + j], self.field.mul(a, b));
            }
        }
        FieldPolynomial::from_coeffs(self.field.clone(), out)
    }
}

impl Mul<u32> for &FieldPolynomial {
    type Output = FieldPolynomial;
    fn mul(self, scalar: u32) -> FieldPolynomial {
        let out: Vec<u32> = self.coeffs.iter().map(|&c| self.field.mul(c, scalar)).collect();
        FieldPolynomial::from_coeffs(self.field.clone(), out)
    }
}

impl std::fmt::Debug for FieldPolynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldPolynomial{:?}", self.coeffs)
    }
}
