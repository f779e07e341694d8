//! A single field symbol paired with the `Field` it belongs to, with
//! algebraic operators delegating to that field's arithmetic.

use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use crate::field::Field;

/// A scalar value in some `GF(2^m)`, carrying a handle to its field so that
/// `+`/`-`/`*`/`/` can be written directly instead of through `Field`
/// methods.
///
/// Operators between elements of different fields return the additive
/// identity (zero) rather than panicking: a field mismatch is a caller bug,
/// but it is one with an unambiguous, non-corrupting resolution.
#[derive(Clone)]
pub struct FieldElement {
    field: Arc<Field>,
    value: u32,
}

impl FieldElement {
    pub fn new(field: Arc<Field>, value: u32) -> Self {
        let mask = field.mask();
        FieldElement {
            field,
            value: value & mask,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn field(&self) -> &Arc<Field> {
        &self.field
    }

    /// Discrete log of this element's value; `GFERROR` if it is zero.
    pub fn index(&self) -> i32 {
        self.field.index(self.value)
    }

    pub fn inverse(&self) -> FieldElement {
        FieldElement::new(self.field.clone(), self.field.inverse(self.value))
    }

    pub fn pow(&self, n: i64) -> FieldElement {
        FieldElement::new(self.field.clone(), self.field.exp(self.value, n))
    }

    fn same_field(&self, other: &FieldElement) -> bool {
        Arc::ptr_eq(&self.field, &other.field) || self.field == other.field
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.same_field(other) && self.value == other.value
    }
}
impl Eq for FieldElement {}

impl std::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = (self.field.m() as usize + 3) / 4;
        write!(f, "{:0width$x}", self.value, width = width)
    }
}

impl std::fmt::Display for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl Add for &FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &FieldElement) -> FieldElement {
        if !self.same_field(rhs) {
            return FieldElement::new(self.field.clone(), 0);
        }
        FieldElement::new(self.field.clone(), self.field.add(self.value, rhs.value))
    }
}

impl Sub for &FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &FieldElement) -> FieldElement {
        self + &(-rhs.clone())
    }
}

impl Mul for &FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &FieldElement) -> FieldElement {
        if !self.same_field(rhs) {
            return FieldElement::new(self.field.clone(), 0);
        }
        FieldElement::new(self.field.clone(), self.field.mul(self.value, rhs.value))
    }
}

impl Div for &FieldElement {
    type Output = FieldElement;
    fn div(self, rhs: &FieldElement) -> FieldElement {
        if !self.same_field(rhs) {
            return FieldElement::new(self.field.clone(), 0);
        }
        FieldElement::new(self.field.clone(), self.field.div(self.value, rhs.value))
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        // Characteristic 2: every element is its own additive inverse.
        self
    }
}
