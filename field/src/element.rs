use std::fmt;
use std::rc::Rc;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{FieldError, Result};
use crate::inversion;

/// A nonnegative integer strictly less than a prime modulus `p`, with all
/// arithmetic performed modulo `p`.
///
/// `p` is shared (via [`Rc`]) across every element minted from the same
/// [`crate::Field`], so cloning an element is cheap and two elements can be
/// compared for modulus compatibility by pointer equality before falling
/// back to a value comparison.
#[derive(Clone, Debug)]
pub struct FieldElement {
    value: BigUint,
    modulus: Rc<BigUint>,
}

impl FieldElement {
    pub(crate) fn new(value: BigUint, modulus: Rc<BigUint>) -> Self {
        let value = value % &*modulus;
        FieldElement { value, modulus }
    }

    pub fn modulus(&self) -> &Rc<BigUint> {
        &self.modulus
    }

    /// The canonical residue in `[0, p)`.
    pub fn to_biguint(&self) -> BigUint {
        self.value.clone()
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn check_same_field(&self, other: &FieldElement) {
        assert!(
            Rc::ptr_eq(&self.modulus, &other.modulus) || self.modulus == other.modulus,
            "field elements from different moduli ({} vs {})",
            self.modulus,
            other.modulus
        );
    }

    fn with_value(&self, value: BigUint) -> FieldElement {
        FieldElement {
            value: value % &*self.modulus,
            modulus: Rc::clone(&self.modulus),
        }
    }

    pub fn add(&self, other: &FieldElement) -> FieldElement {
        self.check_same_field(other);
        self.with_value(&self.value + &other.value)
    }

    pub fn sub(&self, other: &FieldElement) -> FieldElement {
        self.check_same_field(other);
        self.add(&other.neg())
    }

    pub fn neg(&self) -> FieldElement {
        if self.value.is_zero() {
            self.clone()
        } else {
            self.with_value(&*self.modulus - &self.value)
        }
    }

    pub fn mul(&self, other: &FieldElement) -> FieldElement {
        self.check_same_field(other);
        self.with_value(&self.value * &other.value)
    }

    pub fn pow(&self, exponent: &BigUint) -> FieldElement {
        self.with_value(self.value.modpow(exponent, &self.modulus))
    }

    /// Multiplicative inverse. Fails with [`FieldError`] when `self` is zero.
    pub fn invert(&self) -> Result<FieldElement> {
        let inv = inversion::inverse(&self.value, &self.modulus)
            .ok_or_else(|| FieldError::invalid("cannot invert zero"))?;
        Ok(self.with_value(inv))
    }

    /// Division, failing with [`FieldError`] when `other` is zero.
    pub fn div(&self, other: &FieldElement) -> Result<FieldElement> {
        self.check_same_field(other);
        Ok(self.mul(&other.invert()?))
    }

    pub fn one_like(&self) -> FieldElement {
        self.with_value(BigUint::one())
    }

    pub fn zero_like(&self) -> FieldElement {
        self.with_value(BigUint::zero())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.check_same_field(other);
        self.value == other.value
    }
}
impl Eq for FieldElement {}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modulus13() -> Rc<BigUint> {
        Rc::new(BigUint::from(13u32))
    }

    fn elem(v: u32) -> FieldElement {
        FieldElement::new(BigUint::from(v), modulus13())
    }

    #[test]
    fn wraps_on_construction() {
        assert_eq!(elem(14), elem(1));
    }

    #[test]
    fn add_sub_are_inverse() {
        let a = elem(9);
        let b = elem(11);
        assert_eq!(a.add(&b).sub(&b), a);
    }

    #[test]
    fn neg_of_zero_is_zero() {
        assert!(elem(0).neg().is_zero());
    }

    #[test]
    fn mul_by_inverse_is_one() {
        let a = elem(7);
        let inv = a.invert().unwrap();
        assert_eq!(a.mul(&inv), a.one_like());
    }

    #[test]
    fn invert_zero_fails() {
        assert!(elem(0).invert().is_err());
    }

    #[test]
    fn div_by_zero_fails() {
        assert!(elem(5).div(&elem(0)).is_err());
    }

    #[test]
    #[should_panic(expected = "different moduli")]
    fn cross_field_ops_panic() {
        let other_modulus = Rc::new(BigUint::from(11u32));
        let a = elem(3);
        let b = FieldElement::new(BigUint::from(3u32), other_modulus);
        let _ = a.add(&b);
    }
}
