//! The wire abstraction (component C2): a field element annotated with a
//! `const` flag, whose arithmetic emits multiplicative-constraint counts
//! into a pair of process-wide counters as a side effect.
//!
//! Integers mix freely with wires in the gate formulas of this crate the
//! way they do in the voting-protocol source this library follows; rather
//! than a blanket generic operator overload (an integer alone does not
//! carry the modulus a [`Wire`] needs), each arithmetic operator has an
//! explicit `_const` sibling that builds the integer operand against the
//! wire's own modulus before combining it.

use std::ops::{Add, Mul, Neg, Sub};
use std::sync::atomic::{AtomicUsize, Ordering};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{CircuitError, Result};
use crate::field::FieldElement;

static N_MUL: AtomicUsize = AtomicUsize::new(0);
static N_WIRES: AtomicUsize = AtomicUsize::new(0);

/// Resets both process-wide counters. Callers do this once at the start of
/// each circuit construction; the library itself never resets them.
pub fn reset_counters() {
    N_MUL.store(0, Ordering::SeqCst);
    N_WIRES.store(0, Ordering::SeqCst);
}

/// Non-const x non-const multiplications plus non-const inversions observed
/// since the last [`reset_counters`].
pub fn n_mul() -> usize {
    N_MUL.load(Ordering::SeqCst)
}

/// Wires witnessed by the same events counted in [`n_mul`].
pub fn n_wires() -> usize {
    N_WIRES.load(Ordering::SeqCst)
}

fn charge_constraint() {
    N_MUL.fetch_add(1, Ordering::SeqCst);
    N_WIRES.fetch_add(1, Ordering::SeqCst);
}

/// A field element plus the flag that says whether its value depends only
/// on constants (as opposed to circuit inputs). The flag is conservative:
/// any operation touching a non-const operand yields a non-const result.
#[derive(Clone, Debug)]
pub struct Wire {
    value: FieldElement,
    is_const: bool,
}

impl Wire {
    pub fn new(value: FieldElement, is_const: bool) -> Self {
        Wire { value, is_const }
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn value(&self) -> &FieldElement {
        &self.value
    }

    pub fn to_biguint(&self) -> BigUint {
        self.value.to_biguint()
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn with_const_value(&self, k: i64) -> Wire {
        let v = if k < 0 {
            self.value.zero_like().sub(&self.const_from_u64((-k) as u64))
        } else {
            self.const_from_u64(k as u64)
        };
        Wire::new(v, true)
    }

    fn const_from_u64(&self, k: u64) -> FieldElement {
        let one = self.value.one_like();
        let mut acc = self.value.zero_like();
        // Builds k * 1 by repeated doubling-free addition; k is always a
        // small circuit-literal constant in practice, never witness-sized.
        for _ in 0..k {
            acc = acc.add(&one);
        }
        acc
    }

    pub fn neg(&self) -> Wire {
        Wire::new(self.value.neg(), self.is_const)
    }

    pub fn add(&self, other: &Wire) -> Wire {
        Wire::new(self.value.add(&other.value), self.is_const && other.is_const)
    }

    pub fn sub(&self, other: &Wire) -> Wire {
        Wire::new(self.value.sub(&other.value), self.is_const && other.is_const)
    }

    pub fn add_const(&self, k: i64) -> Wire {
        self.add(&self.with_const_value(k))
    }

    pub fn sub_const(&self, k: i64) -> Wire {
        self.sub(&self.with_const_value(k))
    }

    /// `a * b`. Charges one constraint iff both operands are non-const.
    pub fn mul(&self, other: &Wire) -> Wire {
        let value = self.value.mul(&other.value);
        if !self.is_const && !other.is_const {
            charge_constraint();
            Wire::new(value, false)
        } else {
            Wire::new(value, self.is_const && other.is_const)
        }
    }

    /// `a * b`, charging exactly one constraint and forcing the result
    /// non-const regardless of the operands' own const-ness. Used by the
    /// R1CS single-output inner-product gate, which always materializes a
    /// witnessed product even when both sides happen to be constant.
    pub fn mul_forced_constraint(&self, other: &Wire) -> Wire {
        charge_constraint();
        Wire::new(self.value.mul(&other.value), false)
    }

    pub fn mul_const(&self, k: i64) -> Wire {
        // Multiplying by a circuit-literal integer never touches the
        // counters: one side is always const.
        self.mul(&self.with_const_value(k))
    }

    /// `self * (1/4)`, used by the Montgomery-curve doubling formula's
    /// `a24` coefficient. `4` is a circuit literal, so the division never
    /// touches the counters; only the later multiplication by `a24` does.
    pub fn mul_const_inv4(&self) -> Wire {
        let four = self.value.one_like().add(&self.value.one_like());
        let four = four.add(&four);
        let inv4 = four.invert().expect("4 is invertible mod an odd prime modulus");
        Wire::new(self.value.mul(&inv4), self.is_const)
    }

    /// Multiplicative inverse. Charges one constraint iff `self` is
    /// non-const. Fails with [`CircuitError`] when `self` is zero.
    pub fn invert(&self) -> Result<Wire> {
        let value = self.value.invert()?;
        if !self.is_const {
            charge_constraint();
        }
        Ok(Wire::new(value, self.is_const))
    }

    /// `a / b`, treated as `a * b^-1`. Fails with [`CircuitError`] when `b`
    /// is zero.
    pub fn div(&self, other: &Wire) -> Result<Wire> {
        Ok(self.mul(&other.invert()?))
    }

    pub fn pow(&self, exponent: u64) -> Wire {
        let mut base = self.clone();
        let mut exp = exponent;
        let mut acc = Wire::new(self.value.one_like(), true);
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.mul(&base);
            }
            base = base.mul(&base);
            exp >>= 1;
        }
        acc
    }

    pub fn assert_equal(&self, other: &Wire) -> Result<()> {
        if self.value == other.value {
            Ok(())
        } else {
            Err(CircuitError::invalid(format!(
                "assert_equal failed: {} != {}",
                self.value, other.value
            )))
        }
    }
}

impl PartialEq for Wire {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Add<&Wire> for &Wire {
    type Output = Wire;
    fn add(self, rhs: &Wire) -> Wire {
        Wire::add(self, rhs)
    }
}

impl Sub<&Wire> for &Wire {
    type Output = Wire;
    fn sub(self, rhs: &Wire) -> Wire {
        Wire::sub(self, rhs)
    }
}

impl Mul<&Wire> for &Wire {
    type Output = Wire;
    fn mul(self, rhs: &Wire) -> Wire {
        Wire::mul(self, rhs)
    }
}

impl Neg for &Wire {
    type Output = Wire;
    fn neg(self) -> Wire {
        Wire::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::WireFactory;

    #[test]
    fn repeated_addition_never_charges() {
        let f = WireFactory::new(BigUint::from(251u32));
        reset_counters();
        let w = f.variable(7);
        let mut acc = f.constant(0);
        for _ in 0..5 {
            acc = acc.add(&w);
        }
        assert_eq!(acc.to_biguint(), BigUint::from(35u32));
        assert_eq!(n_mul(), 0);
    }

    #[test]
    fn non_const_mul_charges_one() {
        let f = WireFactory::new(BigUint::from(251u32));
        reset_counters();
        let a = f.variable(3);
        let b = f.variable(9);
        let _ = a.mul(&b);
        assert_eq!(n_mul(), 1);
        assert_eq!(n_wires(), 1);
    }

    #[test]
    fn const_mul_is_free() {
        let f = WireFactory::new(BigUint::from(251u32));
        reset_counters();
        let a = f.variable(3);
        let _ = a.mul_const(9);
        assert_eq!(n_mul(), 0);
    }

    #[test]
    fn non_const_inversion_charges_one() {
        let f = WireFactory::new(BigUint::from(13u32));
        reset_counters();
        let a = f.variable(7);
        let _ = a.invert().unwrap();
        assert_eq!(n_mul(), 1);
    }

    #[test]
    fn division_by_zero_fails() {
        let f = WireFactory::new(BigUint::from(13u32));
        let a = f.variable(7);
        let zero = f.constant(0);
        assert!(a.div(&zero).is_err());
    }
}
