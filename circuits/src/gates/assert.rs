//! Assertion gates (C5): `assert_equal`, `assert_bit`, `assert_gt`.

use crate::error::{CircuitError, Result};
use crate::factory::WireFactory;
use crate::gates::bits;
use crate::wire::Wire;

/// Bound every comparison-style gate construction-time bit width must obey,
/// so that doubling a `bits`-wide difference cannot wrap around `p`.
pub(crate) fn check_bits_bound(factory: &WireFactory, bits: u32) -> Result<()> {
    let max_bits = (factory.bit_length() - 1) / 2;
    if bits as u64 > max_bits {
        return Err(CircuitError::invalid(format!(
            "bits={bits} exceeds floor(log2(p)/2)={max_bits}"
        )));
    }
    Ok(())
}

fn sum(wires: &[Wire], factory: &WireFactory) -> Wire {
    wires.iter().fold(factory.constant(0), |acc, w| acc.add(w))
}

/// Fails unless `sum(a) == sum(b) (mod p)`.
pub fn assert_equal(factory: &WireFactory, a: &[Wire], b: &[Wire]) -> Result<()> {
    sum(a, factory).assert_equal(&sum(b, factory))
}

/// Fails unless `w * (1 - w) = 0`, i.e. `w` is a bit.
pub fn assert_bit(w: &Wire) -> Result<()> {
    let one = Wire::new(w.value().one_like(), true);
    w.mul(&one.sub(w)).assert_equal(&Wire::new(w.value().zero_like(), true))
}

/// Proves `a >= b`, given both fit in `bits` bits (`bits <=
/// floor(log2(p)/2)`, checked at construction time).
///
/// Witnesses `d = a - b`, bit-decomposes it to `bits` bits (which forces
/// `d` into `[0, 2^bits)`), and asserts `2(a-b) = (a-b) + d`. The doubling
/// defeats wrap-around aliasing: if `a < b`, `d = a - b mod p` is a huge
/// residue that cannot fit in `bits` bits, so the decomposition fails.
pub fn assert_gt(factory: &WireFactory, a: &Wire, b: &Wire, bits: u32) -> Result<()> {
    check_bits_bound(factory, bits)?;
    let d = a.sub(b);
    let _ = super::bits::split(factory, &d, Some(bits))?;
    d.mul_const(2).assert_equal(&d.add(&d))
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;

    #[test]
    fn assert_equal_passes_on_equal_sums() {
        let f = WireFactory::new(BigUint::from(13u32));
        let a = f.variable_list([2, 3]);
        let b = f.variable_list([5]);
        assert!(assert_equal(&f, &a, &b).is_ok());
    }

    #[test]
    fn assert_equal_fails_on_mismatch() {
        let f = WireFactory::new(BigUint::from(13u32));
        let a = f.variable_list([2, 3]);
        let b = f.variable_list([6]);
        assert!(assert_equal(&f, &a, &b).is_err());
    }

    #[test]
    fn assert_bit_rejects_non_bits() {
        let f = WireFactory::new(BigUint::from(13u32));
        assert!(assert_bit(&f.variable(0)).is_ok());
        assert!(assert_bit(&f.variable(1)).is_ok());
        assert!(assert_bit(&f.variable(2)).is_err());
    }

    #[test]
    fn assert_gt_respects_bit_bound() {
        let f = WireFactory::new(BigUint::from(13u32));
        // floor(log2(13)/2) = floor(3/2) = 1
        assert!(assert_gt(&f, &f.variable(3), &f.variable(1), 2).is_err());
    }

    #[test]
    fn assert_gt_holds_for_true_inequality() {
        let f = WireFactory::new(BigUint::from(251u32));
        assert!(assert_gt(&f, &f.variable(9), &f.variable(4), 4).is_ok());
        assert!(assert_gt(&f, &f.variable(4), &f.variable(9), 4).is_err());
    }
}
