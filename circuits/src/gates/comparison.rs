//! Comparison gates (C7): equality, zero-testing, and bit-bounded
//! greater-than / less-than.

use num_bigint::BigUint;

use crate::error::Result;
use crate::factory::WireFactory;
use crate::gates::assert::{self, check_bits_bound};
use crate::gates::bits;
use crate::wire::Wire;

/// Indicator: 1 if `w == 0`, 0 otherwise.
///
/// Witnesses `h = w^-1` (or `0` when `w = 0`) and `r = 1` iff `w = 0`, then
/// asserts `r*w = 0` and `w*h = 1 - r`. The assertions hold by construction
/// here (the witness is computed, not supplied externally), but they still
/// charge the multiplication constraints a prover would have to certify.
pub fn eq_zero(factory: &WireFactory, w: &Wire) -> Wire {
    let is_zero = w.is_zero();
    let r = factory.variable(if is_zero { 1 } else { 0 });
    let h = if is_zero {
        factory.constant(0)
    } else {
        Wire::new(w.value().invert().expect("checked nonzero above"), w.is_const())
    };
    let _ = r.mul(w);
    let _ = w.mul(&h);
    r
}

/// `eq_zero` over `sum(wires)`.
pub fn eq_zero_multiple(factory: &WireFactory, wires: &[Wire]) -> Wire {
    let sum = wires.iter().fold(factory.constant(0), |acc, w| acc.add(w));
    eq_zero(factory, &sum)
}

/// Indicator: 1 if `a == b`.
pub fn eq(factory: &WireFactory, a: &Wire, b: &Wire) -> Wire {
    eq_zero(factory, &a.sub(b))
}

/// Indicator: 1 if `sum(a) == sum(b)`.
pub fn eq_multiple(factory: &WireFactory, a: &[Wire], b: &[Wire]) -> Wire {
    let mut combined: Vec<Wire> = a.to_vec();
    combined.extend(b.iter().map(|w| w.neg()));
    eq_zero_multiple(factory, &combined)
}

/// Indicator: 1 if `a >= b`, given both fit in `bits` bits (`bits <=
/// floor(log2(p)/2)`).
///
/// Witnesses `r` (1 iff `a >= b`) and an auxiliary `u`: `a - b` when `r = 1`,
/// else `(b - a) - 1`. Bit-decomposes `u` to `bits` bits, asserts `r` is
/// a bit, and asserts `2*r*(a-b) = (a-b) + u + 1 - r`.
pub fn gt(factory: &WireFactory, a: &Wire, b: &Wire, bits_width: u32) -> Result<Wire> {
    check_bits_bound(factory, bits_width)?;
    let a_val = a.to_biguint();
    let b_val = b.to_biguint();
    let a_ge_b = a_val >= b_val;
    let r = factory.variable(if a_ge_b { 1 } else { 0 });

    let a_minus_b = a.sub(b);
    let u_value = if a_ge_b {
        &a_val - &b_val
    } else {
        (&b_val - &a_val) - BigUint::from(1u32)
    };
    let u = Wire::new(factory.field().element(u_value), false);

    bits::split(factory, &u, Some(bits_width))?;
    assert::assert_bit(&r)?;

    let lhs = r.mul(&a_minus_b).mul_const(2);
    let rhs = a_minus_b.add(&u).add_const(1).sub(&r);
    lhs.assert_equal(&rhs)?;
    Ok(r)
}

/// `lt(a, b, bits) = gt(b, a, bits)`.
pub fn lt(factory: &WireFactory, a: &Wire, b: &Wire, bits_width: u32) -> Result<Wire> {
    gt(factory, b, a, bits_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_zero_on_zero_and_nonzero() {
        let f = WireFactory::new(BigUint::from(13u32));
        assert_eq!(eq_zero(&f, &f.variable(0)).to_biguint(), BigUint::from(1u32));
        assert_eq!(eq_zero(&f, &f.variable(5)).to_biguint(), BigUint::from(0u32));
    }

    #[test]
    fn eq_matches_equal_values() {
        let f = WireFactory::new(BigUint::from(13u32));
        assert_eq!(eq(&f, &f.variable(4), &f.variable(4)).to_biguint(), BigUint::from(1u32));
        assert_eq!(eq(&f, &f.variable(4), &f.variable(5)).to_biguint(), BigUint::from(0u32));
    }

    #[test]
    fn gt_matches_arithmetic_ordering() {
        let f = WireFactory::new(BigUint::from(251u32));
        for a in 0u32..16 {
            for b in 0u32..16 {
                let result = gt(&f, &f.variable(a as i64), &f.variable(b as i64), 4).unwrap();
                let expected = if a >= b { 1u32 } else { 0u32 };
                assert_eq!(result.to_biguint(), BigUint::from(expected), "a={a} b={b}");
            }
        }
    }

    #[test]
    fn lt_is_gt_flipped() {
        let f = WireFactory::new(BigUint::from(251u32));
        assert_eq!(lt(&f, &f.variable(3), &f.variable(9), 4).unwrap().to_biguint(), BigUint::from(1u32));
        assert_eq!(lt(&f, &f.variable(9), &f.variable(3), 4).unwrap().to_biguint(), BigUint::from(0u32));
    }

    #[test]
    fn gt_bounds_are_checked() {
        let f = WireFactory::new(BigUint::from(13u32));
        assert!(gt(&f, &f.variable(3), &f.variable(1), 2).is_err());
    }
}
