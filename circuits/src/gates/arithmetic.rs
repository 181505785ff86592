//! Arithmetic gates (C4): division and the R1CS single-output
//! inner-product constraint.

use crate::error::Result;
use crate::factory::WireFactory;
use crate::gates::{branching, comparison};
use crate::wire::Wire;

/// `a / b`, failing with [`crate::error::CircuitError`] when `b` is zero.
pub fn divide(a: &Wire, b: &Wire) -> Result<Wire> {
    a.div(b)
}

/// `a / b`, but never fails: when `b` is zero the divisor is swapped for
/// `1` before dividing. The caller is responsible for gating the result
/// when `b` was actually zero, since the quotient returned in that case is
/// otherwise meaningless.
pub fn divide_safe(factory: &WireFactory, a: &Wire, b: &Wire) -> Wire {
    divide_safe_multiple(factory, std::slice::from_ref(a), b)
        .pop()
        .expect("single dividend")
}

/// Like [`divide_safe`] but for many dividends sharing one divisor: the
/// zero-check indicator is computed once and reused for every quotient.
pub fn divide_safe_multiple(factory: &WireFactory, dividends: &[Wire], divisor: &Wire) -> Vec<Wire> {
    let is_zero = comparison::eq_zero(factory, divisor);
    let safe_divisor = branching::if_then_else(&is_zero, &factory.one(), divisor);
    dividends
        .iter()
        .map(|a| a.div(&safe_divisor).expect("safe_divisor is never zero"))
        .collect()
}

/// Computes `(sum aᵢ·vᵢ) * (sum bⱼ·wⱼ)` as a single R1CS constraint. The
/// linear combinations themselves are free (additions and constant scales);
/// only the final product is charged, and it is charged exactly once even
/// if every input happened to be constant.
pub fn r1cs_constraint_single_output(a_terms: &[(i64, Wire)], b_terms: &[(i64, Wire)]) -> Wire {
    let sum_a = linear_combination(a_terms);
    let sum_b = linear_combination(b_terms);
    sum_a.mul_forced_constraint(&sum_b)
}

fn linear_combination(terms: &[(i64, Wire)]) -> Wire {
    let mut iter = terms.iter();
    let (k0, w0) = iter.next().expect("linear combination needs at least one term");
    let mut acc = w0.mul_const(*k0);
    for (k, w) in iter {
        acc = acc.add(&w.mul_const(*k));
    }
    acc
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;
    use crate::wire::{n_mul, reset_counters};

    #[test]
    fn divide_by_zero_fails() {
        let f = WireFactory::new(BigUint::from(13u32));
        let a = f.variable(7);
        let zero = f.constant(0);
        assert!(divide(&a, &zero).is_err());
    }

    #[test]
    fn divide_safe_falls_back_to_one() {
        let f = WireFactory::new(BigUint::from(13u32));
        let a = f.variable(7);
        let zero = f.variable(0);
        let q = divide_safe(&f, &a, &zero);
        assert_eq!(q.to_biguint(), BigUint::from(7u32));
    }

    #[test]
    fn r1cs_single_output_charges_exactly_one() {
        let f = WireFactory::new(BigUint::from(251u32));
        reset_counters();
        let a = vec![(2, f.constant(3)), (1, f.constant(4))];
        let b = vec![(1, f.constant(5))];
        let out = r1cs_constraint_single_output(&a, &b);
        assert_eq!(n_mul(), 1);
        assert!(!out.is_const());
        assert_eq!(out.to_biguint(), BigUint::from((2 * 3 + 4) * 5u32));
    }
}
