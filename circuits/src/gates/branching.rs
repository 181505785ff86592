//! Branching gates (C8): conditional selection as a linear combination.
//! Both gates assume `c` is a bit; at most one multiplication is charged
//! per call (fewer if constant propagation erases it).

use crate::wire::Wire;

/// `if c { t } else { e }`, computed as `c*t + (1-c)*e`.
pub fn if_then_else(c: &Wire, t: &Wire, e: &Wire) -> Wire {
    let one = Wire::new(c.value().one_like(), true);
    c.mul(t).add(&one.sub(c).mul(e))
}

/// `if c { 0 } else { x }`, computed as `(1-c)*x`.
pub fn if_then_set_zero(c: &Wire, x: &Wire) -> Wire {
    let one = Wire::new(x.value().one_like(), true);
    one.sub(c).mul(x)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;
    use crate::factory::WireFactory;

    #[test]
    fn selects_then_branch_when_condition_is_one() {
        let f = WireFactory::new(BigUint::from(13u32));
        let result = if_then_else(&f.variable(1), &f.variable(4), &f.variable(9));
        assert_eq!(result.to_biguint(), BigUint::from(4u32));
    }

    #[test]
    fn selects_else_branch_when_condition_is_zero() {
        let f = WireFactory::new(BigUint::from(13u32));
        let result = if_then_else(&f.variable(0), &f.variable(4), &f.variable(9));
        assert_eq!(result.to_biguint(), BigUint::from(9u32));
    }

    #[test]
    fn set_zero_zeroes_out_on_true_condition() {
        let f = WireFactory::new(BigUint::from(13u32));
        assert_eq!(if_then_set_zero(&f.variable(1), &f.variable(7)).to_biguint(), BigUint::from(0u32));
        assert_eq!(if_then_set_zero(&f.variable(0), &f.variable(7)).to_biguint(), BigUint::from(7u32));
    }
}
