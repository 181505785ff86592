//! Bit gates (C6): splitting a wire into its bit decomposition, verifying a
//! wire is itself a bit, and the boolean algebra built on bits.

use num_bigint::BigUint;

use crate::error::Result;
use crate::factory::WireFactory;
use crate::gates::{arithmetic, assert, comparison};
use crate::wire::Wire;

/// Big-endian bit decomposition of `w` into `bit_length` one-bit wires
/// (defaulting to the field's own bit length). Emits one constraint per bit
/// via [`assert::assert_bit`] plus one forced constraint tying the
/// reconstructed weighted sum back to `w`.
///
/// Behavior is unspecified if `w`'s canonical value does not fit in
/// `bit_length` bits; the caller is responsible for choosing a wide enough
/// decomposition.
pub fn split(factory: &WireFactory, w: &Wire, bit_length: Option<u32>) -> Result<Vec<Wire>> {
    let l = bit_length.unwrap_or(factory.bit_length() as u32) as u64;
    let value = w.to_biguint();

    let bits_le: Vec<Wire> = (0..l)
        .map(|i| factory.variable(if value.bit(i) { 1 } else { 0 }))
        .collect();

    for bit in &bits_le {
        assert::assert_bit(bit)?;
    }

    let terms: Vec<(i64, Wire)> = bits_le
        .iter()
        .enumerate()
        .map(|(i, bit)| (pow2_i64(i as u32), bit.clone()))
        .collect();
    let reconstructed =
        arithmetic::r1cs_constraint_single_output(&terms, &[(1, factory.one())]);
    reconstructed.assert_equal(w)?;

    let mut bits_be = bits_le;
    bits_be.reverse();
    Ok(bits_be)
}

fn pow2_i64(i: u32) -> i64 {
    1i64 << i
}

/// Indicator: 1 if `w` is itself a bit, 0 otherwise.
pub fn verify_bit(factory: &WireFactory, w: &Wire) -> Wire {
    let one = factory.one();
    let product = w.mul(&one.sub(w));
    comparison::eq_zero(factory, &product)
}

fn warn_if_not_bit(label: &str, w: &Wire) {
    let v = w.to_biguint();
    if v != BigUint::from(0u32) && v != BigUint::from(1u32) {
        log::warn!("boolean gate {label} received a non-binary input ({v})");
    }
}

pub fn and(a: &Wire, b: &Wire) -> Wire {
    warn_if_not_bit("AND", a);
    warn_if_not_bit("AND", b);
    a.mul(b)
}

pub fn or(a: &Wire, b: &Wire) -> Wire {
    warn_if_not_bit("OR", a);
    warn_if_not_bit("OR", b);
    a.add(b).sub(&a.mul(b))
}

pub fn xor(factory: &WireFactory, a: &Wire, b: &Wire) -> Wire {
    warn_if_not_bit("XOR", a);
    warn_if_not_bit("XOR", b);
    let or_ab = or(a, b);
    let and_ab = and(a, b);
    and(&or_ab, &factory.one().sub(&and_ab))
}

/// `N`-ary AND: 1 iff every wire in `wires` is 1.
pub fn and_multiple(factory: &WireFactory, wires: &[Wire]) -> Wire {
    for w in wires {
        warn_if_not_bit("AND", w);
    }
    if wires.len() as u64 >= factory.field().modulus().bits() {
        log::warn!("and_multiple called with {} inputs, which may alias mod p", wires.len());
    }
    let length = factory.constant(wires.len() as i64);
    comparison::eq_multiple(factory, wires, std::slice::from_ref(&length))
}

/// `N`-ary OR: 1 iff at least one wire in `wires` is 1.
pub fn or_multiple(factory: &WireFactory, wires: &[Wire]) -> Wire {
    for w in wires {
        warn_if_not_bit("OR", w);
    }
    if wires.len() as u64 >= factory.field().modulus().bits() {
        log::warn!("or_multiple called with {} inputs, which may alias mod p", wires.len());
    }
    let all_zero = comparison::eq_zero_multiple(factory, wires);
    factory.one().sub(&all_zero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_reconstructs_value() {
        let f = WireFactory::new(BigUint::from(251u32));
        let w = f.variable(11);
        let bits = split(&f, &w, Some(4)).unwrap();
        // big-endian: 11 = 1011
        let values: Vec<_> = bits.iter().map(|b| b.to_biguint()).collect();
        assert_eq!(values, vec![1u32.into(), 0u32.into(), 1u32.into(), 1u32.into()]);
    }

    #[test]
    fn verify_bit_detects_non_bits() {
        let f = WireFactory::new(BigUint::from(13u32));
        assert_eq!(verify_bit(&f, &f.variable(1)).to_biguint(), BigUint::from(1u32));
        assert_eq!(verify_bit(&f, &f.variable(5)).to_biguint(), BigUint::from(0u32));
    }

    #[test]
    fn xor_truth_table() {
        let f = WireFactory::new(BigUint::from(13u32));
        let zero = f.variable(0);
        let one = f.variable(1);
        assert_eq!(xor(&f, &zero, &one).to_biguint(), BigUint::from(1u32));
        assert_eq!(xor(&f, &one, &one).to_biguint(), BigUint::from(0u32));
    }

    #[test]
    fn and_or_multiple() {
        let f = WireFactory::new(BigUint::from(251u32));
        let bits = f.variable_list([1, 1, 1]);
        assert_eq!(and_multiple(&f, &bits).to_biguint(), BigUint::from(1u32));
        let bits = f.variable_list([1, 0, 1]);
        assert_eq!(and_multiple(&f, &bits).to_biguint(), BigUint::from(0u32));
        assert_eq!(or_multiple(&f, &bits).to_biguint(), BigUint::from(1u32));
        let zeros = f.variable_list([0, 0, 0]);
        assert_eq!(or_multiple(&f, &zeros).to_biguint(), BigUint::from(0u32));
    }
}
