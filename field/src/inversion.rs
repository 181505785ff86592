//! Modular inversion via the extended Euclidean algorithm.
//!
//! The modulus is prime, so every nonzero residue is invertible; we still
//! run the general extended-gcd loop rather than Fermat's little theorem
//! (`a^(p-2)`) since the modulus is arbitrary and not necessarily large
//! enough to make exponentiation cheaper than a handful of gcd steps.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Returns `a^-1 mod modulus`, or `None` if `a` is zero (mod `modulus`).
pub fn inverse(a: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return None;
    }

    let m = BigInt::from(modulus.clone());
    let mut old_r = BigInt::from(a.clone());
    let mut r = m.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let (q, rem) = old_r.div_rem(&r);
        old_r = r;
        r = rem;
        let new_s = old_s - &q * &s;
        old_s = s;
        s = new_s;
    }

    if old_r != BigInt::one() {
        // modulus is not prime, or a shares a factor with it.
        return None;
    }

    let inv = old_s.mod_floor(&m);
    Some(inv.to_biguint().expect("mod_floor result is nonnegative"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverts_against_small_prime() {
        let p = BigUint::from(13u32);
        for a in 1u32..13 {
            let inv = inverse(&BigUint::from(a), &p).unwrap();
            let prod = (BigUint::from(a) * &inv) % &p;
            assert_eq!(prod, BigUint::one());
        }
    }

    #[test]
    fn zero_has_no_inverse() {
        assert!(inverse(&BigUint::zero(), &BigUint::from(251u32)).is_none());
    }
}
