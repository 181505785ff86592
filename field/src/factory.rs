use std::rc::Rc;

use num_bigint::BigUint;

use crate::element::FieldElement;

/// Mints [`FieldElement`]s for one fixed prime modulus.
///
/// A `Field` is cheap to clone (the modulus is reference-counted) and is
/// typically held for the lifetime of a single circuit construction, the way
/// a caller picks one curve/field pair and builds every wire against it.
#[derive(Clone, Debug)]
pub struct Field {
    modulus: Rc<BigUint>,
}

impl Field {
    pub fn new(modulus: BigUint) -> Self {
        Field {
            modulus: Rc::new(modulus),
        }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of bits needed to represent any element, i.e. `ceil(log2(p))`.
    pub fn bit_length(&self) -> u64 {
        self.modulus.bits()
    }

    pub fn element(&self, value: impl Into<BigUint>) -> FieldElement {
        FieldElement::new(value.into(), Rc::clone(&self.modulus))
    }

    pub fn element_list(&self, values: impl IntoIterator<Item = u64>) -> Vec<FieldElement> {
        values.into_iter().map(|v| self.element(v)).collect()
    }

    pub fn zero(&self) -> FieldElement {
        self.element(0u32)
    }

    pub fn one(&self) -> FieldElement {
        self.element(1u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_length_matches_modulus() {
        let f = Field::new(BigUint::from(13u32));
        assert_eq!(f.bit_length(), 4);
    }

    #[test]
    fn element_reduces_mod_p() {
        let f = Field::new(BigUint::from(13u32));
        assert_eq!(f.element(14u32), f.element(1u32));
    }

    #[test]
    fn element_list_builds_in_order() {
        let f = Field::new(BigUint::from(251u32));
        let list = f.element_list([1, 2, 3]);
        assert_eq!(list, vec![f.element(1u32), f.element(2u32), f.element(3u32)]);
    }
}
