//! Component C3: mints wires and constants for a fixed modulus.

use num_bigint::BigUint;

use crate::field::Field;
use crate::wire::Wire;

/// Produces [`Wire`]s for one fixed prime modulus. Analogous to
/// [`Field`](crate::field::Field) one level up: a circuit holds one
/// `WireFactory` for its lifetime and mints every constant and witness
/// input from it.
#[derive(Clone, Debug)]
pub struct WireFactory {
    field: Field,
}

impl WireFactory {
    pub fn new(modulus: BigUint) -> Self {
        WireFactory {
            field: Field::new(modulus),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn bit_length(&self) -> u64 {
        self.field.bit_length()
    }

    /// A wire whose value is fixed and independent of any witness.
    pub fn constant(&self, value: i64) -> Wire {
        let v = self.signed_element(value);
        Wire::new(v, true)
    }

    /// A wire carrying a witnessed value, i.e. not provably const.
    pub fn variable(&self, value: i64) -> Wire {
        let v = self.signed_element(value);
        Wire::new(v, false)
    }

    fn signed_element(&self, value: i64) -> crate::field::FieldElement {
        if value >= 0 {
            self.field.element(value as u64)
        } else {
            self.field.element(0u32).sub(&self.field.element((-value) as u64))
        }
    }

    /// A constant wire from an arbitrary-precision value, for witnesses too
    /// large to route through the `i64` constructors above.
    pub fn constant_big(&self, value: BigUint) -> Wire {
        Wire::new(self.field.element(value), true)
    }

    pub fn variable_big(&self, value: BigUint) -> Wire {
        Wire::new(self.field.element(value), false)
    }

    pub fn constant_list(&self, values: impl IntoIterator<Item = i64>) -> Vec<Wire> {
        values.into_iter().map(|v| self.constant(v)).collect()
    }

    pub fn variable_list(&self, values: impl IntoIterator<Item = i64>) -> Vec<Wire> {
        values.into_iter().map(|v| self.variable(v)).collect()
    }

    pub fn zero(&self) -> Wire {
        self.constant(0)
    }

    pub fn one(&self) -> Wire {
        self.constant(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_constants_wrap() {
        let f = WireFactory::new(BigUint::from(13u32));
        let neg_one = f.constant(-1);
        assert_eq!(neg_one.to_biguint(), BigUint::from(12u32));
    }

    #[test]
    fn bit_length_delegates_to_field() {
        let f = WireFactory::new(BigUint::from(13u32));
        assert_eq!(f.bit_length(), 4);
    }
}
