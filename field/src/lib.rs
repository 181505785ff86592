#![allow(clippy::needless_range_loop)]

//! Arbitrary-modulus prime field arithmetic.
//!
//! Unlike a fixed-prime field (e.g. Goldilocks), every [`FieldElement`] here
//! carries its modulus at runtime, so the same binary can build circuits over
//! whichever prime a test or a downstream proof system asks for (`11`, `13`,
//! `251`, ...). A [`Field`] is the factory that mints elements for one fixed
//! modulus; it is the thing a circuit keeps around for the lifetime of a
//! single construction.

pub mod element;
pub mod error;
pub mod factory;
pub mod inversion;

pub use element::FieldElement;
pub use error::FieldError;
pub use factory::Field;
