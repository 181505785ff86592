#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

//! Gate library for building R1CS circuits over a runtime-modulus prime
//! field and evaluating them directly on concrete witnesses.
//!
//! The library never produces a proof: it constructs wires, counts the
//! multiplicative constraints a proof system would have to certify, and
//! raises an error the moment a witness fails to satisfy one. Everything
//! from field arithmetic ([`wire`]) up through ballot tallying ([`voting`])
//! is a straight-line, single-threaded evaluation.

pub use zkvote_field as field;

pub mod curve;
pub mod error;
pub mod factory;
pub mod gates;
pub mod pedersen;
pub mod voting;
pub mod wire;

pub use error::{CircuitError, Result};
pub use factory::WireFactory;
pub use wire::Wire;
