//! Montgomery-curve point algebra (C10) and the Pedersen commitments (C11)
//! built on top of it.

pub mod montgomery;

pub use montgomery::{CurveParams, Point, PointKind};
