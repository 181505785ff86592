//! Pedersen commitments (C11): `commit(g, h, m, r) = [m]g + [r]h`, scalar
//! and vector forms, over a Montgomery curve.

use crate::curve::montgomery::{self, CurveParams, Point};
use crate::error::Result;
use crate::factory::WireFactory;
use crate::gates::bits;
use crate::wire::Wire;

fn infinity(factory: &WireFactory) -> Point {
    Point::homogeneous(factory.zero(), Some(factory.one()), factory.zero())
}

/// `[m]g + [r]h`. `n_max_bits_m`, if given, truncates the message's bit
/// decomposition (the randomness always uses the field's full bit length).
pub fn commit(
    factory: &WireFactory,
    curve: &CurveParams,
    g: &Point,
    h: &Point,
    m: &Wire,
    r: &Wire,
    n_max_bits_m: Option<u32>,
) -> Result<Point> {
    let m_bits = bits::split(factory, m, n_max_bits_m)?;
    let r_bits = bits::split(factory, r, None)?;
    commit_with_bits(factory, curve, g, h, &m_bits, &r_bits)
}

/// Like [`commit`], but accepts a pre-computed bit decomposition of the
/// randomness, so a caller can share one decomposition across several
/// commitments.
pub fn commit_with_bits(
    factory: &WireFactory,
    curve: &CurveParams,
    g: &Point,
    h: &Point,
    m_bits: &[Wire],
    r_bits: &[Wire],
) -> Result<Point> {
    let mg = montgomery::exponent_homogeneous_point_bit_exponent(factory, curve, g, m_bits)?;
    let rh = montgomery::exponent_homogeneous_point_bit_exponent(factory, curve, h, r_bits)?;
    Ok(montgomery::add_homogeneous_points(factory, curve, &mg, &rh))
}

/// `sum_i [m_i]g_i + [r]h`.
pub fn commit_vector(
    factory: &WireFactory,
    curve: &CurveParams,
    gs: &[Point],
    h: &Point,
    ms: &[Wire],
    r: &Wire,
    n_max_bits_m: Option<u32>,
) -> Result<Point> {
    let mut acc = infinity(factory);
    for (g, m) in gs.iter().zip(ms) {
        let m_bits = bits::split(factory, m, n_max_bits_m)?;
        let mg = montgomery::exponent_homogeneous_point_bit_exponent(factory, curve, g, &m_bits)?;
        acc = montgomery::add_homogeneous_points(factory, curve, &acc, &mg);
    }
    let r_bits = bits::split(factory, r, None)?;
    let rh = montgomery::exponent_homogeneous_point_bit_exponent(factory, curve, h, &r_bits)?;
    Ok(montgomery::add_homogeneous_points(factory, curve, &acc, &rh))
}
