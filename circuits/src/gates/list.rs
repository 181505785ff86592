//! List gates (C9): membership, extrema, counting, indexed selection and
//! the weighted median, all built from the comparison and bit gates below
//! them.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Result;
use crate::factory::WireFactory;
use crate::gates::{assert, bits, comparison};
use crate::wire::Wire;

/// 1 iff `v` equals some element of `list`.
pub fn is_value_in_list(factory: &WireFactory, v: &Wire, list: &[Wire]) -> Wire {
    let indicators: Vec<Wire> = list.iter().map(|l| comparison::eq(factory, v, l)).collect();
    bits::or_multiple(factory, &indicators)
}

/// Per-element `gt(list[i], threshold, bits)`.
pub fn is_threshold_reached(
    factory: &WireFactory,
    list: &[Wire],
    threshold: &Wire,
    bits_width: u32,
) -> Result<Vec<Wire>> {
    list.iter()
        .map(|l| comparison::gt(factory, l, threshold, bits_width))
        .collect()
}

/// Witnesses the maximum of `list`, returning it alongside an indicator for
/// every position that attains it. Binds the witness with one `assert_gt`
/// per element (`max >= list[i]`).
pub fn maximum(factory: &WireFactory, list: &[Wire], bits_width: u32) -> Result<(Wire, Vec<Wire>)> {
    extremum(factory, list, bits_width, true)
}

/// Witnesses the minimum of `list`, symmetric to [`maximum`].
pub fn minimum(factory: &WireFactory, list: &[Wire], bits_width: u32) -> Result<(Wire, Vec<Wire>)> {
    extremum(factory, list, bits_width, false)
}

fn extremum(
    factory: &WireFactory,
    list: &[Wire],
    bits_width: u32,
    want_max: bool,
) -> Result<(Wire, Vec<Wire>)> {
    let values: Vec<BigUint> = list.iter().map(|w| w.to_biguint()).collect();
    let picked = if want_max {
        values.iter().max().expect("list must be non-empty").clone()
    } else {
        values.iter().min().expect("list must be non-empty").clone()
    };
    let extreme_wire = factory.variable_big(picked);

    let mut indicators = Vec::with_capacity(list.len());
    for item in list {
        indicators.push(comparison::eq(factory, &extreme_wire, item));
        if want_max {
            assert::assert_gt(factory, &extreme_wire, item, bits_width)?;
        } else {
            assert::assert_gt(factory, item, &extreme_wire, bits_width)?;
        }
    }
    Ok((extreme_wire, indicators))
}

pub fn get_maximum_value(factory: &WireFactory, list: &[Wire], bits_width: u32) -> Result<Wire> {
    Ok(maximum(factory, list, bits_width)?.0)
}

pub fn get_minimum_value(factory: &WireFactory, list: &[Wire], bits_width: u32) -> Result<Wire> {
    Ok(minimum(factory, list, bits_width)?.0)
}

/// Assumes `list` holds bits. Returns a one-hot list preserving only the
/// first set position; all later positions (set or not) are zeroed.
pub fn find_first_indicator(factory: &WireFactory, list: &[Wire]) -> Vec<Wire> {
    let mut done = factory.constant(0);
    let mut out = Vec::with_capacity(list.len());
    for item in list {
        let remaining = factory.one().sub(&done);
        let output = item.mul(&remaining);
        done = done.add(&output);
        out.push(output);
    }
    out
}

/// Restricts attention to the entries of `list` flagged by `inds`, and
/// returns (one-hot-ish indicator list over all of `list` marking the
/// restricted minimum's occurrences, count of them). Entries with
/// `inds[i] = 0` never appear in the returned indicator list.
pub fn find_and_count_min_of_set_inds(
    factory: &WireFactory,
    list: &[Wire],
    inds: &[Wire],
    bits_width: u32,
) -> Result<(Vec<Wire>, Wire)> {
    let included_min = list
        .iter()
        .zip(inds)
        .filter(|(_, ind)| !ind.to_biguint().is_zero())
        .map(|(w, _)| w.to_biguint())
        .min()
        .expect("at least one index must be included");
    let min_wire = factory.variable_big(included_min);

    let mut indicators = Vec::with_capacity(list.len());
    let mut count = factory.constant(0);
    for (item, ind) in list.iter().zip(inds) {
        if !ind.to_biguint().is_zero() {
            assert::assert_gt(factory, item, &min_wire, bits_width)?;
        }
        let is_min = comparison::eq(factory, item, &min_wire);
        let indicator = bits::and(&is_min, ind);
        count = count.add(&indicator);
        indicators.push(indicator);
    }
    Ok((indicators, count))
}

/// Sum of `eq(list[i], v)`.
pub fn get_n_occurences(factory: &WireFactory, list: &[Wire], v: &Wire) -> Wire {
    list.iter()
        .fold(factory.constant(0), |acc, l| acc.add(&comparison::eq(factory, l, v)))
}

/// Length-`n` one-hot list with a `1` at position `i`.
pub fn get_list_with_index_set(factory: &WireFactory, i: &Wire, n: usize) -> Vec<Wire> {
    (0..n)
        .map(|j| comparison::eq(factory, i, &factory.constant(j as i64)))
        .collect()
}

/// Length-`n` list whose first `i+1` positions are `1`.
pub fn get_list_with_up_to_index_set(
    factory: &WireFactory,
    i: &Wire,
    n: usize,
    bits_width: u32,
) -> Result<Vec<Wire>> {
    (0..n)
        .map(|j| comparison::gt(factory, i, &factory.constant(j as i64), bits_width))
        .collect()
}

/// Inner product of `list` with the one-hot vector for `i`.
pub fn get_index_at(factory: &WireFactory, list: &[Wire], i: &Wire) -> Wire {
    let onehot = get_list_with_index_set(factory, i, list.len());
    list.iter()
        .zip(&onehot)
        .fold(factory.constant(0), |acc, (l, o)| acc.add(&l.mul(o)))
}

/// Witnesses the index `m` of the weighted median of `list`: the first
/// prefix-sum position whose cumulative total exceeds half the grand total.
/// Proves it via two prefix sums, at `m` and `m-1`, bracketing that
/// threshold.
pub fn get_median(factory: &WireFactory, list: &[Wire], bits_width: u32) -> Result<Wire> {
    let values: Vec<BigUint> = list.iter().map(|w| w.to_biguint()).collect();
    let total: BigUint = values.iter().fold(BigUint::zero(), |acc, v| acc + v);
    let half = &total / 2u32;

    let mut running = BigUint::zero();
    let mut m = 0usize;
    for (idx, v) in values.iter().enumerate() {
        running += v;
        if running > half {
            m = idx;
            break;
        }
    }

    let prefix_m: BigUint = values[..=m].iter().fold(BigUint::zero(), |a, v| a + v);
    let prefix_m_minus_1: BigUint = if m == 0 {
        BigUint::zero()
    } else {
        values[..m].iter().fold(BigUint::zero(), |a, v| a + v)
    };

    let half_wire = factory.variable_big(half);
    let prefix_m_wire = factory.variable_big(prefix_m);
    let prefix_m_minus_1_wire = factory.variable_big(prefix_m_minus_1);

    assert::assert_gt(factory, &prefix_m_wire, &half_wire, bits_width)?;
    assert::assert_gt(factory, &half_wire, &prefix_m_minus_1_wire, bits_width)?;

    Ok(factory.variable(m as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_and_occurrences() {
        let f = WireFactory::new(BigUint::from(251u32));
        let list = f.variable_list([3, 1, 4, 1, 5]);
        assert_eq!(is_value_in_list(&f, &f.variable(4), &list).to_biguint(), BigUint::from(1u32));
        assert_eq!(is_value_in_list(&f, &f.variable(9), &list).to_biguint(), BigUint::from(0u32));
        assert_eq!(get_n_occurences(&f, &list, &f.variable(1)).to_biguint(), BigUint::from(2u32));
    }

    #[test]
    fn maximum_and_minimum_identify_all_occurrences() {
        let f = WireFactory::new(BigUint::from(251u32));
        let list = f.variable_list([3, 9, 9, 2]);
        let (max_val, max_inds) = maximum(&f, &list, 5).unwrap();
        assert_eq!(max_val.to_biguint(), BigUint::from(9u32));
        let ones: Vec<_> = max_inds.iter().map(|w| w.to_biguint()).collect();
        assert_eq!(ones, vec![0u32.into(), 1u32.into(), 1u32.into(), 0u32.into()]);

        let (min_val, _) = minimum(&f, &list, 5).unwrap();
        assert_eq!(min_val.to_biguint(), BigUint::from(2u32));
    }

    #[test]
    fn find_first_indicator_keeps_only_first_set_bit() {
        let f = WireFactory::new(BigUint::from(13u32));
        let list = f.variable_list([0, 1, 1, 0]);
        let out: Vec<_> = find_first_indicator(&f, &list).iter().map(|w| w.to_biguint()).collect();
        assert_eq!(out, vec![0u32.into(), 1u32.into(), 0u32.into(), 0u32.into()]);
    }

    #[test]
    fn get_index_at_selects_the_right_entry() {
        let f = WireFactory::new(BigUint::from(251u32));
        let list = f.variable_list([10, 20, 30]);
        assert_eq!(get_index_at(&f, &list, &f.variable(2)).to_biguint(), BigUint::from(30u32));
    }

    #[test]
    fn median_of_small_tally() {
        let f = WireFactory::new(BigUint::from(251u32));
        // cumulative 1,3,6,7 out of total 7; half = 3; first prefix > 3 is index 2 (value 6).
        let list = f.variable_list([1, 2, 3, 1]);
        let m = get_median(&f, &list, 6).unwrap();
        assert_eq!(m.to_biguint(), BigUint::from(2u32));
    }
}
