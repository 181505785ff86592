//! Ballot validity predicates (C12): one `assert_*`/`verify_*` pair per
//! ballot type, plus the tournament-style Borda point computation they
//! share with the evaluation gates.
//!
//! Every predicate here follows the same shape: `assert_*` raises
//! [`crate::error::CircuitError`] on the first violated constraint,
//! `verify_*` folds the same indicators together with
//! [`bits::and_multiple`] and never fails.

use crate::error::Result;
use crate::factory::WireFactory;
use crate::gates::{assert, bits, comparison};
use crate::wire::Wire;

fn sum(factory: &WireFactory, wires: &[Wire]) -> Wire {
    wires.iter().fold(factory.constant(0), |acc, w| acc.add(w))
}

/// Asserts every entry is a bit and exactly one is set.
pub fn assert_single_choice(factory: &WireFactory, ballot: &[Wire]) -> Result<()> {
    for w in ballot {
        assert::assert_bit(w)?;
    }
    let one = factory.one();
    assert::assert_equal(factory, ballot, std::slice::from_ref(&one))
}

/// Indicator: 1 iff every entry is a bit and exactly one is set.
pub fn verify_single_choice(factory: &WireFactory, ballot: &[Wire]) -> Wire {
    let mut valid: Vec<Wire> = ballot.iter().map(|w| bits::verify_bit(factory, w)).collect();
    valid.push(comparison::eq(factory, &sum(factory, ballot), &factory.one()));
    bits::and_multiple(factory, &valid)
}

/// Asserts every entry is a bit, optionally bounding the number set via
/// `assert_gt(max_choices, sum(ballot), bits)`.
pub fn assert_multiple_choice(
    factory: &WireFactory,
    ballot: &[Wire],
    max_choices: Option<(&Wire, u32)>,
) -> Result<()> {
    for w in ballot {
        assert::assert_bit(w)?;
    }
    if let Some((max_choices, bits_width)) = max_choices {
        let n_choices = sum(factory, ballot);
        assert::assert_gt(factory, max_choices, &n_choices, bits_width)?;
    }
    Ok(())
}

/// Indicator variant of [`assert_multiple_choice`].
pub fn verify_multiple_choice(
    factory: &WireFactory,
    ballot: &[Wire],
    max_choices: Option<(&Wire, u32)>,
) -> Result<Wire> {
    let mut valid: Vec<Wire> = ballot.iter().map(|w| bits::verify_bit(factory, w)).collect();
    if let Some((max_choices, bits_width)) = max_choices {
        let n_choices = sum(factory, ballot);
        valid.push(comparison::gt(factory, max_choices, &n_choices, bits_width)?);
    }
    Ok(bits::and_multiple(factory, &valid))
}

/// One step of the Borda tie-skipping "fuel" walk shared by the assert and
/// verify variants: returns `(xor_indicator, updated_fuel)`.
fn borda_step(
    factory: &WireFactory,
    ballot: &[Wire],
    point: &Wire,
    fuel: &Wire,
) -> (Wire, Wire) {
    let n_occ = crate::gates::list::get_n_occurences(factory, ballot, point);
    let ind_fuel_zero = comparison::eq_zero(factory, fuel);
    let ind_n_occ_zero = comparison::eq_zero(factory, &n_occ);
    let xor_val = bits::xor(factory, &ind_fuel_zero, &ind_n_occ_zero);

    let mut next_fuel = crate::gates::branching::if_then_else(&ind_fuel_zero, fuel, &fuel.sub_const(1));
    next_fuel = crate::gates::branching::if_then_else(&ind_n_occ_zero, &next_fuel, &next_fuel.add(&n_occ).sub_const(1));
    (xor_val, next_fuel)
}

/// Asserts a Borda ballot against its descending point list: awarding a
/// point value to `k` voters blocks the next `k-1` point values from being
/// awarded at all.
pub fn assert_borda(factory: &WireFactory, ballot: &[Wire], ordered_points: &[Wire]) -> Result<()> {
    let mut fuel = factory.constant(0);
    for point in ordered_points {
        let (xor_val, next_fuel) = borda_step(factory, ballot, point, &fuel);
        xor_val.assert_equal(&factory.one())?;
        fuel = next_fuel;
    }
    Ok(())
}

/// Indicator variant of [`assert_borda`].
pub fn verify_borda(factory: &WireFactory, ballot: &[Wire], ordered_points: &[Wire]) -> Wire {
    let mut fuel = factory.constant(0);
    let mut valid = Vec::with_capacity(ordered_points.len());
    for point in ordered_points {
        let (xor_val, next_fuel) = borda_step(factory, ballot, point, &fuel);
        valid.push(comparison::eq(factory, &xor_val, &factory.one()));
        fuel = next_fuel;
    }
    bits::and_multiple(factory, &valid)
}

/// Asserts every ballot entry is one of the possible `grades`.
pub fn assert_majority_judgement(factory: &WireFactory, ballot: &[Wire], grades: &[Wire]) -> Result<()> {
    for choice in ballot {
        let ind = crate::gates::list::is_value_in_list(factory, choice, grades);
        ind.assert_equal(&factory.one())?;
    }
    Ok(())
}

/// Indicator variant of [`assert_majority_judgement`].
pub fn verify_majority_judgement(factory: &WireFactory, ballot: &[Wire], grades: &[Wire]) -> Wire {
    let valid: Vec<Wire> = ballot
        .iter()
        .map(|choice| crate::gates::list::is_value_in_list(factory, choice, grades))
        .collect();
    bits::and_multiple(factory, &valid)
}

/// Asserts an `n x n` Condorcet preference matrix: off-diagonal entries are
/// bits, each unordered pair sums to exactly 1 (antisymmetry ⇒ a total
/// order), and no triple violates transitivity.
pub fn assert_condorcet(factory: &WireFactory, matrix: &[Vec<Wire>]) -> Result<()> {
    let n = matrix.len();
    for (i, row) in matrix.iter().enumerate() {
        for (j, entry) in row.iter().enumerate() {
            if i == j {
                continue;
            }
            assert::assert_bit(entry)?;
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            matrix[i][j].add(&matrix[j][i]).assert_equal(&factory.one())?;
            for k in 0..n {
                if k == i || k == j {
                    continue;
                }
                let ind_false = bits::and(&matrix[i][j], &bits::and(&matrix[j][k], &factory.one().sub(&matrix[i][k])));
                ind_false.assert_equal(&factory.constant(0))?;
            }
        }
    }
    Ok(())
}

/// Indicator variant of [`assert_condorcet`].
pub fn verify_condorcet(factory: &WireFactory, matrix: &[Vec<Wire>]) -> Wire {
    let n = matrix.len();
    let mut valid = Vec::new();
    for (i, row) in matrix.iter().enumerate() {
        for (j, entry) in row.iter().enumerate() {
            if i == j {
                continue;
            }
            valid.push(bits::verify_bit(factory, entry));
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            valid.push(comparison::eq(factory, &matrix[i][j].add(&matrix[j][i]), &factory.one()));
            for k in 0..n {
                if k == i || k == j {
                    continue;
                }
                let ind_false = bits::and(&matrix[i][j], &bits::and(&matrix[j][k], &factory.one().sub(&matrix[i][k])));
                valid.push(comparison::eq_zero(factory, &ind_false));
            }
        }
    }
    bits::and_multiple(factory, &valid)
}

/// Tournament-style Borda points for a per-choice ranking: `2 * (number of
/// choices ranked strictly below this one) + indicator(more than one other
/// choice shares this rank)`. Zero is the lowest rank.
pub fn compute_tournament_borda_points(factory: &WireFactory, ranking: &[Wire], bits_width: u32) -> Result<Vec<Wire>> {
    let mut points = Vec::with_capacity(ranking.len());
    for (i, ranking_val) in ranking.iter().enumerate() {
        let mut n_strictly_greater = factory.constant(0);
        let mut n_eq = factory.constant(0);
        for (j, comp_val) in ranking.iter().enumerate() {
            if j == i {
                continue;
            }
            let gt_ind = comparison::gt(factory, &ranking_val.sub_const(1), comp_val, bits_width)?;
            n_strictly_greater = n_strictly_greater.add(&gt_ind);
            n_eq = n_eq.add(&comparison::eq(factory, ranking_val, comp_val));
        }
        let ind_shared_tie = comparison::gt(factory, &n_eq, &factory.one(), bits_width)?;
        points.push(n_strictly_greater.mul_const(2).add(&ind_shared_tie));
    }
    Ok(points)
}
