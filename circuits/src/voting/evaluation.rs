//! Election-tally evaluation gates (C13): most-votes, threshold, best-n,
//! the Smith set, and the iterative Majority-Judgement winner.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Result;
use crate::factory::WireFactory;
use crate::gates::{assert, bits, branching, comparison, list};
use crate::wire::Wire;

/// Indicator for each choice: did it receive the most votes.
pub fn compute_most_votes(factory: &WireFactory, tally: &[Wire], bits_width: u32) -> Result<Vec<Wire>> {
    Ok(list::maximum(factory, tally, bits_width)?.1)
}

/// Indicator for each choice: did it receive strictly more than `threshold`
/// votes.
pub fn compute_threshold(factory: &WireFactory, tally: &[Wire], threshold: &Wire, bits_width: u32) -> Result<Vec<Wire>> {
    tally.iter().map(|votes| comparison::gt(factory, votes, threshold, bits_width)).collect()
}

fn sum_wires(factory: &WireFactory, wires: &[Wire]) -> Wire {
    wires.iter().fold(factory.constant(0), |acc, w| acc.add(w))
}

/// Indicator for each choice: is it among the `n_best` choices with the
/// most votes. Witnesses the lowest threshold that still admits at least
/// `n_best` choices, then asserts both that bound and its tightness
/// (one more vote would admit fewer than `n_best`).
pub fn compute_best_n(factory: &WireFactory, tally: &[Wire], n_best: &Wire, bits_width: u32) -> Result<Vec<Wire>> {
    let values: Vec<BigUint> = tally.iter().map(|w| w.to_biguint()).collect();
    let n_best_val = n_best.to_biguint();
    let mut max_threshold = BigUint::zero();
    for v in &values {
        let n_choices = BigUint::from(values.iter().filter(|x| **x >= *v).count());
        if n_choices >= n_best_val && *v > max_threshold {
            max_threshold = v.clone();
        }
    }
    let threshold = factory.variable_big(max_threshold.clone());
    let threshold_plus_one = factory.variable_big(&max_threshold + 1u32);

    let ind_best_n = compute_threshold(factory, tally, &threshold, bits_width)?;
    let ind_best_n_plus_one = compute_threshold(factory, tally, &threshold_plus_one, bits_width)?;

    assert::assert_gt(factory, &sum_wires(factory, &ind_best_n), n_best, bits_width)?;
    let sum_plus_one = sum_wires(factory, &ind_best_n_plus_one);
    assert::assert_gt(factory, n_best, &sum_plus_one.add_const(1), bits_width)?;

    Ok(ind_best_n)
}

/// Computes the Smith set: the smallest non-empty set of choices who
/// collectively beat every choice outside it. `tally[i][j]` is the number
/// of ballots preferring `i` over `j`.
pub fn smith_set(factory: &WireFactory, tally: &[Vec<Wire>], bits_width: u32) -> Result<Vec<Wire>> {
    let n = tally.len();
    let mut won: Vec<Vec<Option<Wire>>> = (0..n).map(|_| vec![None; n]).collect();
    let mut won_duels = Vec::with_capacity(n);

    for choice in 0..n {
        let mut n_won_duels = factory.constant(0);
        for other in 0..n {
            if other == choice {
                continue;
            }
            let ind_won = comparison::gt(factory, &tally[choice][other], &tally[other][choice], bits_width)?;
            won[choice][other] = Some(ind_won.clone());
            n_won_duels = branching::if_then_else(&ind_won, &n_won_duels.add_const(1), &n_won_duels);
        }
        won_duels.push(n_won_duels);
    }

    let (_, mut ind_smith_set) = list::maximum(factory, &won_duels, n as u32)?;

    for _ in 0..n.saturating_sub(1) {
        for choice in 0..n {
            for other in 0..n {
                if other == choice {
                    continue;
                }
                let ind_won = won[choice][other].as_ref().expect("filled above for every off-diagonal pair");
                let new_ind = bits::and(&ind_smith_set[other], ind_won);
                ind_smith_set[choice] = branching::if_then_else(&new_ind, &factory.one(), &ind_smith_set[choice]);
            }
        }
    }

    Ok(ind_smith_set)
}

/// Computes the Majority-Judgement winner(s) from per-choice cumulative
/// grade tallies (`tally[i][g]` = votes for choice `i` at grade `g`, grade
/// `0` best). Winners start as those sharing the best (lowest) median
/// grade, then an iterative p/q tie-break shifts the comparison window by
/// one grade per round until a unique winner (or an exhausted round
/// budget) settles the set.
pub fn compute_majority_judgement(factory: &WireFactory, tally: &[Vec<Wire>], n_votes: u64, bits_width: u32) -> Result<Vec<Wire>> {
    let n_choices = tally.len();
    let n_votes_halved = factory.constant((n_votes / 2) as i64);

    let median_grades: Vec<Wire> = tally
        .iter()
        .map(|agg_grades| list::get_median(factory, agg_grades, bits_width))
        .collect::<Result<_>>()?;
    let best_median = list::get_minimum_value(factory, &median_grades, bits_width)?;
    let mut ind_winner: Vec<Wire> = median_grades.iter().map(|m| comparison::eq(factory, m, &best_median)).collect();

    let mut i_plus = factory.one();
    let mut i_minus = factory.one();

    let ind_better_than_median = list::get_list_with_up_to_index_set(factory, &best_median.sub_const(1), n_choices, bits_width)?;
    let ind_worse_than_median: Vec<Wire> = list::get_list_with_up_to_index_set(factory, &best_median, n_choices, bits_width)?
        .iter()
        .map(|w| factory.one().sub(w))
        .collect();

    let mut ps = Vec::with_capacity(n_choices);
    let mut qs = Vec::with_capacity(n_choices);
    let mut ms_minus = Vec::with_capacity(n_choices);
    let mut ms_plus = Vec::with_capacity(n_choices);
    for agg_grades in tally {
        let p = weighted_sum(factory, &ind_better_than_median, agg_grades);
        let q = weighted_sum(factory, &ind_worse_than_median, agg_grades);
        ms_minus.push(n_votes_halved.sub(&p));
        ms_plus.push(n_votes_halved.sub(&q));
        ps.push(p);
        qs.push(q);
    }

    for round in 0..n_choices {
        log::debug!("majority-judgement tie-break round {round}: i_plus={:?}, i_minus={:?}", i_plus.to_biguint(), i_minus.to_biguint());
        let mut sis = Vec::with_capacity(n_choices);
        for i in 0..n_choices {
            let comp = comparison::lt(factory, &ms_minus[i], &ms_plus[i], bits_width)?;
            let inner = branching::if_then_else(&comp, &ps[i], &qs[i].neg());
            sis.push(ind_winner[i].mul(&inner.add(&n_votes_halved)));
        }
        let s_max = list::get_maximum_value(factory, &sis, bits_width)?;

        ind_winner = ind_winner
            .iter()
            .enumerate()
            .map(|(i, ind)| branching::if_then_else(ind, &comparison::eq(factory, &sis[i], &s_max), ind))
            .collect();

        let ind_s_max_gt_zero = comparison::gt(factory, &s_max, &n_votes_halved, bits_width)?;

        let ms_plus_sgtzero: Vec<Wire> = (0..n_choices).map(|i| ms_plus[i].sub(&ms_minus[i])).collect();
        let ms_minus_sgtzero: Vec<Wire> = (0..n_choices)
            .map(|i| list::get_index_at(factory, &tally[i], &best_median.sub(&i_minus)))
            .collect();
        let ps_sgtzero: Vec<Wire> = (0..n_choices).map(|i| ps[i].sub(&ms_minus_sgtzero[i])).collect();
        let i_minus_sgtzero = i_minus.add_const(1);

        let ms_minus_slzero: Vec<Wire> = (0..n_choices).map(|i| ms_minus[i].sub(&ms_plus[i])).collect();
        let ms_plus_slzero: Vec<Wire> = (0..n_choices)
            .map(|i| list::get_index_at(factory, &tally[i], &best_median.add(&i_plus)))
            .collect();
        let qs_slzero: Vec<Wire> = (0..n_choices).map(|i| qs[i].sub(&ms_plus_slzero[i])).collect();
        let i_plus_sgtzero = i_plus.add_const(1);

        ms_plus = (0..n_choices)
            .map(|i| branching::if_then_else(&ind_s_max_gt_zero, &ms_plus_sgtzero[i], &ms_plus_slzero[i]))
            .collect();
        ms_minus = (0..n_choices)
            .map(|i| branching::if_then_else(&ind_s_max_gt_zero, &ms_minus_sgtzero[i], &ms_minus_slzero[i]))
            .collect();
        ps = (0..n_choices).map(|i| branching::if_then_else(&ind_s_max_gt_zero, &ps_sgtzero[i], &ps[i])).collect();
        qs = (0..n_choices).map(|i| branching::if_then_else(&ind_s_max_gt_zero, &qs[i], &qs_slzero[i])).collect();
        i_minus = branching::if_then_else(&ind_s_max_gt_zero, &i_minus_sgtzero, &i_minus);
        i_plus = branching::if_then_else(&ind_s_max_gt_zero, &i_plus, &i_plus_sgtzero);
    }

    Ok(ind_winner)
}

fn weighted_sum(factory: &WireFactory, indicators: &[Wire], values: &[Wire]) -> Wire {
    indicators.iter().zip(values).fold(factory.constant(0), |acc, (i, v)| acc.add(&i.mul(v)))
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;

    fn field(p: u32) -> WireFactory {
        WireFactory::new(BigUint::from(p))
    }

    #[test]
    fn most_votes_matches_maximum() {
        let f = field(251);
        let tally = f.variable_list([3, 9, 9, 2]);
        let ind = compute_most_votes(&f, &tally, 5).unwrap();
        let values: Vec<_> = ind.iter().map(|w| w.to_biguint()).collect();
        assert_eq!(values, vec![0u32.into(), 1u32.into(), 1u32.into(), 0u32.into()]);
    }

    #[test]
    fn threshold_flags_choices_above_cutoff() {
        let f = field(251);
        let tally = f.variable_list([1, 5, 10]);
        let ind = compute_threshold(&f, &tally, &f.variable(4), 5).unwrap();
        let values: Vec<_> = ind.iter().map(|w| w.to_biguint()).collect();
        assert_eq!(values, vec![0u32.into(), 1u32.into(), 1u32.into()]);
    }

    #[test]
    fn best_n_picks_the_top_two() {
        let f = field(251);
        let tally = f.variable_list([10, 7, 7, 3]);
        let ind = compute_best_n(&f, &tally, &f.variable(2), 5).unwrap();
        let values: Vec<_> = ind.iter().map(|w| w.to_biguint()).collect();
        // top two by vote count are 10 and the two tied at 7 (three
        // choices qualify since the cutoff can't split the tie).
        assert_eq!(values, vec![1u32.into(), 1u32.into(), 1u32.into(), 0u32.into()]);
    }

    #[test]
    fn smith_set_is_unique_condorcet_winner_when_one_exists() {
        let f = field(251);
        // choice 0 beats both 1 and 2 head to head; smith set = {0}.
        let tally = vec![
            f.variable_list([0, 6, 6]),
            f.variable_list([4, 0, 6]),
            f.variable_list([4, 4, 0]),
        ];
        let ind = smith_set(&f, &tally, 5).unwrap();
        let values: Vec<_> = ind.iter().map(|w| w.to_biguint()).collect();
        assert_eq!(values, vec![1u32.into(), 0u32.into(), 0u32.into()]);
    }

    #[test]
    fn majority_judgement_scenario_from_reference_tally() {
        let f = field(251);
        let tally = vec![
            f.variable_list([1, 2, 2, 1]),
            f.variable_list([2, 1, 3, 0]),
            f.variable_list([0, 6, 0, 0]),
        ];
        let winners = compute_majority_judgement(&f, &tally, 6, 5).unwrap();
        let values: Vec<_> = winners.iter().map(|w| w.to_biguint()).collect();
        assert_eq!(values, vec![0u32.into(), 0u32.into(), 1u32.into()]);
    }
}
