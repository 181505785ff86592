//! The Instant-Runoff voting subsystem (C14): the ballot manager indexed
//! by ranking ordering, pluggable choice eliminators, and the round-by-
//! round election driver built on top of them.

use std::collections::HashMap;

use itertools::Itertools;

use crate::error::{CircuitError, Result};
use crate::factory::WireFactory;
use crate::gates::{bits, branching, comparison, list};
use crate::wire::Wire;

const CHOICE_SEPARATOR: &str = "-";

fn ordering_to_key(ordering: &[usize]) -> String {
    ordering.iter().map(|c| c.to_string()).join(CHOICE_SEPARATOR)
}

/// An ordered mapping from every legal ranking ordering of `n_choices`
/// candidates (every permutation of every length `1..=n_choices`, plus the
/// empty ordering) to a wire carrying the number of ballots cast with that
/// exact ordering.
///
/// Enumeration is deterministic: longer orderings first, permutations in
/// lexicographic order within each length, the empty ordering last.
#[derive(Clone, Debug)]
pub struct BallotManager {
    n_choices: usize,
    orderings: Vec<Vec<usize>>,
    index: HashMap<String, usize>,
    counts: Vec<Wire>,
}

impl BallotManager {
    pub fn new(factory: &WireFactory, n_choices: usize) -> Self {
        let mut orderings = Vec::new();
        for k in (1..=n_choices).rev() {
            for perm in (0..n_choices).permutations(k) {
                orderings.push(perm);
            }
        }
        orderings.push(Vec::new());

        let index = orderings
            .iter()
            .enumerate()
            .map(|(i, o)| (ordering_to_key(o), i))
            .collect();
        let counts = vec![factory.constant(0); orderings.len()];
        BallotManager { n_choices, orderings, index, counts }
    }

    pub fn n_choices(&self) -> usize {
        self.n_choices
    }

    fn index_of(&self, ordering: &[usize]) -> Option<usize> {
        self.index.get(&ordering_to_key(ordering)).copied()
    }

    /// Adds `n` ballots cast with exactly this ordering. Fails if the
    /// ordering repeats a choice or names one outside `0..n_choices`.
    pub fn add_votes_for_ordering(&mut self, ordering: &[usize], n: &Wire) -> Result<()> {
        let mut seen = vec![false; self.n_choices];
        for &c in ordering {
            if c >= self.n_choices || seen[c] {
                return Err(CircuitError::invalid(format!("illegal IRV ordering {ordering:?}")));
            }
            seen[c] = true;
        }
        let idx = self.index_of(ordering).expect("every legal ordering has a key");
        self.counts[idx] = self.counts[idx].add(n);
        Ok(())
    }

    /// Sum of all ballot counts whose ordering begins with `first_choice`.
    pub fn get_n_ballots_with_first_choice(&self, factory: &WireFactory, first_choice: usize) -> Wire {
        self.orderings
            .iter()
            .zip(&self.counts)
            .filter(|(ordering, _)| ordering.first() == Some(&first_choice))
            .fold(factory.constant(0), |acc, (_, count)| acc.add(count))
    }

    /// One entry per choice: [`Self::get_n_ballots_with_first_choice`].
    pub fn get_votes_per_choice(&self, factory: &WireFactory) -> Vec<Wire> {
        (0..self.n_choices)
            .map(|c| self.get_n_ballots_with_first_choice(factory, c))
            .collect()
    }

    /// Folds eliminated choices' ballots into their next-preferred
    /// ordering: for every stored ordering `o` and every choice `c` not in
    /// `o` flagged by `inds_elim`, adds `inds_elim[c] * count("c-o")` to
    /// `count(o)`. `inds_elim` carries only the choices eliminated in the
    /// current round, not the cumulative elimination state.
    pub fn update_votes_on_elimination(&mut self, factory: &WireFactory, inds_elim: &[Wire]) -> Result<()> {
        let old_counts = self.counts.clone();
        for idx in 0..self.orderings.len() {
            let ordering = self.orderings[idx].clone();
            let mut addition = factory.constant(0);
            for pos_choice in 0..self.n_choices {
                if ordering.contains(&pos_choice) {
                    continue;
                }
                let mut previous = Vec::with_capacity(ordering.len() + 1);
                previous.push(pos_choice);
                previous.extend_from_slice(&ordering);
                if let Some(prev_idx) = self.index_of(&previous) {
                    addition = addition.add(&inds_elim[pos_choice].mul(&old_counts[prev_idx]));
                }
            }
            self.counts[idx] = old_counts[idx].add(&addition);
        }
        Ok(())
    }
}

/// Computes, for each choice, an indicator set if the choice is not
/// already eliminated and tied for the fewest votes among those that
/// aren't. Shared by every [`ChoiceEliminator`]: eliminated choices get an
/// adjusted vote value of `-1`, which wraps to a residue far larger than
/// any real tally, so they are never (re-)selected as the minimum.
fn compute_min_indicator(factory: &WireFactory, ind_elim: &[Wire], votes_per_choice: &[Wire], bits_width: u32) -> Result<Vec<Wire>> {
    let adjusted: Vec<Wire> = votes_per_choice
        .iter()
        .zip(ind_elim)
        .map(|(votes, elim)| votes.mul(&factory.one().sub(elim)).sub(elim))
        .collect();
    Ok(list::minimum(factory, &adjusted, bits_width)?.1)
}

/// Decides which choice(s) an IRV round eliminates. Concrete variants
/// differ only in how they break a tie among the choices sharing the
/// fewest votes.
pub trait ChoiceEliminator {
    /// Returns a bit-indicator vector with at most one `1`: the choice
    /// eliminated this round.
    fn eliminate_choice(
        &mut self,
        factory: &WireFactory,
        round: usize,
        ind_elim: &[Wire],
        votes_per_choice: &[Wire],
        bits_width: u32,
    ) -> Result<Vec<Wire>>;
}

/// Always eliminates the first (lowest-index) choice among those tied for
/// fewest votes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPossibilityEliminator;

impl ChoiceEliminator for FirstPossibilityEliminator {
    fn eliminate_choice(
        &mut self,
        factory: &WireFactory,
        _round: usize,
        ind_elim: &[Wire],
        votes_per_choice: &[Wire],
        bits_width: u32,
    ) -> Result<Vec<Wire>> {
        let ind_min = compute_min_indicator(factory, ind_elim, votes_per_choice, bits_width)?;
        Ok(bits::find_first_indicator(factory, &ind_min))
    }
}

/// New-South-Wales IRV tie-break: walks previous rounds' vote vectors in
/// reverse chronological order, then the current round's supplied
/// randomness, restricting attention each time to the still-tied
/// candidates until exactly one achieves the restricted minimum. The
/// randomness for every round must be pairwise distinct so the final
/// iteration always resolves.
#[derive(Clone, Debug)]
pub struct NswEliminator {
    randomness_per_round: Vec<Vec<Wire>>,
    votes_per_round: Vec<Vec<Wire>>,
}

impl NswEliminator {
    pub fn new(randomness_per_round: Vec<Vec<Wire>>) -> Self {
        NswEliminator { randomness_per_round, votes_per_round: Vec::new() }
    }
}

impl ChoiceEliminator for NswEliminator {
    fn eliminate_choice(
        &mut self,
        factory: &WireFactory,
        round: usize,
        ind_elim: &[Wire],
        votes_per_choice: &[Wire],
        bits_width: u32,
    ) -> Result<Vec<Wire>> {
        let ind_min = compute_min_indicator(factory, ind_elim, votes_per_choice, bits_width)?;

        let mut done = factory.constant(0);
        let mut res: Vec<Wire> = ind_min.iter().map(|_| factory.constant(0)).collect();

        let tie_break_rounds = self.votes_per_round.iter().rev().chain(std::iter::once(&self.randomness_per_round[round]));
        for votes in tie_break_rounds {
            let (min_ind, n_mins) = list::find_and_count_min_of_set_inds(factory, votes, &ind_min, bits_width)?;
            let ind_one_min = comparison::eq_zero(factory, &n_mins.sub_const(1));
            let ind_set_res = bits::and(&ind_one_min, &factory.one().sub(&done));
            done = ind_set_res.clone();
            res = min_ind
                .iter()
                .zip(&res)
                .map(|(candidate, current)| branching::if_then_else(&ind_set_res, candidate, current))
                .collect();
        }

        self.votes_per_round.push(votes_per_choice.to_vec());
        Ok(res)
    }
}

/// Drives an Instant-Runoff election: repeatedly asks its eliminator for
/// the next choice to drop, folds that choice's ballots into their next
/// preference, and accumulates the elimination indicator.
pub struct IrvDriver<E: ChoiceEliminator> {
    eliminator: E,
    ballot_manager: BallotManager,
    ind_eliminated: Vec<Wire>,
    round: usize,
}

impl<E: ChoiceEliminator> IrvDriver<E> {
    pub fn new(factory: &WireFactory, eliminator: E, ballot_manager: BallotManager) -> Self {
        let n_choices = ballot_manager.n_choices();
        IrvDriver {
            eliminator,
            ballot_manager,
            ind_eliminated: vec![factory.constant(0); n_choices],
            round: 0,
        }
    }

    pub fn ballot_manager(&mut self) -> &mut BallotManager {
        &mut self.ballot_manager
    }

    /// Runs `n_rounds` elimination rounds (defaulting to `n_choices - 1`,
    /// leaving exactly one choice standing) and returns the final
    /// elimination indicator: a `1` means the choice was eliminated.
    pub fn evaluate_election(&mut self, factory: &WireFactory, n_rounds: Option<usize>, bits_width: u32) -> Result<Vec<Wire>> {
        let n_rounds = n_rounds.unwrap_or(self.ballot_manager.n_choices() - 1);
        for _ in 0..n_rounds {
            self.evaluate_round(factory, bits_width)?;
        }
        Ok(self.ind_eliminated.clone())
    }

    fn evaluate_round(&mut self, factory: &WireFactory, bits_width: u32) -> Result<()> {
        let votes_per_choice = self.ballot_manager.get_votes_per_choice(factory);
        log::info!(
            "IRV round {}: votes per choice = {:?}",
            self.round,
            votes_per_choice.iter().map(|w| w.to_biguint()).collect::<Vec<_>>()
        );
        let inds_elim = self.eliminator.eliminate_choice(factory, self.round, &self.ind_eliminated, &votes_per_choice, bits_width)?;
        for i in 0..self.ind_eliminated.len() {
            self.ind_eliminated[i] = self.ind_eliminated[i].add(&inds_elim[i]);
        }
        self.ballot_manager.update_votes_on_elimination(factory, &inds_elim)?;
        self.round += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;

    fn field(p: u32) -> WireFactory {
        WireFactory::new(BigUint::from(p))
    }

    #[test]
    fn ballot_manager_enumerates_every_ordering_including_empty() {
        let f = field(251);
        let manager = BallotManager::new(&f, 3);
        // permutations of length 1,2,3 of {0,1,2}: 3 + 6 + 6 = 15, plus empty.
        assert_eq!(manager.orderings.len(), 16);
        assert!(manager.index_of(&[]).is_some());
        assert!(manager.index_of(&[0, 1, 2]).is_some());
        assert!(manager.index_of(&[2, 0]).is_some());
    }

    #[test]
    fn add_votes_rejects_illegal_orderings() {
        let f = field(251);
        let mut manager = BallotManager::new(&f, 3);
        assert!(manager.add_votes_for_ordering(&[0, 0, 1], &f.variable(1)).is_err());
        assert!(manager.add_votes_for_ordering(&[0, 5], &f.variable(1)).is_err());
        assert!(manager.add_votes_for_ordering(&[1, 2], &f.variable(3)).is_ok());
    }

    #[test]
    fn votes_per_choice_sums_every_ordering_with_that_first_choice() {
        let f = field(251);
        let mut manager = BallotManager::new(&f, 3);
        manager.add_votes_for_ordering(&[0, 1, 2], &f.variable(3)).unwrap();
        manager.add_votes_for_ordering(&[0, 2], &f.variable(2)).unwrap();
        manager.add_votes_for_ordering(&[1], &f.variable(1)).unwrap();
        let votes = manager.get_votes_per_choice(&f);
        assert_eq!(votes[0].to_biguint(), BigUint::from(5u32));
        assert_eq!(votes[1].to_biguint(), BigUint::from(1u32));
        assert_eq!(votes[2].to_biguint(), BigUint::from(0u32));
    }

    #[test]
    fn scenario_irv_three_choices_first_possibility_tiebreak() {
        let f = field(251);
        let mut manager = BallotManager::new(&f, 3);
        manager.add_votes_for_ordering(&[0, 1, 2], &f.variable(3)).unwrap();
        manager.add_votes_for_ordering(&[1, 2, 0], &f.variable(2)).unwrap();
        manager.add_votes_for_ordering(&[2, 1, 0], &f.variable(1)).unwrap();

        let mut driver = IrvDriver::new(&f, FirstPossibilityEliminator, manager);
        let result = driver.evaluate_election(&f, None, 5).unwrap();
        let values: Vec<_> = result.iter().map(|w| w.to_biguint()).collect();
        assert_eq!(values, vec![1u32.into(), 0u32.into(), 1u32.into()]);
    }

    #[test]
    fn nsw_eliminator_breaks_ties_using_round_randomness() {
        let f = field(251);
        let mut manager = BallotManager::new(&f, 3);
        // choices 0 and 1 tied at zero first-choice votes; choice 2 leads.
        manager.add_votes_for_ordering(&[2, 0, 1], &f.variable(5)).unwrap();

        let randomness = vec![f.variable_list([3, 7, 1])];
        let eliminator = NswEliminator::new(randomness);
        let mut driver = IrvDriver::new(&f, eliminator, manager);
        let result = driver.evaluate_election(&f, Some(1), 5).unwrap();
        let values: Vec<_> = result.iter().map(|w| w.to_biguint()).collect();
        // among the tied pair {0, 1}, the smaller randomness value (index
        // 0's 3, versus index 1's 7) is the tie-break loser.
        assert_eq!(values, vec![1u32.into(), 0u32.into(), 0u32.into()]);
    }
}
