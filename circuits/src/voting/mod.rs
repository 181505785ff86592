//! Ballot validity predicates (C12), election-tally evaluation gates
//! (C13), and the Instant-Runoff subsystem (C14).

pub mod ballots;
pub mod evaluation;
pub mod irv;
