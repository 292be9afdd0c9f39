//! Votes: the per-round ledger and the tally engine.

pub mod ledger;
pub mod tally;

pub use ledger::{RevokeRejection, Vote, VoteLedger};
pub use tally::{TallyEntry, TallyResult, VoteTally};
