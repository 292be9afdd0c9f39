//! Season orchestration: the phase state machine and what it emits.

pub mod nomination;
pub mod phase;
pub mod record;
pub mod snapshot;
pub mod state;
pub mod transition;

pub use nomination::{NominationRejection, NominationSet};
pub use phase::Phase;
pub use record::SeasonRecord;
pub use snapshot::{ActiveCompetition, SeasonSnapshot};
pub use state::{Season, SeasonRules};
pub use transition::{Announcement, Outcome, Transition};
