//! Candidate ranking for a job.
//!
//! Combines time-off, schedule and preference signals into a sort priority
//! and a display colour, splits out the default-visible subset, and gates
//! selection of blocked candidates behind an explicit confirmation.

mod engine;
mod memo;
pub mod priority;
mod selection;
mod source;

pub use engine::{
    rank_candidates, DataGaps, RankedCandidate, RankingEngine, RankingInputs, RankingOutcome,
};
pub use memo::{input_fingerprint, RankingMemo};
pub use priority::{background_color, sort_priority, BackgroundColor, RankingSignals};
pub use selection::{
    authorize_selection, evaluate_selection, BlockingReason, SelectionDecision, SelectionError,
};
pub use source::{gather_inputs, ScheduleDataSource, SourceError};
