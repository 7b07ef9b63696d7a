//! Confirmation gate for assigning a ranked candidate.
//!
//! Blocking conflicts (time off, direct overlap) only surface when the caller
//! shows all candidates. Picking one of those must go through an explicit
//! acknowledge-and-proceed step. Gap violations are warnings and are left to
//! the caller.

use thiserror::Error;

use crate::models::TimeOffRequest;

use super::engine::RankedCandidate;

/// Why a selection needs confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockingReason {
    TimeOff { requests: Vec<TimeOffRequest> },
    DirectOverlap { count: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionDecision {
    AssignNow,
    ConfirmRequired(Vec<BlockingReason>),
}

impl SelectionDecision {
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Self::ConfirmRequired(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Assigning {candidate_id} requires acknowledging {reasons} blocking conflict(s)")]
    NotAcknowledged { candidate_id: String, reasons: usize },
}

pub fn evaluate_selection(candidate: &RankedCandidate) -> SelectionDecision {
    let mut reasons = Vec::new();

    if candidate.has_time_off_conflict {
        reasons.push(BlockingReason::TimeOff {
            requests: candidate.time_off_conflicts.clone(),
        });
    }

    let overlaps = candidate.schedule_conflict_info.direct_overlaps;
    if overlaps > 0 {
        reasons.push(BlockingReason::DirectOverlap { count: overlaps });
    }

    if reasons.is_empty() {
        SelectionDecision::AssignNow
    } else {
        SelectionDecision::ConfirmRequired(reasons)
    }
}

/// Allow the assignment unless it needs confirmation and none was given.
pub fn authorize_selection(
    candidate: &RankedCandidate,
    acknowledged: bool,
) -> Result<(), SelectionError> {
    match evaluate_selection(candidate) {
        SelectionDecision::AssignNow => Ok(()),
        SelectionDecision::ConfirmRequired(_) if acknowledged => Ok(()),
        SelectionDecision::ConfirmRequired(reasons) => Err(SelectionError::NotAcknowledged {
            candidate_id: candidate.id().to_string(),
            reasons: reasons.len(),
        }),
    }
}
