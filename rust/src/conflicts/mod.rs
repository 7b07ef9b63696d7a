//! Conflict classifiers.
//!
//! Time-off conflicts are judged by calendar day; schedule conflicts (direct
//! overlaps and rest-gap violations) by instant.

mod schedule;
mod time_off;

pub use schedule::{
    classify_assignment, summarize_schedule_conflicts, ClassifiedConflict, ConflictKind,
    ScheduleConflictInfo,
};
pub use time_off::{find_time_off_conflicts, request_range, TimeOffStatus};
