//! Time-off conflict test.

use chrono::NaiveDate;

use crate::intervals::{intervals_overlap, parse_calendar_day};
use crate::log_debug;
use crate::models::{JobWindow, TimeOffRequest};

/// Lifecycle state of a time-off request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Other(String),
}

impl TimeOffStatus {
    /// Parse a raw status, case-insensitively. Unknown values are kept as `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" | "denied" => Self::Rejected,
            "cancelled" | "canceled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    /// Only pending and approved requests can block an assignment.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

/// Inclusive calendar-day range of a request, or `None` if a date is missing,
/// unparseable, or the range is inverted.
pub fn request_range(request: &TimeOffRequest) -> Option<(NaiveDate, NaiveDate)> {
    let start = parse_calendar_day(request.start_date.as_deref()?)?;
    let end = parse_calendar_day(request.end_date.as_deref()?)?;
    if start > end {
        return None;
    }
    Some((start, end))
}

/// All active time-off requests of `candidate_id` that overlap the job's days.
///
/// Rows for other users are ignored; malformed rows are skipped.
pub fn find_time_off_conflicts<'a, I>(
    candidate_id: &str,
    job: &JobWindow,
    requests: I,
    verbosity: u8,
) -> Vec<&'a TimeOffRequest>
where
    I: IntoIterator<Item = &'a TimeOffRequest>,
{
    let job_days = job.calendar_range();

    requests
        .into_iter()
        .filter(|r| r.user_id == candidate_id)
        .filter(|r| TimeOffStatus::parse(&r.status).is_active())
        .filter(|r| match request_range(r) {
            Some(range) => intervals_overlap(range, job_days),
            None => {
                log_debug!(
                    verbosity,
                    "Skipping time-off row for {} with unusable dates {:?}..{:?}",
                    r.user_id,
                    r.start_date,
                    r.end_date
                );
                false
            }
        })
        .collect()
}
