//! Input records consumed by the ranking engine.
//!
//! Raw rows arrive from REST collaborators with string-typed dates and enum
//! values; they are kept raw here and parsed lazily by the classifiers so
//! that one bad row is dropped instead of failing the whole ranking.

use chrono::{DateTime, FixedOffset, NaiveDate};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::intervals::{calendar_day, parse_instant};

/// Errors constructing a [`JobWindow`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Unparseable job {field} timestamp: {raw:?}")]
    Unparseable { field: &'static str, raw: String },
    #[error("Job window must end after it starts (start={start}, end={end})")]
    NotIncreasing { start: String, end: String },
}

/// A worker eligible for assignment.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub display_name: String,
}

#[pymethods]
impl Candidate {
    #[new]
    pub fn new(id: String, display_name: String) -> Self {
        Self { id, display_name }
    }

    fn __repr__(&self) -> String {
        format!(
            "Candidate(id={:?}, display_name={:?})",
            self.id, self.display_name
        )
    }
}

/// The interval a job occupies. Invariant: `start < end`.
#[pyclass]
#[derive(Clone, Debug)]
pub struct JobWindow {
    #[pyo3(get)]
    pub start: DateTime<FixedOffset>,
    #[pyo3(get)]
    pub end: DateTime<FixedOffset>,
}

impl JobWindow {
    pub fn try_new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::NotIncreasing {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Build a window from raw timestamp strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, WindowError> {
        let start_dt = parse_instant(start).ok_or_else(|| WindowError::Unparseable {
            field: "start",
            raw: start.to_string(),
        })?;
        let end_dt = parse_instant(end).ok_or_else(|| WindowError::Unparseable {
            field: "end",
            raw: end.to_string(),
        })?;
        Self::try_new(start_dt, end_dt)
    }

    /// Inclusive calendar-day range used for time-off comparisons.
    pub fn calendar_range(&self) -> (NaiveDate, NaiveDate) {
        (calendar_day(&self.start), calendar_day(&self.end))
    }
}

#[pymethods]
impl JobWindow {
    #[new]
    fn py_new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> PyResult<Self> {
        Self::try_new(start, end).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn start_day(&self) -> NaiveDate {
        calendar_day(&self.start)
    }

    #[getter]
    fn end_day(&self) -> NaiveDate {
        calendar_day(&self.end)
    }

    fn __repr__(&self) -> String {
        format!(
            "JobWindow(start={}, end={})",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

// Equality and hashing include the offsets: two windows at the same instants
// can still cover different calendar days.
impl PartialEq for JobWindow {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.start.offset() == other.start.offset()
            && self.end.offset() == other.end.offset()
    }
}

impl Eq for JobWindow {}

impl Hash for JobWindow {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.start.offset().local_minus_utc().hash(state);
        self.end.offset().local_minus_utc().hash(state);
    }
}

/// A time-off request row. Dates are day-granular strings (`YYYY-MM-DD`).
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimeOffRequest {
    #[pyo3(get, set)]
    pub user_id: String,
    #[pyo3(get, set)]
    pub start_date: Option<String>,
    #[pyo3(get, set)]
    pub end_date: Option<String>,
    /// Raw status: "pending", "approved", "rejected", ...
    #[pyo3(get, set)]
    pub status: String,
    #[pyo3(get, set)]
    pub id: Option<String>,
    #[pyo3(get, set)]
    pub reason: Option<String>,
}

#[pymethods]
impl TimeOffRequest {
    #[new]
    #[pyo3(signature = (user_id, start_date, end_date, status, id=None, reason=None))]
    pub fn new(
        user_id: String,
        start_date: Option<String>,
        end_date: Option<String>,
        status: String,
        id: Option<String>,
        reason: Option<String>,
    ) -> Self {
        Self {
            user_id,
            start_date,
            end_date,
            status,
            id,
            reason,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TimeOffRequest(user_id={:?}, start={:?}, end={:?}, status={:?})",
            self.user_id, self.start_date, self.end_date, self.status
        )
    }
}

/// Another commitment of a worker, as reported by the availability check.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScheduledAssignment {
    #[pyo3(get, set)]
    pub user_id: String,
    #[pyo3(get, set)]
    pub other_job_start: Option<String>,
    #[pyo3(get, set)]
    pub other_job_end: Option<String>,
    #[pyo3(get, set)]
    pub other_job_id: Option<String>,
}

#[pymethods]
impl ScheduledAssignment {
    #[new]
    #[pyo3(signature = (user_id, other_job_start, other_job_end, other_job_id=None))]
    pub fn new(
        user_id: String,
        other_job_start: Option<String>,
        other_job_end: Option<String>,
        other_job_id: Option<String>,
    ) -> Self {
        Self {
            user_id,
            other_job_start,
            other_job_end,
            other_job_id,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduledAssignment(user_id={:?}, start={:?}, end={:?})",
            self.user_id, self.other_job_start, self.other_job_end
        )
    }
}

/// Response of the availability-check collaborator.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AvailabilityReport {
    #[pyo3(get, set)]
    pub conflicts: Vec<ScheduledAssignment>,
    /// When false, only direct overlaps are classified.
    #[pyo3(get, set)]
    pub gap_checking_enabled: bool,
}

impl AvailabilityReport {
    /// Report used when nothing is known about other assignments.
    pub fn empty() -> Self {
        Self {
            conflicts: Vec::new(),
            gap_checking_enabled: true,
        }
    }
}

#[pymethods]
impl AvailabilityReport {
    #[new]
    #[pyo3(signature = (conflicts=None, gap_checking_enabled=true))]
    pub fn new(conflicts: Option<Vec<ScheduledAssignment>>, gap_checking_enabled: bool) -> Self {
        Self {
            conflicts: conflicts.unwrap_or_default(),
            gap_checking_enabled,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AvailabilityReport(conflicts={}, gap_checking_enabled={})",
            self.conflicts.len(),
            self.gap_checking_enabled
        )
    }
}

/// A company/site/client preference row for one worker.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PreferenceRecord {
    /// Company, site or client the preference was recorded against.
    #[pyo3(get, set)]
    pub subject_id: String,
    #[pyo3(get, set)]
    pub worker_id: String,
    /// Raw type: "preferred" or "not_preferred".
    #[pyo3(get, set)]
    pub preference_type: String,
    #[pyo3(get, set)]
    pub is_mandatory: bool,
    #[pyo3(get, set)]
    pub reason: Option<String>,
}

#[pymethods]
impl PreferenceRecord {
    #[new]
    #[pyo3(signature = (subject_id, worker_id, preference_type, is_mandatory=false, reason=None))]
    pub fn new(
        subject_id: String,
        worker_id: String,
        preference_type: String,
        is_mandatory: bool,
        reason: Option<String>,
    ) -> Self {
        Self {
            subject_id,
            worker_id,
            preference_type,
            is_mandatory,
            reason,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PreferenceRecord(subject_id={:?}, worker_id={:?}, type={:?}, mandatory={})",
            self.subject_id, self.worker_id, self.preference_type, self.is_mandatory
        )
    }
}

/// Preference rows for the job's company, site and client.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScopePreferences {
    #[pyo3(get, set)]
    pub company: Vec<PreferenceRecord>,
    #[pyo3(get, set)]
    pub site: Vec<PreferenceRecord>,
    #[pyo3(get, set)]
    pub client: Vec<PreferenceRecord>,
}

#[pymethods]
impl ScopePreferences {
    #[new]
    #[pyo3(signature = (company=None, site=None, client=None))]
    pub fn new(
        company: Option<Vec<PreferenceRecord>>,
        site: Option<Vec<PreferenceRecord>>,
        client: Option<Vec<PreferenceRecord>>,
    ) -> Self {
        Self {
            company: company.unwrap_or_default(),
            site: site.unwrap_or_default(),
            client: client.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScopePreferences(company={}, site={}, client={})",
            self.company.len(),
            self.site.len(),
            self.client.len()
        )
    }
}
