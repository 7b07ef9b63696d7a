//! Worker eligibility and ranking for job assignment.
//!
//! Given a job window and a list of candidate workers, this crate detects
//! time-off conflicts, direct schedule overlaps and rest-gap violations,
//! classifies company/site/client preferences, and produces a stable,
//! priority-ordered candidate list plus the subset shown by default.
//!
//! The engine is a pure projection over in-memory inputs. It is usable from
//! Rust directly and is also exposed as a Python extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub mod config;
pub mod conflicts;
pub mod intervals;
pub mod logging;
pub mod models;
pub mod preferences;
pub mod ranking;

pub use config::{ConfigError, RankingConfig, DEFAULT_MINIMUM_REST_HOURS};
pub use conflicts::{
    classify_assignment, find_time_off_conflicts, summarize_schedule_conflicts,
    ClassifiedConflict, ConflictKind, ScheduleConflictInfo, TimeOffStatus,
};
pub use intervals::{has_date_overlap, parse_calendar_day, parse_instant};
pub use models::{
    AvailabilityReport, Candidate, JobWindow, PreferenceRecord, ScheduledAssignment,
    ScopePreferences, TimeOffRequest, WindowError,
};
pub use preferences::{classify_preferences, PreferenceFlags, PreferenceKind, PreferenceScope};
pub use ranking::{
    authorize_selection, evaluate_selection, gather_inputs, rank_candidates, BackgroundColor,
    BlockingReason, DataGaps, RankedCandidate, RankingEngine, RankingInputs, RankingMemo,
    RankingOutcome, ScheduleDataSource, SelectionDecision, SelectionError, SourceError,
};

/// Ranked candidate as seen from Python (read-only).
#[pyclass(name = "RankedCandidate")]
#[derive(Clone, Debug)]
pub struct PyRankedCandidate {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub display_name: String,
    #[pyo3(get)]
    pub sort_priority: i32,
    /// "success", "warning", "error" or "default"
    #[pyo3(get)]
    pub background_color: String,
    #[pyo3(get)]
    pub has_time_off_conflict: bool,
    #[pyo3(get)]
    pub time_off_conflicts: Vec<TimeOffRequest>,
    #[pyo3(get)]
    pub has_schedule_conflict: bool,
    #[pyo3(get)]
    pub has_blocking_schedule_conflict: bool,
    #[pyo3(get)]
    pub direct_overlaps: usize,
    #[pyo3(get)]
    pub gap_violations: usize,
    #[pyo3(get)]
    pub total_conflicts: usize,
    #[pyo3(get)]
    pub schedule_conflicts: Vec<ScheduledAssignment>,
    #[pyo3(get)]
    pub company_preference: Option<PreferenceRecord>,
    #[pyo3(get)]
    pub site_preference: Option<PreferenceRecord>,
    #[pyo3(get)]
    pub client_preference: Option<PreferenceRecord>,
    #[pyo3(get)]
    pub has_mandatory_not_preferred: bool,
    #[pyo3(get)]
    pub has_not_preferred: bool,
    #[pyo3(get)]
    pub has_preferred: bool,
    #[pyo3(get)]
    pub preferred_count: u8,
    /// (company, site, client) preferred flags
    #[pyo3(get)]
    pub preference_indicators: (bool, bool, bool),
    /// Selecting this candidate needs an explicit acknowledgement.
    #[pyo3(get)]
    pub requires_confirmation: bool,
}

impl From<&RankedCandidate> for PyRankedCandidate {
    fn from(ranked: &RankedCandidate) -> Self {
        let [company, site, client] = ranked.preference_indicators();
        let info = &ranked.schedule_conflict_info;
        Self {
            id: ranked.candidate.id.clone(),
            display_name: ranked.candidate.display_name.clone(),
            sort_priority: ranked.sort_priority,
            background_color: ranked.background_color.as_str().to_string(),
            has_time_off_conflict: ranked.has_time_off_conflict,
            time_off_conflicts: ranked.time_off_conflicts.clone(),
            has_schedule_conflict: ranked.has_schedule_conflict,
            has_blocking_schedule_conflict: ranked.has_blocking_schedule_conflict,
            direct_overlaps: info.direct_overlaps,
            gap_violations: info.gap_violations,
            total_conflicts: info.total_conflicts,
            schedule_conflicts: info
                .conflicts
                .iter()
                .map(|c| c.assignment.clone())
                .collect(),
            company_preference: ranked.preferences.company.clone(),
            site_preference: ranked.preferences.site.clone(),
            client_preference: ranked.preferences.client.clone(),
            has_mandatory_not_preferred: ranked.preferences.has_mandatory_not_preferred,
            has_not_preferred: ranked.preferences.has_not_preferred,
            has_preferred: ranked.preferences.has_preferred,
            preferred_count: ranked.preferences.preferred_count,
            preference_indicators: (company, site, client),
            requires_confirmation: evaluate_selection(ranked).requires_confirmation(),
        }
    }
}

#[pymethods]
impl PyRankedCandidate {
    fn __repr__(&self) -> String {
        format!(
            "RankedCandidate(id={:?}, sort_priority={}, background_color={:?})",
            self.id, self.sort_priority, self.background_color
        )
    }
}

/// Assemble ranking inputs from the Python call's arguments.
///
/// `availability=None` means the availability check failed. A failed time-off
/// lookup is flagged with `time_off_unavailable`; its rows are then ignored.
#[allow(clippy::too_many_arguments)]
fn python_inputs(
    job: JobWindow,
    candidates: Vec<Candidate>,
    time_off_requests: Option<Vec<TimeOffRequest>>,
    time_off_unavailable: bool,
    availability: Option<AvailabilityReport>,
    preferences: Option<ScopePreferences>,
    view_all: bool,
) -> RankingInputs {
    let data_gaps = DataGaps {
        time_off_unavailable,
        availability_unavailable: availability.is_none(),
    };
    let time_off_requests = if time_off_unavailable {
        Vec::new()
    } else {
        time_off_requests.unwrap_or_default()
    };
    RankingInputs {
        job,
        candidates,
        time_off_requests,
        availability: availability.unwrap_or_else(AvailabilityReport::empty),
        preferences: preferences.unwrap_or_default(),
        view_all,
        data_gaps,
    }
}

/// Rank candidates for a job.
///
/// # Arguments
/// * `job` - The job window
/// * `candidates` - Workers eligible for assignment, in display order
/// * `time_off_requests` - Time-off rows overlapping the job's dates
/// * `availability` - Availability-check response; None if the check failed
/// * `preferences` - Company/site/client preference rows
/// * `view_all` - Include candidates hidden by default in the visible list
/// * `config` - Ranking configuration (minimum rest, verbosity)
/// * `time_off_unavailable` - The time-off lookup failed; any rows are ignored
///
/// # Returns
/// * (ranked, visible, data_gaps)
///
/// # Raises
/// * ValueError if the configuration is invalid
#[pyfunction]
#[pyo3(name = "rank_candidates")]
#[pyo3(signature = (job, candidates, time_off_requests=None, availability=None, preferences=None, view_all=false, config=None, time_off_unavailable=false))]
#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
fn py_rank_candidates(
    job: JobWindow,
    candidates: Vec<Candidate>,
    time_off_requests: Option<Vec<TimeOffRequest>>,
    availability: Option<AvailabilityReport>,
    preferences: Option<ScopePreferences>,
    view_all: bool,
    config: Option<RankingConfig>,
    time_off_unavailable: bool,
) -> PyResult<(Vec<PyRankedCandidate>, Vec<PyRankedCandidate>, DataGaps)> {
    let engine = RankingEngine::new(config.unwrap_or_default())
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let inputs = python_inputs(
        job,
        candidates,
        time_off_requests,
        time_off_unavailable,
        availability,
        preferences,
        view_all,
    );

    let outcome = engine.rank(&inputs);
    Ok((
        outcome.ranked.iter().map(PyRankedCandidate::from).collect(),
        outcome.visible.iter().map(PyRankedCandidate::from).collect(),
        outcome.data_gaps,
    ))
}

/// Inclusive calendar-day range overlap test.
#[pyfunction]
#[pyo3(name = "has_date_overlap")]
fn py_has_date_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    has_date_overlap(a_start, a_end, b_start, b_end)
}

/// The crew_rank Python module.
#[pymodule]
fn crew_rank(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Input records
    m.add_class::<Candidate>()?;
    m.add_class::<JobWindow>()?;
    m.add_class::<TimeOffRequest>()?;
    m.add_class::<ScheduledAssignment>()?;
    m.add_class::<AvailabilityReport>()?;
    m.add_class::<PreferenceRecord>()?;
    m.add_class::<ScopePreferences>()?;

    // Config and output
    m.add_class::<RankingConfig>()?;
    m.add_class::<PyRankedCandidate>()?;
    m.add_class::<DataGaps>()?;

    m.add_function(wrap_pyfunction!(py_rank_candidates, m)?)?;
    m.add_function(wrap_pyfunction!(py_has_date_overlap, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_view_of_ranked_candidate() {
        let inputs = RankingInputs::new(
            JobWindow::parse("2025-03-10T09:00:00Z", "2025-03-10T17:00:00Z").unwrap(),
            vec![Candidate::new("w1".to_string(), "Worker One".to_string())],
        )
        .with_preferences(ScopePreferences::new(
            Some(vec![PreferenceRecord::new(
                "co".to_string(),
                "w1".to_string(),
                "preferred".to_string(),
                false,
                None,
            )]),
            None,
            None,
        ));
        let outcome = rank_candidates(&inputs, &RankingConfig::default());
        let py = PyRankedCandidate::from(&outcome.ranked[0]);
        assert_eq!(py.id, "w1");
        assert_eq!(py.sort_priority, -1);
        assert_eq!(py.background_color, "success");
        assert_eq!(py.preference_indicators, (true, false, false));
        assert!(!py.requires_confirmation);
        assert!(py.company_preference.is_some());
    }

    fn time_off_row(user: &str) -> TimeOffRequest {
        TimeOffRequest::new(
            user.to_string(),
            Some("2025-03-10".to_string()),
            Some("2025-03-10".to_string()),
            "approved".to_string(),
            None,
            None,
        )
    }

    #[test]
    fn test_python_inputs_flag_missing_collaborator_data() {
        let job = JobWindow::parse("2025-03-10T09:00:00Z", "2025-03-10T17:00:00Z").unwrap();
        let candidates = vec![Candidate::new("w1".to_string(), "Worker One".to_string())];

        let inputs = python_inputs(
            job.clone(),
            candidates.clone(),
            Some(vec![time_off_row("w1")]),
            false,
            Some(AvailabilityReport::empty()),
            None,
            false,
        );
        assert!(!inputs.data_gaps.any());
        assert_eq!(inputs.time_off_requests.len(), 1);

        let inputs = python_inputs(
            job,
            candidates,
            Some(vec![time_off_row("w1")]),
            true,
            None,
            None,
            false,
        );
        assert_eq!(
            inputs.data_gaps,
            DataGaps {
                time_off_unavailable: true,
                availability_unavailable: true,
            }
        );
        assert!(inputs.time_off_requests.is_empty());

        let outcome = rank_candidates(&inputs, &RankingConfig::default());
        assert_eq!(outcome.data_gaps, inputs.data_gaps);
        assert_eq!(outcome.visible.len(), 1);
    }
}
