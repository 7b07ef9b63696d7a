//! Composite ranking of candidates for a job.

use pyo3::prelude::*;
use rustc_hash::FxHashMap;

use crate::config::{ConfigError, RankingConfig};
use crate::conflicts::{
    find_time_off_conflicts, summarize_schedule_conflicts, ScheduleConflictInfo,
};
use crate::models::{
    AvailabilityReport, Candidate, JobWindow, ScheduledAssignment, ScopePreferences,
    TimeOffRequest,
};
use crate::preferences::{classify_preferences, PreferenceFlags};
use crate::{log_checks, log_summary};

use super::priority::{background_color, sort_priority, BackgroundColor, RankingSignals};

/// Which collaborator data could not be loaded for this ranking.
///
/// Missing data is treated as "no conflicts known"; callers use this to
/// render the list without conflict indicators.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DataGaps {
    #[pyo3(get)]
    pub time_off_unavailable: bool,
    #[pyo3(get)]
    pub availability_unavailable: bool,
}

#[pymethods]
impl DataGaps {
    pub fn any(&self) -> bool {
        self.time_off_unavailable || self.availability_unavailable
    }

    fn __repr__(&self) -> String {
        format!(
            "DataGaps(time_off_unavailable={}, availability_unavailable={})",
            self.time_off_unavailable, self.availability_unavailable
        )
    }
}

/// Everything one ranking run looks at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RankingInputs {
    pub job: JobWindow,
    pub candidates: Vec<Candidate>,
    pub time_off_requests: Vec<TimeOffRequest>,
    pub availability: AvailabilityReport,
    pub preferences: ScopePreferences,
    pub view_all: bool,
    pub data_gaps: DataGaps,
}

impl RankingInputs {
    pub fn new(job: JobWindow, candidates: Vec<Candidate>) -> Self {
        Self {
            job,
            candidates,
            time_off_requests: Vec::new(),
            availability: AvailabilityReport::empty(),
            preferences: ScopePreferences::default(),
            view_all: false,
            data_gaps: DataGaps::default(),
        }
    }

    pub fn with_time_off(mut self, requests: Vec<TimeOffRequest>) -> Self {
        self.time_off_requests = requests;
        self
    }

    pub fn with_availability(mut self, report: AvailabilityReport) -> Self {
        self.availability = report;
        self
    }

    pub fn with_preferences(mut self, preferences: ScopePreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_view_all(mut self, view_all: bool) -> Self {
        self.view_all = view_all;
        self
    }
}

/// A candidate enriched with conflicts, preferences and its ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub preferences: PreferenceFlags,
    pub background_color: BackgroundColor,
    pub has_time_off_conflict: bool,
    pub time_off_conflicts: Vec<TimeOffRequest>,
    pub has_schedule_conflict: bool,
    pub has_blocking_schedule_conflict: bool,
    pub schedule_conflict_info: ScheduleConflictInfo,
    pub sort_priority: i32,
}

impl RankedCandidate {
    pub fn id(&self) -> &str {
        &self.candidate.id
    }

    pub fn signals(&self) -> RankingSignals {
        RankingSignals {
            has_time_off_conflict: self.has_time_off_conflict,
            direct_overlaps: self.schedule_conflict_info.direct_overlaps,
            gap_violations: self.schedule_conflict_info.gap_violations,
            has_mandatory_not_preferred: self.preferences.has_mandatory_not_preferred,
            has_not_preferred: self.preferences.has_not_preferred,
            preferred_count: self.preferences.preferred_count,
        }
    }

    pub fn preference_indicators(&self) -> [bool; 3] {
        self.preferences.indicators()
    }

    pub fn hidden_by_default(&self) -> bool {
        self.signals().hidden_by_default()
    }
}

/// Result of a ranking run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankingOutcome {
    /// All candidates, ascending by sort priority; ties keep input order.
    pub ranked: Vec<RankedCandidate>,
    /// The subset to display for the requested `view_all` setting.
    pub visible: Vec<RankedCandidate>,
    pub data_gaps: DataGaps,
}

fn group_by_user<'a, T>(
    rows: &'a [T],
    user: impl Fn(&T) -> &str,
) -> FxHashMap<&'a str, Vec<&'a T>> {
    let mut grouped: FxHashMap<&'a str, Vec<&'a T>> = FxHashMap::default();
    for row in rows {
        grouped.entry(user(row)).or_default().push(row);
    }
    grouped
}

fn rank_one(
    candidate: &Candidate,
    inputs: &RankingInputs,
    time_off_by_user: &FxHashMap<&str, Vec<&TimeOffRequest>>,
    assignments_by_user: &FxHashMap<&str, Vec<&ScheduledAssignment>>,
    config: &RankingConfig,
) -> RankedCandidate {
    let id = candidate.id.as_str();

    let time_off_conflicts: Vec<TimeOffRequest> = time_off_by_user
        .get(id)
        .map(|rows| {
            find_time_off_conflicts(id, &inputs.job, rows.iter().copied(), config.verbosity)
                .into_iter()
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let schedule_conflict_info = assignments_by_user
        .get(id)
        .map(|rows| {
            summarize_schedule_conflicts(
                id,
                &inputs.job,
                rows.iter().copied(),
                inputs.availability.gap_checking_enabled,
                config,
            )
        })
        .unwrap_or_default();

    let preferences = classify_preferences(id, &inputs.preferences, config.verbosity);

    let mut ranked = RankedCandidate {
        candidate: candidate.clone(),
        preferences,
        background_color: BackgroundColor::Default,
        has_time_off_conflict: !time_off_conflicts.is_empty(),
        time_off_conflicts,
        has_schedule_conflict: schedule_conflict_info.has_conflict(),
        has_blocking_schedule_conflict: schedule_conflict_info.has_blocking(),
        schedule_conflict_info,
        sort_priority: 0,
    };

    let signals = ranked.signals();
    ranked.sort_priority = sort_priority(&signals);
    ranked.background_color = background_color(&signals);

    log_checks!(
        config.verbosity,
        "{} priority={} color={} time_off={} overlaps={} gaps={} preferred={}",
        id,
        ranked.sort_priority,
        ranked.background_color.as_str(),
        signals.has_time_off_conflict,
        signals.direct_overlaps,
        signals.gap_violations,
        signals.preferred_count
    );

    ranked
}

/// Rank every candidate and split out the visible subset.
///
/// Never fails: malformed rows are dropped individually and missing
/// collaborator data simply means fewer conflicts are known.
pub fn rank_candidates(inputs: &RankingInputs, config: &RankingConfig) -> RankingOutcome {
    let time_off_by_user = group_by_user(&inputs.time_off_requests, |r| r.user_id.as_str());
    let assignments_by_user =
        group_by_user(&inputs.availability.conflicts, |a| a.user_id.as_str());

    let mut ranked: Vec<RankedCandidate> = inputs
        .candidates
        .iter()
        .map(|c| rank_one(c, inputs, &time_off_by_user, &assignments_by_user, config))
        .collect();

    // sort_by_key is stable, so equal priorities keep their input order
    ranked.sort_by_key(|r| r.sort_priority);

    let visible: Vec<RankedCandidate> = if inputs.view_all {
        ranked.clone()
    } else {
        ranked
            .iter()
            .filter(|r| !r.hidden_by_default())
            .cloned()
            .collect()
    };

    log_summary!(
        config.verbosity,
        "Ranked {} candidates for {}..{}: {} visible (view_all={}, data_gaps={:?})",
        ranked.len(),
        inputs.job.start.to_rfc3339(),
        inputs.job.end.to_rfc3339(),
        visible.len(),
        inputs.view_all,
        inputs.data_gaps
    );

    RankingOutcome {
        ranked,
        visible,
        data_gaps: inputs.data_gaps,
    }
}

/// A validated configuration bound to the ranking function.
#[derive(Clone, Debug, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn rank(&self, inputs: &RankingInputs) -> RankingOutcome {
        rank_candidates(inputs, &self.config)
    }
}
