//! Seam to the REST collaborators that supply time off and availability.
//!
//! Conflict data is advisory. A failing or timed-out collaborator degrades
//! the ranking to preference-only ordering instead of failing it. Retries, if
//! any, belong to the implementor.

use thiserror::Error;

use crate::log_summary;
use crate::models::{AvailabilityReport, Candidate, JobWindow, ScopePreferences, TimeOffRequest};

use super::engine::{DataGaps, RankingInputs};

/// Errors a collaborator may report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("Collaborator timed out after {0} ms")]
    Timeout(u64),
    #[error("Malformed collaborator response: {0}")]
    Malformed(String),
}

pub trait ScheduleDataSource {
    /// Time-off requests overlapping the job's date range.
    fn time_off_requests(&self, job: &JobWindow) -> Result<Vec<TimeOffRequest>, SourceError>;

    /// Other assignments of `candidate_ids` around the job window.
    fn availability(
        &self,
        job: &JobWindow,
        candidate_ids: &[String],
    ) -> Result<AvailabilityReport, SourceError>;
}

/// Fetch collaborator data and assemble ranking inputs.
///
/// Failures are logged and recorded in [`DataGaps`]; they never propagate.
pub fn gather_inputs<S: ScheduleDataSource + ?Sized>(
    source: &S,
    job: JobWindow,
    candidates: Vec<Candidate>,
    preferences: ScopePreferences,
    view_all: bool,
    verbosity: u8,
) -> RankingInputs {
    let mut data_gaps = DataGaps::default();

    let time_off_requests = source.time_off_requests(&job).unwrap_or_else(|e| {
        log_summary!(verbosity, "Time-off lookup failed, assuming none: {}", e);
        data_gaps.time_off_unavailable = true;
        Vec::new()
    });

    let candidate_ids: Vec<String> = candidates.iter().map(|c| c.id.clone()).collect();
    let availability = source
        .availability(&job, &candidate_ids)
        .unwrap_or_else(|e| {
            log_summary!(
                verbosity,
                "Availability check failed, assuming no schedule conflicts: {}",
                e
            );
            data_gaps.availability_unavailable = true;
            AvailabilityReport::empty()
        });

    RankingInputs {
        job,
        candidates,
        time_off_requests,
        availability,
        preferences,
        view_all,
        data_gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankingConfig;
    use crate::models::{PreferenceRecord, ScheduledAssignment};
    use crate::ranking::engine::rank_candidates;
    use crate::ranking::priority::{PRIORITY_DIRECT_OVERLAP, PRIORITY_TIME_OFF};

    struct FixedSource {
        time_off: Result<Vec<TimeOffRequest>, SourceError>,
        availability: Result<AvailabilityReport, SourceError>,
    }

    impl ScheduleDataSource for FixedSource {
        fn time_off_requests(
            &self,
            _job: &JobWindow,
        ) -> Result<Vec<TimeOffRequest>, SourceError> {
            self.time_off.clone()
        }

        fn availability(
            &self,
            _job: &JobWindow,
            _candidate_ids: &[String],
        ) -> Result<AvailabilityReport, SourceError> {
            self.availability.clone()
        }
    }

    fn job() -> JobWindow {
        JobWindow::parse("2025-03-10T09:00:00Z", "2025-03-10T17:00:00Z").unwrap()
    }

    fn candidates() -> Vec<Candidate> {
        ["a", "b", "c"]
            .iter()
            .map(|id| Candidate::new(id.to_string(), id.to_uppercase()))
            .collect()
    }

    fn preferences() -> ScopePreferences {
        ScopePreferences::new(
            Some(vec![PreferenceRecord::new(
                "co-1".to_string(),
                "c".to_string(),
                "preferred".to_string(),
                false,
                None,
            )]),
            None,
            None,
        )
    }

    fn healthy() -> FixedSource {
        FixedSource {
            time_off: Ok(vec![TimeOffRequest::new(
                "a".to_string(),
                Some("2025-03-10".to_string()),
                Some("2025-03-10".to_string()),
                "approved".to_string(),
                None,
                None,
            )]),
            availability: Ok(AvailabilityReport::new(
                Some(vec![ScheduledAssignment::new(
                    "b".to_string(),
                    Some("2025-03-10T10:00:00Z".to_string()),
                    Some("2025-03-10T12:00:00Z".to_string()),
                    None,
                )]),
                true,
            )),
        }
    }

    #[test]
    fn test_healthy_source_feeds_conflicts() {
        let inputs = gather_inputs(&healthy(), job(), candidates(), preferences(), true, 0);
        assert!(!inputs.data_gaps.any());

        let outcome = rank_candidates(&inputs, &RankingConfig::default());
        let priorities: Vec<(&str, i32)> = outcome
            .ranked
            .iter()
            .map(|r| (r.id(), r.sort_priority))
            .collect();
        assert_eq!(
            priorities,
            vec![
                ("c", -1),
                ("b", PRIORITY_DIRECT_OVERLAP),
                ("a", PRIORITY_TIME_OFF)
            ]
        );
    }

    #[test]
    fn test_availability_failure_degrades_to_no_conflicts() {
        let source = FixedSource {
            availability: Err(SourceError::Timeout(5000)),
            ..healthy()
        };
        let inputs = gather_inputs(&source, job(), candidates(), preferences(), false, 0);
        assert!(inputs.data_gaps.availability_unavailable);
        assert!(!inputs.data_gaps.time_off_unavailable);
        assert!(inputs.availability.conflicts.is_empty());

        let outcome = rank_candidates(&inputs, &RankingConfig::default());
        let visible: Vec<&str> = outcome.visible.iter().map(|r| r.id()).collect();
        assert_eq!(visible, vec!["c", "b"]);
    }

    #[test]
    fn test_total_outage_ranks_by_preference_only() {
        let source = FixedSource {
            time_off: Err(SourceError::Unavailable("503".to_string())),
            availability: Err(SourceError::Malformed("not json".to_string())),
        };
        let inputs = gather_inputs(&source, job(), candidates(), preferences(), false, 0);
        assert!(inputs.data_gaps.time_off_unavailable);
        assert!(inputs.data_gaps.availability_unavailable);

        let outcome = rank_candidates(&inputs, &RankingConfig::default());
        let visible: Vec<&str> = outcome.visible.iter().map(|r| r.id()).collect();
        assert_eq!(visible, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_trait_object_source() {
        let source: Box<dyn ScheduleDataSource> = Box::new(healthy());
        let inputs = gather_inputs(source.as_ref(), job(), candidates(), preferences(), false, 0);
        assert_eq!(inputs.time_off_requests.len(), 1);
    }
}
