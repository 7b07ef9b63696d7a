//! Direct-overlap and rest-gap classification against a worker's other
//! assignments.

use chrono::{DateTime, FixedOffset};

use crate::config::RankingConfig;
use crate::intervals::{has_date_overlap, hours_between, parse_instant};
use crate::log_debug;
use crate::models::{AvailabilityReport, JobWindow, ScheduledAssignment};

/// How another assignment conflicts with the job.
#[derive(Clone, Debug, PartialEq)]
pub enum ConflictKind {
    /// Intervals intersect. Blocking.
    DirectOverlap,
    /// Intervals are disjoint but closer than the minimum rest. Warning only.
    GapViolation { gap_hours: f64 },
}

impl ConflictKind {
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::DirectOverlap)
    }
}

/// One of a worker's other assignments together with its classification.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedConflict {
    pub assignment: ScheduledAssignment,
    pub kind: ConflictKind,
}

/// Per-candidate tally of schedule conflicts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleConflictInfo {
    pub direct_overlaps: usize,
    pub gap_violations: usize,
    pub total_conflicts: usize,
    pub conflicts: Vec<ClassifiedConflict>,
}

impl ScheduleConflictInfo {
    pub fn has_conflict(&self) -> bool {
        self.total_conflicts > 0
    }

    pub fn has_blocking(&self) -> bool {
        self.direct_overlaps > 0
    }

    fn record(&mut self, assignment: &ScheduledAssignment, kind: ConflictKind) {
        match kind {
            ConflictKind::DirectOverlap => self.direct_overlaps += 1,
            ConflictKind::GapViolation { .. } => self.gap_violations += 1,
        }
        self.total_conflicts += 1;
        self.conflicts.push(ClassifiedConflict {
            assignment: assignment.clone(),
            kind,
        });
    }
}

/// Classify one other assignment `[other_start, other_end]` against the job.
///
/// Overlap uses the inclusive rule at full timestamp granularity. Otherwise the
/// gap between the two intervals (in whichever order they fall) must be at
/// least `minimum_rest_hours`. With `gap_checking` off only overlaps count.
pub fn classify_assignment(
    job: &JobWindow,
    other_start: &DateTime<FixedOffset>,
    other_end: &DateTime<FixedOffset>,
    minimum_rest_hours: f64,
    gap_checking: bool,
) -> Option<ConflictKind> {
    if has_date_overlap(&job.start, &job.end, other_start, other_end) {
        return Some(ConflictKind::DirectOverlap);
    }

    if !gap_checking {
        return None;
    }

    let gap_hours = if *other_end < job.start {
        hours_between(other_end, &job.start)
    } else {
        hours_between(&job.end, other_start)
    };

    if gap_hours < minimum_rest_hours {
        Some(ConflictKind::GapViolation { gap_hours })
    } else {
        None
    }
}

fn assignment_interval(
    assignment: &ScheduledAssignment,
) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let start = parse_instant(assignment.other_job_start.as_deref()?)?;
    let end = parse_instant(assignment.other_job_end.as_deref()?)?;
    if start > end {
        return None;
    }
    Some((start, end))
}

/// Tally every conflict between `candidate_id`'s other assignments and the job.
///
/// Both counts are kept: a worker can have one overlapping assignment and
/// another inside the rest window at the same time.
pub fn summarize_schedule_conflicts<'a, I>(
    candidate_id: &str,
    job: &JobWindow,
    assignments: I,
    gap_checking: bool,
    config: &RankingConfig,
) -> ScheduleConflictInfo
where
    I: IntoIterator<Item = &'a ScheduledAssignment>,
{
    let mut info = ScheduleConflictInfo::default();

    for assignment in assignments
        .into_iter()
        .filter(|a| a.user_id == candidate_id)
    {
        let Some((start, end)) = assignment_interval(assignment) else {
            log_debug!(
                config.verbosity,
                "Skipping assignment for {} with unusable times {:?}..{:?}",
                assignment.user_id,
                assignment.other_job_start,
                assignment.other_job_end
            );
            continue;
        };

        if let Some(kind) = classify_assignment(
            job,
            &start,
            &end,
            config.minimum_rest_hours,
            gap_checking,
        ) {
            log_debug!(
                config.verbosity,
                "{}: {:?} against {:?}",
                candidate_id,
                kind,
                assignment.other_job_id
            );
            info.record(assignment, kind);
        }
    }

    info
}

impl AvailabilityReport {
    /// Summarise this report for one candidate, honouring its gap-checking flag.
    pub fn summarize_for(
        &self,
        candidate_id: &str,
        job: &JobWindow,
        config: &RankingConfig,
    ) -> ScheduleConflictInfo {
        summarize_schedule_conflicts(
            candidate_id,
            job,
            &self.conflicts,
            self.gap_checking_enabled,
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    fn day_job() -> JobWindow {
        JobWindow::parse("2025-03-10T09:00:00Z", "2025-03-10T17:00:00Z").unwrap()
    }

    fn assignment(user: &str, start: &str, end: &str) -> ScheduledAssignment {
        ScheduledAssignment {
            user_id: user.to_string(),
            other_job_start: Some(start.to_string()),
            other_job_end: Some(end.to_string()),
            other_job_id: None,
        }
    }

    #[test]
    fn test_direct_overlap() {
        let kind = classify_assignment(
            &day_job(),
            &ts("2025-03-10T16:00:00Z"),
            &ts("2025-03-10T20:00:00Z"),
            8.0,
            true,
        );
        assert_eq!(kind, Some(ConflictKind::DirectOverlap));
        assert!(kind.unwrap().is_blocking());
    }

    #[test]
    fn test_touching_assignment_is_direct_overlap() {
        // Inclusive bounds: sharing a single instant with the job counts
        let ends_at_start = classify_assignment(
            &day_job(),
            &ts("2025-03-10T01:00:00Z"),
            &ts("2025-03-10T09:00:00Z"),
            8.0,
            true,
        );
        assert_eq!(ends_at_start, Some(ConflictKind::DirectOverlap));

        let starts_at_end = classify_assignment(
            &day_job(),
            &ts("2025-03-10T17:00:00Z"),
            &ts("2025-03-10T23:00:00Z"),
            8.0,
            false,
        );
        assert_eq!(starts_at_end, Some(ConflictKind::DirectOverlap));
    }

    #[test]
    fn test_gap_before_job() {
        // Ends 02:00, job starts 09:00: 7h < 8h
        let kind = classify_assignment(
            &day_job(),
            &ts("2025-03-09T22:00:00Z"),
            &ts("2025-03-10T02:00:00Z"),
            8.0,
            true,
        );
        match kind {
            Some(ConflictKind::GapViolation { gap_hours }) => {
                assert!((gap_hours - 7.0).abs() < 1e-9)
            }
            other => panic!("expected gap violation, got {:?}", other),
        }
    }

    #[test]
    fn test_gap_after_job() {
        // Job ends 17:00, next starts 23:00: 6h
        let kind = classify_assignment(
            &day_job(),
            &ts("2025-03-10T23:00:00Z"),
            &ts("2025-03-11T05:00:00Z"),
            8.0,
            true,
        );
        assert!(matches!(kind, Some(ConflictKind::GapViolation { .. })));
    }

    #[test]
    fn test_gap_exactly_at_threshold_is_fine() {
        let kind = classify_assignment(
            &day_job(),
            &ts("2025-03-09T21:00:00Z"),
            &ts("2025-03-10T01:00:00Z"),
            8.0,
            true,
        );
        assert_eq!(kind, None);
    }

    #[test]
    fn test_custom_rest_threshold() {
        let start = ts("2025-03-09T22:00:00Z");
        let end = ts("2025-03-10T02:00:00Z");
        assert_eq!(
            classify_assignment(&day_job(), &start, &end, 6.0, true),
            None
        );
        assert!(classify_assignment(&day_job(), &start, &end, 12.0, true).is_some());
    }

    #[test]
    fn test_gap_checking_disabled_keeps_overlaps() {
        let job = day_job();
        assert_eq!(
            classify_assignment(
                &job,
                &ts("2025-03-09T22:00:00Z"),
                &ts("2025-03-10T02:00:00Z"),
                8.0,
                false
            ),
            None
        );
        assert_eq!(
            classify_assignment(
                &job,
                &ts("2025-03-10T08:00:00Z"),
                &ts("2025-03-10T10:00:00Z"),
                8.0,
                false
            ),
            Some(ConflictKind::DirectOverlap)
        );
    }

    #[test]
    fn test_summary_tallies_both_kinds() {
        let config = RankingConfig::default();
        let rows = vec![
            assignment("w1", "2025-03-10T12:00:00Z", "2025-03-10T14:00:00Z"),
            assignment("w1", "2025-03-10T20:00:00Z", "2025-03-10T23:00:00Z"),
            assignment("w1", "2025-03-12T09:00:00Z", "2025-03-12T17:00:00Z"),
            assignment("w2", "2025-03-10T12:00:00Z", "2025-03-10T14:00:00Z"),
        ];
        let info = summarize_schedule_conflicts("w1", &day_job(), &rows, true, &config);
        assert_eq!(info.direct_overlaps, 1);
        assert_eq!(info.gap_violations, 1);
        assert_eq!(info.total_conflicts, 2);
        assert_eq!(info.conflicts.len(), 2);
        assert!(info.has_blocking());
        assert!(info.has_conflict());
    }

    #[test]
    fn test_summary_skips_unparseable_rows() {
        let config = RankingConfig::default();
        let mut missing = assignment("w1", "2025-03-10T12:00:00Z", "x");
        missing.other_job_end = None;
        let rows = vec![
            missing,
            assignment("w1", "yesterday", "2025-03-10T14:00:00Z"),
            assignment("w1", "2025-03-10T14:00:00Z", "2025-03-10T12:00:00Z"),
        ];
        let info = summarize_schedule_conflicts("w1", &day_job(), &rows, true, &config);
        assert_eq!(info, ScheduleConflictInfo::default());
    }

    #[test]
    fn test_report_respects_gap_flag() {
        let config = RankingConfig::default();
        let report = AvailabilityReport {
            conflicts: vec![assignment(
                "w1",
                "2025-03-09T22:00:00Z",
                "2025-03-10T02:00:00Z",
            )],
            gap_checking_enabled: false,
        };
        let info = report.summarize_for("w1", &day_job(), &config);
        assert!(!info.has_conflict());

        let report = AvailabilityReport {
            gap_checking_enabled: true,
            ..report
        };
        assert_eq!(report.summarize_for("w1", &day_job(), &config).gap_violations, 1);
    }
}
