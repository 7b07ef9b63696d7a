//! Sort priority and display colour for a ranked candidate.
//!
//! Lower priority sorts first. Preferred candidates are the only ones with a
//! negative priority, so they always precede everyone else; among them more
//! preferred scopes sort earlier.

pub const PRIORITY_TIME_OFF: i32 = 2000;
pub const PRIORITY_DIRECT_OVERLAP: i32 = 1900;
pub const PRIORITY_MANDATORY_NOT_PREFERRED: i32 = 1000;
pub const PRIORITY_GAP_VIOLATION: i32 = 800;
pub const PRIORITY_NOT_PREFERRED: i32 = 500;
pub const PRIORITY_NEUTRAL: i32 = 0;

/// Row highlight shown next to a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundColor {
    Success,
    Warning,
    Error,
    Default,
}

impl BackgroundColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Default => "default",
        }
    }
}

/// The inputs ranking looks at, already reduced to flags and counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RankingSignals {
    pub has_time_off_conflict: bool,
    pub direct_overlaps: usize,
    pub gap_violations: usize,
    pub has_mandatory_not_preferred: bool,
    pub has_not_preferred: bool,
    pub preferred_count: u8,
}

impl RankingSignals {
    /// Time off, a direct overlap, or a mandatory exclusion hides a candidate
    /// unless the caller asks to see everyone.
    pub fn hidden_by_default(&self) -> bool {
        self.has_mandatory_not_preferred || self.has_time_off_conflict || self.direct_overlaps > 0
    }
}

/// First matching rule wins.
pub fn sort_priority(signals: &RankingSignals) -> i32 {
    if signals.has_time_off_conflict {
        PRIORITY_TIME_OFF
    } else if signals.direct_overlaps > 0 {
        PRIORITY_DIRECT_OVERLAP
    } else if signals.has_mandatory_not_preferred {
        PRIORITY_MANDATORY_NOT_PREFERRED
    } else if signals.preferred_count > 0 {
        -i32::from(signals.preferred_count)
    } else if signals.gap_violations > 0 {
        PRIORITY_GAP_VIOLATION
    } else if signals.has_not_preferred {
        PRIORITY_NOT_PREFERRED
    } else {
        PRIORITY_NEUTRAL
    }
}

/// First matching rule wins. Note the order differs from [`sort_priority`]:
/// warnings outrank the preferred highlight.
pub fn background_color(signals: &RankingSignals) -> BackgroundColor {
    if signals.has_time_off_conflict
        || signals.direct_overlaps > 0
        || signals.has_mandatory_not_preferred
    {
        BackgroundColor::Error
    } else if signals.gap_violations > 0 || signals.has_not_preferred {
        BackgroundColor::Warning
    } else if signals.preferred_count > 0 {
        BackgroundColor::Success
    } else {
        BackgroundColor::Default
    }
}
