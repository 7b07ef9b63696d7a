//! Verbosity-gated logging macros for the ranking engine.
//!
//! Everything goes to stderr and compiles down to a single integer
//! comparison when the configured verbosity is below the macro's level.
//! Levels:
//! - 0: SILENT
//! - 1: SUMMARY (one line per ranking run, degraded collaborator data)
//! - 2: CHECKS (per-candidate verdicts and priorities)
//! - 3: DEBUG (skipped malformed rows, raw classifications)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at SUMMARY level (verbosity >= 1).
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!("[crew_rank] {}", format_args!($($arg)*));
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: per-candidate conflict counts, priorities and colours.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("[crew_rank]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: rows dropped because of missing or unparseable fields.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[crew_rank]     {}", format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_SUMMARY);
        assert!(VERBOSITY_SUMMARY < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_log_macros_accept_format_args() {
        let verbosity = VERBOSITY_SILENT;
        log_summary!(verbosity, "ranked {} candidates", 3);
        log_checks!(verbosity, "candidate {} priority {}", "w1", -2);
        log_debug!(verbosity, "skipped {:?}", Some("row"));
    }
}
