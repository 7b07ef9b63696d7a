//! Memoised ranking keyed on an input fingerprint.
//!
//! Ranking is recomputed whenever its inputs change. Callers that re-render
//! for unrelated reasons hit this cache instead of re-ranking.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::config::RankingConfig;
use crate::log_debug;

use super::engine::{rank_candidates, RankingInputs, RankingOutcome};

/// 64-bit fingerprint of everything that affects a ranking outcome.
///
/// Verbosity is excluded: it changes logging, not results.
pub fn input_fingerprint(inputs: &RankingInputs, config: &RankingConfig) -> u64 {
    let mut hasher = FxHasher::default();
    inputs.hash(&mut hasher);
    config.minimum_rest_hours.to_bits().hash(&mut hasher);
    hasher.finish()
}

struct CachedOutcome {
    fingerprint: u64,
    inputs: RankingInputs,
    rest_bits: u64,
    outcome: RankingOutcome,
}

impl CachedOutcome {
    // The fingerprint only narrows the search; FxHash collisions are possible.
    fn matches(&self, fingerprint: u64, inputs: &RankingInputs, config: &RankingConfig) -> bool {
        self.fingerprint == fingerprint
            && self.rest_bits == config.minimum_rest_hours.to_bits()
            && self.inputs == *inputs
    }
}

/// Holds the most recent ranking outcome.
#[derive(Default)]
pub struct RankingMemo {
    cached: Option<CachedOutcome>,
    hits: usize,
    misses: usize,
}

impl RankingMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome if `inputs` and `config` are unchanged,
    /// otherwise rank again and cache the result.
    pub fn get_or_rank(
        &mut self,
        inputs: &RankingInputs,
        config: &RankingConfig,
    ) -> &RankingOutcome {
        let fingerprint = input_fingerprint(inputs, config);

        if matches!(&self.cached, Some(entry) if entry.matches(fingerprint, inputs, config)) {
            self.hits += 1;
        } else {
            log_debug!(
                config.verbosity,
                "Ranking inputs changed (fingerprint {:016x}), recomputing",
                fingerprint
            );
            self.misses += 1;
            self.cached = None;
        }

        let entry = self.cached.get_or_insert_with(|| CachedOutcome {
            fingerprint,
            inputs: inputs.clone(),
            rest_bits: config.minimum_rest_hours.to_bits(),
            outcome: rank_candidates(inputs, config),
        });
        &entry.outcome
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
