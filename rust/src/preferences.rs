//! Company / site / client preference classification.

use std::str::FromStr;

use thiserror::Error;

use crate::log_debug;
use crate::models::{PreferenceRecord, ScopePreferences};

/// Scopes a preference can be recorded against, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreferenceScope {
    Company,
    Site,
    Client,
}

impl PreferenceScope {
    pub const ALL: [PreferenceScope; 3] = [Self::Company, Self::Site, Self::Client];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Site => "site",
            Self::Client => "client",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown preference type: {0:?}")]
pub struct PreferenceParseError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    Preferred,
    NotPreferred,
}

impl FromStr for PreferenceKind {
    type Err = PreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preferred" => Ok(Self::Preferred),
            "not_preferred" | "not-preferred" => Ok(Self::NotPreferred),
            _ => Err(PreferenceParseError(s.to_string())),
        }
    }
}

impl ScopePreferences {
    pub fn records(&self, scope: PreferenceScope) -> &[PreferenceRecord] {
        match scope {
            PreferenceScope::Company => &self.company,
            PreferenceScope::Site => &self.site,
            PreferenceScope::Client => &self.client,
        }
    }
}

/// Preference flags for one candidate.
///
/// The boolean flags are computed independently from the raw records, so a
/// candidate can be both mandatory-not-preferred and preferred elsewhere.
/// Ranking decides which one wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreferenceFlags {
    pub company: Option<PreferenceRecord>,
    pub site: Option<PreferenceRecord>,
    pub client: Option<PreferenceRecord>,
    pub has_mandatory_not_preferred: bool,
    pub has_not_preferred: bool,
    pub has_preferred: bool,
    pub preferred_count: u8,
}

impl PreferenceFlags {
    pub fn record(&self, scope: PreferenceScope) -> Option<&PreferenceRecord> {
        match scope {
            PreferenceScope::Company => self.company.as_ref(),
            PreferenceScope::Site => self.site.as_ref(),
            PreferenceScope::Client => self.client.as_ref(),
        }
    }

    /// `[company_preferred, site_preferred, client_preferred]`
    pub fn indicators(&self) -> [bool; 3] {
        PreferenceScope::ALL.map(|scope| {
            self.record(scope).map(kind_of) == Some(Some(PreferenceKind::Preferred))
        })
    }

    /// Free-text reasons of the matched records, tagged with their scope.
    pub fn reasons(&self) -> Vec<(PreferenceScope, &str)> {
        PreferenceScope::ALL
            .iter()
            .filter_map(|&scope| {
                let reason = self.record(scope)?.reason.as_deref()?;
                (!reason.trim().is_empty()).then_some((scope, reason))
            })
            .collect()
    }
}

fn kind_of(record: &PreferenceRecord) -> Option<PreferenceKind> {
    record.preference_type.parse().ok()
}

/// First record in `records` for `candidate_id` with a recognised type.
fn find_record<'a>(
    candidate_id: &str,
    records: &'a [PreferenceRecord],
    scope: PreferenceScope,
    verbosity: u8,
) -> Option<&'a PreferenceRecord> {
    records
        .iter()
        .filter(|r| r.worker_id == candidate_id)
        .find(|r| match kind_of(r) {
            Some(_) => true,
            None => {
                log_debug!(
                    verbosity,
                    "Ignoring {} preference for {} with type {:?}",
                    scope.as_str(),
                    candidate_id,
                    r.preference_type
                );
                false
            }
        })
}

/// Classify a candidate's preferences across the three scopes.
pub fn classify_preferences(
    candidate_id: &str,
    preferences: &ScopePreferences,
    verbosity: u8,
) -> PreferenceFlags {
    let mut flags = PreferenceFlags::default();

    for scope in PreferenceScope::ALL {
        let Some(record) = find_record(candidate_id, preferences.records(scope), scope, verbosity)
        else {
            continue;
        };

        match (kind_of(record), record.is_mandatory) {
            (Some(PreferenceKind::NotPreferred), true) => flags.has_mandatory_not_preferred = true,
            (Some(PreferenceKind::NotPreferred), false) => flags.has_not_preferred = true,
            (Some(PreferenceKind::Preferred), _) => {
                flags.has_preferred = true;
                flags.preferred_count += 1;
            }
            (None, _) => {}
        }

        let slot = match scope {
            PreferenceScope::Company => &mut flags.company,
            PreferenceScope::Site => &mut flags.site,
            PreferenceScope::Client => &mut flags.client,
        };
        *slot = Some(record.clone());
    }

    flags
}
