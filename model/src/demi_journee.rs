//! The four half-day windows of the two-day event.

#[cfg(test)]
#[path = "demi_journee_test.rs"]
mod demi_journee_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemiJournee {
    Jour1Matin,
    Jour1ApresMidi,
    Jour2Matin,
    Jour2ApresMidi,
}

impl DemiJournee {
    pub const ALL: [Self; 4] = [Self::Jour1Matin, Self::Jour1ApresMidi, Self::Jour2Matin, Self::Jour2ApresMidi];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jour1Matin => "JOUR1_MATIN",
            Self::Jour1ApresMidi => "JOUR1_APRES_MIDI",
            Self::Jour2Matin => "JOUR2_MATIN",
            Self::Jour2ApresMidi => "JOUR2_APRES_MIDI",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Jour1Matin => "Jour 1 - Matin",
            Self::Jour1ApresMidi => "Jour 1 - Après-midi",
            Self::Jour2Matin => "Jour 2 - Matin",
            Self::Jour2ApresMidi => "Jour 2 - Après-midi",
        }
    }
}

impl fmt::Display for DemiJournee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown demi-journée: {0}")]
pub struct UnknownDemiJournee(pub String);

impl FromStr for DemiJournee {
    type Err = UnknownDemiJournee;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDemiJournee(s.to_owned()))
    }
}

/// Human label for a raw wire value. Unknown values are echoed back as-is so
/// a newer backend never renders as blank.
#[must_use]
pub fn label_for(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    raw.parse::<DemiJournee>()
        .map_or_else(|_| raw.to_owned(), |d| d.label().to_owned())
}
