//! CSV bulk import targets and the per-line report the backend returns.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cleanup::UnknownEntity;

/// Entities that can be loaded from a CSV file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportTarget {
    Eleves,
    Activites,
    Salles,
}

impl ImportTarget {
    pub const ALL: [Self; 3] = [Self::Eleves, Self::Activites, Self::Salles];

    /// Segment under `/admin/import/`.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Eleves => "eleves",
            Self::Activites => "activites",
            Self::Salles => "salles",
        }
    }
}

impl fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for ImportTarget {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.segment() == s)
            .ok_or_else(|| UnknownEntity(s.to_owned()))
    }
}

/// A rejected CSV line. `line_number` is 1-based and counts the header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportLineError {
    pub line_number: u32,
    pub reason: String,
    #[serde(default)]
    pub line_content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total_lines: u32,
    pub success_count: u32,
    pub error_count: u32,
    #[serde(default)]
    pub errors: Vec<ImportLineError>,
}

impl ImportReport {
    /// Every line was imported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.errors.is_empty()
    }
}
