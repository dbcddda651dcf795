//! Bulk deletion and export targets.
//!
//! Every reference entity supports `DELETE .../all`, which cascades to the
//! entities that depend on it and answers with one counter per table it
//! emptied (`lyceesSupprimes`, `elevesSupprimes`, ...). The counter names
//! differ per endpoint, so reports are parsed generically. The system-wide
//! purge answers with a nested `counts` object instead and deserializes
//! straight into the same `DeleteReport`.

#[cfg(test)]
#[path = "cleanup_test.rs"]
mod cleanup_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReferenceEntity {
    Lycees,
    Salles,
    Creneaux,
    Activites,
    Eleves,
    Sessions,
    Affectations,
}

impl ReferenceEntity {
    pub const ALL: [Self; 7] = [
        Self::Lycees,
        Self::Salles,
        Self::Creneaux,
        Self::Activites,
        Self::Eleves,
        Self::Sessions,
        Self::Affectations,
    ];

    /// Collection segment under `/admin/`.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Lycees => "lycees",
            Self::Salles => "salles",
            Self::Creneaux => "creneaux",
            Self::Activites => "activites",
            Self::Eleves => "eleves",
            Self::Sessions => "sessions",
            Self::Affectations => "affectations",
        }
    }

    /// French plural, as shown in confirmation prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lycees => "lycées",
            Self::Salles => "salles",
            Self::Creneaux => "créneaux",
            Self::Activites => "activités",
            Self::Eleves => "élèves",
            Self::Sessions => "sessions",
            Self::Affectations => "affectations",
        }
    }

    #[must_use]
    pub fn is_feminine(self) -> bool {
        matches!(self, Self::Salles | Self::Activites | Self::Sessions | Self::Affectations)
    }

    /// "TOUS les lycées", "TOUTES les salles".
    #[must_use]
    pub fn every_label(self) -> String {
        let all = if self.is_feminine() { "TOUTES" } else { "TOUS" };
        format!("{all} les {}", self.label())
    }

    /// What else disappears when every row of this entity is deleted.
    #[must_use]
    pub fn cascades(self) -> &'static [Dependent] {
        match self {
            Self::Lycees => &[Dependent::Eleves, Dependent::Voeux],
            Self::Eleves => &[Dependent::Voeux, Dependent::Affectations],
            Self::Activites => &[Dependent::Voeux, Dependent::Sessions, Dependent::Affectations, Dependent::Tickets],
            Self::Salles => &[Dependent::Sessions, Dependent::Affectations, Dependent::Tickets],
            Self::Creneaux => &[Dependent::Sessions],
            Self::Sessions => &[Dependent::Affectations, Dependent::Tickets],
            Self::Affectations => &[Dependent::Tickets],
        }
    }

    /// File name used for the CSV export.
    #[must_use]
    pub fn export_file_name(self) -> String {
        format!("{}.csv", self.segment())
    }
}

impl fmt::Display for ReferenceEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Data removed as a side effect of a bulk delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dependent {
    Eleves,
    Voeux,
    Sessions,
    Affectations,
    Tickets,
}

impl Dependent {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Eleves => "tous les élèves associés",
            Self::Voeux => "tous les vœux associés",
            Self::Sessions => "toutes les sessions associées",
            Self::Affectations => "toutes les affectations associées",
            Self::Tickets => "les tickets PDF générés",
        }
    }
}

impl fmt::Display for Dependent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity: {0}")]
pub struct UnknownEntity(pub String);

impl FromStr for ReferenceEntity {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.segment() == s)
            .ok_or_else(|| UnknownEntity(s.to_owned()))
    }
}

// =============================================================================
// EXPORT
// =============================================================================

/// What `GET /superadmin/system/export/{target}` can produce: one entity as
/// CSV, the wishes as CSV, or every table zipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportTarget {
    Entity(ReferenceEntity),
    Voeux,
    All,
}

impl ExportTarget {
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Entity(entity) => entity.segment(),
            Self::Voeux => "voeux",
            Self::All => "all",
        }
    }

    /// Default output file; the full archive is stamped with `unix_secs`.
    #[must_use]
    pub fn file_name(self, unix_secs: u64) -> String {
        match self {
            Self::Entity(entity) => entity.export_file_name(),
            Self::Voeux => "voeux.csv".to_owned(),
            Self::All => format!("export_fesup_{unix_secs}.zip"),
        }
    }
}

impl From<ReferenceEntity> for ExportTarget {
    fn from(entity: ReferenceEntity) -> Self {
        Self::Entity(entity)
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for ExportTarget {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voeux" => Ok(Self::Voeux),
            "all" => Ok(Self::All),
            other => other.parse().map(Self::Entity),
        }
    }
}

// =============================================================================
// REPORTS
// =============================================================================

/// Outcome of a bulk delete or of the full purge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    #[serde(default)]
    pub message: Option<String>,
    /// Counter name (without the `Supprimes` suffix) to deleted rows.
    #[serde(default)]
    pub counts: BTreeMap<String, u64>,
}

impl DeleteReport {
    /// Collect every non-negative integer field of a bulk-delete response.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        let message = map.get("message").and_then(Value::as_str).map(ToOwned::to_owned);
        let counts = map
            .iter()
            .filter_map(|(key, v)| {
                let n = v.as_u64()?;
                let name = key.strip_suffix("Supprimes").unwrap_or(key);
                Some((name.to_owned(), n))
            })
            .collect();
        Self { message, counts }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}
