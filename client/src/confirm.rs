//! Multi-step confirmation before irreversible deletes.
//!
//! A flow is a list of `Step`s asked in order. Plain steps take a yes/no
//! answer; typed steps only pass when the user enters the exact phrase,
//! which guards the system-wide purge.

#[cfg(test)]
#[path = "confirm_test.rs"]
mod confirm_test;

use std::fmt::Write as _;

use fesup_model::{AdminAccount, ReferenceEntity};

/// Phrase the user must type to purge every table.
pub const PURGE_PHRASE: &str = "SUPPRIMER TOUT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    YesNo(String),
    Typed { prompt: String, phrase: &'static str },
}

impl Step {
    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Self::YesNo(prompt) | Self::Typed { prompt, .. } => prompt,
        }
    }
}

/// Asks the user.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> bool;

    /// True only when the typed answer is exactly `phrase`.
    fn confirm_typed(&mut self, prompt: &str, phrase: &str) -> bool;
}

/// Always answers yes (`--yes` on the command line).
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }

    fn confirm_typed(&mut self, _prompt: &str, _phrase: &str) -> bool {
        true
    }
}

/// Ask every step in order; the first refusal aborts.
pub fn confirm_steps<C: Confirmer + ?Sized>(confirmer: &mut C, steps: &[Step]) -> bool {
    steps.iter().all(|step| match step {
        Step::YesNo(prompt) => confirmer.confirm(prompt),
        Step::Typed { prompt, phrase } => confirmer.confirm_typed(prompt, phrase),
    })
}

/// The two prompts shown before deleting every row of `entity`.
#[must_use]
pub fn deletion_steps(entity: ReferenceEntity) -> Vec<Step> {
    let mut warning = format!("ATTENTION : voulez-vous vraiment supprimer {} ?", entity.every_label());
    let cascades = entity.cascades();
    if !cascades.is_empty() {
        warning.push_str("\nCela supprimera également :");
        for dependent in cascades {
            let _ = write!(warning, "\n- {dependent}");
        }
    }
    warning.push_str("\nCette action est IRRÉVERSIBLE !");
    vec![Step::YesNo(warning), Step::YesNo("Êtes-vous ABSOLUMENT sûr ?".to_owned())]
}

/// Every table except admin accounts, in the order the purge empties them.
const PURGED: [&str; 8] = [
    "Tous les vœux des élèves",
    "Toutes les affectations",
    "Toutes les sessions",
    "Tous les élèves",
    "Toutes les activités",
    "Toutes les salles",
    "Tous les créneaux",
    "Tous les lycées",
];

/// Warning listing everything the purge removes, then the typed phrase.
#[must_use]
pub fn purge_steps() -> Vec<Step> {
    let mut warning = String::from("DANGER : vous êtes sur le point de SUPPRIMER TOUTES LES DONNÉES :");
    for table in PURGED {
        let _ = write!(warning, "\n- {table}");
    }
    warning.push_str("\nLES COMPTES ADMINISTRATEURS SERONT PRÉSERVÉS.");
    warning.push_str("\nCette action est ABSOLUMENT IRRÉVERSIBLE !");
    vec![
        Step::YesNo(warning),
        Step::Typed {
            prompt: format!("Pour confirmer la suppression totale, tapez exactement : {PURGE_PHRASE}"),
            phrase: PURGE_PHRASE,
        },
    ]
}

/// Single prompt before removing one administrator account.
#[must_use]
pub fn admin_deletion_steps(account: &AdminAccount) -> Vec<Step> {
    vec![Step::YesNo(format!(
        "Voulez-vous vraiment supprimer l'administrateur {} ?",
        account.full_name()
    ))]
}

/// Regenerating sessions drops the existing ones first.
#[must_use]
pub fn session_generation_steps() -> Vec<Step> {
    vec![Step::YesNo(
        "Cela va SUPPRIMER toutes les sessions existantes et les recréer automatiquement \
         en fonction des vœux des élèves. Continuer ?"
            .to_owned(),
    )]
}
