//! Reference data managed from the admin screens.

#[cfg(test)]
#[path = "reference_test.rs"]
mod reference_test;

use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::wishes::{CONFERENCE_SLOTS, WishSlots};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lycee {
    pub id: Option<EntityId>,
    pub nom: String,
    #[serde(default)]
    pub ville: String,
    #[serde(default)]
    pub code_postal: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salle {
    pub id: Option<EntityId>,
    pub nom: String,
    pub capacite: u32,
    #[serde(default)]
    pub batiment: String,
    #[serde(default)]
    pub equipements: String,
}

/// Time slot inside a demi-journée. Times are `HH:mm`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creneau {
    pub id: Option<EntityId>,
    pub libelle: String,
    pub heure_debut: String,
    pub heure_fin: String,
    pub demi_journee: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActiviteType {
    Conference,
    TableRonde,
    FlashMetier,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activite {
    pub id: Option<EntityId>,
    pub titre: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub demi_journee: String,
    pub capacite_max: u32,
}

impl Activite {
    #[must_use]
    pub fn activite_type(&self) -> Option<ActiviteType> {
        serde_json::from_value(serde_json::Value::String(self.kind.clone())).ok()
    }
}

/// Activities offered for one demi-journée, grouped the way the wish form
/// presents them: conferences feed slots 1-2, the other two lists slots 3-5.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitesGroupees {
    #[serde(default)]
    pub conferences: Vec<Activite>,
    #[serde(default)]
    pub tables_rondes: Vec<Activite>,
    #[serde(default)]
    pub flashs_metiers: Vec<Activite>,
}

impl ActivitesGroupees {
    /// Candidates for slots 3-5.
    pub fn activity_choices(&self) -> impl Iterator<Item = &Activite> {
        self.tables_rondes.iter().chain(&self.flashs_metiers)
    }

    /// 1-based slots holding an activity this demi-journée does not offer
    /// in the matching group. Unset slots are skipped.
    #[must_use]
    pub fn unoffered_slots(&self, slots: &WishSlots) -> Vec<usize> {
        let conferences: Vec<EntityId> = self.conferences.iter().filter_map(|a| a.id).collect();
        let activities: Vec<EntityId> = self.activity_choices().filter_map(|a| a.id).collect();
        slots
            .0
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let id = (*slot)?;
                let offered = if index < CONFERENCE_SLOTS { &conferences } else { &activities };
                (!offered.contains(&id)).then_some(index + 1)
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EleveVoeu {
    pub id: EntityId,
    pub priorite: u8,
    pub type_voeu: String,
    pub activite: ActiviteRef,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiviteRef {
    pub id: EntityId,
    pub titre: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eleve {
    pub id: EntityId,
    pub id_national: String,
    pub nom: String,
    pub prenom: String,
    pub demi_journee: String,
    #[serde(default)]
    pub voeux_soumis: bool,
    pub date_soumission: Option<String>,
    #[serde(default)]
    pub nb_voeux: u32,
    pub lycee: Option<Lycee>,
    #[serde(default)]
    pub voeux: Vec<EleveVoeu>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EleveStats {
    pub total: u64,
    pub avec_voeux: u64,
    pub sans_voeux: u64,
    pub taux_completion: f64,
}

/// A scheduled run of an activity in a room during a time slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: Option<EntityId>,
    pub activite_id: EntityId,
    pub activite_titre: Option<String>,
    pub activite_type: Option<String>,
    pub salle_id: EntityId,
    pub salle_nom: Option<String>,
    pub salle_capacite: Option<u32>,
    pub creneau_id: EntityId,
    pub creneau_libelle: Option<String>,
    pub creneau_demi_journee: Option<String>,
    pub capacite_disponible: Option<u32>,
}
