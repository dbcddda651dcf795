use super::*;

#[test]
fn report_collects_cascaded_counts() {
    let body = serde_json::json!({
        "message": "Toutes les salles ont été supprimées avec succès",
        "sallesSupprimes": 4,
        "sessionsSupprimes": 12,
        "affectationsSupprimes": 300
    });
    let report = DeleteReport::from_json(&body);
    assert_eq!(report.message.as_deref(), Some("Toutes les salles ont été supprimées avec succès"));
    assert_eq!(report.counts.get("salles"), Some(&4));
    assert_eq!(report.counts.get("sessions"), Some(&12));
    assert_eq!(report.counts.get("affectations"), Some(&300));
    assert_eq!(report.total(), 316);
}

#[test]
fn report_keeps_plain_count_field() {
    let report = DeleteReport::from_json(&serde_json::json!({ "message": "ok", "count": 7 }));
    assert_eq!(report.counts.get("count"), Some(&7));
}

#[test]
fn non_object_body_yields_empty_report() {
    assert_eq!(DeleteReport::from_json(&Value::Null), DeleteReport::default());
}

#[test]
fn entity_names_round_trip() {
    for entity in ReferenceEntity::ALL {
        assert_eq!(entity.segment().parse::<ReferenceEntity>(), Ok(entity));
    }
    assert!("users".parse::<ReferenceEntity>().is_err());
}

#[test]
fn purge_body_deserializes_nested_counts() {
    let body = serde_json::json!({
        "message": "Toutes les données ont été supprimées avec succès",
        "counts": { "voeux": 1200, "affectations": 900, "lycees": 12 }
    });
    let report: DeleteReport = serde_json::from_value(body).unwrap();
    assert_eq!(report.counts.get("voeux"), Some(&1200));
    assert_eq!(report.total(), 2112);
}

// =============================================================================
// cascades
// =============================================================================

#[test]
fn lycees_take_students_and_their_wishes() {
    assert_eq!(ReferenceEntity::Lycees.cascades(), &[Dependent::Eleves, Dependent::Voeux]);
}

#[test]
fn eleves_take_wishes_and_assignments() {
    assert_eq!(ReferenceEntity::Eleves.cascades(), &[Dependent::Voeux, Dependent::Affectations]);
}

#[test]
fn activites_take_everything_built_on_them() {
    assert_eq!(
        ReferenceEntity::Activites.cascades(),
        &[Dependent::Voeux, Dependent::Sessions, Dependent::Affectations, Dependent::Tickets]
    );
}

#[test]
fn salles_take_sessions_assignments_and_tickets() {
    assert_eq!(
        ReferenceEntity::Salles.cascades(),
        &[Dependent::Sessions, Dependent::Affectations, Dependent::Tickets]
    );
}

#[test]
fn creneaux_take_only_sessions() {
    assert_eq!(ReferenceEntity::Creneaux.cascades(), &[Dependent::Sessions]);
}

#[test]
fn sessions_take_assignments_and_tickets() {
    assert_eq!(ReferenceEntity::Sessions.cascades(), &[Dependent::Affectations, Dependent::Tickets]);
}

#[test]
fn affectations_take_tickets() {
    assert_eq!(ReferenceEntity::Affectations.cascades(), &[Dependent::Tickets]);
}

#[test]
fn labels_are_accented_and_agree_in_gender() {
    assert_eq!(ReferenceEntity::Lycees.every_label(), "TOUS les lycées");
    assert_eq!(ReferenceEntity::Eleves.every_label(), "TOUS les élèves");
    assert_eq!(ReferenceEntity::Creneaux.every_label(), "TOUS les créneaux");
    assert_eq!(ReferenceEntity::Salles.every_label(), "TOUTES les salles");
    assert_eq!(ReferenceEntity::Activites.every_label(), "TOUTES les activités");
    assert_eq!(ReferenceEntity::Sessions.every_label(), "TOUTES les sessions");
    assert_eq!(ReferenceEntity::Affectations.every_label(), "TOUTES les affectations");
    assert_eq!(Dependent::Voeux.to_string(), "tous les vœux associés");
    assert_eq!(Dependent::Sessions.label(), "toutes les sessions associées");
}

// =============================================================================
// export targets
// =============================================================================

#[test]
fn export_targets_parse_entities_wishes_and_archive() {
    assert_eq!("salles".parse::<ExportTarget>(), Ok(ExportTarget::Entity(ReferenceEntity::Salles)));
    assert_eq!("voeux".parse::<ExportTarget>(), Ok(ExportTarget::Voeux));
    assert_eq!("all".parse::<ExportTarget>(), Ok(ExportTarget::All));
    assert!("admins".parse::<ExportTarget>().is_err());
}

#[test]
fn export_file_names() {
    assert_eq!(ExportTarget::from(ReferenceEntity::Eleves).file_name(0), "eleves.csv");
    assert_eq!(ExportTarget::Voeux.file_name(0), "voeux.csv");
    assert_eq!(ExportTarget::All.file_name(1_700_000_000), "export_fesup_1700000000.zip");
    assert_eq!(ExportTarget::All.to_string(), "all");
}

#[test]
fn export_file_name_uses_segment() {
    assert_eq!(ReferenceEntity::Creneaux.export_file_name(), "creneaux.csv");
}
