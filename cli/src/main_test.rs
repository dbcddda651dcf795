use super::*;
use std::time::Duration;

use clap::CommandFactory;
use fesup_model::{AffectationDto, AffectationResultat, AffectationStatus, LaunchResponse};

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["fesup"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parses_wish_submission() {
    let cli = parse(&["eleve", "voeux", "1", "2", "3", "4", "5"]);
    let Command::Eleve(EleveCommand { command: EleveSubcommand::Voeux { c1, a5, .. } }) = cli.command else {
        panic!("expected eleve voeux");
    };
    assert_eq!((c1, a5), (1, 5));
}

#[test]
fn wish_submission_needs_five_values() {
    assert!(Cli::try_parse_from(["fesup", "eleve", "voeux", "1", "2", "3"]).is_err());
}

#[test]
fn parses_entity_names() {
    let cli = parse(&["admin", "supprimer", "creneaux", "--yes"]);
    let Command::Admin(AdminCommand { command: AdminSubcommand::Supprimer { entity, yes } }) = cli.command else {
        panic!("expected admin supprimer");
    };
    assert_eq!(entity, ReferenceEntity::Creneaux);
    assert!(yes);
}

#[test]
fn rejects_unknown_entity() {
    assert!(Cli::try_parse_from(["fesup", "admin", "lister", "gymnases"]).is_err());
}

#[test]
fn parses_launch_without_wait() {
    let cli = parse(&["admin", "affectation", "lancer", "--no-wait"]);
    assert!(matches!(
        cli.command,
        Command::Admin(AdminCommand {
            command: AdminSubcommand::Affectation(AffectationCommand {
                command: AffectationSubcommand::Lancer { no_wait: true }
            })
        })
    ));
}

#[test]
fn parses_export_targets_beyond_entities() {
    let cli = parse(&["admin", "exporter", "all"]);
    let Command::Admin(AdminCommand { command: AdminSubcommand::Exporter { target, out } }) = cli.command else {
        panic!("expected admin exporter");
    };
    assert_eq!(target, ExportTarget::All);
    assert!(out.is_none());
    assert!(Cli::try_parse_from(["fesup", "admin", "exporter", "voeux"]).is_ok());
}

#[test]
fn parses_import_target_and_file() {
    let cli = parse(&["admin", "importer", "eleves", "eleves.csv"]);
    let Command::Admin(AdminCommand { command: AdminSubcommand::Importer { target, file } }) = cli.command else {
        panic!("expected admin importer");
    };
    assert_eq!(target, ImportTarget::Eleves);
    assert_eq!(file, PathBuf::from("eleves.csv"));
    assert!(Cli::try_parse_from(["fesup", "admin", "importer", "lycees", "x.csv"]).is_err());
}

#[test]
fn parses_partial_account_update() {
    let cli = parse(&["admin", "comptes", "modifier", "4", "--enabled", "false"]);
    let Command::Admin(AdminCommand {
        command:
            AdminSubcommand::Comptes(ComptesCommand {
                command: ComptesSubcommand::Modifier { admin_id, enabled, email, super_admin, .. },
            }),
    }) = cli.command
    else {
        panic!("expected admin comptes modifier");
    };
    assert_eq!((admin_id, enabled), (4, Some(false)));
    assert!(email.is_none() && super_admin.is_none());
}

#[test]
fn parses_student_review_commands() {
    assert!(matches!(
        parse(&["eleve", "recap"]).command,
        Command::Eleve(EleveCommand { command: EleveSubcommand::Recap })
    ));
    assert!(matches!(
        parse(&["eleve", "confirmer"]).command,
        Command::Eleve(EleveCommand { command: EleveSubcommand::Confirmer })
    ));
}

#[test]
fn parses_ticket_and_session_commands() {
    assert!(matches!(
        parse(&["admin", "tickets", "telecharger", "12", "--out", "t.pdf"]).command,
        Command::Admin(AdminCommand {
            command: AdminSubcommand::Tickets(TicketsCommand {
                command: TicketsSubcommand::Telecharger { eleve_id: 12, .. }
            })
        })
    ));
    assert!(matches!(
        parse(&["admin", "sessions", "generer", "--yes"]).command,
        Command::Admin(AdminCommand {
            command: AdminSubcommand::Sessions(SessionsCommand {
                command: SessionsSubcommand::Generer { yes: true }
            })
        })
    ));
    assert!(matches!(
        parse(&["admin", "reset-voeux", "8"]).command,
        Command::Admin(AdminCommand { command: AdminSubcommand::ResetVoeux { eleve_id: 8 } })
    ));
}

#[test]
fn yes_answers() {
    assert!(is_yes("y\n"));
    assert!(is_yes(" OUI "));
    assert!(!is_yes("\n"));
    assert!(!is_yes("non"));
}

#[test]
fn typed_phrase_must_match_exactly() {
    assert!(is_exact("SUPPRIMER TOUT\n", "SUPPRIMER TOUT"));
    assert!(is_exact("SUPPRIMER TOUT\r\n", "SUPPRIMER TOUT"));
    assert!(!is_exact("supprimer tout\n", "SUPPRIMER TOUT"));
    assert!(!is_exact(" SUPPRIMER TOUT\n", "SUPPRIMER TOUT"));
}

#[test]
fn error_codes_pass_through_client_errors() {
    assert_eq!(CliError::from(ClientError::NoSessions).error_code(), "E_NO_SESSIONS");
    assert_eq!(CliError::Redirected("/login").error_code(), "E_REDIRECTED");
}

#[test]
fn whoami_summary_for_admin() {
    let identity = Identity::Admin(fesup_model::AdminIdentity {
        token: "jwt".to_owned(),
        email: "root@fesup.test".to_owned(),
        nom: "Martin".to_owned(),
        prenom: "Claire".to_owned(),
        roles: vec!["ROLE_SUPERADMIN".to_owned()],
    });
    let summary = identity_summary(&identity);
    assert_eq!(summary["kind"], "admin");
    assert_eq!(summary["superAdmin"], true);
    assert_eq!(summary["name"], "Claire Martin");
}

// =============================================================================
// following a run
// =============================================================================

/// Launches fine, then every results request fails.
struct CrashingSolver;

#[async_trait::async_trait]
impl AffectationApi for CrashingSolver {
    async fn launch(&self) -> Result<LaunchResponse, ClientError> {
        Ok(LaunchResponse { problem_id: None, status: "STARTED".to_owned(), message: None })
    }

    async fn status(&self) -> Result<AffectationStatus, ClientError> {
        Ok(AffectationStatus::default())
    }

    async fn results(&self) -> Result<AffectationResultat, ClientError> {
        Err(ClientError::Status { status: 500, message: "solver crashed".to_owned() })
    }

    async fn list_affectations(&self) -> Result<Vec<AffectationDto>, ClientError> {
        Ok(Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn failed_poll_fails_the_command() {
    let mut runner = AffectationRunner::new(Arc::new(CrashingSolver), Duration::from_secs(5));
    runner.start().await.unwrap();

    let err = follow(&mut runner).await.unwrap_err();
    assert_eq!(err.error_code(), "E_RUN_FAILED");
    assert!(err.to_string().contains("solver crashed"));
}

#[test]
fn settled_run_without_error_is_ok() {
    assert!(settled(AffectationRun::default()).is_ok());
    let completed = AffectationRun { phase: RunPhase::Completed, ..AffectationRun::default() };
    assert!(settled(completed).is_ok());
}

#[test]
fn idle_run_with_error_is_a_failure() {
    let failed = AffectationRun { error: Some("server returned 500: boom".to_owned()), ..AffectationRun::default() };
    let err = settled(failed).unwrap_err();
    assert!(matches!(err, CliError::RunFailed(ref m) if m.contains("boom")));
}
