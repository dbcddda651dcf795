//! `fesup` command-line front end for the FESUP wishes portal.
//!
//! Student commands identify a student, submit the five ranked wishes and
//! confirm them; admin commands launch and follow the assignment run,
//! manage reference data, imports, exports, tickets and admin accounts.
//! Identities persist in the session file between runs.

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use fesup_client::confirm::{
    AssumeYes, Confirmer, Step, admin_deletion_steps, confirm_steps, deletion_steps, purge_steps,
    session_generation_steps,
};
use fesup_client::guard::{AdminRoute, GuardDecision, StudentRoute, admin_guard, student_guard};
use fesup_client::state::affectation::ReloadAction;
use fesup_client::{
    AffectationApi, AffectationRun, AffectationRunner, ApiClient, ClientConfig, ClientError, RunPhase, SessionStore,
    WishForm,
};
use fesup_model::affectation::reassignment_target;
use fesup_model::demi_journee::label_for;
use fesup_model::reference::SessionDto;
use fesup_model::{
    AdminUpdate, EntityId, ExportTarget, Identity, ImportTarget, NewAdmin, ReferenceEntity, StudentIdentity, WishSlots,
};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("access denied; go to {0} first")]
    Redirected(&'static str),
    #[error("cancelled")]
    Cancelled,
    #[error("interrupted; the run continues server-side, resume with `admin affectation suivre`")]
    Interrupted,
    #[error("assignment run failed: {0}")]
    RunFailed(String),
    #[error("wish slots {0} hold activities not offered on this demi-journée")]
    NotOffered(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("session {session} is not in the demi-journée of affectation {affectation}")]
    SessionNotAllowed { affectation: EntityId, session: EntityId },
    #[error("nothing to update")]
    EmptyUpdate,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Client(e) => e.error_code(),
            Self::Redirected(_) => "E_REDIRECTED",
            Self::Cancelled => "E_CANCELLED",
            Self::Interrupted => "E_INTERRUPTED",
            Self::RunFailed(_) => "E_RUN_FAILED",
            Self::NotOffered(_) => "E_NOT_OFFERED",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::SessionNotAllowed { .. } => "E_SESSION_NOT_ALLOWED",
            Self::EmptyUpdate => "E_EMPTY_UPDATE",
            Self::Io(_) => "E_IO",
            Self::InvalidJson(_) => "E_INVALID_JSON",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fesup", about = "FESUP wishes and assignment portal CLI")]
struct Cli {
    #[arg(long, env = "FESUP_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "FESUP_SESSION_FILE", default_value = ".fesup-session.json")]
    session_file: PathBuf,

    #[arg(long, env = "FESUP_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

struct CliContext {
    api: ApiClient,
    config: ClientConfig,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Student wishes flow.
    Eleve(EleveCommand),
    /// Administration.
    Admin(AdminCommand),
    /// Forget the stored identity.
    Logout,
    /// Show the stored identity.
    Whoami,
}

#[derive(Args, Debug)]
struct EleveCommand {
    #[command(subcommand)]
    command: EleveSubcommand,
}

#[derive(Subcommand, Debug)]
enum EleveSubcommand {
    Login {
        #[arg(long)]
        id_national: String,
        #[arg(long)]
        nom: String,
    },
    /// Activities offered on the student's half-day.
    Activites,
    /// Submit wishes: two conferences, then three activities.
    Voeux {
        c1: EntityId,
        c2: EntityId,
        a3: EntityId,
        a4: EntityId,
        a5: EntityId,
    },
    /// Review the stored wishes before confirming them.
    Recap,
    /// Make the stored wishes final.
    Confirmer,
    Statut,
    Ticket {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FESUP_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Affectation(AffectationCommand),
    /// Delete every row of an entity, with cascades.
    Supprimer {
        entity: ReferenceEntity,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Delete every table except admin accounts.
    Purger {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Export an entity or the wishes as CSV, or `all` as a zip archive.
    Exporter {
        target: ExportTarget,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load students, activities or rooms from a CSV file.
    Importer {
        target: ImportTarget,
        file: PathBuf,
    },
    Lister {
        entity: ReferenceEntity,
    },
    Stats,
    /// Let a student submit wishes again.
    ResetVoeux {
        eleve_id: EntityId,
    },
    Sessions(SessionsCommand),
    Tickets(TicketsCommand),
    /// Administrator accounts (super-admin).
    Comptes(ComptesCommand),
}

#[derive(Args, Debug)]
struct SessionsCommand {
    #[command(subcommand)]
    command: SessionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SessionsSubcommand {
    /// Replace every session with ones generated from the wishes.
    Generer {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct TicketsCommand {
    #[command(subcommand)]
    command: TicketsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TicketsSubcommand {
    /// Generate every PDF ticket in one batch.
    Generer,
    Regenerer {
        eleve_id: EntityId,
    },
    Telecharger {
        eleve_id: EntityId,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ComptesCommand {
    #[command(subcommand)]
    command: ComptesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ComptesSubcommand {
    Lister,
    Afficher {
        admin_id: EntityId,
    },
    Creer {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FESUP_NEW_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        nom: String,
        #[arg(long)]
        prenom: String,
        #[arg(long, default_value_t = false)]
        super_admin: bool,
    },
    /// Change only the given fields.
    Modifier {
        admin_id: EntityId,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        prenom: Option<String>,
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        super_admin: Option<bool>,
    },
    Supprimer {
        admin_id: EntityId,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct AffectationCommand {
    #[command(subcommand)]
    command: AffectationSubcommand,
}

#[derive(Subcommand, Debug)]
enum AffectationSubcommand {
    /// Launch the solver and wait for its results.
    Lancer {
        #[arg(long, default_value_t = false)]
        no_wait: bool,
    },
    /// Resume following a running job, or show existing results.
    Suivre,
    Statut,
    Liste,
    Stats,
    Reaffecter {
        affectation_id: EntityId,
        session_id: EntityId,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    config.session_file = Some(cli.session_file);
    let session = SessionStore::from_config(&config);
    let ctx = CliContext { api: ApiClient::new(&config, session)?, config };

    match cli.command {
        Command::Eleve(eleve) => run_eleve(&ctx, eleve).await,
        Command::Admin(admin) => run_admin(&ctx, admin).await,
        Command::Logout => {
            ctx.api.logout()?;
            println!("logged out");
            Ok(())
        }
        Command::Whoami => {
            match ctx.api.session().current() {
                Some(identity) => print_json(&identity_summary(&identity)),
                None => {
                    println!("not logged in");
                    Ok(())
                }
            }
        }
    }
}

// =============================================================================
// STUDENT
// =============================================================================

async fn run_eleve(ctx: &CliContext, eleve: EleveCommand) -> Result<(), CliError> {
    match eleve.command {
        EleveSubcommand::Login { id_national, nom } => {
            let student = ctx.api.authenticate_student(&id_national, &nom).await?;
            println!(
                "{} {} ({}), {}",
                student.prenom,
                student.nom,
                student.lycee,
                label_for(&student.demi_journee)
            );
            if student.voeux_deja_soumis {
                println!("wishes already submitted");
            }
            Ok(())
        }
        EleveSubcommand::Activites => {
            let student = require_student(ctx, StudentRoute::Form)?;
            let activites = ctx.api.activities_for(&student.demi_journee).await?;
            println!("{}", label_for(&student.demi_journee));
            print_json(&serde_json::to_value(&activites)?)
        }
        EleveSubcommand::Voeux { c1, c2, a3, a4, a5 } => {
            let student = require_student(ctx, StudentRoute::Form)?;
            let mut form = WishForm::new();
            for (index, value) in [c1, c2, a3, a4, a5].into_iter().enumerate() {
                form.set_slot(index, Some(value));
            }
            for message in form.errors() {
                eprintln!("- {message}");
            }
            let offer = ctx.api.activities_for(&student.demi_journee).await?;
            let unoffered = offer.unoffered_slots(form.slots());
            if !unoffered.is_empty() {
                let slots: Vec<String> = unoffered.iter().map(ToString::to_string).collect();
                return Err(CliError::NotOffered(slots.join(", ")));
            }
            let response = ctx.api.submit_wishes(form.slots()).await?;
            if response.success {
                eprintln!("review with `fesup eleve recap`, then make them final with `fesup eleve confirmer`");
            }
            print_json(&serde_json::to_value(&response)?)
        }
        EleveSubcommand::Recap => {
            let student = require_student(ctx, StudentRoute::Summary)?;
            recap(ctx, &student).await
        }
        EleveSubcommand::Confirmer => {
            let student = require_student(ctx, StudentRoute::Summary)?;
            ctx.api.confirm_wishes(student.id).await?;
            let confirmed = StudentIdentity { voeux_deja_soumis: true, ..student };
            ctx.api.session().login(Identity::Student(confirmed))?;
            println!("wishes confirmed");
            Ok(())
        }
        EleveSubcommand::Statut => {
            let student = require_student(ctx, StudentRoute::Confirmation)?;
            let submitted = ctx.api.has_submitted(student.id).await?;
            let ticket = ctx.api.ticket_available().await?;
            print_json(&serde_json::json!({
                "eleve": format!("{} {}", student.prenom, student.nom),
                "demiJournee": label_for(&student.demi_journee),
                "voeuxSoumis": submitted,
                "ticketDisponible": ticket,
            }))
        }
        EleveSubcommand::Ticket { out } => {
            require_student(ctx, StudentRoute::Confirmation)?;
            let pdf = ctx.api.download_ticket().await?;
            write_file(&out, &pdf)
        }
    }
}

/// Stored wishes in slot order, with activity titles.
async fn recap(ctx: &CliContext, student: &StudentIdentity) -> Result<(), CliError> {
    let stored = ctx.api.student_wishes(student.id).await?;
    let offer = ctx.api.activities_for(&student.demi_journee).await?;
    let slots = WishSlots::from_recorded(&stored);
    let titre = |id: EntityId| {
        offer
            .conferences
            .iter()
            .chain(offer.activity_choices())
            .find(|a| a.id == Some(id))
            .map(|a| a.titre.clone())
    };
    let rows: Vec<Value> = slots
        .0
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            serde_json::json!({
                "voeu": index + 1,
                "activiteId": slot,
                "titre": (*slot).and_then(&titre),
            })
        })
        .collect();
    print_json(&serde_json::json!({
        "demiJournee": label_for(&student.demi_journee),
        "complet": slots.first_missing().is_none(),
        "voeux": rows,
    }))
}

fn require_student(ctx: &CliContext, route: StudentRoute) -> Result<StudentIdentity, CliError> {
    let student = ctx.api.session().student();
    if let GuardDecision::Redirect(to) = student_guard(student.as_ref(), route) {
        return Err(CliError::Redirected(to.path()));
    }
    // Confirmation is public: still needs someone to look up.
    student.ok_or(CliError::Redirected(StudentRoute::Identification.path()))
}

// =============================================================================
// ADMIN
// =============================================================================

async fn run_admin(ctx: &CliContext, admin: AdminCommand) -> Result<(), CliError> {
    match admin.command {
        AdminSubcommand::Login { email, password } => {
            let admin = ctx.api.login_admin(&email, &password).await?;
            println!("logged in as {} {} ({})", admin.prenom, admin.nom, admin.roles.join(", "));
            Ok(())
        }
        AdminSubcommand::Affectation(affectation) => run_affectation(ctx, affectation).await,
        AdminSubcommand::Supprimer { entity, yes } => {
            require_admin(ctx, AdminRoute::Dashboard)?;
            confirm(&deletion_steps(entity), yes)?;
            let report = ctx.api.delete_all(entity).await?;
            print_json(&serde_json::to_value(&report)?)
        }
        AdminSubcommand::Purger { yes } => {
            require_admin(ctx, AdminRoute::SystemSettings)?;
            confirm(&purge_steps(), yes)?;
            let report = ctx.api.purge_all().await?;
            print_json(&serde_json::to_value(&report)?)
        }
        AdminSubcommand::Exporter { target, out } => {
            require_admin(ctx, AdminRoute::SystemSettings)?;
            let bytes = ctx.api.export(target).await?;
            let out = out.unwrap_or_else(|| PathBuf::from(target.file_name(unix_now())));
            write_file(&out, &bytes)
        }
        AdminSubcommand::Importer { target, file } => {
            require_admin(ctx, AdminRoute::Import)?;
            let contents = std::fs::read(&file)?;
            let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or("import.csv");
            let report = ctx.api.import_csv(target, file_name, contents).await?;
            for error in &report.errors {
                eprintln!("line {}: {} [{}]", error.line_number, error.reason, error.line_content);
            }
            print_json(&serde_json::to_value(&report)?)
        }
        AdminSubcommand::Lister { entity } => {
            require_admin(ctx, AdminRoute::Dashboard)?;
            let rows: Vec<Value> = ctx.api.list(entity).await?;
            print_json(&Value::Array(rows))
        }
        AdminSubcommand::Stats => {
            require_admin(ctx, AdminRoute::SystemSettings)?;
            let stats = ctx.api.system_stats().await?;
            print_json(&serde_json::to_value(&stats)?)
        }
        AdminSubcommand::ResetVoeux { eleve_id } => {
            require_admin(ctx, AdminRoute::Eleves)?;
            let eleve = ctx.api.reset_wishes(eleve_id).await?;
            print_json(&serde_json::to_value(&eleve)?)
        }
        AdminSubcommand::Sessions(sessions) => {
            require_admin(ctx, AdminRoute::Sessions)?;
            match sessions.command {
                SessionsSubcommand::Generer { yes } => {
                    confirm(&session_generation_steps(), yes)?;
                    print_json(&ctx.api.generate_sessions().await?)
                }
            }
        }
        AdminSubcommand::Tickets(tickets) => run_tickets(ctx, tickets).await,
        AdminSubcommand::Comptes(comptes) => run_comptes(ctx, comptes).await,
    }
}

async fn run_tickets(ctx: &CliContext, tickets: TicketsCommand) -> Result<(), CliError> {
    require_admin(ctx, AdminRoute::Affectations)?;
    match tickets.command {
        TicketsSubcommand::Generer => print_json(&ctx.api.generate_all_tickets().await?),
        TicketsSubcommand::Regenerer { eleve_id } => print_json(&ctx.api.regenerate_ticket(eleve_id).await?),
        TicketsSubcommand::Telecharger { eleve_id, out } => {
            let pdf = ctx.api.download_admin_ticket(eleve_id).await?;
            write_file(&out, &pdf)
        }
    }
}

async fn run_comptes(ctx: &CliContext, comptes: ComptesCommand) -> Result<(), CliError> {
    require_admin(ctx, AdminRoute::AdminManagement)?;
    match comptes.command {
        ComptesSubcommand::Lister => print_json(&serde_json::to_value(ctx.api.list_admins().await?)?),
        ComptesSubcommand::Afficher { admin_id } => {
            print_json(&serde_json::to_value(ctx.api.get_admin(admin_id).await?)?)
        }
        ComptesSubcommand::Creer { email, password, nom, prenom, super_admin } => {
            let account = NewAdmin { email, password, nom, prenom, is_super_admin: super_admin };
            print_json(&serde_json::to_value(ctx.api.create_admin(&account).await?)?)
        }
        ComptesSubcommand::Modifier { admin_id, email, password, nom, prenom, enabled, super_admin } => {
            let update = AdminUpdate { email, password, nom, prenom, enabled, is_super_admin: super_admin };
            if update.is_empty() {
                return Err(CliError::EmptyUpdate);
            }
            print_json(&serde_json::to_value(ctx.api.update_admin(admin_id, &update).await?)?)
        }
        ComptesSubcommand::Supprimer { admin_id, yes } => {
            let account = ctx.api.get_admin(admin_id).await?;
            confirm(&admin_deletion_steps(&account), yes)?;
            ctx.api.delete_admin(admin_id).await?;
            println!("deleted administrator {}", account.full_name());
            Ok(())
        }
    }
}

async fn run_affectation(ctx: &CliContext, affectation: AffectationCommand) -> Result<(), CliError> {
    require_admin(ctx, AdminRoute::Affectations)?;
    match affectation.command {
        AffectationSubcommand::Lancer { no_wait } => {
            let mut runner = runner(ctx);
            let launch = runner.start().await?;
            print_json(&serde_json::to_value(&launch)?)?;
            if no_wait {
                runner.shutdown();
                return Ok(());
            }
            let run = follow(&mut runner).await?;
            print_run(&run)
        }
        AffectationSubcommand::Suivre => {
            let mut runner = runner(ctx);
            let run = match runner.reload().await? {
                ReloadAction::ResumePolling => follow(&mut runner).await?,
                ReloadAction::FetchExisting | ReloadAction::Nothing => settled(runner.snapshot())?,
            };
            print_run(&run)
        }
        AffectationSubcommand::Statut => {
            let status = ctx.api.status().await?;
            print_json(&serde_json::to_value(status)?)
        }
        AffectationSubcommand::Liste => {
            let rows = ctx.api.list_affectations().await?;
            print_json(&serde_json::to_value(&rows)?)
        }
        AffectationSubcommand::Stats => {
            let rows = ctx.api.list_affectations().await?;
            let stats = fesup_model::AssignmentStats::compute(&rows);
            let eleves = ctx.api.eleve_stats().await?;
            print_json(&serde_json::json!({ "affectations": stats, "eleves": eleves }))
        }
        AffectationSubcommand::Reaffecter { affectation_id, session_id } => {
            reassign(ctx, affectation_id, session_id).await
        }
    }
}

/// Move one assignment within the loaded results. The target session must
/// share the demi-journée of the current one.
async fn reassign(ctx: &CliContext, affectation_id: EntityId, session_id: EntityId) -> Result<(), CliError> {
    let mut runner = runner(ctx);
    if runner.reload().await? == ReloadAction::ResumePolling {
        runner.shutdown();
        return Err(ClientError::AlreadyRunning.into());
    }
    let run = runner.snapshot();
    let current = run
        .affectations
        .iter()
        .find(|a| a.id == Some(affectation_id))
        .ok_or_else(|| CliError::NotFound(format!("affectation {affectation_id}")))?;
    let sessions: Vec<SessionDto> = ctx.api.list(ReferenceEntity::Sessions).await?;
    if reassignment_target(current, &sessions, session_id).is_none() {
        return Err(CliError::SessionNotAllowed { affectation: affectation_id, session: session_id });
    }

    let updated = ctx.api.reassign(affectation_id, session_id).await?;
    runner.update(|run| run.replace(updated.clone()));
    print_json(&serde_json::json!({ "affectation": updated, "stats": runner.snapshot().stats() }))
}

fn require_admin(ctx: &CliContext, route: AdminRoute) -> Result<(), CliError> {
    match admin_guard(ctx.api.session().admin().as_ref(), route) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Redirect(to) => Err(CliError::Redirected(to.path())),
    }
}

fn runner(ctx: &CliContext) -> AffectationRunner {
    let api: Arc<dyn AffectationApi> = Arc::new(ctx.api.clone());
    AffectationRunner::new(api, ctx.config.poll_interval)
}

/// Wait for the run to settle; Ctrl-C stops polling and leaves the job
/// running server-side.
async fn follow(runner: &mut AffectationRunner) -> Result<AffectationRun, CliError> {
    eprintln!("waiting for the assignment results (Ctrl-C to stop following)...");
    let outcome = tokio::select! {
        run = runner.wait_settled() => Some(run),
        _ = tokio::signal::ctrl_c() => None,
    };
    match outcome {
        Some(run) => settled(run),
        None => {
            runner.shutdown();
            Err(CliError::Interrupted)
        }
    }
}

/// A run that dropped back to `Idle` with an error failed.
fn settled(run: AffectationRun) -> Result<AffectationRun, CliError> {
    match (run.phase, &run.error) {
        (RunPhase::Idle, Some(error)) => Err(CliError::RunFailed(error.clone())),
        _ => Ok(run),
    }
}

fn print_run(run: &AffectationRun) -> Result<(), CliError> {
    if let Some(error) = &run.error {
        eprintln!("last error: {error}");
    }
    print_json(&serde_json::json!({
        "phase": format!("{:?}", run.phase),
        "score": run.score,
        "affectations": run.affectations.len(),
        "stats": run.stats(),
    }))
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Reads answers from stdin.
struct StdinConfirmer;

impl StdinConfirmer {
    fn ask(prompt: &str) -> Option<String> {
        eprint!("{prompt}");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer).ok()?;
        Some(answer)
    }
}

impl Confirmer for StdinConfirmer {
    fn confirm(&mut self, prompt: &str) -> bool {
        Self::ask(&format!("{prompt}\n[y/N] ")).is_some_and(|answer| is_yes(&answer))
    }

    fn confirm_typed(&mut self, prompt: &str, phrase: &str) -> bool {
        Self::ask(&format!("{prompt}\n> ")).is_some_and(|answer| is_exact(&answer, phrase))
    }
}

/// `--yes` skips every question.
fn confirm(steps: &[Step], yes: bool) -> Result<(), CliError> {
    let accepted = if yes { confirm_steps(&mut AssumeYes, steps) } else { confirm_steps(&mut StdinConfirmer, steps) };
    if accepted { Ok(()) } else { Err(CliError::Cancelled) }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "o" | "oui" | "ok")
}

/// Case-sensitive; only the line ending is dropped.
fn is_exact(answer: &str, phrase: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']) == phrase
}

fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
}

fn identity_summary(identity: &Identity) -> Value {
    match identity {
        Identity::Student(s) => serde_json::json!({
            "kind": "eleve",
            "name": identity.display_name(),
            "id": s.id,
            "demiJournee": label_for(&s.demi_journee),
            "voeuxSoumis": s.voeux_deja_soumis,
        }),
        Identity::Admin(a) => serde_json::json!({
            "kind": "admin",
            "name": identity.display_name(),
            "email": a.email,
            "superAdmin": a.is_super_admin(),
        }),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "file written");
    println!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
