use super::*;

struct Scripted {
    answers: Vec<bool>,
    typed: Vec<&'static str>,
    asked: Vec<String>,
}

impl Scripted {
    fn new(answers: &[bool]) -> Self {
        Self { answers: answers.to_vec(), typed: Vec::new(), asked: Vec::new() }
    }

    fn typing(mut self, typed: &[&'static str]) -> Self {
        self.typed = typed.to_vec();
        self
    }
}

impl Confirmer for Scripted {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.asked.push(prompt.to_owned());
        if self.answers.is_empty() { false } else { self.answers.remove(0) }
    }

    fn confirm_typed(&mut self, prompt: &str, phrase: &str) -> bool {
        self.asked.push(prompt.to_owned());
        !self.typed.is_empty() && self.typed.remove(0) == phrase
    }
}

fn warning(entity: ReferenceEntity) -> String {
    deletion_steps(entity)[0].prompt().to_owned()
}

#[test]
fn all_steps_accepted() {
    let mut c = Scripted::new(&[true, true]);
    assert!(confirm_steps(&mut c, &deletion_steps(ReferenceEntity::Lycees)));
    assert_eq!(c.asked.len(), 2);
}

#[test]
fn first_refusal_stops_asking() {
    let mut c = Scripted::new(&[false, true]);
    assert!(!confirm_steps(&mut c, &deletion_steps(ReferenceEntity::Salles)));
    assert_eq!(c.asked.len(), 1);
}

#[test]
fn second_refusal_aborts() {
    let mut c = Scripted::new(&[true, false]);
    assert!(!confirm_steps(&mut c, &deletion_steps(ReferenceEntity::Affectations)));
    assert_eq!(c.asked.len(), 2);
}

#[test]
fn second_step_asks_if_absolutely_sure() {
    let steps = deletion_steps(ReferenceEntity::Creneaux);
    assert_eq!(steps.len(), 2);
    assert!(steps[1].prompt().contains("ABSOLUMENT"));
}

// =============================================================================
// per-entity warnings
// =============================================================================

#[test]
fn lycees_warning_lists_students_and_wishes() {
    let w = warning(ReferenceEntity::Lycees);
    assert!(w.contains("supprimer TOUS les lycées ?"));
    assert!(w.contains("- tous les élèves associés"));
    assert!(w.contains("- tous les vœux associés"));
    assert!(!w.contains("sessions"));
}

#[test]
fn eleves_warning_lists_wishes_and_assignments() {
    let w = warning(ReferenceEntity::Eleves);
    assert!(w.contains("supprimer TOUS les élèves ?"));
    assert!(w.contains("également"));
    assert!(w.contains("- tous les vœux associés"));
    assert!(w.contains("- toutes les affectations associées"));
}

#[test]
fn activites_warning_lists_wishes_sessions_assignments_tickets() {
    let w = warning(ReferenceEntity::Activites);
    assert!(w.contains("supprimer TOUTES les activités ?"));
    assert!(w.contains("- tous les vœux associés"));
    assert!(w.contains("- toutes les sessions associées"));
    assert!(w.contains("- toutes les affectations associées"));
    assert!(w.contains("- les tickets PDF générés"));
}

#[test]
fn salles_warning_lists_sessions_assignments_tickets() {
    let w = warning(ReferenceEntity::Salles);
    assert!(w.contains("supprimer TOUTES les salles ?"));
    assert!(w.contains("- toutes les sessions associées"));
    assert!(w.contains("- toutes les affectations associées"));
    assert!(!w.contains("vœux"));
}

#[test]
fn creneaux_warning_lists_only_sessions() {
    let w = warning(ReferenceEntity::Creneaux);
    assert!(w.contains("supprimer TOUS les créneaux ?"));
    assert!(w.contains("- toutes les sessions associées"));
    assert!(!w.contains("affectations"));
}

#[test]
fn sessions_warning_lists_assignments_and_tickets() {
    let w = warning(ReferenceEntity::Sessions);
    assert!(w.contains("supprimer TOUTES les sessions ?"));
    assert!(w.contains("- toutes les affectations associées"));
    assert!(w.contains("- les tickets PDF générés"));
}

#[test]
fn affectations_warning_lists_tickets() {
    let w = warning(ReferenceEntity::Affectations);
    assert!(w.contains("supprimer TOUTES les affectations ?"));
    assert!(w.contains("- les tickets PDF générés"));
}

// =============================================================================
// purge and single-item flows
// =============================================================================

#[test]
fn purge_requires_exact_phrase() {
    let mut c = Scripted::new(&[true]).typing(&["supprimer tout"]);
    assert!(!confirm_steps(&mut c, &purge_steps()));
    assert_eq!(c.asked.len(), 2);

    let mut c = Scripted::new(&[true]).typing(&[PURGE_PHRASE]);
    assert!(confirm_steps(&mut c, &purge_steps()));
}

#[test]
fn purge_refused_warning_skips_phrase() {
    let mut c = Scripted::new(&[false]).typing(&[PURGE_PHRASE]);
    assert!(!confirm_steps(&mut c, &purge_steps()));
    assert_eq!(c.asked.len(), 1);
}

#[test]
fn purge_warning_lists_every_table_and_spares_admins() {
    let steps = purge_steps();
    let w = steps[0].prompt();
    assert!(w.contains("Tous les vœux des élèves"));
    assert!(w.contains("Tous les lycées"));
    assert!(w.contains("COMPTES ADMINISTRATEURS SERONT PRÉSERVÉS"));
    assert!(matches!(steps[1], Step::Typed { phrase: PURGE_PHRASE, .. }));
}

#[test]
fn admin_deletion_names_the_account() {
    let account = AdminAccount {
        id: 4,
        email: "paul@fesup.fr".into(),
        nom: "Martin".into(),
        prenom: "Paul".into(),
        enabled: true,
        is_super_admin: false,
        roles: vec![],
    };
    let steps = admin_deletion_steps(&account);
    assert_eq!(steps, vec![Step::YesNo("Voulez-vous vraiment supprimer l'administrateur Paul Martin ?".into())]);
}

#[test]
fn session_generation_warns_about_replacement() {
    let steps = session_generation_steps();
    assert_eq!(steps.len(), 1);
    assert!(steps[0].prompt().contains("SUPPRIMER toutes les sessions existantes"));
}

#[test]
fn assume_yes_accepts_everything() {
    assert!(confirm_steps(&mut AssumeYes, &deletion_steps(ReferenceEntity::Sessions)));
    assert!(confirm_steps(&mut AssumeYes, &purge_steps()));
}
