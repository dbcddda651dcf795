use super::*;

#[test]
fn student_endpoints_format_expected_paths() {
    assert_eq!(activities_endpoint("JOUR1_MATIN"), "/voeux/activites/JOUR1_MATIN");
    assert_eq!(wish_status_endpoint(12), "/voeux/status/12");
    assert_eq!(student_wishes_endpoint(12), "/eleves/12/voeux");
    assert_eq!(confirm_wishes_endpoint(12), "/eleves/12/valider-voeux");
}

#[test]
fn entity_endpoints_follow_segment() {
    assert_eq!(collection_endpoint(ReferenceEntity::Salles), "/admin/salles");
    assert_eq!(delete_all_endpoint(ReferenceEntity::Creneaux), "/admin/creneaux/all");
    assert_eq!(export_endpoint(ReferenceEntity::Lycees.into()), "/superadmin/system/export/lycees");
    assert_eq!(collection_endpoint(ReferenceEntity::Affectations), "/admin/affectations");
}

#[test]
fn admin_endpoints_format_ids() {
    assert_eq!(reassign_endpoint(5), "/admin/affectations/5");
    assert_eq!(reset_wishes_endpoint(8), "/admin/eleves/8/reset-voeux");
    assert_eq!(admin_ticket_endpoint(8), "/admin/tickets/eleves/8/ticket");
    assert_eq!(regenerate_ticket_endpoint(8), "/admin/tickets/eleves/8/regenerer");
}

#[test]
fn system_endpoints_cover_imports_exports_and_accounts() {
    assert_eq!(export_endpoint(ExportTarget::Voeux), "/superadmin/system/export/voeux");
    assert_eq!(export_endpoint(ExportTarget::All), "/superadmin/system/export/all");
    assert_eq!(import_endpoint(ImportTarget::Eleves), "/admin/import/eleves");
    assert_eq!(import_endpoint(ImportTarget::Salles), "/admin/import/salles");
    assert_eq!(admin_account_endpoint(4), "/superadmin/admins/4");
}

#[test]
fn error_message_reads_error_field() {
    assert_eq!(error_message(r#"{"error":"Cet email existe déjà"}"#), "Cet email existe déjà");
}

#[test]
fn error_message_prefers_json_message() {
    assert_eq!(error_message(r#"{"status":"ERROR","message":"boom"}"#), "boom");
}

#[test]
fn error_message_falls_back_to_raw_body() {
    assert_eq!(error_message("Email ou mot de passe incorrect"), "Email ou mot de passe incorrect");
    assert_eq!(error_message("   "), "no details");
}

#[test]
fn status_error_maps_auth_statuses() {
    assert!(matches!(status_error(StatusCode::UNAUTHORIZED, "nope"), ClientError::Unauthorized(m) if m == "nope"));
    assert!(matches!(status_error(StatusCode::FORBIDDEN, ""), ClientError::Forbidden(_)));
    assert!(matches!(
        status_error(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"x"}"#),
        ClientError::Status { status: 500, .. }
    ));
}

#[test]
fn launch_without_sessions_is_classified() {
    let err = classify_launch_error(ClientError::Status {
        status: 500,
        message: "Impossible de lancer : aucune session n'a été créée".to_owned(),
    });
    assert!(matches!(err, ClientError::NoSessions));
    assert_eq!(err.error_code(), "E_NO_SESSIONS");
}

#[test]
fn other_launch_errors_pass_through() {
    let err = classify_launch_error(ClientError::Status { status: 500, message: "solver crashed".to_owned() });
    assert!(matches!(err, ClientError::Status { status: 500, .. }));
}

#[tokio::test]
async fn admin_calls_require_admin_session() {
    let api = ApiClient::new(&ClientConfig::default(), SessionStore::in_memory()).unwrap();
    let err = api.status().await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated(_)));
}

#[tokio::test]
async fn wish_submission_needs_student_session() {
    let api = ApiClient::new(&ClientConfig::default(), SessionStore::in_memory()).unwrap();
    let err = api.submit_wishes(&WishSlots::filled([1, 2, 3, 4, 5])).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated(_)));
}

#[tokio::test]
async fn invalid_wishes_are_blocked_before_sending() {
    let session = SessionStore::in_memory();
    session
        .login(Identity::Student(StudentIdentity {
            id: 1,
            id_national: "X".to_owned(),
            nom: "N".to_owned(),
            prenom: "P".to_owned(),
            lycee: String::new(),
            demi_journee: "JOUR1_MATIN".to_owned(),
            voeux_deja_soumis: false,
        }))
        .unwrap();
    // Unroutable base URL: reaching the network would yield `Request`.
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
    let api = ApiClient::new(&config, session).unwrap();
    let err = api.submit_wishes(&WishSlots::filled([1, 1, 3, 4, 5])).await.unwrap_err();
    assert!(matches!(err, ClientError::Wish(fesup_model::WishError::Invalid(_))));
}

fn admin_session() -> SessionStore {
    let session = SessionStore::in_memory();
    session
        .login(Identity::Admin(AdminIdentity {
            token: "jwt".to_owned(),
            email: "root@fesup.fr".to_owned(),
            nom: "Admin".to_owned(),
            prenom: "Super".to_owned(),
            roles: vec!["ROLE_SUPERADMIN".to_owned()],
        }))
        .unwrap();
    session
}

#[tokio::test]
async fn invalid_admin_account_is_blocked_before_sending() {
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
    let api = ApiClient::new(&config, admin_session()).unwrap();
    let account = NewAdmin {
        email: "new@fesup.fr".to_owned(),
        password: "123".to_owned(),
        nom: "Petit".to_owned(),
        prenom: "Jean".to_owned(),
        is_super_admin: false,
    };
    let err = api.create_admin(&account).await.unwrap_err();
    assert!(matches!(err, ClientError::Account(fesup_model::AccountError::PasswordTooShort)));
    assert_eq!(err.error_code(), "E_ACCOUNT_INVALID");

    let update = AdminUpdate { email: Some("nope".to_owned()), ..AdminUpdate::default() };
    let err = api.update_admin(2, &update).await.unwrap_err();
    assert!(matches!(err, ClientError::Account(fesup_model::AccountError::InvalidEmail(_))));
}

#[tokio::test]
async fn system_calls_require_admin_session() {
    let api = ApiClient::new(&ClientConfig::default(), SessionStore::in_memory()).unwrap();
    assert!(matches!(api.purge_all().await, Err(ClientError::NotAuthenticated(_))));
    assert!(matches!(api.export(ExportTarget::All).await, Err(ClientError::NotAuthenticated(_))));
    assert!(matches!(api.list_admins().await, Err(ClientError::NotAuthenticated(_))));
    let err = api.import_csv(ImportTarget::Salles, "salles.csv", b"nom;capacite\n".to_vec()).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated(_)));
}
