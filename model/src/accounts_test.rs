use super::*;

fn new_admin() -> NewAdmin {
    NewAdmin {
        email: "claire.dubois@fesup.fr".into(),
        password: "s3cret!".into(),
        nom: "Dubois".into(),
        prenom: "Claire".into(),
        is_super_admin: false,
    }
}

#[test]
fn valid_creation_passes() {
    assert_eq!(new_admin().validate(), Ok(()));
}

#[test]
fn short_password_is_refused() {
    let admin = NewAdmin { password: "12345".into(), ..new_admin() };
    assert_eq!(admin.validate(), Err(AccountError::PasswordTooShort));
}

#[test]
fn blank_name_is_refused() {
    let admin = NewAdmin { prenom: "  ".into(), ..new_admin() };
    assert_eq!(admin.validate(), Err(AccountError::Missing("prenom")));
}

#[test]
fn malformed_email_is_refused() {
    let admin = NewAdmin { email: "claire.dubois".into(), ..new_admin() };
    assert!(matches!(admin.validate(), Err(AccountError::InvalidEmail(_))));
}

#[test]
fn creation_body_uses_camel_case() {
    let body = serde_json::to_value(new_admin()).unwrap();
    assert_eq!(body["isSuperAdmin"], false);
    assert_eq!(body["password"], "s3cret!");
}

#[test]
fn update_sends_only_changed_fields() {
    let update = AdminUpdate { enabled: Some(false), ..AdminUpdate::default() };
    assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({ "enabled": false }));
    assert!(!update.is_empty());
    assert!(AdminUpdate::default().is_empty());
}

#[test]
fn update_checks_present_fields() {
    let update = AdminUpdate { password: Some("abc".into()), ..AdminUpdate::default() };
    assert_eq!(update.validate(), Err(AccountError::PasswordTooShort));
    let update = AdminUpdate { nom: Some(String::new()), ..AdminUpdate::default() };
    assert_eq!(update.validate(), Err(AccountError::Missing("nom")));
}

#[test]
fn account_decodes_backend_row() {
    let body = serde_json::json!({
        "id": 3,
        "email": "root@fesup.fr",
        "nom": "Admin",
        "prenom": "Super",
        "enabled": true,
        "isSuperAdmin": true,
        "roles": ["ROLE_SUPERADMIN"]
    });
    let account: AdminAccount = serde_json::from_value(body).unwrap();
    assert!(account.is_super_admin);
    assert_eq!(account.full_name(), "Super Admin");
}
