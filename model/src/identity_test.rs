use super::*;

fn admin(roles: &[&str]) -> AdminIdentity {
    AdminIdentity {
        token: "jwt".to_owned(),
        email: "admin@fesup.test".to_owned(),
        nom: "Martin".to_owned(),
        prenom: "Claire".to_owned(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
    }
}

#[test]
fn student_identity_parses_backend_field_names() {
    let json = serde_json::json!({
        "id": 12,
        "idNational": "123456789AB",
        "nom": "Durand",
        "prenom": "Léa",
        "lycee": "Lycée Victor Hugo",
        "demiJournee": "JOUR1_MATIN",
        "voeuxDejasoumis": true
    });
    let student: StudentIdentity = serde_json::from_value(json).unwrap();
    assert_eq!(student.id, 12);
    assert_eq!(student.id_national, "123456789AB");
    assert!(student.voeux_deja_soumis);
}

#[test]
fn student_identity_defaults_missing_flags() {
    let json = serde_json::json!({
        "id": 1,
        "idNational": "X",
        "nom": "A",
        "prenom": "B",
        "demiJournee": "JOUR2_MATIN"
    });
    let student: StudentIdentity = serde_json::from_value(json).unwrap();
    assert!(!student.voeux_deja_soumis);
    assert_eq!(student.lycee, "");
}

#[test]
fn superadmin_is_also_admin() {
    let a = admin(&[ROLE_SUPERADMIN]);
    assert!(a.is_admin());
    assert!(a.is_super_admin());
}

#[test]
fn plain_admin_is_not_superadmin() {
    let a = admin(&[ROLE_ADMIN]);
    assert!(a.is_admin());
    assert!(!a.is_super_admin());
}

#[test]
fn unknown_roles_grant_nothing() {
    let a = admin(&["ROLE_USER"]);
    assert!(!a.is_admin());
}

#[test]
fn only_admins_carry_a_bearer_token() {
    let identity = Identity::Admin(admin(&[ROLE_ADMIN]));
    assert_eq!(identity.bearer_token(), Some("jwt"));
    assert_eq!(identity.display_name(), "Claire Martin");
    assert!(identity.as_student().is_none());
}

#[test]
fn identity_is_tagged_when_stored() {
    let identity = Identity::Admin(admin(&[ROLE_ADMIN]));
    let value = serde_json::to_value(&identity).unwrap();
    assert_eq!(value["kind"], "admin");
    let back: Identity = serde_json::from_value(value).unwrap();
    assert_eq!(back, identity);
}
