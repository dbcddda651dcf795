//! REST API wrapper for the FESUP backend.
//!
//! Student calls are anonymous apart from the identity check; admin calls
//! carry the JWT of the admin session as a bearer token and fail locally
//! with `NotAuthenticated` when no admin is logged in.
//!
//! ERROR HANDLING
//! ==============
//! Non-success responses become `ClientError` with the backend `message`
//! field when the body is JSON, else the raw body. 401 and 403 get their own
//! variants so callers can send the user back to the login screen.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::collections::BTreeMap;
use std::time::Duration;

use fesup_model::reference::{ActivitesGroupees, Eleve, EleveStats};
use fesup_model::{
    AdminAccount, AdminIdentity, AdminLoginRequest, AdminUpdate, AffectationDto, AffectationResultat,
    AffectationStatus, DeleteReport, EntityId, ExportTarget, Identity, ImportReport, ImportTarget, LaunchResponse,
    NewAdmin, RecordedWish, ReferenceEntity, StudentAuthRequest, StudentIdentity, WishSlots, WishSubmission,
    WishSubmissionResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::state::session::SessionStore;

// =============================================================================
// ENDPOINTS
// =============================================================================

fn activities_endpoint(demi_journee: &str) -> String {
    format!("/voeux/activites/{demi_journee}")
}

fn wish_status_endpoint(eleve_id: EntityId) -> String {
    format!("/voeux/status/{eleve_id}")
}

fn student_wishes_endpoint(eleve_id: EntityId) -> String {
    format!("/eleves/{eleve_id}/voeux")
}

fn confirm_wishes_endpoint(eleve_id: EntityId) -> String {
    format!("/eleves/{eleve_id}/valider-voeux")
}

fn collection_endpoint(entity: ReferenceEntity) -> String {
    format!("/admin/{}", entity.segment())
}

fn delete_all_endpoint(entity: ReferenceEntity) -> String {
    format!("/admin/{}/all", entity.segment())
}

fn export_endpoint(target: ExportTarget) -> String {
    format!("/superadmin/system/export/{}", target.segment())
}

fn import_endpoint(target: ImportTarget) -> String {
    format!("/admin/import/{}", target.segment())
}

const ADMINS_ENDPOINT: &str = "/superadmin/admins";

fn admin_account_endpoint(admin_id: EntityId) -> String {
    format!("{ADMINS_ENDPOINT}/{admin_id}")
}

fn reassign_endpoint(affectation_id: EntityId) -> String {
    format!("/admin/affectations/{affectation_id}")
}

fn reset_wishes_endpoint(eleve_id: EntityId) -> String {
    format!("/admin/eleves/{eleve_id}/reset-voeux")
}

fn admin_ticket_endpoint(eleve_id: EntityId) -> String {
    format!("/admin/tickets/eleves/{eleve_id}/ticket")
}

fn regenerate_ticket_endpoint(eleve_id: EntityId) -> String {
    format!("/admin/tickets/eleves/{eleve_id}/regenerer")
}

/// Human-readable message from an error body. Most controllers answer
/// `{message}`, account management answers `{error}`.
fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let field = |name| value.get(name).and_then(Value::as_str);
        if let Some(message) = field("message").or_else(|| field("error")) {
            return message.to_owned();
        }
    }
    if trimmed.is_empty() { "no details".to_owned() } else { trimmed.to_owned() }
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        _ => ClientError::Status { status: status.as_u16(), message },
    }
}

/// Launch refusals caused by missing sessions get a dedicated variant so the
/// view can point the admin at session management.
fn classify_launch_error(error: ClientError) -> ClientError {
    match error {
        ClientError::Status { ref message, .. } if message.to_lowercase().contains("aucune session") => {
            ClientError::NoSessions
        }
        other => other,
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Assignment endpoints the poller depends on.
#[async_trait::async_trait]
pub trait AffectationApi: Send + Sync {
    /// `POST /admin/affectations/lancer`.
    async fn launch(&self) -> Result<LaunchResponse, ClientError>;
    /// `GET /admin/affectations/status`.
    async fn status(&self) -> Result<AffectationStatus, ClientError>;
    /// `GET /admin/affectations/resultats`.
    async fn results(&self) -> Result<AffectationResultat, ClientError>;
    /// `GET /admin/affectations`: assignments saved by a previous run.
    async fn list_affectations(&self) -> Result<Vec<AffectationDto>, ClientError>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the TLS backend cannot be initialized.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), session })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        self.http.request(method, self.url(path))
    }

    fn admin_request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let admin = self.session.admin().ok_or(ClientError::NotAuthenticated("admin login required"))?;
        Ok(self.request(method, path).bearer_auth(admin.token))
    }

    fn current_student(&self) -> Result<StudentIdentity, ClientError> {
        self.session.student().ok_or(ClientError::NotAuthenticated("student identification required"))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = status_error(status, &body);
        warn!(status = status.as_u16(), error = %error, "api request failed");
        Err(error)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// JSON body, or `Null` when the response is empty.
    async fn send_value(request: RequestBuilder) -> Result<Value, ClientError> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_bytes(request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let response = Self::send(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // -------------------------------------------------------------------------
    // Student flow
    // -------------------------------------------------------------------------

    /// Check a student's national id and name; on success the student
    /// becomes the session identity.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the backend does not recognize the student.
    pub async fn authenticate_student(&self, id_national: &str, nom: &str) -> Result<StudentIdentity, ClientError> {
        let body = StudentAuthRequest { id_national: id_national.trim().to_owned(), nom: nom.trim().to_owned() };
        let student: StudentIdentity = Self::send_json(self.request(Method::POST, "/voeux/auth").json(&body)).await?;
        self.session.login(Identity::Student(student.clone()))?;
        info!(eleve_id = student.id, "student identified");
        Ok(student)
    }

    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn activities_for(&self, demi_journee: &str) -> Result<ActivitesGroupees, ClientError> {
        Self::send_json(self.request(Method::GET, &activities_endpoint(demi_journee))).await
    }

    /// Validate locally, then submit the wishes of the logged-in student.
    ///
    /// # Errors
    ///
    /// `Wish` when the set is incomplete or breaks a rule (nothing is sent),
    /// `NotAuthenticated` without a student session, or the backend error.
    pub async fn submit_wishes(&self, slots: &WishSlots) -> Result<WishSubmissionResponse, ClientError> {
        let student = self.current_student()?;
        let submission = WishSubmission::from_slots(student.id, slots)?;
        let response: WishSubmissionResponse =
            Self::send_json(self.request(Method::POST, "/voeux/soumettre").json(&submission)).await?;
        info!(eleve_id = student.id, success = response.success, "wishes submitted");
        Ok(response)
    }

    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn has_submitted(&self, eleve_id: EntityId) -> Result<bool, ClientError> {
        Self::send_json(self.request(Method::GET, &wish_status_endpoint(eleve_id))).await
    }

    /// Wishes recorded for a student, for the summary screen.
    ///
    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn student_wishes(&self, eleve_id: EntityId) -> Result<Vec<RecordedWish>, ClientError> {
        Self::send_json(self.request(Method::GET, &student_wishes_endpoint(eleve_id))).await
    }

    /// Mark the submitted wishes as final.
    ///
    /// # Errors
    ///
    /// `Status` when the student does not have exactly five stored wishes.
    pub async fn confirm_wishes(&self, eleve_id: EntityId) -> Result<(), ClientError> {
        let request = self.request(Method::POST, &confirm_wishes_endpoint(eleve_id)).json(&serde_json::json!({}));
        Self::send(request).await?;
        info!(eleve_id, "wishes confirmed");
        Ok(())
    }

    /// # Errors
    ///
    /// `NotAuthenticated` without a student session, or request failures.
    pub async fn ticket_available(&self) -> Result<bool, ClientError> {
        #[derive(serde::Deserialize)]
        struct TicketStatus {
            disponible: bool,
        }
        let student = self.current_student()?;
        let request = self
            .request(Method::GET, "/voeux/mon-ticket/status")
            .query(&[("eleveId", student.id.to_string()), ("nom", student.nom)]);
        let status: TicketStatus = Self::send_json(request).await?;
        Ok(status.disponible)
    }

    /// PDF ticket of the logged-in student.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a student session, or request failures.
    pub async fn download_ticket(&self) -> Result<Vec<u8>, ClientError> {
        let student = self.current_student()?;
        let request = self
            .request(Method::GET, "/voeux/mon-ticket")
            .query(&[("eleveId", student.id.to_string()), ("nom", student.nom)]);
        Self::send_bytes(request).await
    }

    // -------------------------------------------------------------------------
    // Admin session
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// `Unauthorized` on bad credentials, `Forbidden` when the account has no
    /// admin role.
    pub async fn login_admin(&self, email: &str, password: &str) -> Result<AdminIdentity, ClientError> {
        let body = AdminLoginRequest { email: email.trim().to_owned(), password: password.to_owned() };
        let admin: AdminIdentity = Self::send_json(self.request(Method::POST, "/auth/login").json(&body)).await?;
        if !admin.is_admin() {
            return Err(ClientError::Forbidden(format!("{} has no admin role", admin.email)));
        }
        self.session.login(Identity::Admin(admin.clone()))?;
        info!(email = %admin.email, "admin logged in");
        Ok(admin)
    }

    /// # Errors
    ///
    /// `Storage` if the persisted session could not be removed.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session.logout()
    }

    // -------------------------------------------------------------------------
    // Assignment
    // -------------------------------------------------------------------------

    /// Move one assignment to another session.
    ///
    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn reassign(
        &self,
        affectation_id: EntityId,
        session_id: EntityId,
    ) -> Result<AffectationDto, ClientError> {
        let request = self
            .admin_request(Method::PUT, &reassign_endpoint(affectation_id))?
            .query(&[("sessionId", session_id)]);
        Self::send_json(request).await
    }

    // -------------------------------------------------------------------------
    // Reference data
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn list<T: DeserializeOwned>(&self, entity: ReferenceEntity) -> Result<Vec<T>, ClientError> {
        Self::send_json(self.admin_request(Method::GET, &collection_endpoint(entity))?).await
    }

    /// Irreversible: removes every row of `entity` and its dependents.
    /// Callers must have gone through the confirmation flow first.
    ///
    /// # Errors
    ///
    /// Request failures.
    pub async fn delete_all(&self, entity: ReferenceEntity) -> Result<DeleteReport, ClientError> {
        let value = Self::send_value(self.admin_request(Method::DELETE, &delete_all_endpoint(entity))?).await?;
        let report = DeleteReport::from_json(&value);
        info!(%entity, total = report.total(), "bulk delete completed");
        Ok(report)
    }

    /// CSV export of one entity or of the wishes, or a zip of everything
    /// (super-admin only).
    ///
    /// # Errors
    ///
    /// `Forbidden` for non super-admins, or request failures.
    pub async fn export(&self, target: ExportTarget) -> Result<Vec<u8>, ClientError> {
        let bytes = Self::send_bytes(self.admin_request(Method::GET, &export_endpoint(target))?).await?;
        info!(%target, bytes = bytes.len(), "export downloaded");
        Ok(bytes)
    }

    /// Irreversible: empties every table except admin accounts.
    /// Callers must have gone through the purge confirmation first.
    ///
    /// # Errors
    ///
    /// `Forbidden` for non super-admins, or request failures.
    pub async fn purge_all(&self) -> Result<DeleteReport, ClientError> {
        let report: DeleteReport =
            Self::send_json(self.admin_request(Method::DELETE, "/superadmin/system/purge-all")?).await?;
        warn!(total = report.total(), "all data purged");
        Ok(report)
    }

    /// Upload a CSV file. Bad lines are reported, not fatal.
    ///
    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn import_csv(
        &self,
        target: ImportTarget,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ImportReport, ClientError> {
        let part = Part::bytes(contents).file_name(file_name.to_owned()).mime_str("text/csv")?;
        let request = self
            .admin_request(Method::POST, &import_endpoint(target))?
            .multipart(Form::new().part("file", part));
        let report: ImportReport = Self::send_json(request).await?;
        info!(
            %target,
            total = report.total_lines,
            imported = report.success_count,
            rejected = report.error_count,
            "csv import completed"
        );
        Ok(report)
    }

    /// Row counts per table.
    ///
    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn system_stats(&self) -> Result<BTreeMap<String, u64>, ClientError> {
        Self::send_json(self.admin_request(Method::GET, "/superadmin/system/stats")?).await
    }

    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn eleve_stats(&self) -> Result<EleveStats, ClientError> {
        Self::send_json(self.admin_request(Method::GET, "/admin/eleves/stats")?).await
    }

    /// Let a student submit wishes again.
    ///
    /// # Errors
    ///
    /// Request or decode failures.
    pub async fn reset_wishes(&self, eleve_id: EntityId) -> Result<Eleve, ClientError> {
        Self::send_json(self.admin_request(Method::POST, &reset_wishes_endpoint(eleve_id))?).await
    }

    /// Create sessions from the submitted wishes.
    ///
    /// # Errors
    ///
    /// Request failures.
    pub async fn generate_sessions(&self) -> Result<Value, ClientError> {
        Self::send_value(self.admin_request(Method::POST, "/admin/sessions/generation/auto")?).await
    }

    /// Start batch PDF ticket generation on the backend.
    ///
    /// # Errors
    ///
    /// Request failures.
    pub async fn generate_all_tickets(&self) -> Result<Value, ClientError> {
        Self::send_value(self.admin_request(Method::POST, "/admin/tickets/generer-tous")?).await
    }

    /// # Errors
    ///
    /// Request failures.
    pub async fn regenerate_ticket(&self, eleve_id: EntityId) -> Result<Value, ClientError> {
        Self::send_value(self.admin_request(Method::POST, &regenerate_ticket_endpoint(eleve_id))?).await
    }

    /// # Errors
    ///
    /// `Status { status: 404, .. }` when tickets have not been generated yet.
    pub async fn download_admin_ticket(&self, eleve_id: EntityId) -> Result<Vec<u8>, ClientError> {
        Self::send_bytes(self.admin_request(Method::GET, &admin_ticket_endpoint(eleve_id))?).await
    }

    // -------------------------------------------------------------------------
    // Admin accounts (super-admin)
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// `Forbidden` for non super-admins, or request failures.
    pub async fn list_admins(&self) -> Result<Vec<AdminAccount>, ClientError> {
        Self::send_json(self.admin_request(Method::GET, ADMINS_ENDPOINT)?).await
    }

    /// # Errors
    ///
    /// `Status { status: 404, .. }` for an unknown id, or request failures.
    pub async fn get_admin(&self, admin_id: EntityId) -> Result<AdminAccount, ClientError> {
        Self::send_json(self.admin_request(Method::GET, &admin_account_endpoint(admin_id))?).await
    }

    /// # Errors
    ///
    /// `Account` when the form is invalid (nothing is sent), `Status` when
    /// the email is already taken.
    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<AdminAccount, ClientError> {
        admin.validate()?;
        let account: AdminAccount =
            Self::send_json(self.admin_request(Method::POST, ADMINS_ENDPOINT)?.json(admin)).await?;
        info!(admin_id = account.id, email = %account.email, "admin account created");
        Ok(account)
    }

    /// # Errors
    ///
    /// `Account` when a given field is invalid, or request failures.
    pub async fn update_admin(&self, admin_id: EntityId, update: &AdminUpdate) -> Result<AdminAccount, ClientError> {
        update.validate()?;
        let request = self.admin_request(Method::PUT, &admin_account_endpoint(admin_id))?.json(update);
        let account: AdminAccount = Self::send_json(request).await?;
        info!(admin_id, "admin account updated");
        Ok(account)
    }

    /// # Errors
    ///
    /// Request failures.
    pub async fn delete_admin(&self, admin_id: EntityId) -> Result<(), ClientError> {
        Self::send(self.admin_request(Method::DELETE, &admin_account_endpoint(admin_id))?).await?;
        info!(admin_id, "admin account deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl AffectationApi for ApiClient {
    async fn launch(&self) -> Result<LaunchResponse, ClientError> {
        let request = self
            .admin_request(Method::POST, "/admin/affectations/lancer")?
            .json(&serde_json::json!({}));
        let response: LaunchResponse = Self::send_json(request).await.map_err(classify_launch_error)?;
        info!(problem_id = ?response.problem_id, "assignment launched");
        Ok(response)
    }

    async fn status(&self) -> Result<AffectationStatus, ClientError> {
        Self::send_json(self.admin_request(Method::GET, "/admin/affectations/status")?).await
    }

    async fn results(&self) -> Result<AffectationResultat, ClientError> {
        Self::send_json(self.admin_request(Method::GET, "/admin/affectations/resultats")?).await
    }

    async fn list_affectations(&self) -> Result<Vec<AffectationDto>, ClientError> {
        self.list(ReferenceEntity::Affectations).await
    }
}
