//! HTTP API Client
//!
//! Functions for talking to the hosted data service: a PostgREST-style
//! row API for the `glucose_logs` table and a GoTrue-style token API for
//! sessions. The service URL and keys live in browser local storage with
//! compiled-in defaults.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::model::{level_in_domain, Identity, MealContext, Reading, ReadingDraft};

/// Default service base URL (local development stack).
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:54321";

/// Default publishable API key for the development stack.
pub const DEFAULT_ANON_KEY: &str = "dev-anon-key";

const SERVICE_URL_KEY: &str = "glucotrack_service_url";
const ANON_KEY_KEY: &str = "glucotrack_anon_key";
const ACCESS_TOKEN_KEY: &str = "glucotrack_access_token";

/// Reads get exactly one retry on remote failure; writes get none.
const READ_RETRIES: u32 = 1;

fn storage_get(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(key).ok()?
}

fn storage_set(key: &str, value: Option<&str>) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = match value {
                Some(value) => storage.set_item(key, value),
                None => storage.remove_item(key),
            };
        }
    }
}

/// Get the service base URL from local storage or use the default.
pub fn service_url() -> String {
    storage_get(SERVICE_URL_KEY)
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

fn anon_key() -> String {
    storage_get(ANON_KEY_KEY).unwrap_or_else(|| DEFAULT_ANON_KEY.to_string())
}

fn access_token() -> Option<String> {
    storage_get(ACCESS_TOKEN_KEY)
}

fn store_access_token(token: Option<&str>) {
    storage_set(ACCESS_TOKEN_KEY, token);
}

/// Attach the API key, and the session token when one exists.
fn with_auth(request: RequestBuilder) -> RequestBuilder {
    let request = request.header("apikey", &anon_key());
    match access_token() {
        Some(token) => request.header("Authorization", &format!("Bearer {token}")),
        None => request,
    }
}

fn require_session() -> Result<(), ApiError> {
    if access_token().is_none() {
        return Err(ApiError::Auth("Not signed in".to_string()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

/// Map a non-2xx response to the error taxonomy, extracting the service's
/// message when the body carries one.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body
            .message
            .or(body.error_description)
            .or(body.msg)
            .unwrap_or_else(|| format!("Request failed with status {status}")),
        Err(_) => format!("Request failed with status {status}"),
    };
    ApiError::from_status(status, message)
}

fn network_error(err: gloo_net::Error) -> ApiError {
    ApiError::Remote(format!("Network error: {err}"))
}

// ============ Readings ============

async fn list_readings_once() -> Result<Vec<Reading>, ApiError> {
    require_session()?;

    let url = format!(
        "{}/rest/v1/glucose_logs?select=*&order=logged_at.desc",
        service_url()
    );
    let response = with_auth(Request::get(&url))
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(error_from_response(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Remote(format!("Parse error: {e}")))
}

/// Fetch all readings for the signed-in user, descending by `logged_at`.
///
/// Remote failures get a single retry; auth failures do not.
pub async fn list_readings() -> Result<Vec<Reading>, ApiError> {
    let mut attempt = 0;
    loop {
        match list_readings_once().await {
            Err(ApiError::Remote(e)) if attempt < READ_RETRIES => {
                attempt += 1;
                web_sys::console::warn_1(
                    &format!("Retrying reading fetch after failure: {e}").into(),
                );
            }
            other => return other,
        }
    }
}

#[derive(serde::Serialize)]
struct InsertRow<'a> {
    user_id: &'a str,
    level: f64,
    logged_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meal_type: Option<MealContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

/// Insert one reading owned by `owner_id` and return the stored row.
///
/// The level is validated before any network traffic; an out-of-range
/// value never produces a request.
pub async fn create_reading(owner_id: &str, draft: &ReadingDraft) -> Result<Reading, ApiError> {
    if !level_in_domain(draft.level) {
        return Err(ApiError::Validation(
            "Glucose level must be between 10 and 600 mg/dL".to_string(),
        ));
    }
    require_session()?;

    let url = format!("{}/rest/v1/glucose_logs", service_url());
    let rows = [InsertRow {
        user_id: owner_id,
        level: draft.level,
        logged_at: draft.logged_at,
        meal_type: draft.meal_type,
        note: draft.note.as_deref(),
    }];

    let response = with_auth(Request::post(&url))
        .header("Prefer", "return=representation")
        .json(&rows)
        .map_err(|e| ApiError::Remote(format!("Request build error: {e}")))?
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(error_from_response(response).await);
    }

    let mut created: Vec<Reading> = response
        .json()
        .await
        .map_err(|e| ApiError::Remote(format!("Parse error: {e}")))?;
    created
        .pop()
        .ok_or_else(|| ApiError::Remote("Insert returned no row".to_string()))
}

/// Delete one reading by id. Writes are never retried.
pub async fn delete_reading(id: &str) -> Result<(), ApiError> {
    require_session()?;

    let url = format!(
        "{}/rest/v1/glucose_logs?id=eq.{}",
        service_url(),
        js_sys::encode_uri_component(id)
    );
    let response = with_auth(Request::delete(&url))
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    Ok(())
}

// ============ Sessions ============

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: Identity,
}

#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    access_token: Option<String>,
    user: Identity,
}

#[derive(serde::Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Exchange credentials for a session. Stores the access token locally on
/// success.
pub async fn sign_in(email: &str, password: &str) -> Result<Identity, ApiError> {
    let url = format!("{}/auth/v1/token?grant_type=password", service_url());
    let response = Request::post(&url)
        .header("apikey", &anon_key())
        .json(&Credentials { email, password })
        .map_err(|e| ApiError::Remote(format!("Request build error: {e}")))?
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(error_from_response(response).await);
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Remote(format!("Parse error: {e}")))?;
    store_access_token(Some(&token.access_token));
    Ok(token.user)
}

/// Register a new account. Returns the identity and, when the service
/// issues a session right away, stores its token; `None` session means a
/// confirmation step is pending.
pub async fn sign_up(email: &str, password: &str) -> Result<(Identity, bool), ApiError> {
    let url = format!("{}/auth/v1/signup", service_url());
    let response = Request::post(&url)
        .header("apikey", &anon_key())
        .json(&Credentials { email, password })
        .map_err(|e| ApiError::Remote(format!("Request build error: {e}")))?
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(error_from_response(response).await);
    }

    let signup: SignUpResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Remote(format!("Parse error: {e}")))?;
    let has_session = signup.access_token.is_some();
    if let Some(token) = signup.access_token.as_deref() {
        store_access_token(Some(token));
    }
    Ok((signup.user, has_session))
}

/// Look up the identity behind the stored token, if any. A rejected token
/// is cleared and reported as no session rather than an error.
pub async fn current_identity() -> Result<Option<Identity>, ApiError> {
    if access_token().is_none() {
        return Ok(None);
    }

    let url = format!("{}/auth/v1/user", service_url());
    let response = with_auth(Request::get(&url))
        .send()
        .await
        .map_err(network_error)?;

    if response.status() == 401 || response.status() == 403 {
        store_access_token(None);
        return Ok(None);
    }
    if !response.ok() {
        return Err(error_from_response(response).await);
    }

    let identity: Identity = response
        .json()
        .await
        .map_err(|e| ApiError::Remote(format!("Parse error: {e}")))?;
    Ok(Some(identity))
}

/// Single idempotent sign-out. The remote call is best-effort; the local
/// token is cleared on both success and failure, so local logout always
/// succeeds.
pub async fn sign_out() -> Result<(), ApiError> {
    let had_token = access_token().is_some();
    let result = if had_token {
        let url = format!("{}/auth/v1/logout", service_url());
        with_auth(Request::post(&url))
            .send()
            .await
            .map_err(network_error)
            .and_then(|response| {
                if response.ok() {
                    Ok(())
                } else {
                    Err(ApiError::Remote(format!(
                        "Sign-out rejected with status {}",
                        response.status()
                    )))
                }
            })
    } else {
        Ok(())
    };

    store_access_token(None);
    result
}
