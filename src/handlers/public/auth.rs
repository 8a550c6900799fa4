use axum::{
    extract::Query,
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config;
use crate::database::{service, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::session::{self, github, SessionClaims};

/// GET /auth - login page data (guest-only; the guard bounces
/// authenticated sessions to the dashboard)
pub async fn login_page() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "provider": "github",
        "login_url": "/auth/github",
    })))
}

/// GET /auth/github - start the OAuth flow: stamp a state nonce and
/// redirect to the provider's authorize page
pub async fn github_begin() -> impl IntoResponse {
    let state = Uuid::new_v4().to_string();
    let url = github::authorize_url(&config::config().oauth, &state);
    (
        AppendHeaders([(SET_COOKIE, session::state_cookie(&state))]),
        Redirect::to(&url),
    )
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// GET /auth/github/callback - login-success handler.
///
/// Exchanges the code, matches any verified provider email against an
/// existing user, refreshes the cached name/avatar, mints the session and
/// lands on the dashboard. Unknown accounts and accounts without a
/// verified email are rejected as unauthorized.
pub async fn github_callback(
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let config = config::config();

    let expected_state = session::cookie_value(&headers, session::STATE_COOKIE);
    if expected_state.is_none() || expected_state != query.state {
        return Err(ApiError::unauthorized("Login state mismatch"));
    }

    let code = query
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization code"))?;

    let access_token = github::exchange_code(&config.oauth, code).await?;
    let profile = github::fetch_profile(&access_token).await?;
    let emails = github::fetch_emails(&access_token).await?;

    let verified = github::verified_emails(&emails);
    if verified.is_empty() {
        return Err(github::ProviderError::NoVerifiedEmail.into());
    }

    let pool = DatabaseManager::pool().await?;
    let user = service::find_user_by_emails(&pool, &verified)
        .await?
        .ok_or_else(|| ApiError::unauthorized("No account matches this login"))?;

    let user = service::refresh_user_profile(
        &pool,
        user.id,
        profile.display_name(),
        profile.avatar_url.as_deref(),
    )
    .await?;

    tracing::info!(user_id = user.id, "login succeeded");

    let claims = SessionClaims::for_user(&user, config.security.session_ttl_hours);
    let token = session::mint(&claims, &config.security.session_secret)?;

    Ok((
        AppendHeaders([
            (SET_COOKIE, session::session_cookie(&token)),
            (SET_COOKIE, session::clear_state_cookie()),
        ]),
        Redirect::to(&config.oauth.dashboard_path),
    ))
}

/// POST /auth/logout - drop the session and return to the login page
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, session::clear_session_cookie())]),
        Redirect::to(&config::config().oauth.login_path),
    )
}
