use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config;
use crate::session::{self, SessionClaims};

/// Authenticated user context resolved from the session cookie.
///
/// Handlers and mutations receive this explicitly (extension or parameter);
/// there is no ambient current-user lookup anywhere.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<SessionClaims> for AuthUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            avatar: claims.avatar,
        }
    }
}

fn resolve_identity(headers: &HeaderMap) -> Option<AuthUser> {
    let token = session::token_from_headers(headers)?;
    let claims = session::verify(&token, &config::config().security.session_secret)?;
    Some(claims.into())
}

/// Guard for the dashboard: anonymous requests are sent to the login page,
/// authenticated ones get their identity injected for the handler chain.
pub async fn require_auth(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    match resolve_identity(&headers) {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => Redirect::to(&config::config().oauth.login_path).into_response(),
    }
}

/// Guard for the login page: an already-authenticated identity is sent to
/// the dashboard instead of seeing the login flow again.
pub async fn require_guest(headers: HeaderMap, request: Request, next: Next) -> Response {
    match resolve_identity(&headers) {
        Some(_) => Redirect::to(&config::config().oauth.dashboard_path).into_response(),
        None => next.run(request).await,
    }
}
