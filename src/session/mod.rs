//! Session codec: the resolved identity serialized into a signed token,
//! carried in a cookie. Verification failures always resolve to "no
//! identity", never an error.

pub mod github;

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::database::models::User;

/// Cookie holding the OAuth state nonce between redirect and callback
pub const STATE_COOKIE: &str = "folio_oauth_state";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: i64,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    pub fn for_user(user: &User, ttl_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            exp: (now + Duration::hours(ttl_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session secret is not configured (set APP_KEY)")]
    MissingSecret,
    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Sign claims into a session token. The secret is an explicit parameter;
/// handlers pass the configured APP_KEY.
pub fn mint(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Decode and verify a session token. Any failure (bad signature, expiry,
/// malformed token, empty secret) yields None rather than an error.
pub fn verify(token: &str, secret: &str) -> Option<SessionClaims> {
    if secret.is_empty() {
        return None;
    }
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Pull a named cookie out of the Cookie header
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Session token from the request, if any
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, &config::config().security.cookie_name)
}

/// Set-Cookie value carrying the session token
pub fn session_cookie(token: &str) -> String {
    let security = &config::config().security;
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        security.cookie_name,
        token,
        security.session_ttl_hours * 3600
    );
    if security.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value that expires the session cookie
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config::config().security.cookie_name
    )
}

/// Short-lived cookie for the OAuth state nonce
pub fn state_cookie(state: &str) -> String {
    format!("{STATE_COOKIE}={state}; Path=/; HttpOnly; SameSite=Lax; Max-Age=600")
}

pub fn clear_state_cookie() -> String {
    format!("{STATE_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use chrono::{DateTime, Utc};

    const SECRET: &str = "unit-test-secret";

    fn user() -> User {
        let now: DateTime<Utc> = Utc::now();
        User {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar: Some("https://example.com/a.png".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn mint_then_verify_round_trips() {
        let claims = SessionClaims::for_user(&user(), 24);
        let token = mint(&claims, SECRET).unwrap();
        let decoded = verify(&token, SECRET).expect("valid token should verify");
        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.email, "ada@example.com");
    }

    #[test]
    fn verify_failures_yield_no_identity() {
        let claims = SessionClaims::for_user(&user(), 24);
        let token = mint(&claims, SECRET).unwrap();

        assert!(verify(&token, "other-secret").is_none());
        assert!(verify("garbage", SECRET).is_none());
        assert!(verify(&token, "").is_none());

        let mut expired = SessionClaims::for_user(&user(), 24);
        expired.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = mint(&expired, SECRET).unwrap();
        assert!(verify(&token, SECRET).is_none());
    }

    #[test]
    fn mint_requires_secret() {
        let claims = SessionClaims::for_user(&user(), 24);
        assert!(matches!(
            mint(&claims, ""),
            Err(SessionError::MissingSecret)
        ));
    }

    #[test]
    fn cookie_header_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "a=1; folio_session=tok-123; b=2".parse().unwrap(),
        );
        assert_eq!(
            cookie_value(&headers, "folio_session").as_deref(),
            Some("tok-123")
        );
        assert_eq!(cookie_value(&headers, "missing"), None);
    }
}
