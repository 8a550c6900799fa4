//! GitHub OAuth collaborator: authorize URL, code exchange, and the
//! profile/email fetches consumed by the login-success handler.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::OauthConfig;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("folio-api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("code exchange rejected: {0}")]
    Exchange(String),

    #[error("no verified email on the provider account")]
    NoVerifiedEmail,
}

/// Provider-side user profile
#[derive(Debug, Clone, Deserialize)]
pub struct GithubProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl GithubProfile {
    /// Display name falls back to the login handle
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.login,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubEmail {
    pub email: String,
    pub verified: bool,
    pub primary: bool,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Addresses eligible for account matching: verified only, in provider
/// order. Any of them may match a local user, not just the first.
pub fn verified_emails(emails: &[GithubEmail]) -> Vec<String> {
    emails
        .iter()
        .filter(|e| e.verified)
        .map(|e| e.email.clone())
        .collect()
}

/// Provider authorize URL for the login redirect
pub fn authorize_url(oauth: &OauthConfig, state: &str) -> String {
    let mut url = Url::parse(AUTHORIZE_URL).expect("static URL");
    url.query_pairs_mut()
        .append_pair("client_id", &oauth.github_client_id)
        .append_pair("scope", "read:user user:email")
        .append_pair("state", state);
    url.into()
}

fn client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

/// Exchange the callback code for an access token
pub async fn exchange_code(oauth: &OauthConfig, code: &str) -> Result<String, ProviderError> {
    let response = client()?
        .post(TOKEN_URL)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[
            ("client_id", oauth.github_client_id.as_str()),
            ("client_secret", oauth.github_client_secret.as_str()),
            ("code", code),
        ])
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    match response.access_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ProviderError::Exchange(
            response
                .error_description
                .or(response.error)
                .unwrap_or_else(|| "no access token in response".to_string()),
        )),
    }
}

pub async fn fetch_profile(access_token: &str) -> Result<GithubProfile, ProviderError> {
    let profile = client()?
        .get(format!("{API_BASE}/user"))
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?
        .json::<GithubProfile>()
        .await?;
    Ok(profile)
}

pub async fn fetch_emails(access_token: &str) -> Result<Vec<GithubEmail>, ProviderError> {
    let emails = client()?
        .get(format!("{API_BASE}/user/emails"))
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<GithubEmail>>()
        .await?;
    Ok(emails)
}
