use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub oauth: OauthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HMAC key for the session token, from APP_KEY. Empty means sessions
    /// cannot be minted or verified; login fails loudly rather than fall
    /// back to an insecure default.
    pub session_secret: String,
    pub session_ttl_hours: u64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OauthConfig {
    pub github_client_id: String,
    pub github_client_secret: String,
    /// Guest-only login page; authenticated requests here bounce to the dashboard.
    pub login_path: String,
    /// Auth-only area; anonymous requests here bounce to the login page.
    pub dashboard_path: String,
    pub callback_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment presets first, then specific env var overrides
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.server.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_MIN_CONNECTIONS") {
            self.database.min_connections = v.parse().unwrap_or(self.database.min_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT") {
            self.database.acquire_timeout_secs =
                v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_IDLE_TIMEOUT") {
            self.database.idle_timeout_secs = v.parse().unwrap_or(self.database.idle_timeout_secs);
        }

        if let Ok(v) = env::var("APP_KEY") {
            self.security.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_HOURS") {
            self.security.session_ttl_hours = v.parse().unwrap_or(self.security.session_ttl_hours);
        }

        if let Ok(v) = env::var("GITHUB_CLIENT_ID") {
            self.oauth.github_client_id = v;
        }
        if let Ok(v) = env::var("GITHUB_CLIENT_SECRET") {
            self.oauth.github_client_secret = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            database: DatabaseConfig {
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 300,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                session_ttl_hours: 24 * 7, // 1 week
                cookie_name: "folio_session".to_string(),
                cookie_secure: false,
            },
            oauth: OauthConfig {
                github_client_id: String::new(),
                github_client_secret: String::new(),
                login_path: "/auth".to_string(),
                dashboard_path: "/dashboard".to_string(),
                callback_path: "/auth/github/callback".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            database: DatabaseConfig {
                max_connections: 20,
                min_connections: 2,
                acquire_timeout_secs: 10,
                idle_timeout_secs: 300,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                session_ttl_hours: 24,
                cookie_name: "folio_session".to_string(),
                cookie_secure: true,
            },
            oauth: OauthConfig {
                github_client_id: String::new(),
                github_client_secret: String::new(),
                login_path: "/auth".to_string(),
                dashboard_path: "/dashboard".to_string(),
                callback_path: "/auth/github/callback".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            database: DatabaseConfig {
                max_connections: 50,
                min_connections: 2,
                acquire_timeout_secs: 5,
                idle_timeout_secs: 300,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                session_ttl_hours: 24 * 7,
                cookie_name: "folio_session".to_string(),
                cookie_secure: true,
            },
            oauth: OauthConfig {
                github_client_id: String::new(),
                github_client_secret: String::new(),
                login_path: "/auth".to_string(),
                dashboard_path: "/dashboard".to_string(),
                callback_path: "/auth/github/callback".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
