use anyhow::Result;
use std::env;

/// Sessions are pinned to a one-year inactivity window.
pub const SESSION_TTL_DAYS: i64 = 365;

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub redis_url: String,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl SessionConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "qid".to_string()),
            // Secure cookies only make sense behind TLS, i.e. in production.
            cookie_secure: env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
        })
    }
}
