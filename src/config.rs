use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Origin the redemption links point at (the web app, not this API).
    pub public_origin: String,
    /// Secure attribute on the session cookie; off for local development.
    pub cookie_secure: bool,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "taskboards".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "taskboards-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let public_origin = std::env::var("PUBLIC_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".into());
        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v != "false")
            .unwrap_or(true);
        Ok(Self {
            database_url,
            public_origin,
            cookie_secure,
            jwt,
        })
    }
}
