//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ADMIN_EMAILS, DEFAULT_DATABASE_URL, DEFAULT_PUBLIC_DIR, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_TTL_HOURS, DEFAULT_UPLOAD_DIR,
    MIN_SESSION_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    session_secret: String,
    pub session_ttl_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub upload_dir: String,
    pub public_dir: String,
    /// Emails granted admin rights, stored lowercased
    pub admin_emails: Vec<String>,
    /// API key for the generative-language API; chat falls back to keyword
    /// matching when absent
    genai_api_key: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("upload_dir", &self.upload_dir)
            .field("public_dir", &self.public_dir)
            .field("admin_emails", &self.admin_emails)
            .field("genai_api_key", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if SESSION_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let session_secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("SESSION_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("SESSION_SECRET environment variable must be set in production");
            }
        });

        // Validate session secret length
        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            panic!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LENGTH
            );
        }

        let admin_emails = env::var("ADMIN_EMAILS")
            .map(|raw| Self::parse_admin_emails(&raw))
            .unwrap_or_else(|_| {
                DEFAULT_ADMIN_EMAILS
                    .iter()
                    .map(|e| e.to_string())
                    .collect()
            });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            session_secret,
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.to_string()),
            admin_emails,
            genai_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }

    /// Parse a comma-separated admin list, trimming and lowercasing entries.
    fn parse_admin_emails(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    /// Check whether an email belongs to the admin allow-list.
    ///
    /// Comparison is case-insensitive and ignores surrounding whitespace,
    /// matching how the allow-list itself is normalized.
    pub fn is_admin(&self, email: &str) -> bool {
        let normalized = email.trim().to_lowercase();
        self.admin_emails.iter().any(|a| a.to_lowercase() == normalized)
    }

    /// Get session secret bytes for token signing/verification.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }

    /// Get the configured generative-language API key, if any.
    pub fn genai_api_key(&self) -> Option<&str> {
        self.genai_api_key.as_deref()
    }
}

#[cfg(test)]
impl Config {
    /// Build a config suitable for tests without touching the environment.
    pub fn for_tests() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            session_secret: "test-secret-key-minimum-32-chars!".to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            public_dir: DEFAULT_PUBLIC_DIR.to_string(),
            admin_emails: DEFAULT_ADMIN_EMAILS.iter().map(|e| e.to_string()).collect(),
            genai_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_check_is_case_insensitive() {
        let config = Config::for_tests();
        assert!(config.is_admin("admin@enit.tn"));
        assert!(config.is_admin("ADMIN@ENIT.TN"));
        assert!(config.is_admin("  Yacine@enit.tn  "));
        assert!(!config.is_admin("student@enit.tn"));
    }

    #[test]
    fn admin_list_parsing_trims_and_lowercases() {
        let parsed = Config::parse_admin_emails(" A@x.tn , b@y.tn ,, ");
        assert_eq!(parsed, vec!["a@x.tn".to_string(), "b@y.tn".to_string()]);
    }
}
