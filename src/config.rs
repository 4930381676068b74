use std::env;

use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_ACCESS_TOKEN_SECRET: &str = "your-access-token-secret-key-change-in-production";
pub const DEFAULT_REFRESH_TOKEN_SECRET: &str =
    "your-refresh-token-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub mongo_max_pool_size: u32,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub access_token_secret: SecretString,
    pub refresh_token_secret: SecretString,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_hours: i64,
    pub gemini_api_key: Option<SecretString>,
    pub gemini_model: String,
    pub chatbot_api_url: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Missing token secrets fall back to well-known placeholders so that a
    /// development server still starts; every placeholder in use is reported
    /// with `log::warn!`.
    pub fn from_env() -> Self {
        let config = Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "job-quiz".to_string()),
            mongo_max_pool_size: parse_or(env::var("MONGO_MAX_POOL_SIZE").ok(), 10),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_or(env::var("WEB_SERVER_PORT").ok(), 3000),
            access_token_secret: secret_or_default(
                env::var("ACCESS_TOKEN_SECRET").ok(),
                DEFAULT_ACCESS_TOKEN_SECRET,
            ),
            refresh_token_secret: secret_or_default(
                env::var("REFRESH_TOKEN_SECRET").ok(),
                DEFAULT_REFRESH_TOKEN_SECRET,
            ),
            access_token_ttl_minutes: parse_or(env::var("ACCESS_TOKEN_TTL_MINUTES").ok(), 15),
            refresh_token_ttl_hours: parse_or(env::var("REFRESH_TOKEN_TTL_HOURS").ok(), 168),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            chatbot_api_url: env::var("CHATBOT_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api/chatbot".to_string()),
        };

        for warning in config.insecure_default_warnings() {
            log::warn!("{}", warning);
        }

        config
    }

    /// Lists every insecure secret setting currently in effect.
    pub fn insecure_default_warnings(&self) -> Vec<String> {
        let access = self.access_token_secret.expose_secret();
        let refresh = self.refresh_token_secret.expose_secret();
        let mut warnings = Vec::new();

        if access == DEFAULT_ACCESS_TOKEN_SECRET {
            warnings.push(
                "Using default ACCESS_TOKEN_SECRET. Set a secure secret in production!".to_string(),
            );
        }
        if refresh == DEFAULT_REFRESH_TOKEN_SECRET {
            warnings.push(
                "Using default REFRESH_TOKEN_SECRET. Set a secure secret in production!"
                    .to_string(),
            );
        }
        if access == refresh {
            warnings.push(
                "ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET are identical; refresh tokens could be replayed as access tokens"
                    .to_string(),
            );
        }

        warnings
    }

    /// Deterministic configuration for tests and local harnesses.
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "job-quiz-test".to_string(),
            mongo_max_pool_size: 2,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3000,
            access_token_secret: SecretString::from("test_access_token_secret".to_string()),
            refresh_token_secret: SecretString::from("test_refresh_token_secret".to_string()),
            access_token_ttl_minutes: 15,
            refresh_token_ttl_hours: 168,
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            chatbot_api_url: "http://127.0.0.1:3000/api/chatbot".to_string(),
        }
    }
}

fn secret_or_default(value: Option<String>, default: &str) -> SecretString {
    SecretString::from(
        value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()),
    )
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
