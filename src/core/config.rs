use crate::meeting::TencentMeetingConfig;
use dotenv::dotenv;
use std::env;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "insecure-development-secret";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Shared secret for machine-to-machine endpoints (schema migration)
    pub integration_auth_token: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub user_cache_ttl_secs: u64,
    pub app_env: String,
    pub meeting: TencentMeetingConfig,
}

impl Config {
    /// Loads the configuration from environment variables.
    /// Calls dotenv() first so a local `.env` file is honoured.
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let integration_auth_token = env::var("INTEGRATION_AUTH_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = parse_var("SERVER_PORT", 3000u16)
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = parse_var("MAX_DB_CONNECTIONS", 20u32)
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let connection_lifetime_secs = parse_var("DB_CONNECTION_LIFETIME_SECS", 1800u64)
            .map_err(|_| {
                "Invalid DB_CONNECTION_LIFETIME_SECS: must be a positive number".to_string()
            })?;

        let user_cache_ttl_secs = parse_var("USER_CACHE_TTL_SECS", 60u64)
            .map_err(|_| "Invalid USER_CACHE_TTL_SECS: must be a positive number".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let meeting = TencentMeetingConfig {
            api_base: env::var("TM_API_BASE")
                .unwrap_or_else(|_| "https://api.meeting.qq.com".to_string()),
            secret_id: env::var("TM_SECRET_ID").unwrap_or_default(),
            secret_key: env::var("TM_SECRET_KEY").unwrap_or_default(),
            app_id: env::var("TM_APP_ID").unwrap_or_default(),
            sdk_id: env::var("TM_SDK_ID").unwrap_or_default(),
            admin_user_id: env::var("TM_ADMIN_USER_ID").unwrap_or_default(),
        };

        Ok(Config {
            database_url,
            jwt_secret,
            integration_auth_token,
            server_host,
            server_port,
            max_connections,
            connection_lifetime_secs,
            user_cache_ttl_secs,
            app_env,
            meeting,
        })
    }

    /// Logs the configuration, hiding secrets
    pub fn print_info(&self) {
        info!("Server configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server address: {}:{}", self.server_host, self.server_port);
        info!("   Database: {}", Self::mask_url(&self.database_url));
        info!("   Max DB connections: {}", self.max_connections);
        info!("   Connection lifetime: {}s", self.connection_lifetime_secs);
        info!("   User cache TTL: {}s", self.user_cache_ttl_secs);
        info!("   Meeting API: {}", self.meeting.api_base);
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("   JWT secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("   JWT secret: custom secret configured");
        }
        if self.integration_auth_token.is_none() {
            warn!("   Integration token: not set, integration endpoints are disabled");
        }
    }

    /// Masks the credentials of a database URL for logging
    pub fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        "***".to_string()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, T::Err> {
    match env::var(name) {
        Ok(raw) => raw.parse::<T>(),
        Err(_) => Ok(default),
    }
}
