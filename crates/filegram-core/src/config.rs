//! Configuration module
//!
//! Environment-driven configuration for the service. `Config::from_env()`
//! reads everything once at startup; `validate()` fails fast on
//! misconfiguration before any network resource is touched.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Telegram
    pub telegram_bot_token: String,
    pub telegram_webhook_secret: String,
    pub telegram_api_base: String,
    pub http_timeout_seconds: u64,
    // Object storage (S3-compatible; MinIO in development)
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_access_key_id: Option<String>,
    pub s3_secret_access_key: Option<String>,
    // Document content policy
    pub document_allowed_extensions: Vec<String>,
    pub document_allowed_content_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Best effort; missing .env is fine in production
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let document_allowed_extensions = env::var("DOCUMENT_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "pdf".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let document_allowed_content_types = env::var("DOCUMENT_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| "application/pdf".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_PORT),
            environment,
            database_url: env::var("DATABASE_URL").unwrap_or_default(),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DB_MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_DB_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_DB_TIMEOUT_SECS),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            telegram_webhook_secret: env::var("TELEGRAM_WEBHOOK_SECRET").unwrap_or_default(),
            telegram_api_base: env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_BASE.to_string()),
            http_timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            s3_endpoint: env::var("S3_ENDPOINT")
                .or_else(|_| env::var("MINIO_ENDPOINT"))
                .unwrap_or_default(),
            s3_bucket: env::var("S3_BUCKET")
                .or_else(|_| env::var("MINIO_BUCKET_NAME"))
                .unwrap_or_default(),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            s3_access_key_id: env::var("S3_ACCESS_KEY_ID")
                .or_else(|_| env::var("MINIO_ADMIN_USER"))
                .ok(),
            s3_secret_access_key: env::var("S3_SECRET_ACCESS_KEY")
                .or_else(|_| env::var("MINIO_ADMIN_PASSWORD"))
                .ok(),
            document_allowed_extensions,
            document_allowed_content_types,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.telegram_bot_token.is_empty() {
            anyhow::bail!("TELEGRAM_BOT_TOKEN must be set");
        }
        if self.telegram_webhook_secret.is_empty() {
            anyhow::bail!("TELEGRAM_WEBHOOK_SECRET must be set");
        }
        if self.database_url.is_empty() {
            anyhow::bail!("DATABASE_URL must be set");
        }
        if self.s3_bucket.is_empty() {
            anyhow::bail!("S3_BUCKET must be set");
        }
        if !self.s3_endpoint.is_empty()
            && !self.s3_endpoint.starts_with("http://")
            && !self.s3_endpoint.starts_with("https://")
        {
            anyhow::bail!("S3_ENDPOINT must be an http(s) URL");
        }
        if self.document_allowed_extensions.is_empty()
            && self.document_allowed_content_types.is_empty()
        {
            anyhow::bail!(
                "at least one of DOCUMENT_ALLOWED_EXTENSIONS or DOCUMENT_ALLOWED_CONTENT_TYPES must be non-empty"
            );
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
