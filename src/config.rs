//! Application configuration.
//!
//! Everything the server needs from the environment is read once, here, and
//! carried in explicit structs. Business logic never looks at the
//! environment directly.

use std::env;

/// How long a generated material stays downloadable.
pub const DOWNLOAD_TTL_HOURS: i64 = 72;

/// Connection details for the Supabase storage API.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Service-role key used for server-side uploads and signing.
    pub service_key: String,
    /// Bucket holding generated course materials.
    pub bucket: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, String> {
        let url = env::var("SUPABASE_URL").map_err(|_| "SUPABASE_URL must be set".to_string())?;
        let service_key = env::var("SUPABASE_SERVICE_KEY")
            .map_err(|_| "SUPABASE_SERVICE_KEY must be set".to_string())?;
        let bucket =
            env::var("SUPABASE_BUCKET").unwrap_or_else(|_| "course-materials".to_string());
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        })
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: (String, u16),
    /// Signed-download lifetime in hours. Defaults to [`DOWNLOAD_TTL_HOURS`].
    pub download_ttl_hours: i64,
}

const DEFAULT_JWT_SECRET: &str = "coursegen-jwt-secret-change-in-production";

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default secret. SET THIS IN PRODUCTION!");
            DEFAULT_JWT_SECRET.to_string()
        });
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        Ok(Self {
            database_url,
            jwt_secret,
            bind_address: ("0.0.0.0".to_string(), port),
            download_ttl_hours: DOWNLOAD_TTL_HOURS,
        })
    }

    /// Configuration for tests and local runs without a database.
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            database_url: String::new(),
            jwt_secret: jwt_secret.to_string(),
            bind_address: ("127.0.0.1".to_string(), 0),
            download_ttl_hours: DOWNLOAD_TTL_HOURS,
        }
    }
}
