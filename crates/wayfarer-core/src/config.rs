//! Configuration module
//!
//! Application configuration loaded from environment variables (with `.env`
//! support via `dotenvy`). Covers the HTTP server, authentication, the
//! document store data file, and the per-category upload policies.

use std::env;
use std::path::PathBuf;

const SERVER_PORT: u16 = 4000;
const JWT_EXPIRY_HOURS: i64 = 24;
const PACKAGE_MAX_FILE_SIZE_MB: usize = 10;
const PROFILE_MAX_FILE_SIZE_MB: usize = 5;
const POST_MAX_FILE_SIZE_MB: usize = 10;
const MAX_GALLERY_IMAGES: usize = 10;
const SINGLE_UPLOAD_TIMEOUT_SECS: u64 = 20;
const MULTI_UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Root directory for locally-managed uploads (served under `/uploads`).
    pub upload_root: PathBuf,
    /// Optional JSON file the document store loads at startup and persists to.
    pub data_file: Option<PathBuf>,
    // Upload policy configuration
    pub package_max_file_size_bytes: usize,
    pub profile_max_file_size_bytes: usize,
    pub post_max_file_size_bytes: usize,
    pub max_gallery_images: usize,
    pub allowed_image_extensions: Vec<String>,
    pub allowed_image_mime_prefixes: Vec<String>,
    pub single_upload_timeout_secs: u64,
    pub multi_upload_timeout_secs: u64,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let allowed_image_extensions = env::var("ALLOWED_IMAGE_EXTENSIONS")
            .unwrap_or_else(|_| "jpeg,jpg,png,webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let allowed_image_mime_prefixes = env::var("ALLOWED_IMAGE_MIME_PREFIXES")
            .unwrap_or_else(|_| "image/jpeg,image/jpg,image/png,image/webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            upload_root: env::var("UPLOAD_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            data_file: env::var("DATA_FILE").ok().map(PathBuf::from),
            package_max_file_size_bytes: env_size_mb(
                "PACKAGE_MAX_FILE_SIZE_MB",
                PACKAGE_MAX_FILE_SIZE_MB,
            ),
            profile_max_file_size_bytes: env_size_mb(
                "PROFILE_MAX_FILE_SIZE_MB",
                PROFILE_MAX_FILE_SIZE_MB,
            ),
            post_max_file_size_bytes: env_size_mb("POST_MAX_FILE_SIZE_MB", POST_MAX_FILE_SIZE_MB),
            max_gallery_images: env::var("MAX_GALLERY_IMAGES")
                .unwrap_or_else(|_| MAX_GALLERY_IMAGES.to_string())
                .parse()
                .unwrap_or(MAX_GALLERY_IMAGES),
            allowed_image_extensions,
            allowed_image_mime_prefixes,
            single_upload_timeout_secs: env::var("SINGLE_UPLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| SINGLE_UPLOAD_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(SINGLE_UPLOAD_TIMEOUT_SECS),
            multi_upload_timeout_secs: env::var("MULTI_UPLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| MULTI_UPLOAD_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(MULTI_UPLOAD_TIMEOUT_SECS),
        })
    }
}

fn env_size_mb(var: &str, default_mb: usize) -> usize {
    env::var(var)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default_mb)
        * 1024
        * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_size_mb_converts_to_bytes() {
        assert_eq!(env_size_mb("WAYFARER_TEST_UNSET_SIZE", 5), 5 * 1024 * 1024);
    }
}
