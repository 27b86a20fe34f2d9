//! Configuration module for the Litoral backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to the serialized session slot
    pub session_path: PathBuf,
    /// Directory where uploaded campaign images are stored
    pub uploads_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Email for the seeded admin profile (used only when no profile exists)
    pub admin_email: Option<String>,
    /// Password for the seeded admin profile
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("LITORAL_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let session_path = env::var("LITORAL_SESSION_PATH")
            .unwrap_or_else(|_| "./data/session.json".to_string())
            .into();

        let uploads_dir = env::var("LITORAL_UPLOADS_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let bind_addr = env::var("LITORAL_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid LITORAL_BIND_ADDR format");

        let log_level = env::var("LITORAL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let admin_email = env::var("LITORAL_ADMIN_EMAIL").ok();
        let admin_password = env::var("LITORAL_ADMIN_PASSWORD").ok();

        Self {
            db_path,
            session_path,
            uploads_dir,
            bind_addr,
            log_level,
            admin_email,
            admin_password,
        }
    }
}
