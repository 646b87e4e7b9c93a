//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To point the UI at another prediction backend, set `BACKEND_URL`.

/// Default prediction backend URL
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:7860";

/// Default port the UI listens on
pub const DEFAULT_PORT: u16 = 8501;

/// Default backend request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default largest CSV upload the UI accepts (MB), same as the backend
pub const DEFAULT_MAX_UPLOAD_MB: usize = 16;

/// Single-record prediction endpoint
pub const SINGLE_ENDPOINT: &str = "/v1/EngPredMaintenance";

/// Batch prediction endpoint
pub const BATCH_ENDPOINT: &str = "/v1/EngPredMaintenanceForBatch";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Predict Maintenance";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get backend URL from environment or use default
pub fn get_backend_url() -> String {
    std::env::var("BACKEND_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
}

/// Get listen port from environment or use default
pub fn get_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Get request timeout from environment or use default
pub fn get_request_timeout() -> u64 {
    std::env::var("REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

/// Get upload limit in bytes from `MAX_UPLOAD_MB` or use default
pub fn get_max_upload_bytes() -> usize {
    std::env::var("MAX_UPLOAD_MB")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
        * 1024
        * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_upload_bytes_follows_env() {
        std::env::set_var("MAX_UPLOAD_MB", "2");
        assert_eq!(get_max_upload_bytes(), 2 * 1024 * 1024);

        std::env::set_var("MAX_UPLOAD_MB", "lots");
        assert_eq!(get_max_upload_bytes(), DEFAULT_MAX_UPLOAD_MB * 1024 * 1024);

        std::env::remove_var("MAX_UPLOAD_MB");
        assert_eq!(get_max_upload_bytes(), 16 * 1024 * 1024);
    }
}
