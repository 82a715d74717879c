use std::env;

/// Default analytics backend address (the server's stock port).
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable overriding the backend address.
pub const API_URL_ENV: &str = "CAMCHAT_API_URL";

/// Resolve the backend base URL: `CAMCHAT_API_URL` if set, else the default.
pub fn api_base_url() -> String {
    env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
