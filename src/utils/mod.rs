// Utility functions
pub mod environment;

pub use environment::{API_URL_ENV, DEFAULT_API_URL, api_base_url};
