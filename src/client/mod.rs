// HTTP client for the analytics backend
pub mod api;

pub use api::{ApiError, ChatApi, ChatBackend, ChatRequest, ChatResponse, SEARCH_TYPE_SUMMARIES};
