//! camchat - Terminal chat client for a camera video-analytics backend
//!
//! This library implements the client-side state model behind the chat
//! interface: ask natural-language questions about camera activity, or run
//! camera/time-window searches, against a backend that summarizes feeds with
//! a vision-language model. It supports:
//!
//! - An append-only conversation log with optimistic user turns
//! - Camera/time-window filters seeded to the last hour in a fixed civil
//!   timezone (`Asia/Kolkata`)
//! - One fire-and-forget `POST /api/chat` dispatch per query, with a
//!   success/backend-error/transport-failure outcome taxonomy
//! - Pure display shaping of summaries, frame snapshots, and video clips
//!
//! # Example
//!
//! ```no_run
//! use camchat::client::ChatApi;
//! use camchat::dispatch::Dispatcher;
//! use camchat::session::Session;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut session = Session::start();
//! let mut dispatcher = Dispatcher::new(ChatApi::new("http://localhost:8080"));
//! let outcome = dispatcher.submit_chat(&mut session, "any cats today?").await;
//! println!("{} turns, outcome {:?}", session.conversation.len(), outcome);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod dispatch;
pub mod models;
pub mod present;
pub mod session;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use client::{ChatApi, ChatBackend, ChatRequest, ChatResponse};
pub use dispatch::{Dispatcher, QueryOutcome};
pub use models::{ChatTurn, Role, SummaryRecord, TurnContent};
pub use session::Session;
