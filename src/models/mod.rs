//! Data models for the camera-analytics chat client.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`SummaryRecord`] - Backend-generated activity summary with attached
//!   frame snapshots and video clips
//! - [`ChatTurn`] - One immutable entry in the conversation log
//! - [`TurnContent`] - Turn payload; ties the rendering variant to its content
//!
//! Wire types use serde with a custom timestamp deserializer (the backend
//! mixes RFC3339 and naive timestamps) in the `de` module.

pub mod de;
pub mod summary;
pub mod turn;

pub use summary::{FrameSnapshot, SummaryRecord, VideoClip};
pub use turn::{ChatTurn, Role, TurnContent, TurnId};
