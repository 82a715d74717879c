use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sampled frame image attached to a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub path: String,
    #[serde(default)]
    pub frame_number: Option<u64>,
}

/// A short browser-playable MP4 clip attached to a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoClip {
    pub path: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "crate::models::de::deserialize_opt_instant")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// One backend-generated summary of camera activity over a time interval.
///
/// This is an opaque backend payload: the client consumes it read-only and
/// never persists it. Unknown fields on the wire are ignored; everything
/// except `timestamp` and `summary` is tolerated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(default)]
    pub camera_id: Option<u32>,
    /// Interval label, e.g. `"10_00-10_05"`.
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(deserialize_with = "crate::models::de::deserialize_instant")]
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    #[serde(default)]
    pub frames_analyzed: Option<u32>,
    #[serde(default)]
    pub frames_sampled: Option<u32>,
    #[serde(default)]
    pub frame_snapshots: Vec<FrameSnapshot>,
    #[serde(default)]
    pub video_clips: Vec<VideoClip>,
}
