//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::sync::Mutex;

use camchat::client::{ApiError, ChatBackend, ChatRequest, ChatResponse};
use camchat::models::{FrameSnapshot, SummaryRecord, VideoClip};
use chrono::{TimeZone, Utc};

/// Builder for summary records in test responses
pub struct SummaryRecordBuilder {
    record: SummaryRecord,
}

impl SummaryRecordBuilder {
    pub fn new() -> Self {
        Self {
            record: SummaryRecord {
                camera_id: Some(1),
                interval: Some("10_00-10_05".to_string()),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
                summary: "a cat".to_string(),
                frames_analyzed: Some(5),
                frames_sampled: None,
                frame_snapshots: vec![],
                video_clips: vec![],
            },
        }
    }

    pub fn camera(mut self, id: u32) -> Self {
        self.record.camera_id = Some(id);
        self
    }

    pub fn interval(mut self, interval: &str) -> Self {
        self.record.interval = Some(interval.to_string());
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.record.summary = summary.to_string();
        self
    }

    pub fn snapshot(mut self, path: &str, frame_number: u64) -> Self {
        self.record.frame_snapshots.push(FrameSnapshot {
            path: path.to_string(),
            frame_number: Some(frame_number),
        });
        self
    }

    pub fn clip(mut self, path: &str, filename: &str) -> Self {
        self.record.video_clips.push(VideoClip {
            path: path.to_string(),
            filename: Some(filename.to_string()),
            timestamp: None,
        });
        self
    }

    pub fn build(self) -> SummaryRecord {
        self.record
    }
}

/// Backend replying with a fixed JSON body (invalid JSON fails the dispatch)
pub struct JsonBackend(pub &'static str);

impl ChatBackend for JsonBackend {
    async fn send(&self, _request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        Ok(serde_json::from_str(self.0)?)
    }
}

/// Backend that records every request and replies with canned summaries
pub struct RecordingBackend {
    pub requests: Mutex<Vec<ChatRequest>>,
    pub records: Vec<SummaryRecord>,
}

impl RecordingBackend {
    pub fn new(records: Vec<SummaryRecord>) -> Self {
        Self { requests: Mutex::new(Vec::new()), records }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatBackend for RecordingBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(ChatResponse { ollama_summaries: Some(self.records.clone()), error: None })
    }
}

/// Backend that fails at the transport layer
pub struct FailingBackend;

impl ChatBackend for FailingBackend {
    async fn send(&self, _request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        Err(ApiError::Status { status: 503, body: "unreachable".to_string() })
    }
}
