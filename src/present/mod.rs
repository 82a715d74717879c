//! Pure display shaping for summary records.
//!
//! [`display_model`] maps a [`SummaryRecord`] to the strings the rendering
//! layer shows: a humanized interval label, a localized timestamp, and a
//! clipped preview for list rows. [`DetailView`] is the single-selection
//! model behind the detail overlay.

use chrono_tz::Tz;

use crate::models::SummaryRecord;

/// Maximum preview length for list rows.
pub const PREVIEW_MAX_CHARS: usize = 40;

/// Label shown when the backend omitted the interval.
pub const UNKNOWN_INTERVAL: &str = "Unknown";

/// Ready-to-render view of one [`SummaryRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDisplay {
    /// `"Camera 2"`, or `"Camera ?"` when the backend omitted the id.
    pub camera_label: String,
    /// Interval with underscores humanized, e.g. `"10 00-10 05"`.
    pub interval_label: String,
    /// Record timestamp projected into the session timezone.
    pub time_label: String,
    /// Summary clipped to [`PREVIEW_MAX_CHARS`] for list rows.
    pub preview: String,
    /// Full summary text for the detail view.
    pub summary: String,
    /// `"5 frames analyzed"` / `"… , 3 sampled"` when the backend reported counts.
    pub frames_label: Option<String>,
}

/// Shape a record for display. Pure; does not consult the clock.
pub fn display_model(record: &SummaryRecord, tz: Tz) -> SummaryDisplay {
    let camera_label = match record.camera_id {
        Some(id) => format!("Camera {}", id),
        None => "Camera ?".to_string(),
    };

    SummaryDisplay {
        camera_label,
        interval_label: interval_label(record.interval.as_deref()),
        time_label: localized_time(record, tz),
        preview: preview(&record.summary),
        summary: record.summary.clone(),
        frames_label: frames_label(record),
    }
}

/// Humanize an interval label: underscores become spaces.
pub fn interval_label(interval: Option<&str>) -> String {
    match interval {
        Some(raw) => raw.replace('_', " "),
        None => UNKNOWN_INTERVAL.to_string(),
    }
}

/// Clip summary text for a list row.
pub fn preview(summary: &str) -> String {
    summary.chars().take(PREVIEW_MAX_CHARS).collect()
}

fn localized_time(record: &SummaryRecord, tz: Tz) -> String {
    record.timestamp.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn frames_label(record: &SummaryRecord) -> Option<String> {
    match (record.frames_analyzed, record.frames_sampled) {
        (Some(analyzed), Some(sampled)) => {
            Some(format!("{} frames analyzed, {} sampled", analyzed, sampled))
        }
        (Some(analyzed), None) => Some(format!("{} frames analyzed", analyzed)),
        (None, _) => None,
    }
}

/// Single-selection model for the detail overlay: at most one record is open
/// at a time, and selecting a new one replaces the previous selection.
#[derive(Debug, Default)]
pub struct DetailView {
    selected: Option<SummaryRecord>,
}

impl DetailView {
    pub fn open(&mut self, record: SummaryRecord) {
        self.selected = Some(record);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn record(&self) -> Option<&SummaryRecord> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}
