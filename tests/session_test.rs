/// Session state tests: default window seeding, filter merge semantics,
/// and conversation immutability.
mod common;

use camchat::session::{
    DEFAULT_TIMEZONE, FilterUpdate, Session, default_window,
};
use chrono::{Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use common::SummaryRecordBuilder;

fn civil_to_instant(s: &str, tz: Tz) -> chrono::DateTime<Utc> {
    let naive = NaiveDateTime::parse_from_str(&format!("{}:00", s), "%Y-%m-%dT%H:%M:%S").unwrap();
    tz.from_local_datetime(&naive).single().unwrap().to_utc()
}

#[test]
fn test_default_window_is_one_hour_for_arbitrary_instants() {
    for (y, m, d, h, min, s) in [
        (2024, 1, 1, 0, 0, 0),
        (2024, 6, 15, 12, 34, 56),
        (2024, 12, 31, 23, 59, 59),
        (2025, 2, 28, 18, 30, 0),
    ] {
        let now = Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap();
        let window = default_window(now, DEFAULT_TIMEZONE);

        let start = civil_to_instant(&window.start, DEFAULT_TIMEZONE);
        let end = civil_to_instant(&window.end, DEFAULT_TIMEZONE);
        assert_eq!(end - start, Duration::minutes(60), "window for {}", now);
    }
}

#[test]
fn test_session_seeds_window_in_ist() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let session = Session::new(now, DEFAULT_TIMEZONE);

    assert_eq!(session.filters.state().end_time, "2024-06-15T17:30");
    assert_eq!(session.filters.state().start_time, "2024-06-15T16:30");
}

#[test]
fn test_filter_update_is_partial_merge() {
    let mut session = Session::start();
    let seeded = session.filters.snapshot();

    session.filters.update(FilterUpdate::camera(Some(2)));

    let state = session.filters.state();
    assert_eq!(state.camera_id, Some(2));
    assert_eq!(state.start_time, seeded.start_time);
    assert_eq!(state.end_time, seeded.end_time);
}

#[test]
fn test_inverted_time_range_passes_through() {
    let mut session = Session::start();
    session.filters.update(FilterUpdate::start("2099-01-01T00:00"));

    // No clamping or validation client-side
    let state = session.filters.state();
    assert!(state.start_time > state.end_time);
}

#[test]
fn test_conversation_turns_are_immutable_snapshots() {
    let mut session = Session::start();
    session.conversation.push_user_text("hello");
    let id = session
        .conversation
        .push_assistant_summaries(vec![SummaryRecordBuilder::new().build()]);

    let before: Vec<_> = session.conversation.turns().to_vec();
    session.conversation.push_user_text("more");

    let after = session.conversation.turns();
    assert_eq!(&after[..before.len()], &before[..]);
    // The summary turn kept its id and content
    let turn = after.iter().find(|t| t.id == id).unwrap();
    assert_eq!(turn.summaries().unwrap().len(), 1);
}

#[test]
fn test_recent_results_are_independent_of_conversation() {
    let mut session = Session::start();
    session.recent_results = vec![SummaryRecordBuilder::new().build()];

    session.conversation.push_user_text("unrelated chat");

    assert_eq!(session.recent_results.len(), 1);
    assert_eq!(session.conversation.len(), 2);
}
