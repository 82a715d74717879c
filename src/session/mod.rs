//! Session state: the conversation log, the query filters, and the side
//! result list from filter searches.
//!
//! All mutable session state lives in one [`Session`] context object that is
//! passed by reference to the dispatch and render layers; there are no
//! ambient singletons.

pub mod conversation;
pub mod filters;
pub mod time_range;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
pub use conversation::{ConversationStore, GREETING};
pub use filters::{FilterState, FilterStore, FilterUpdate};
pub use time_range::{DEFAULT_TIMEZONE, TimeWindow, default_window, format_civil_minute};

use crate::models::SummaryRecord;

/// All client-side state for one chat session.
#[derive(Debug)]
pub struct Session {
    pub conversation: ConversationStore,
    pub filters: FilterStore,
    /// Side result list from the most recent filter search. Replaced
    /// wholesale by each search; independent of the conversation log.
    pub recent_results: Vec<SummaryRecord>,
    /// Whether a filter search has ever been attempted, so "no results"
    /// can be told apart from "never searched".
    pub has_searched: bool,
    pub timezone: Tz,
}

impl Session {
    /// Create a session whose filters default to the last hour ending at
    /// `now`, expressed in `tz`. This is the only point that seeds the
    /// filter store.
    pub fn new(now: DateTime<Utc>, tz: Tz) -> Self {
        let window = default_window(now, tz);
        let filters = FilterStore::new(FilterState {
            camera_id: None,
            start_time: window.start,
            end_time: window.end,
        });

        Self {
            conversation: ConversationStore::new(),
            filters,
            recent_results: Vec::new(),
            has_searched: false,
            timezone: tz,
        }
    }

    /// Session starting now, in the default reference timezone.
    pub fn start() -> Self {
        Self::new(Utc::now(), DEFAULT_TIMEZONE)
    }
}
