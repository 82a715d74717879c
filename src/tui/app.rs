//! TUI application state and event handling.
//!
//! This module implements the interactive chat surface. It manages:
//!
//! - **Conversation flow**: Optimistic user turns, assistant turns on settle
//! - **Filter editing**: A local draft synced both ways with the canonical
//!   filter store (store to draft on external change, draft to store on
//!   every keystroke or selection)
//! - **Dispatch integration**: Requests run on the tokio runtime; outcomes
//!   come back over an mpsc channel drained each loop iteration, so the UI
//!   keeps processing events while a request is in flight
//! - **Status messages**: Transient feedback with automatic expiry
//! - **Dirty state tracking**: Rendering only when state changes
//!
//! # Architecture
//!
//! The `App` struct owns all UI state plus the [`Session`] and runs the main
//! event loop via `run()`. Tab toggles focus between the chat input and the
//! sidebar; Enter sends the typed question (chat focus) or, in the sidebar,
//! runs the filter search or opens the selected result's detail overlay.
//! One chat dispatch may be in flight at a time; the filter search is
//! independent and may overlap with it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::client::ChatBackend;
use crate::dispatch::{self, QueryOutcome};
use crate::present::DetailView;
use crate::session::{FilterStore, FilterUpdate, Session};

/// Duration for informational status messages (milliseconds)
const STATUS_INFO_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;

/// Camera choices the sidebar cycles through; `None` is "all cameras".
pub const CAMERA_CHOICES: [Option<u32>; 5] = [None, Some(1), Some(2), Some(3), Some(4)];

/// Sidebar row indices: filter fields, the search action, then results.
pub const SIDEBAR_ROW_CAMERA: usize = 0;
pub const SIDEBAR_ROW_FROM: usize = 1;
pub const SIDEBAR_ROW_TO: usize = 2;
pub const SIDEBAR_ROW_SEARCH: usize = 3;
pub const SIDEBAR_FIXED_ROWS: usize = 4;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Which pane receives text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Chat,
    Sidebar,
}

/// Settled dispatch result delivered back to the UI loop.
#[derive(Debug)]
pub enum DispatchEvent {
    Chat(QueryOutcome),
    Search(QueryOutcome),
}

/// Local editing copy of the canonical filter store.
///
/// Edits push to the store on every keystroke/selection; external store
/// changes are pulled back in whenever the store's revision moves, so the
/// draft never diverges for more than one loop iteration.
#[derive(Debug, Clone)]
pub struct FilterDraft {
    pub camera_id: Option<u32>,
    pub start_time: String,
    pub end_time: String,
    seen_revision: u64,
}

impl FilterDraft {
    pub fn from_store(store: &FilterStore) -> Self {
        let state = store.state();
        Self {
            camera_id: state.camera_id,
            start_time: state.start_time.clone(),
            end_time: state.end_time.clone(),
            seen_revision: store.revision(),
        }
    }

    /// Pull the canonical state into the draft if it changed externally.
    pub fn sync_from_store(&mut self, store: &FilterStore) {
        if store.revision() == self.seen_revision {
            return;
        }
        let state = store.state();
        self.camera_id = state.camera_id;
        self.start_time = state.start_time.clone();
        self.end_time = state.end_time.clone();
        self.seen_revision = store.revision();
    }

    /// Push one edit to the store and keep the revisions in step so our own
    /// write is not mistaken for an external change.
    fn push_to_store(&mut self, store: &mut FilterStore, update: FilterUpdate) {
        store.update(update);
        self.seen_revision = store.revision();
    }
}

pub struct App<B> {
    session: Session,
    backend: Arc<B>,
    events_tx: mpsc::UnboundedSender<DispatchEvent>,
    events_rx: mpsc::UnboundedReceiver<DispatchEvent>,
    input: String,
    focus: Focus,
    sidebar_row: usize,
    draft: FilterDraft,
    busy: bool,
    searching: bool,
    detail: DetailView,
    status_message: Option<StatusMessage>,
    should_quit: bool,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<B: ChatBackend + Send + Sync + 'static> App<B> {
    pub fn new(session: Session, backend: B) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let draft = FilterDraft::from_store(&session.filters);

        Self {
            session,
            backend: Arc::new(backend),
            events_tx,
            events_rx,
            input: String::new(),
            focus: Focus::Chat,
            sidebar_row: SIDEBAR_ROW_SEARCH,
            draft,
            busy: false,
            searching: false,
            detail: DetailView::default(),
            status_message: None,
            should_quit: false,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<T: Backend>(&mut self, terminal: &mut Terminal<T>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            // Apply settled dispatches before drawing
            self.drain_dispatch_events();

            // Reconcile the filter draft with external store changes
            self.draft.sync_from_store(&self.session.filters);

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| {
                    let state = RenderState {
                        turns: self.session.conversation.turns(),
                        results: &self.session.recent_results,
                        has_searched: self.session.has_searched,
                        draft: &self.draft,
                        input: &self.input,
                        focus: self.focus,
                        sidebar_row: self.sidebar_row,
                        busy: self.busy,
                        searching: self.searching,
                        detail: self.detail.record(),
                        status_message: self.status_message.as_ref(),
                        timezone: self.session.timezone,
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            // Handle events
            let action = poll_event(Duration::from_millis(50))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Apply all dispatch completions that arrived since the last iteration.
    fn drain_dispatch_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_dispatch_event(event);
        }
    }

    fn apply_dispatch_event(&mut self, event: DispatchEvent) {
        match event {
            DispatchEvent::Chat(outcome) => {
                dispatch::apply_chat_outcome(&mut self.session.conversation, outcome);
                self.busy = false;
            }
            DispatchEvent::Search(outcome) => {
                match &outcome {
                    QueryOutcome::Success(records) => self.set_status(
                        format!("Found {} results", records.len()),
                        MessageType::Info,
                        STATUS_INFO_DURATION_MS,
                    ),
                    QueryOutcome::Backend(message) => self.set_status(
                        format!("Search error: {}", message),
                        MessageType::Error,
                        STATUS_ERROR_DURATION_MS,
                    ),
                    QueryOutcome::Transport => self.set_status(
                        "Search failed",
                        MessageType::Error,
                        STATUS_ERROR_DURATION_MS,
                    ),
                }
                dispatch::apply_search_outcome(&mut self.session, outcome);
                self.searching = false;
            }
        }
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Escape => self.escape(),
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Chat => Focus::Sidebar,
                    Focus::Sidebar => Focus::Chat,
                };
                self.needs_redraw = true;
            }
            Action::Submit => match self.focus {
                Focus::Chat => self.submit_chat(),
                Focus::Sidebar => self.sidebar_submit(),
            },
            Action::MoveUp => self.move_sidebar(-1),
            Action::MoveDown => self.move_sidebar(1),
            Action::MoveLeft => self.cycle_camera(-1),
            Action::MoveRight => self.cycle_camera(1),
            Action::Input(c) => self.insert_char(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    fn escape(&mut self) {
        if self.detail.is_open() {
            self.detail.close();
        } else if self.focus == Focus::Chat && !self.input.is_empty() {
            self.input.clear();
        } else {
            self.should_quit = true;
        }
        self.needs_redraw = true;
    }

    /// Send the typed question through the chat flow. The user turn is
    /// appended before the request goes out; the assistant turn arrives via
    /// the dispatch channel. Disabled while a chat request is in flight.
    fn submit_chat(&mut self) {
        let utterance = self.input.trim().to_string();
        if utterance.is_empty() {
            return;
        }
        if self.busy {
            self.set_status(
                "Still working on the previous question",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
            return;
        }

        self.input.clear();
        let request = dispatch::begin_chat(&mut self.session, &utterance);
        self.busy = true;
        self.needs_redraw = true;

        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = QueryOutcome::from_result(backend.send(&request).await);
            // Receiver only drops on shutdown; nothing to deliver to then
            let _ = tx.send(DispatchEvent::Chat(outcome));
        });
    }

    /// Run the filter search. Independent of the chat busy flag.
    fn start_search(&mut self) {
        if self.searching {
            return;
        }

        let request = dispatch::begin_search(&mut self.session);
        self.searching = true;
        self.needs_redraw = true;

        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = QueryOutcome::from_result(backend.send(&request).await);
            let _ = tx.send(DispatchEvent::Search(outcome));
        });
    }

    /// Enter in the sidebar: filter rows and the search row run the search;
    /// a result row opens its detail overlay.
    fn sidebar_submit(&mut self) {
        if self.sidebar_row < SIDEBAR_FIXED_ROWS {
            self.start_search();
            return;
        }

        let idx = self.sidebar_row - SIDEBAR_FIXED_ROWS;
        if let Some(record) = self.session.recent_results.get(idx) {
            self.detail.open(record.clone());
            self.needs_redraw = true;
        }
    }

    fn sidebar_row_count(&self) -> usize {
        SIDEBAR_FIXED_ROWS + self.session.recent_results.len()
    }

    fn move_sidebar(&mut self, delta: isize) {
        if self.focus != Focus::Sidebar {
            return;
        }
        let count = self.sidebar_row_count();
        let new_row = self.sidebar_row as isize + delta;
        self.sidebar_row = new_row.clamp(0, count as isize - 1) as usize;
        self.needs_redraw = true;
    }

    /// Left/Right on the camera row cycles All, 1, 2, 3, 4. Every selection
    /// is pushed straight to the canonical store.
    fn cycle_camera(&mut self, delta: isize) {
        if self.focus != Focus::Sidebar || self.sidebar_row != SIDEBAR_ROW_CAMERA {
            return;
        }

        let len = CAMERA_CHOICES.len() as isize;
        let current = CAMERA_CHOICES
            .iter()
            .position(|c| *c == self.draft.camera_id)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;

        self.draft.camera_id = CAMERA_CHOICES[next];
        let update = FilterUpdate::camera(self.draft.camera_id);
        self.draft.push_to_store(&mut self.session.filters, update);
        self.needs_redraw = true;
    }

    /// Typed characters go to the chat input or, in the sidebar, to the
    /// selected time field. Time fields accept anything verbatim; the
    /// backend validates.
    fn insert_char(&mut self, c: char) {
        match self.focus {
            Focus::Chat => {
                self.input.push(c);
            }
            Focus::Sidebar => match self.sidebar_row {
                SIDEBAR_ROW_FROM => {
                    self.draft.start_time.push(c);
                    let update = FilterUpdate::start(self.draft.start_time.clone());
                    self.draft.push_to_store(&mut self.session.filters, update);
                }
                SIDEBAR_ROW_TO => {
                    self.draft.end_time.push(c);
                    let update = FilterUpdate::end(self.draft.end_time.clone());
                    self.draft.push_to_store(&mut self.session.filters, update);
                }
                _ => return,
            },
        }
        self.needs_redraw = true;
    }

    fn delete_char(&mut self) {
        match self.focus {
            Focus::Chat => {
                self.input.pop();
            }
            Focus::Sidebar => match self.sidebar_row {
                SIDEBAR_ROW_FROM => {
                    self.draft.start_time.pop();
                    let update = FilterUpdate::start(self.draft.start_time.clone());
                    self.draft.push_to_store(&mut self.session.filters, update);
                }
                SIDEBAR_ROW_TO => {
                    self.draft.end_time.pop();
                    let update = FilterUpdate::end(self.draft.end_time.clone());
                    self.draft.push_to_store(&mut self.session.filters, update);
                }
                _ => return,
            },
        }
        self.needs_redraw = true;
    }
}
