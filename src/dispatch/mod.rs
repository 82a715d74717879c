//! Query dispatch: turns user input into backend requests and reconciles
//! responses back into session state.
//!
//! Two flows share one endpoint:
//!
//! - **Chat flow**: appends the user turn optimistically (phase 1), sends
//!   the request, then appends exactly one assistant turn when it settles
//!   (phase 2): a summary list, a prefixed backend error, or a fixed
//!   generic failure message.
//! - **Filter-search flow**: sends `search_type="summaries"` with an empty
//!   query and replaces the session's side result list; it never touches
//!   the conversation.
//!
//! The two phases are exposed separately (`begin_*` / `apply_*_outcome`) so
//! the TUI can keep handling events while a request is in flight, plus as
//! composed async `submit_*` calls for one-shot use. Busy flags are released
//! by a drop guard on every exit path. There is no queueing, no retry, no
//! cancellation, and no timeout; a second submission while busy is a caller
//! error the caller must prevent.

use crate::client::{ApiError, ChatBackend, ChatRequest, ChatResponse};
use crate::models::{SummaryRecord, TurnId};
use crate::session::{ConversationStore, Session};

/// Fixed assistant message for transport failures in the chat flow.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to process query. Please try again.";

/// Prefix for backend-reported errors surfaced as assistant turns.
pub const BACKEND_ERROR_PREFIX: &str = "Error: ";

/// How one dispatch settled.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The backend answered; an absent summary list counts as empty.
    Success(Vec<SummaryRecord>),
    /// The backend answered with an `error` field (any HTTP status).
    Backend(String),
    /// The request could not be sent or the response could not be parsed.
    Transport,
}

impl QueryOutcome {
    /// Classify a settled transport result into the outcome taxonomy.
    pub fn from_result(result: Result<ChatResponse, ApiError>) -> Self {
        match result {
            Ok(response) => match response.error {
                Some(message) => QueryOutcome::Backend(message),
                None => QueryOutcome::Success(response.ollama_summaries.unwrap_or_default()),
            },
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                QueryOutcome::Transport
            }
        }
    }
}

/// Phase 1 of the chat flow: append the user turn and build the request
/// from a by-value filter snapshot.
pub fn begin_chat(session: &mut Session, utterance: &str) -> ChatRequest {
    session.conversation.push_user_text(utterance);
    ChatRequest::chat(utterance, &session.filters.snapshot())
}

/// Phase 1 of the search flow. Marks the session as having searched so the
/// empty-result state is distinguishable from "never searched", even if the
/// request later fails.
pub fn begin_search(session: &mut Session) -> ChatRequest {
    session.has_searched = true;
    ChatRequest::search(&session.filters.snapshot())
}

/// Phase 2 of the chat flow: append exactly one assistant turn for the
/// settled outcome.
pub fn apply_chat_outcome(conversation: &mut ConversationStore, outcome: QueryOutcome) -> TurnId {
    match outcome {
        QueryOutcome::Success(records) => conversation.push_assistant_summaries(records),
        QueryOutcome::Backend(message) => {
            conversation.push_assistant_text(format!("{}{}", BACKEND_ERROR_PREFIX, message))
        }
        QueryOutcome::Transport => conversation.push_assistant_text(TRANSPORT_FAILURE_MESSAGE),
    }
}

/// Phase 2 of the search flow: replace the side result list. Failures leave
/// it empty; the conversation is untouched.
pub fn apply_search_outcome(session: &mut Session, outcome: QueryOutcome) {
    session.recent_results = match outcome {
        QueryOutcome::Success(records) => records,
        QueryOutcome::Backend(_) | QueryOutcome::Transport => Vec::new(),
    };
}

/// Clears a busy flag when dropped, so every exit path releases it,
/// including panics.
struct BusyGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// One-dispatch-at-a-time driver over a [`ChatBackend`].
///
/// Tracks a busy flag per flow; the chat and search flows are independent
/// and may be in flight simultaneously.
#[derive(Debug)]
pub struct Dispatcher<B> {
    backend: B,
    busy: bool,
    searching: bool,
}

impl<B: ChatBackend> Dispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, busy: false, searching: false }
    }

    /// Whether a chat dispatch is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether a filter search is in flight.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run the full chat flow: optimistic user turn, request, assistant turn.
    pub async fn submit_chat(&mut self, session: &mut Session, utterance: &str) -> QueryOutcome {
        let request = begin_chat(session, utterance);

        let Dispatcher { backend, busy, .. } = self;
        let _guard = BusyGuard::acquire(busy);

        let outcome = QueryOutcome::from_result(backend.send(&request).await);
        apply_chat_outcome(&mut session.conversation, outcome.clone());
        outcome
    }

    /// Run the full filter-search flow, replacing the session's result list.
    pub async fn submit_search(&mut self, session: &mut Session) -> QueryOutcome {
        let request = begin_search(session);

        let Dispatcher { backend, searching, .. } = self;
        let _guard = BusyGuard::acquire(searching);

        let outcome = QueryOutcome::from_result(backend.send(&request).await);
        apply_search_outcome(session, outcome.clone());
        outcome
    }
}
