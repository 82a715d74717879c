use crate::models::{ChatTurn, Role, SummaryRecord, TurnContent, TurnId};

/// Assistant turn every fresh conversation starts with.
pub const GREETING: &str = "Hello! I analyze your camera feeds with a \
vision-language model. Ask me about any activities or events you'd like to find.";

/// Append-only, insertion-ordered log of chat turns.
///
/// Turns are immutable once appended and are never removed for the lifetime
/// of a session; there is no size cap. Writes go through the dispatch layer,
/// reads through [`turns`](Self::turns).
#[derive(Debug)]
pub struct ConversationStore {
    turns: Vec<ChatTurn>,
    next_id: u64,
}

impl ConversationStore {
    /// Create a conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        let mut store = Self { turns: Vec::new(), next_id: 1 };
        store.push(Role::Assistant, TurnContent::Text(GREETING.to_string()));
        store
    }

    fn push(&mut self, role: Role, content: TurnContent) -> TurnId {
        let id = TurnId(self.next_id);
        self.next_id += 1;
        self.turns.push(ChatTurn { id, role, content });
        id
    }

    pub fn push_user_text(&mut self, text: impl Into<String>) -> TurnId {
        self.push(Role::User, TurnContent::Text(text.into()))
    }

    pub fn push_assistant_text(&mut self, text: impl Into<String>) -> TurnId {
        self.push(Role::Assistant, TurnContent::Text(text.into()))
    }

    pub fn push_assistant_summaries(&mut self, records: Vec<SummaryRecord>) -> TurnId {
        self.push(Role::Assistant, TurnContent::Summaries(records))
    }

    /// All turns, in insertion order.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
