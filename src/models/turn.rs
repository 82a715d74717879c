use serde::{Deserialize, Serialize};

use super::summary::SummaryRecord;

/// Creation-order identifier of a turn within one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

/// Turn payload. The rendering variant and the content travel together,
/// so a text turn can never carry a summary list or vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnContent {
    Text(String),
    Summaries(Vec<SummaryRecord>),
}

/// One immutable entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: TurnId,
    pub role: Role,
    pub content: TurnContent,
}

impl ChatTurn {
    /// Text payload, if this is a text turn.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            TurnContent::Text(s) => Some(s),
            TurnContent::Summaries(_) => None,
        }
    }

    /// Summary payload, if this is a summary-list turn.
    pub fn summaries(&self) -> Option<&[SummaryRecord]> {
        match &self.content {
            TurnContent::Text(_) => None,
            TurnContent::Summaries(records) => Some(records),
        }
    }
}
