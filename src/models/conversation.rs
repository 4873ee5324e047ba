use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Photo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePreview {
    pub timestamp: DateTime<Utc>,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub comments_authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Outgoing message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl NewMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Text,
            text: Some(text.into()),
            photo: None,
        }
    }

    /// `photo` is base64-encoded image data
    pub fn photo(photo: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Photo,
            text: None,
            photo: Some(photo.into()),
        }
    }
}

/// Entry of the conversation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    pub convo_pic: Option<String>,
    pub last_message: Option<MessagePreview>,
}

impl ConversationSummary {
    /// Name to show in lists: the group name, or the other participants
    pub fn display_name(&self, me: &str) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .participants
                .iter()
                .filter(|p| p.as_str() != me)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    pub convo_pic: Option<String>,
    pub last_message: Option<MessagePreview>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversationRequest {
    pub recipient: String,
}
