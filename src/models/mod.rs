//! Wire types for the WASAText API.
//!
//! - `User`, `LoginResponse`: accounts and the login handshake
//! - `Conversation`, `ConversationSummary`, `Message`: chats and their messages

pub mod conversation;
pub mod user;

pub use conversation::{
    Conversation, ConversationSummary, Message, MessageKind, MessagePreview, NewMessage,
    StartConversationRequest,
};
pub use user::{LoginRequest, LoginResponse, UpdateUsernameRequest, User};
