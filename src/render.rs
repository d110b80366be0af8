//! Message Renderer
//!
//! How a single chat turn looks, independent of the output surface.

use crate::history::{Message, Role};

/// Name shown above assistant messages
pub const ASSISTANT_NAME: &str = "InsightX";

/// Avatar for the assistant
pub const ASSISTANT_AVATAR: &str = "⚡";

/// Avatar for the user
pub const USER_AVATAR: &str = "👤";

/// Dots in the typing indicator
pub const TYPING_DOTS: usize = 3;

/// Horizontal placement of a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    End,
}

/// Display model for one message bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView<'a> {
    pub role: Role,
    pub align: Align,
    pub avatar: &'static str,
    /// Label above the content; only assistant bubbles have one
    pub author: Option<&'static str>,
    pub content: &'a str,
}

impl<'a> MessageView<'a> {
    pub fn of(message: &'a Message) -> Self {
        match message.role {
            Role::User => Self {
                role: Role::User,
                align: Align::End,
                avatar: USER_AVATAR,
                author: None,
                content: &message.content,
            },
            Role::Assistant => Self {
                role: Role::Assistant,
                align: Align::Start,
                avatar: ASSISTANT_AVATAR,
                author: Some(ASSISTANT_NAME),
                content: &message.content,
            },
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Plain-text rendering for terminals
    ///
    /// Assistant lines are prefixed with the avatar and name, user lines with
    /// the user avatar; continuation lines are indented under the first.
    pub fn to_plain(&self) -> String {
        let header = match self.author {
            Some(author) => format!("{} {}", self.avatar, author),
            None => format!("{} You", self.avatar),
        };

        let mut out = header;
        for line in self.content.lines() {
            out.push('\n');
            out.push_str("   ");
            out.push_str(line);
        }
        out
    }
}

impl<'a> From<&'a Message> for MessageView<'a> {
    fn from(message: &'a Message) -> Self {
        Self::of(message)
    }
}

/// Plain-text typing indicator
pub fn typing_indicator_plain() -> String {
    format!("{} {}", ASSISTANT_AVATAR, "•".repeat(TYPING_DOTS))
}
