use crate::markup::QuickReply;
use crate::media::MediaId;

/// Maximum messages to keep in the conversation before trimming
const MAX_BUFFER_MESSAGES: usize = 2000;
/// Number of oldest messages to remove when trimming
const BUFFER_TRIM_COUNT: usize = 500;

/// Who a chat bubble belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
    /// Local notices (usage hints, command help)
    System,
}

impl Author {
    pub fn label(self) -> &'static str {
        match self {
            Author::User => "You",
            Author::Bot => "Moodify",
            Author::System => "*",
        }
    }
}

/// A single chat bubble
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub timestamp: String,
    pub author: Author,
    pub text: String,
    /// Track shown as an embedded player under the text
    pub media: Option<MediaId>,
    /// Suggested replies rendered as buttons
    pub quick_replies: Vec<QuickReply>,
}

impl ChatMessage {
    pub fn new(timestamp: String, author: Author, text: String) -> Self {
        Self {
            timestamp,
            author,
            text,
            media: None,
            quick_replies: Vec::new(),
        }
    }

    pub fn with_media(mut self, media: Option<MediaId>) -> Self {
        self.media = media;
        self
    }

    pub fn with_quick_replies(mut self, quick_replies: Vec<QuickReply>) -> Self {
        self.quick_replies = quick_replies;
        self
    }
}

/// The conversation shown in the chat panel
#[derive(Default, Clone, Debug)]
pub struct ChatBuffer {
    pub messages: Vec<ChatMessage>,
}

impl ChatBuffer {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, msg: ChatMessage) {
        self.messages.push(msg);
        // Trim old messages if buffer gets too large
        if self.messages.len() > MAX_BUFFER_MESSAGES {
            self.messages.drain(0..BUFFER_TRIM_COUNT);
        }
    }

    /// Index of the newest bot message; only its quick replies stay active
    pub fn last_bot_index(&self) -> Option<usize> {
        self.messages.iter().rposition(|m| m.author == Author::Bot)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
