use crate::payload::BotPayload;
use crate::progress::SessionStatus;

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendAction {
    /// Free text or a quick reply, sent to `/command`
    Command(String),
    /// An artist or song, sent to `/recommend`
    Recommend(String),
    /// Clear server-side preferences via `/reset`
    Reset,
    /// Fetch preference progress from `/session/{id}`
    PollSession,
    /// Stop the backend loop
    Shutdown,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum GuiEvent {
    /// The backend answered a command, recommendation or reset
    BotReply(BotPayload),
    /// A command, recommendation or reset could not be completed
    RequestFailed(String),
    /// Latest preference progress
    SessionStatus(SessionStatus),
    /// Preference progress could not be fetched
    StatusUnavailable(String),
    /// The backend thread could not start; no request will be answered
    BackendUnavailable(String),
}
