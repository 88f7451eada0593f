//! Integration tests for moodify-client
//!
//! These tests exercise full workflows across multiple modules to ensure
//! proper integration between commands, events, rendering and UI state.

#[cfg(test)]
mod integration_tests {
    use crate::buffer::Author;
    use crate::commands::handle_user_input;
    use crate::events::{process_events, CONNECTION_APOLOGY};
    use crate::payload::BotPayload;
    use crate::progress::SessionStatus;
    use crate::protocol::{BackendAction, GuiEvent};
    use crate::scheduler::OverlapPolicy;
    use crate::session::{FileSessionStore, Session, SESSION_KEY};
    use crate::state::ClientState;
    use crossbeam_channel::unbounded;
    use std::time::{Duration, Instant};

    const ID: &str = "4uLU6hMCjMI75M1A2tKUQC";

    /// A full exchange: send, wait out the typing delay, answer with a quick reply
    #[test]
    fn test_conversation_with_quick_reply() {
        let mut state = ClientState::new("sid", OverlapPolicy::KeepAll, None);
        let (action_tx, action_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        assert!(handle_user_input("I want pop", &mut state, &action_tx));
        assert_eq!(
            action_rx.try_recv().unwrap(),
            BackendAction::Command("I want pop".into())
        );
        assert!(state.loading);

        // Backend answers with markup and a track
        event_tx
            .send(GuiEvent::BotReply(BotPayload::Structured {
                text: format!(
                    "<span style='color:green'>Pop it is!</span><br>Feeling upbeat? \
                     <button onclick=\"window.handleBotReply('yes')\">Yes</button>\
                     <button onclick=\"window.handleBotReply('no')\">No</button> \
                     🎵 <a href=\"https://open.spotify.com/track/{}\" target=\"_blank\">Listen on Spotify</a>",
                    ID
                ),
                media_ref: Some(format!("https://open.spotify.com/track/{}", ID)),
            }))
            .unwrap();

        let start = Instant::now();
        process_events(&mut state, &event_rx, &action_tx, start);
        assert!(!state.loading);
        assert!(state.is_typing());
        assert_eq!(action_rx.try_recv().unwrap(), BackendAction::PollSession);
        // Greeting and user bubble only
        assert_eq!(state.buffer.len(), 2);

        process_events(&mut state, &event_rx, &action_tx, start + Duration::from_secs(3));
        assert!(!state.is_typing());
        let reply = state.buffer.messages.last().unwrap();
        assert_eq!(reply.author, Author::Bot);
        assert_eq!(reply.text, "Pop it is!\nFeeling upbeat?");
        assert_eq!(reply.media.as_ref().unwrap().as_str(), ID);
        assert!(!reply.text.contains("open.spotify.com"));
        let commands: Vec<_> = reply.quick_replies.iter().map(|q| q.command.clone()).collect();
        assert_eq!(commands, vec!["yes", "no"]);

        // Pressing a quick reply behaves like typing its command
        let command = reply.quick_replies[0].command.clone();
        assert!(handle_user_input(&command, &mut state, &action_tx));
        assert_eq!(
            action_rx.try_recv().unwrap(),
            BackendAction::Command("yes".into())
        );
        assert_eq!(state.buffer.messages.last().unwrap().author, Author::User);
    }

    #[test]
    fn test_progress_follows_session_status() {
        let mut state = ClientState::new("sid", OverlapPolicy::KeepAll, None);
        let (action_tx, _action_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        assert_eq!(state.progress.label(), "0/4 preferences");

        event_tx
            .send(GuiEvent::SessionStatus(SessionStatus {
                genre: Some("rock".into()),
                mood: Some("calm".into()),
                no_pref_artist_or_song: Some(true),
                ..Default::default()
            }))
            .unwrap();
        process_events(&mut state, &event_rx, &action_tx, Instant::now());
        assert_eq!(state.progress.label(), "3/4 preferences");
        assert!(!state.progress.is_complete());

        // A failed poll leaves the bar alone
        event_tx
            .send(GuiEvent::StatusUnavailable("HTTP 502".into()))
            .unwrap();
        process_events(&mut state, &event_rx, &action_tx, Instant::now());
        assert_eq!(state.progress.filled_count(), 3);
    }

    #[test]
    fn test_failure_then_retry() {
        let mut state = ClientState::new("sid", OverlapPolicy::KeepAll, None);
        let (action_tx, action_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        assert!(handle_user_input("jazz", &mut state, &action_tx));
        let _ = action_rx.try_recv();
        // Input is locked while the request is in flight
        assert!(!handle_user_input("jazz again", &mut state, &action_tx));

        event_tx
            .send(GuiEvent::RequestFailed("connection refused".into()))
            .unwrap();
        process_events(&mut state, &event_rx, &action_tx, Instant::now());
        assert!(!state.loading);
        assert!(!state.is_typing());
        assert_eq!(state.buffer.messages.last().unwrap().text, CONNECTION_APOLOGY);
        // No session poll after a failure
        assert!(action_rx.try_recv().is_err());

        assert!(handle_user_input("jazz again", &mut state, &action_tx));
        assert_eq!(
            action_rx.try_recv().unwrap(),
            BackendAction::Command("jazz again".into())
        );
    }

    #[test]
    fn test_overlapping_replies_keep_all() {
        let mut state = ClientState::new("sid", OverlapPolicy::KeepAll, None);
        let (action_tx, _action_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let start = Instant::now();

        // Long reply first, short reply second: the short one is due earlier
        let long = vec!["word"; 10].join(" ");
        event_tx.send(GuiEvent::BotReply(long.clone().into())).unwrap();
        event_tx.send(GuiEvent::BotReply("short".into())).unwrap();
        process_events(&mut state, &event_rx, &action_tx, start);
        assert_eq!(state.typing.len(), 2);

        process_events(&mut state, &event_rx, &action_tx, start + Duration::from_millis(440));
        assert_eq!(state.buffer.messages.last().unwrap().text, "short");
        assert!(state.is_typing());

        process_events(&mut state, &event_rx, &action_tx, start + Duration::from_millis(1250));
        assert_eq!(state.buffer.messages.last().unwrap().text, long);
        assert!(!state.is_typing());
    }

    #[test]
    fn test_overlapping_replies_replace_pending() {
        let mut state = ClientState::new("sid", OverlapPolicy::ReplacePending, None);
        let (action_tx, _action_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let start = Instant::now();

        event_tx.send(GuiEvent::BotReply("first".into())).unwrap();
        event_tx.send(GuiEvent::BotReply("second".into())).unwrap();
        process_events(&mut state, &event_rx, &action_tx, start);
        assert_eq!(state.typing.len(), 1);

        process_events(&mut state, &event_rx, &action_tx, start + Duration::from_secs(1));
        let texts: Vec<_> = state.buffer.messages.iter().map(|m| m.text.as_str()).collect();
        assert!(!texts.contains(&"first"));
        assert_eq!(texts.last(), Some(&"second"));
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");

        let first = Session::load_or_create(&mut FileSessionStore::new(&path)).unwrap();
        let second = Session::load_or_create(&mut FileSessionStore::new(&path)).unwrap();
        assert_eq!(first, second);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(SESSION_KEY));
        assert!(content.contains(first.id()));

        // A fresh store starts a new session
        let other = dir.path().join("other.json");
        let third = Session::load_or_create(&mut FileSessionStore::new(&other)).unwrap();
        assert_ne!(first, third);
    }
}
