//! Backend main loop running the HTTP client on a tokio runtime.

use std::ops::ControlFlow;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tokio::runtime::Runtime;

use super::handlers;
use crate::client::RecommenderClient;
use crate::config::ClientConfig;
use crate::protocol::{BackendAction, GuiEvent};
use crate::session::Session;

/// How long the loop sleeps when no action is waiting
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Run the backend event loop on a tokio runtime.
///
/// Actions are handled one at a time, so at most one request is in flight.
/// Returns when `Shutdown` is received or the action channel is closed.
pub fn run_backend(
    config: ClientConfig,
    session: Session,
    action_rx: Receiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {}", e);
            let _ = event_tx.send(GuiEvent::BackendUnavailable(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    let client = match RecommenderClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            let _ = event_tx.send(GuiEvent::BackendUnavailable(e.to_string()));
            return;
        }
    };

    tracing::info!(
        backend = %client.config().backend_url,
        session_id = %session.id(),
        "backend loop started"
    );

    rt.block_on(async move {
        loop {
            // Check for actions from the UI (non-blocking)
            match action_rx.try_recv() {
                Ok(action) => {
                    let flow =
                        handlers::handle_backend_action(action, &client, &session, &event_tx)
                            .await;
                    if let ControlFlow::Break(()) = flow {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => {
                    // Nothing queued, sleep a bit to avoid busy-looping
                    tokio::time::sleep(IDLE_POLL).await;
                }
                Err(TryRecvError::Disconnected) => break,
            }
        }
    });

    tracing::info!("backend loop stopped");
}
