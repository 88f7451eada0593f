//! Typed HTTP client for the recommendation backend.

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::payload::{BotPayload, PayloadError};
use crate::progress::SessionStatus;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: StatusCode },
    #[error("could not decode reply from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected reply from {endpoint}: {source}")]
    Payload {
        endpoint: String,
        #[source]
        source: PayloadError,
    },
}

#[derive(Serialize)]
struct CommandRequest<'a> {
    session_id: &'a str,
    // Both drafts of the backend are in use: one reads `command`, the other `message`.
    command: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    session_id: &'a str,
    artist_or_song: &'a str,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    session_id: &'a str,
}

/// Client for `/command`, `/recommend`, `/reset` and `/session/{id}`
#[derive(Debug, Clone)]
pub struct RecommenderClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RecommenderClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send free text (or a quick reply) to `POST /command`.
    pub async fn command(&self, session: &Session, text: &str) -> Result<BotPayload, ClientError> {
        let body = CommandRequest {
            session_id: session.id(),
            command: text,
            message: text,
        };
        self.post_for_payload("/command", &body).await
    }

    /// Ask `POST /recommend` for a track based on an artist or song.
    pub async fn recommend(
        &self,
        session: &Session,
        artist_or_song: &str,
    ) -> Result<BotPayload, ClientError> {
        let body = RecommendRequest {
            session_id: session.id(),
            artist_or_song,
        };
        self.post_for_payload("/recommend", &body).await
    }

    /// Clear the server-side preferences for this session.
    pub async fn reset(&self, session: &Session) -> Result<BotPayload, ClientError> {
        let body = ResetRequest {
            session_id: session.id(),
        };
        self.post_for_payload("/reset", &body).await
    }

    /// Fetch the preference progress for this session.
    pub async fn session_status(&self, session: &Session) -> Result<SessionStatus, ClientError> {
        let endpoint = self.config.endpoint(&format!("/session/{}", session.id()));
        tracing::debug!(%endpoint, "polling session status");

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { endpoint, status });
        }

        response
            .json::<SessionStatus>()
            .await
            .map_err(|source| ClientError::Decode { endpoint, source })
    }

    async fn post_for_payload<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<BotPayload, ClientError> {
        let endpoint = self.config.endpoint(path);
        tracing::debug!(%endpoint, "sending request");

        let response = self
            .http
            .post(&endpoint)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { endpoint, status });
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| ClientError::Decode {
                endpoint: endpoint.clone(),
                source,
            })?;

        BotPayload::from_json(value).map_err(|source| ClientError::Payload { endpoint, source })
    }
}
