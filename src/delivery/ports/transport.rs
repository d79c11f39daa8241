//! Chat platform port used to deliver messages.

use crate::delivery::domain::Artifact;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Message delivery contract for one destination channel.
///
/// Implementations wrap a platform client already bound to a conversation.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Shows the "composing" indicator in the destination.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the platform rejects or fails the call.
    async fn send_typing(&self) -> TransportResult<()>;

    /// Sends one message with the given attachments.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the platform rejects or fails the call.
    async fn send(&self, content: &str, attachments: &[Artifact]) -> TransportResult<()>;
}

/// Errors returned by transport adapters.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The platform asked the caller to back off.
    #[error("rate limited, retry after {retry_after_ms} ms")]
    RateLimited {
        /// Suggested wait before retrying.
        retry_after_ms: u64,
    },

    /// The platform refused the message.
    #[error("message rejected: {0}")]
    Rejected(String),

    /// Network or client failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps a client error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
