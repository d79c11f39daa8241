//! Recording transport for delivery tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use tokio::time::Instant;

use crate::delivery::{
    domain::Artifact,
    ports::{MessageTransport, TransportError, TransportResult},
};

/// One call observed by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A composing indicator.
    Typing {
        /// When the call was made.
        at: Instant,
    },
    /// A send attempt.
    Send(SentMessage),
}

/// A send attempt and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Message text.
    pub content: String,
    /// Attachments passed with the message.
    pub attachments: Vec<Artifact>,
    /// Whether the send succeeded.
    pub delivered: bool,
    /// When the call was made.
    pub at: Instant,
}

/// Transport that records every call and can be told to fail.
///
/// Send and typing calls are numbered from zero in call order.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    state: Arc<RwLock<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    events: Vec<TransportEvent>,
    send_calls: usize,
    typing_calls: usize,
    failing_sends: HashSet<usize>,
    failing_typing: HashSet<usize>,
}

impl RecordingTransport {
    /// Creates a transport where every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the send call with the given number fail.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_send(&self, call: usize) -> TransportResult<()> {
        self.write()?.failing_sends.insert(call);
        Ok(())
    }

    /// Makes the typing call with the given number fail.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_typing(&self, call: usize) -> TransportResult<()> {
        self.write()?.failing_typing.insert(call);
        Ok(())
    }

    /// Returns every recorded call in order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn events(&self) -> TransportResult<Vec<TransportEvent>> {
        Ok(self.read()?.events.clone())
    }

    /// Returns every send attempt in order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn sent(&self) -> TransportResult<Vec<SentMessage>> {
        Ok(self
            .read()?
            .events
            .iter()
            .filter_map(|event| match event {
                TransportEvent::Send(message) => Some(message.clone()),
                TransportEvent::Typing { .. } => None,
            })
            .collect())
    }

    /// Returns the number of typing calls made.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn typing_count(&self) -> TransportResult<usize> {
        Ok(self.read()?.typing_calls)
    }

    fn read(&self) -> TransportResult<std::sync::RwLockReadGuard<'_, RecordingState>> {
        self.state
            .read()
            .map_err(|err| TransportError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TransportResult<std::sync::RwLockWriteGuard<'_, RecordingState>> {
        self.state
            .write()
            .map_err(|err| TransportError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn send_typing(&self) -> TransportResult<()> {
        let mut state = self.write()?;
        let call = state.typing_calls;
        state.typing_calls += 1;
        state.events.push(TransportEvent::Typing { at: Instant::now() });
        if state.failing_typing.contains(&call) {
            return Err(TransportError::Rejected(format!("typing call {call} failed")));
        }
        Ok(())
    }

    async fn send(&self, content: &str, attachments: &[Artifact]) -> TransportResult<()> {
        let mut state = self.write()?;
        let call = state.send_calls;
        state.send_calls += 1;
        let delivered = !state.failing_sends.contains(&call);
        state.events.push(TransportEvent::Send(SentMessage {
            content: content.to_owned(),
            attachments: attachments.to_vec(),
            delivered,
            at: Instant::now(),
        }));
        if delivered {
            Ok(())
        } else {
            Err(TransportError::Rejected(format!("send call {call} failed")))
        }
    }
}
