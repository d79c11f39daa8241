//! Entry point turning a raw AI response into delivered messages.

use super::{
    code_policy::CodeBlockPolicy,
    error::DeliveryResult,
    janitor::ArtifactJanitor,
    sequencer::DeliverySequencer,
};
use crate::delivery::{
    domain::{
        Artifact, ArtifactId, ConfigError, DeliverableUnit, DeliveryConfig, Segment, UnitKind,
        sanitize_content, segment, split_text,
    },
    ports::{ArtifactStore, CleanupObserver, MessageTransport},
};
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::debug;

/// Units computed for one response, with the cleanup tasks of any artifacts
/// created along the way.
#[derive(Debug)]
pub struct PreparedResponse {
    /// Units in delivery order.
    pub units: Vec<DeliverableUnit>,
    /// Identifiers of artifacts created for oversized code blocks.
    pub artifacts_created: Vec<ArtifactId>,
    /// Scheduled deletions of those artifacts.
    pub cleanup: Vec<JoinHandle<()>>,
}

/// Outcome of a successful delivery.
#[derive(Debug)]
pub struct DeliveryReport {
    /// Number of messages sent.
    pub units_sent: usize,
    /// Text units.
    pub text_units: usize,
    /// Inline code block units.
    pub code_block_units: usize,
    /// Attachment placeholder units.
    pub attachment_units: usize,
    /// Split code block chunks.
    pub split_units: usize,
    /// Artifacts created for oversized code blocks.
    pub artifacts_created: Vec<ArtifactId>,
    /// Scheduled deletions of those artifacts.
    pub cleanup: Vec<JoinHandle<()>>,
}

impl DeliveryReport {
    fn new(units: &[DeliverableUnit], units_sent: usize, prepared: PreparedResponse) -> Self {
        let count = |kind: UnitKind| units.iter().filter(|unit| unit.kind() == kind).count();
        Self {
            units_sent,
            text_units: count(UnitKind::Text),
            code_block_units: count(UnitKind::CodeBlock),
            attachment_units: count(UnitKind::CodeBlockAttachment),
            split_units: count(UnitKind::CodeBlockSplit),
            artifacts_created: prepared.artifacts_created,
            cleanup: prepared.cleanup,
        }
    }

    /// Waits until every scheduled artifact deletion has run.
    pub async fn wait_for_cleanup(self) {
        for handle in self.cleanup {
            if let Err(err) = handle.await {
                debug!(error = %err, "artifact cleanup task did not complete");
            }
        }
    }
}

/// Delivers AI responses to one destination.
///
/// Create one service per conversation. Overlapping calls to
/// [`Self::deliver_response`] are serialised: each response is fully sent
/// before the next one starts.
pub struct ResponseDeliveryService<T>
where
    T: MessageTransport,
{
    sequencer: DeliverySequencer<T>,
    policy: CodeBlockPolicy,
    janitor: Option<ArtifactJanitor>,
    config: DeliveryConfig,
    in_flight: Mutex<()>,
}

impl<T> ResponseDeliveryService<T>
where
    T: MessageTransport,
{
    /// Creates a service without attachment support; oversized code blocks
    /// are always split inline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(transport: Arc<T>, config: DeliveryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sequencer: DeliverySequencer::new(
                transport,
                config.inter_message_delay(),
                config.failure_policy(),
            ),
            policy: CodeBlockPolicy::new(config.max_length(), config.attachment_threshold()),
            janitor: None,
            config,
            in_flight: Mutex::new(()),
        })
    }

    /// Enables attachments for oversized code blocks.
    ///
    /// Every artifact created through `store` is deleted after the configured
    /// grace period; deletion failures are reported to `observer`.
    #[must_use]
    pub fn with_artifact_store(
        mut self,
        store: Arc<dyn ArtifactStore>,
        observer: Arc<dyn CleanupObserver>,
    ) -> Self {
        self.janitor = Some(ArtifactJanitor::new(
            store,
            observer,
            self.config.artifact_grace_period(),
        ));
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Turns a raw response into ordered units without sending anything.
    ///
    /// Artifacts created here are already scheduled for deletion.
    pub async fn prepare_units(&self, raw_text: &str) -> PreparedResponse {
        let sanitized = sanitize_content(raw_text);
        let mut prepared = PreparedResponse {
            units: Vec::new(),
            artifacts_created: Vec::new(),
            cleanup: Vec::new(),
        };

        for part in segment(&sanitized) {
            match part {
                Segment::Text(text) => {
                    if text.char_len() <= self.config.max_length() {
                        prepared.units.push(DeliverableUnit::text(text.content()));
                    } else {
                        prepared.units.extend(
                            split_text(text.content(), self.config.max_length())
                                .into_iter()
                                .map(DeliverableUnit::text),
                        );
                    }
                }
                Segment::Code(code) => {
                    let store = self.janitor.as_ref().map(ArtifactJanitor::store);
                    let placed = self.policy.place(&code, store).await;
                    for unit in &placed {
                        if let (Some(janitor), Some(artifact)) =
                            (self.janitor.as_ref(), unit.attachment())
                        {
                            prepared.artifacts_created.push(artifact.id());
                            prepared.cleanup.push(janitor.schedule(artifact.clone()));
                        }
                    }
                    prepared.units.extend(placed);
                }
            }
        }

        debug!(units = prepared.units.len(), "prepared response");
        prepared
    }

    /// Splits, places, and sends one response.
    ///
    /// `side_artifacts` (such as rendered diagrams) are attached to the last
    /// message. A response with no content but with side artifacts is sent
    /// as a single captioned message. Waits for any delivery already in
    /// progress on this service.
    ///
    /// # Errors
    ///
    /// Returns [`super::DeliveryError`] when a transport call fails, according
    /// to the configured failure policy. Scheduled artifact cleanup still
    /// runs.
    pub async fn deliver_response(
        &self,
        raw_text: &str,
        side_artifacts: &[Artifact],
    ) -> DeliveryResult<DeliveryReport> {
        let _turn = self.in_flight.lock().await;
        let mut prepared = self.prepare_units(raw_text).await;
        let mut units = std::mem::take(&mut prepared.units);
        if units.is_empty() && !side_artifacts.is_empty() {
            units.push(DeliverableUnit::text(self.config.side_artifact_caption()));
        }

        let units_sent = self.sequencer.deliver(&units, side_artifacts).await?;
        Ok(DeliveryReport::new(&units, units_sent, prepared))
    }
}
