//! Ordered, paced delivery of a unit queue.

use super::error::{DeliveryError, DeliveryResult, DeliveryStage, UnitFailure};
use crate::delivery::{
    domain::{Artifact, DeliverableUnit, FailurePolicy},
    ports::{MessageTransport, TransportError},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Sends units one at a time through a transport.
///
/// Each unit gets a composing indicator and exactly one send call, in queue
/// order. Every unit after the first waits for the pacing interval, which
/// runs concurrently with its indicator. Side artifacts ride on the last
/// unit, so a one-unit queue carries both its own attachment and the side
/// artifacts.
#[derive(Debug, Clone)]
pub struct DeliverySequencer<T>
where
    T: MessageTransport,
{
    transport: Arc<T>,
    pacing: Duration,
    policy: FailurePolicy,
}

impl<T> DeliverySequencer<T>
where
    T: MessageTransport,
{
    /// Creates a sequencer.
    #[must_use]
    pub const fn new(transport: Arc<T>, pacing: Duration, policy: FailurePolicy) -> Self {
        Self {
            transport,
            pacing,
            policy,
        }
    }

    /// Delivers `units` in order and returns how many sends succeeded.
    ///
    /// An empty queue makes no transport calls.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::StopOnFirstFailure`], returns
    /// [`DeliveryError::Typing`] or [`DeliveryError::Send`] for the first
    /// failed call. With [`FailurePolicy::ContinueOnFailure`], returns
    /// [`DeliveryError::Incomplete`] after the whole queue when any call
    /// failed.
    pub async fn deliver(
        &self,
        units: &[DeliverableUnit],
        side_artifacts: &[Artifact],
    ) -> DeliveryResult<usize> {
        let total = units.len();
        let mut delivered = 0;
        let mut failures = Vec::new();

        for (unit_index, unit) in units.iter().enumerate() {
            let typing = if unit_index == 0 {
                self.transport.send_typing().await
            } else {
                let (indicator, ()) = tokio::join!(
                    self.transport.send_typing(),
                    tokio::time::sleep(self.pacing)
                );
                indicator
            };
            if let Err(source) = typing {
                self.on_failure(&mut failures, unit_index, DeliveryStage::Typing, source)?;
            }

            let is_last = unit_index + 1 == total;
            let attachments = attachments_for(unit, is_last, side_artifacts);
            match self.transport.send(unit.content(), &attachments).await {
                Ok(()) => {
                    delivered += 1;
                    debug!(
                        unit_index,
                        kind = %unit.kind(),
                        attachments = attachments.len(),
                        "sent unit"
                    );
                }
                Err(source) => {
                    self.on_failure(&mut failures, unit_index, DeliveryStage::Send, source)?;
                }
            }
        }

        if failures.is_empty() {
            Ok(delivered)
        } else {
            Err(DeliveryError::Incomplete {
                delivered,
                total,
                failures,
            })
        }
    }

    fn on_failure(
        &self,
        failures: &mut Vec<UnitFailure>,
        unit_index: usize,
        stage: DeliveryStage,
        source: TransportError,
    ) -> DeliveryResult<()> {
        match (self.policy, stage) {
            (FailurePolicy::StopOnFirstFailure, DeliveryStage::Typing) => {
                Err(DeliveryError::Typing { unit_index, source })
            }
            (FailurePolicy::StopOnFirstFailure, DeliveryStage::Send) => {
                Err(DeliveryError::Send { unit_index, source })
            }
            (FailurePolicy::ContinueOnFailure, _) => {
                debug!(unit_index, %stage, error = %source, "transport call failed, continuing");
                failures.push(UnitFailure {
                    unit_index,
                    stage,
                    source,
                });
                Ok(())
            }
        }
    }
}

fn attachments_for(
    unit: &DeliverableUnit,
    is_last: bool,
    side_artifacts: &[Artifact],
) -> Vec<Artifact> {
    let mut attachments: Vec<Artifact> = unit.attachment().cloned().into_iter().collect();
    if is_last {
        attachments.extend_from_slice(side_artifacts);
    }
    attachments
}
