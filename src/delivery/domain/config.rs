//! Tunables for the response delivery pipeline.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discord's per-message limit in characters.
pub const DISCORD_MAX_LENGTH: usize = 2000;

/// Smallest accepted `max_length`; leaves room for a fenced placeholder.
pub const MIN_MAX_LENGTH: usize = 64;

/// Floor for the derived attachment threshold.
const MIN_DERIVED_THRESHOLD: usize = 100;

/// What the sequencer does after a transport call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the remaining queue and return the failure.
    #[default]
    StopOnFirstFailure,
    /// Send every remaining unit, then report all failures together.
    ContinueOnFailure,
}

/// Configuration for splitting and sending one response.
///
/// # Examples
///
/// ```
/// use chatrelay::delivery::domain::DeliveryConfig;
///
/// let config = DeliveryConfig::discord();
/// assert_eq!(config.max_length(), 2000);
/// assert_eq!(config.attachment_threshold(), 1600);
///
/// let small = DeliveryConfig::default().with_max_length(500);
/// assert_eq!(small.attachment_threshold(), 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    max_length: usize,
    attachment_threshold: Option<usize>,
    inter_message_delay_ms: u64,
    artifact_grace_period_ms: u64,
    failure_policy: FailurePolicy,
    side_artifact_caption: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_length: DISCORD_MAX_LENGTH,
            attachment_threshold: None,
            inter_message_delay_ms: 1200,
            artifact_grace_period_ms: 60_000,
            failure_policy: FailurePolicy::default(),
            side_artifact_caption: "Here's your diagram:".to_owned(),
        }
    }
}

impl DeliveryConfig {
    /// Returns the configuration used for Discord channels.
    #[must_use]
    pub fn discord() -> Self {
        Self::default()
    }

    /// Sets the per-message limit.
    ///
    /// An attachment threshold that was not set explicitly follows the new
    /// limit.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the largest code block, in characters, that is sent inline.
    #[must_use]
    pub const fn with_attachment_threshold(mut self, threshold: usize) -> Self {
        self.attachment_threshold = Some(threshold);
        self
    }

    /// Sets the pause between consecutive messages.
    #[must_use]
    pub const fn with_inter_message_delay_ms(mut self, delay_ms: u64) -> Self {
        self.inter_message_delay_ms = delay_ms;
        self
    }

    /// Sets how long generated artifacts live before deletion.
    #[must_use]
    pub const fn with_artifact_grace_period_ms(mut self, grace_ms: u64) -> Self {
        self.artifact_grace_period_ms = grace_ms;
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub const fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Sets the caption sent when a response consists only of side artifacts.
    #[must_use]
    pub fn with_side_artifact_caption(mut self, caption: impl Into<String>) -> Self {
        self.side_artifact_caption = caption.into();
        self
    }

    /// Returns the per-message limit in characters.
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the inline code block limit in characters.
    ///
    /// Defaults to 80% of `max_length`, but never less than 100 nor more than
    /// `max_length`.
    #[must_use]
    pub fn attachment_threshold(&self) -> usize {
        self.attachment_threshold.unwrap_or_else(|| {
            let derived = self.max_length.saturating_mul(4).div_euclid(5);
            derived.max(MIN_DERIVED_THRESHOLD).min(self.max_length)
        })
    }

    /// Returns the pause between consecutive messages.
    #[must_use]
    pub const fn inter_message_delay(&self) -> Duration {
        Duration::from_millis(self.inter_message_delay_ms)
    }

    /// Returns how long generated artifacts live before deletion.
    #[must_use]
    pub const fn artifact_grace_period(&self) -> Duration {
        Duration::from_millis(self.artifact_grace_period_ms)
    }

    /// Returns the failure policy.
    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Returns the caption for side-artifact-only responses.
    #[must_use]
    pub fn side_artifact_caption(&self) -> &str {
        &self.side_artifact_caption
    }

    /// Checks that the limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `max_length` is below [`MIN_MAX_LENGTH`],
    /// the attachment threshold is zero or exceeds `max_length`, or the
    /// caption does not fit in one message.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length < MIN_MAX_LENGTH {
            return Err(ConfigError::MaxLengthTooSmall {
                actual: self.max_length,
                minimum: MIN_MAX_LENGTH,
            });
        }
        let threshold = self.attachment_threshold();
        if threshold == 0 {
            return Err(ConfigError::ZeroAttachmentThreshold);
        }
        if threshold > self.max_length {
            return Err(ConfigError::ThresholdExceedsMaxLength {
                threshold,
                max_length: self.max_length,
            });
        }
        let caption_length = self.side_artifact_caption.chars().count();
        if caption_length > self.max_length {
            return Err(ConfigError::CaptionTooLong {
                actual: caption_length,
                max_length: self.max_length,
            });
        }
        Ok(())
    }
}
