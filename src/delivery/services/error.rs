//! Service-level errors for response delivery.

use crate::delivery::ports::TransportError;
use std::fmt;
use thiserror::Error;

/// Transport call that failed for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStage {
    /// The composing indicator.
    Typing,
    /// The message itself.
    Send,
}

impl fmt::Display for DeliveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Typing => "typing",
            Self::Send => "send",
        })
    }
}

/// One failed transport call, recorded when delivery continues past errors.
#[derive(Debug, Clone)]
pub struct UnitFailure {
    /// Queue position of the unit.
    pub unit_index: usize,
    /// Which call failed.
    pub stage: DeliveryStage,
    /// Transport error.
    pub source: TransportError,
}

/// Errors returned while delivering a response.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The composing indicator failed and delivery stopped.
    #[error("typing indicator failed before unit {unit_index}: {source}")]
    Typing {
        /// Queue position of the unit.
        unit_index: usize,
        /// Transport error.
        source: TransportError,
    },

    /// A send failed and delivery stopped.
    #[error("sending unit {unit_index} failed: {source}")]
    Send {
        /// Queue position of the unit.
        unit_index: usize,
        /// Transport error.
        source: TransportError,
    },

    /// Every unit was attempted but some transport calls failed.
    #[error("{delivered} of {total} units delivered, {} transport calls failed", failures.len())]
    Incomplete {
        /// Units whose send succeeded.
        delivered: usize,
        /// Units in the queue.
        total: usize,
        /// Each failed call, in order.
        failures: Vec<UnitFailure>,
    },
}

/// Result type for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;
