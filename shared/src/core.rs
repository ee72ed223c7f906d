use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

/// Payload carried by a queue message. Only the `type` field drives the demo
/// branches; everything else is opaque to the processor.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Retry-policy intent attached to every failure at the point it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClassification {
    /// The message can never succeed; it will keep failing until the queue
    /// moves it to the DLQ.
    Permanent,
    /// A recoverable condition; redelivery is expected to succeed.
    Transient,
    /// Uncategorized faults, including malformed payloads and timeouts.
    /// Treated as retryable.
    Unknown,
}

impl ErrorClassification {
    pub fn redrive_consequence(&self) -> &'static str {
        match self {
            ErrorClassification::Permanent => "will reach the DLQ after retries are exhausted",
            ErrorClassification::Transient | ErrorClassification::Unknown => "will be retried",
        }
    }
}

impl std::fmt::Display for ErrorClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorClassification::Permanent => write!(f, "permanent"),
            ErrorClassification::Transient => write!(f, "transient"),
            ErrorClassification::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Error)]
#[error("{classification} failure: {reason}")]
pub struct ProcessingError {
    classification: ErrorClassification,
    reason: String,
}

impl ProcessingError {
    pub fn permanent(reason: impl Into<String>) -> Self {
        Self {
            classification: ErrorClassification::Permanent,
            reason: reason.into(),
        }
    }

    pub fn transient(reason: impl Into<String>) -> Self {
        Self {
            classification: ErrorClassification::Transient,
            reason: reason.into(),
        }
    }

    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            classification: ErrorClassification::Unknown,
            reason: reason.into(),
        }
    }

    pub fn classification(&self) -> ErrorClassification {
        self.classification
    }
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait MessageProcessor {
    async fn process(&self, task: TaskMessage) -> Result<(), ProcessingError>;
}
