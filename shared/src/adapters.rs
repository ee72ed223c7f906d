use crate::core::{MessageProcessor, ProcessingError, TaskMessage};
use async_trait::async_trait;
use std::time::Duration;

/// Demo implementation of the processor port. Failure branches are keyed by
/// the payload's `type` field so the retry/DLQ behaviour can be exercised
/// without a real downstream.
#[derive(Debug)]
pub struct SimulatedTaskProcessor {
    stall_duration: Duration,
}

impl SimulatedTaskProcessor {
    /// `stall_duration` is how long the `timeout` branch sleeps before
    /// failing, simulating a stalled downstream call.
    pub fn new(stall_duration: Duration) -> Self {
        Self { stall_duration }
    }
}

#[async_trait]
impl MessageProcessor for SimulatedTaskProcessor {
    async fn process(&self, task: TaskMessage) -> Result<(), ProcessingError> {
        match task.message_type.as_str() {
            "business-error" => Err(ProcessingError::permanent(
                "task is in an invalid business state",
            )),
            "temporary-error" => Err(ProcessingError::transient("downstream is unavailable")),
            "timeout" => {
                tokio::time::sleep(self.stall_duration).await;
                Err(ProcessingError::unknown("downstream call stalled"))
            }
            _ => Ok(()),
        }
    }
}
