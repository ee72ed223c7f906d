use aws_lambda_events::{
    event::sqs::SqsEvent,
    sqs::{BatchItemFailure, SqsBatchResponse, SqsMessage},
};
use lambda_runtime::{tracing, Error, LambdaEvent};
use shared::core::{MessageProcessor, ProcessingError, TaskMessage};
use std::time::Duration;

pub(crate) struct HandlerDeps<P: MessageProcessor> {
    pub processor: P,
    /// Per-message time budget. Work still in flight when it expires is
    /// reported as a transient failure so the queue redelivers it.
    pub message_timeout: Duration,
}

/// One entry per message in the batch, success or failure.
struct ProcessingOutcome {
    message_id: Option<String>,
    result: Result<(), ProcessingError>,
}

/// Processes every record in the batch concurrently and reports the subset
/// that failed. Per-message failures never escape as a batch-level error;
/// returning `Err` here would make SQS redeliver the whole batch, including
/// messages that already succeeded.
pub(crate) async fn function_handler<P: MessageProcessor>(
    deps: &HandlerDeps<P>,
    event: LambdaEvent<SqsEvent>,
) -> Result<SqsBatchResponse, Error> {
    let tasks: Vec<_> = event
        .payload
        .records
        .into_iter()
        .map(|message| process_message(deps, message))
        .collect();
    let outcomes = futures::future::join_all(tasks).await;

    let mut sqs_batch_response = SqsBatchResponse::default();
    sqs_batch_response.batch_item_failures = outcomes
        .into_iter()
        .filter_map(|outcome| match (outcome.message_id, outcome.result) {
            (_, Ok(())) => None,
            (Some(message_id), Err(e)) => {
                tracing::error!(
                    message_id = %message_id,
                    classification = %e.classification(),
                    "failed to process message, it {}: {}",
                    e.classification().redrive_consequence(),
                    e
                );
                let mut failure_item = BatchItemFailure::default();
                failure_item.item_identifier = message_id;
                Some(failure_item)
            }
            (None, Err(e)) => {
                // SQS cannot match a failure entry without an identifier.
                tracing::warn!("dropping failed message with no message_id: {}", e);
                None
            }
        })
        .collect();
    Ok(sqs_batch_response)
}

async fn process_message<P: MessageProcessor>(
    deps: &HandlerDeps<P>,
    message: SqsMessage,
) -> ProcessingOutcome {
    let message_id = message.message_id;
    let result = run_task(deps, message.body).await;
    if result.is_ok() {
        tracing::info!(message_id = ?message_id, "message processed");
    }
    ProcessingOutcome { message_id, result }
}

/// All failure paths end up as a `ProcessingError`, including a missing or
/// unparsable body and an exhausted time budget.
async fn run_task<P: MessageProcessor>(
    deps: &HandlerDeps<P>,
    body: Option<String>,
) -> Result<(), ProcessingError> {
    let body = body.ok_or_else(|| ProcessingError::unknown("message has no body"))?;
    let task: TaskMessage = serde_json::from_str(&body)
        .map_err(|e| ProcessingError::unknown(format!("failed to deserialize body: {e}")))?;

    match tokio::time::timeout(deps.message_timeout, deps.processor.process(task)).await {
        Ok(result) => result,
        Err(_) => Err(ProcessingError::transient(format!(
            "processing exceeded the {}ms budget",
            deps.message_timeout.as_millis()
        ))),
    }
}
