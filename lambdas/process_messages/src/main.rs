use lambda_runtime::{run, service_fn, tracing, Error};
use shared::adapters::SimulatedTaskProcessor;
use std::time::Duration;

use crate::event_handler::{function_handler, HandlerDeps};

mod config;
mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = config::Config::load()?;

    let processor = SimulatedTaskProcessor::new(Duration::from_millis(config.simulated_stall_ms));
    let handler_deps = HandlerDeps {
        processor,
        message_timeout: Duration::from_millis(config.message_timeout_ms),
    };

    run(service_fn(|event| function_handler(&handler_deps, event))).await
}
