use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use mailrelay_core::utils::logging::init_tracing;
use mailrelay_forwarder::{Forwarder, handler};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    info!("Starting Mailrelay forwarder Lambda function");

    // Clients and configuration are created once per cold start
    let forwarder = Arc::new(Forwarder::from_env().await?);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let forwarder = Arc::clone(&forwarder);
        async move { handler(&forwarder, event).await }
    }))
    .await
}
