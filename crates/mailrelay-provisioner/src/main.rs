use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use mailrelay_core::utils::logging::init_tracing;
use mailrelay_provisioner::{ProvisionerContext, handler};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    info!("Starting Mailrelay provisioner Lambda function");

    let ctx = Arc::new(ProvisionerContext::new().await);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let ctx = Arc::clone(&ctx);
        async move { handler(&ctx, event).await }
    }))
    .await
}
