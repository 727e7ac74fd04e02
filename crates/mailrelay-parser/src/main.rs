use lambda_runtime::{Error, run, service_fn};
use mailrelay_core::utils::logging::init_tracing;
use mailrelay_parser::handler;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    info!("Starting Mailrelay parser Lambda function");

    run(service_fn(handler)).await
}
