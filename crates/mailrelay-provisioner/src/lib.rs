/// Mailrelay Provisioner - CloudFormation custom resource Lambda
///
/// Creates the SES domain identity with its DKIM records and activates the
/// receipt rule set while the stack is deployed.
pub mod handlers;

pub use handlers::{ProvisionerContext, handler};
