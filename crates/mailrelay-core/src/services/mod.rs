/// AWS service clients and infrastructure services
pub mod cloudformation;
pub mod config;
pub mod s3;
pub mod ses;

// Re-export service traits
pub use cloudformation::ResponseSender;
pub use s3::StorageService;
pub use ses::{EmailSender, IdentityService};
