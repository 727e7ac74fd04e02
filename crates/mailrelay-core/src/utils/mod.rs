/// Utility modules
pub mod logging;
pub mod validation;

pub use logging::*;
pub use validation::*;
