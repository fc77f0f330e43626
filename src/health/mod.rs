mod checks;
mod models;
pub mod status;

pub use checks::{aggregate, run_all, DriverSet, HealthChecker};
pub use models::{ErrorKind, HealthReport, ProbeResult};
pub use status::{StatusDefaults, StatusMap, StatusProvider, StatusSource};
