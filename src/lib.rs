//! Dependency health pages.
//!
//! Runs a caller-supplied set of probes concurrently and serves the outcome
//! on `/healthz`, `/livez` and `/readyz`, plus process metadata on `/statusz`.

pub mod configuration;
pub mod connectors;
pub mod health;
mod helpers;
pub mod routes;
pub mod startup;
pub mod telemetry;

pub use connectors::{Probe, ProbeDescriptor, ProbeError};
pub use health::{
    aggregate, run_all, DriverSet, ErrorKind, HealthChecker, HealthReport, ProbeResult,
    StatusProvider,
};
