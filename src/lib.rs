//! Library crate for portsweep: a concurrent TCP connect scanner with a capped worker pool per host.
pub mod ports;
pub mod probe;
pub mod report;
pub mod scanner;
pub mod targets;
pub mod types;
