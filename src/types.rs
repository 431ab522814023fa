use std::time::Duration;

/// Resolved input for scanning a single host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub host: String,
    pub ports: Vec<u16>,
    pub workers: usize,
    /// Connect timeout applied to every probe of this host.
    pub timeout: Duration,
}

impl ScanRequest {
    pub fn new(host: impl Into<String>, ports: Vec<u16>, workers: usize, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            ports,
            workers,
            timeout,
        }
    }

    /// Number of workers actually spawned: never more than there are ports to scan.
    /// A request for zero workers is treated as one.
    pub fn effective_workers(&self) -> usize {
        self.workers.max(1).min(self.ports.len())
    }
}

/// Outcome of probing one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    pub port: u16,
    pub open: bool,
}

/// Per-host aggregate, built once every result for the host has been collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub host: String,
    /// Open ports in the order they were discovered.
    pub open_ports: Vec<u16>,
    pub closed_count: usize,
    pub workers: usize,
    pub duration: Duration,
}

impl ScanSummary {
    pub fn scanned(&self) -> usize {
        self.open_ports.len() + self.closed_count
    }
}
