use std::fmt;
use std::io::{self, Stdout, Write};

use crate::types::ScanSummary;

/// Receives scan progress as it happens. Open ports are delivered the moment the
/// collector sees them, the summary once per host after every result is in.
pub trait Reporter {
    fn workers_capped(&mut self, host: &str, requested: usize, effective: usize);
    fn workers_started(&mut self, host: &str, workers: usize);
    fn port_open(&mut self, host: &str, port: u16);
    fn summary(&mut self, summary: &ScanSummary);
}

/// Line-oriented output, stdout unless another writer is supplied.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write = Stdout> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ConsoleReporter<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        // Flushed per line so open ports show up while the scan is still running.
        if let Err(e) = writeln!(self.out, "{args}").and_then(|()| self.out.flush()) {
            log::warn!("failed to write scan output: {e}");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn workers_capped(&mut self, host: &str, _requested: usize, effective: usize) {
        self.line(format_args!(
            "[{host}] Requested workers higher than ports. Capping workers to {effective}"
        ));
    }

    fn workers_started(&mut self, host: &str, workers: usize) {
        self.line(format_args!("[{host}] Starting {workers} workers"));
    }

    fn port_open(&mut self, host: &str, port: u16) {
        self.line(format_args!("[{host}] {port} open"));
    }

    fn summary(&mut self, summary: &ScanSummary) {
        self.line(format_args!(
            "[{}] found {} closed ports",
            summary.host, summary.closed_count
        ));
        self.line(format_args!(
            "[{}] Scan duration: {:?}",
            summary.host, summary.duration
        ));
    }
}
