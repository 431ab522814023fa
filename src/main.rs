use std::sync::Arc;
use std::time::Duration;

use portsweep::probe::TcpProbe;
use portsweep::report::ConsoleReporter;
use portsweep::types::ScanRequest;
use portsweep::{ports, scanner, targets};

use anyhow::{Context, Result};
use clap::Parser;

/// portsweep — concurrent TCP connect port scanner.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "portsweep",
    version,
    about = "Concurrent TCP connect port scanner with a capped worker pool per host.",
    long_about = None
)]
struct Cli {
    /// One or more targets, comma separated. Hostnames, IPs and CIDRs are accepted.
    #[arg(long, default_value = "scanme.nmap.org")]
    hosts: String,

    /// Ports to scan, comma separated. `low-high` covers low up to, but not including, high.
    #[arg(long, default_value = "1-100")]
    ports: String,

    /// Concurrent workers per host.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    workers: u32,

    /// Connect timeout in milliseconds.
    #[arg(long, default_value_t = 5000)]
    timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Both lists are resolved before any probe goes out; a bad port list scans nothing.
    let ports = ports::parse_port_spec(&cli.ports)
        .with_context(|| format!("failed to parse ports argument {:?}", cli.ports))?;
    let hosts = targets::parse_hosts(&cli.hosts)
        .with_context(|| format!("failed to parse hosts argument {:?}", cli.hosts))?;

    let timeout = Duration::from_millis(cli.timeout);
    log::info!(
        "scanning {} host(s), {} port(s) each, {} workers, timeout {:?}",
        hosts.len(),
        ports.len(),
        cli.workers,
        timeout
    );

    let requests: Vec<ScanRequest> = hosts
        .into_iter()
        .map(|host| ScanRequest::new(host, ports.clone(), cli.workers as usize, timeout))
        .collect();

    let mut reporter = ConsoleReporter::stdout();
    let summaries = scanner::scan_hosts(&requests, Arc::new(TcpProbe), &mut reporter).await?;
    let open_total: usize = summaries.iter().map(|s| s.open_ports.len()).sum();
    log::info!("done: {open_total} open port(s) across {} host(s)", summaries.len());

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}
