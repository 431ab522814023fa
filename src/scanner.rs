use crate::probe::Probe;
use crate::report::Reporter;
use crate::types::{ScanRequest, ScanResult, ScanSummary};
use anyhow::{bail, Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Scan every port of one host with a capped pool of workers.
///
/// - Spawns `min(workers, ports)` workers that share a single work queue.
/// - A feeder task pushes the ports onto the queue in request order and closes it when done.
/// - The collector reads exactly one result per submitted port, reporting open ports
///   as they arrive.
/// - Returns only after the feeder and every worker have exited.
///
/// An error is returned only if the worker pool dies before delivering every result;
/// unreachable hosts and closed ports are ordinary outcomes.
pub async fn scan_host<P, R>(
    request: &ScanRequest,
    probe: Arc<P>,
    reporter: &mut R,
) -> Result<ScanSummary>
where
    P: Probe,
    R: Reporter + ?Sized,
{
    let start = Instant::now();
    let total = request.ports.len();
    let workers = request.effective_workers();
    let host: Arc<str> = Arc::from(request.host.as_str());

    if request.workers > total {
        reporter.workers_capped(&host, request.workers, workers);
    }
    reporter.workers_started(&host, workers);

    // tokio has no rendezvous channel; a single slot is the closest handoff.
    let (port_tx, port_rx) = mpsc::channel::<u16>(1);
    let port_rx = Arc::new(Mutex::new(port_rx));
    let (result_tx, mut result_rx) = mpsc::channel::<ScanResult>(1);

    let mut pool = JoinSet::new();
    for id in 0..workers {
        pool.spawn(worker(
            id,
            host.clone(),
            request.timeout,
            probe.clone(),
            port_rx.clone(),
            result_tx.clone(),
        ));
    }
    // Only workers hold senders now.
    drop(result_tx);
    drop(port_rx);

    let ports = request.ports.clone();
    let feeder_host = host.clone();
    let feeder = tokio::spawn(async move {
        let mut queued = 0usize;
        for port in ports {
            if port_tx.send(port).await.is_err() {
                break;
            }
            queued += 1;
        }
        log::debug!("[{feeder_host}] queued {queued} ports");
        // port_tx drops here, closing the queue.
    });

    let mut open_ports = Vec::new();
    let mut closed_count = 0usize;
    for collected in 0..total {
        let Some(result) = result_rx.recv().await else {
            bail!("[{host}] worker pool stopped after {collected} of {total} results");
        };
        if result.open {
            reporter.port_open(&host, result.port);
            open_ports.push(result.port);
        } else {
            closed_count += 1;
        }
    }
    let duration = start.elapsed();

    feeder.await.context("port feeder task failed")?;
    while let Some(joined) = pool.join_next().await {
        joined.context("scan worker failed")?;
    }
    log::debug!("[{host}] worker pool shut down");

    let summary = ScanSummary {
        host: request.host.clone(),
        open_ports,
        closed_count,
        workers,
        duration,
    };
    reporter.summary(&summary);
    Ok(summary)
}

/// Scan hosts one after another. A host's pool is fully shut down before the next
/// host's first probe is issued.
pub async fn scan_hosts<P, R>(
    requests: &[ScanRequest],
    probe: Arc<P>,
    reporter: &mut R,
) -> Result<Vec<ScanSummary>>
where
    P: Probe,
    R: Reporter + ?Sized,
{
    let mut summaries = Vec::with_capacity(requests.len());
    for request in requests {
        summaries.push(scan_host(request, probe.clone(), reporter).await?);
    }
    Ok(summaries)
}

async fn worker<P: Probe>(
    id: usize,
    host: Arc<str>,
    timeout: Duration,
    probe: Arc<P>,
    ports: Arc<Mutex<mpsc::Receiver<u16>>>,
    results: mpsc::Sender<ScanResult>,
) {
    let mut probed = 0usize;
    loop {
        let next = ports.lock().await.recv().await;
        let Some(port) = next else { break };
        let open = probe.probe(&host, port, timeout).await;
        probed += 1;
        // Blocks until the collector takes the result.
        if results.send(ScanResult { port, open }).await.is_err() {
            break;
        }
    }
    log::debug!("[{host}] worker {id} done after {probed} probes");
}
