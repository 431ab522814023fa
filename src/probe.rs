use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time;

/// A single reachability check against `host:port`.
///
/// Implementations report `true` only when the port accepted a connection within
/// `timeout`. Every failure (refused, timed out, unreachable, unresolvable) is `false`;
/// nothing is ever surfaced as an error.
pub trait Probe: Send + Sync + 'static {
    fn probe(&self, host: &str, port: u16, timeout: Duration) -> impl Future<Output = bool> + Send;
}

/// TCP connect probe. The handshake is completed and the socket closed right away.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

impl Probe for TcpProbe {
    async fn probe(&self, host: &str, port: u16, timeout: Duration) -> bool {
        // Name resolution happens inside connect, so it counts against the timeout too.
        let open = connect_within(timeout, TcpStream::connect((host, port))).await;
        log::trace!("{host}:{port} -> {}", if open { "open" } else { "closed" });
        open
    }
}

async fn connect_within<F, S>(timeout: Duration, connect: F) -> bool
where
    F: Future<Output = io::Result<S>>,
{
    match time::timeout(timeout, connect).await {
        // The stream is dropped here, which closes it without sending anything.
        Ok(Ok(_stream)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn listening_port_is_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(TcpProbe.probe("127.0.0.1", port, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn released_port_is_closed() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        assert!(!TcpProbe.probe("127.0.0.1", port, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn unresolvable_host_is_closed() {
        let open = TcpProbe
            .probe("no-such-host.invalid", 80, Duration::from_secs(2))
            .await;
        assert!(!open);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_handshake_waits_for_timeout() {
        let timeout = Duration::from_millis(750);
        let start = time::Instant::now();
        let open = connect_within(timeout, std::future::pending::<io::Result<()>>()).await;
        assert!(!open);
        assert!(start.elapsed() >= timeout);
    }

    #[tokio::test]
    async fn refused_before_timeout_is_closed() {
        let refused = async { Err::<(), _>(io::Error::from(io::ErrorKind::ConnectionRefused)) };
        assert!(!connect_within(Duration::from_secs(5), refused).await);
    }
}
