//! TCP reachability probe.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, stream};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{debug, trace};

use crate::domain::ports::NetworkMonitor;

/// Default host probed for reachability.
pub const DEFAULT_PROBE_ADDRESS: &str = "api.pexels.com:443";

/// Considers the network up when a TCP connection to `address` succeeds in time.
#[derive(Debug, Clone)]
pub struct TcpNetworkMonitor {
    address: String,
    interval: Duration,
    connect_timeout: Duration,
}

impl TcpNetworkMonitor {
    /// Creates new monitor.
    #[must_use]
    pub fn new(address: impl Into<String>, interval: Duration, connect_timeout: Duration) -> Self {
        Self {
            address: address.into(),
            interval,
            connect_timeout,
        }
    }

    async fn probe(address: &str, connect_timeout: Duration) -> bool {
        let online = matches!(
            timeout(connect_timeout, TcpStream::connect(address)).await,
            Ok(Ok(_))
        );
        trace!(address, online, "Connectivity probe");
        online
    }
}

impl Default for TcpNetworkMonitor {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROBE_ADDRESS,
            Duration::from_secs(5),
            Duration::from_secs(2),
        )
    }
}

#[async_trait]
impl NetworkMonitor for TcpNetworkMonitor {
    async fn is_online(&self) -> bool {
        Self::probe(&self.address, self.connect_timeout).await
    }

    fn status_changes(&self) -> BoxStream<'static, bool> {
        let monitor = self.clone();

        stream::unfold(None, move |last: Option<bool>| {
            let monitor = monitor.clone();
            async move {
                if last.is_some() {
                    sleep(monitor.interval).await;
                }
                loop {
                    let online = Self::probe(&monitor.address, monitor.connect_timeout).await;
                    if last != Some(online) {
                        debug!(online, "Connectivity changed");
                        return Some((online, Some(online)));
                    }
                    sleep(monitor.interval).await;
                }
            }
        })
        .boxed()
    }
}
