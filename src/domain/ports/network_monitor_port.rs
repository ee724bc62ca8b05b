//! Connectivity probe port definition.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

/// Port for observing network reachability.
#[async_trait]
pub trait NetworkMonitor: Send + Sync {
    /// Point-in-time reachability check.
    async fn is_online(&self) -> bool;

    /// Ongoing reachability feed. Yields the current status first, then every change.
    fn status_changes(&self) -> BoxStream<'static, bool>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use futures_util::{StreamExt, stream};
    use parking_lot::Mutex;
    use tokio::sync::mpsc;

    /// Network monitor double with a fixed point status and a hand-fed change feed.
    pub struct FakeNetworkMonitor {
        online: AtomicBool,
        feed_tx: mpsc::UnboundedSender<bool>,
        feed_rx: Mutex<Option<mpsc::UnboundedReceiver<bool>>>,
    }

    impl FakeNetworkMonitor {
        /// Creates a monitor reporting `online` and an empty feed.
        pub fn new(online: bool) -> Self {
            let (feed_tx, feed_rx) = mpsc::unbounded_channel();
            Self {
                online: AtomicBool::new(online),
                feed_tx,
                feed_rx: Mutex::new(Some(feed_rx)),
            }
        }

        /// Pushes a value into the change feed.
        pub fn emit(&self, online: bool) {
            let _ = self.feed_tx.send(online);
        }
    }

    #[async_trait]
    impl NetworkMonitor for FakeNetworkMonitor {
        async fn is_online(&self) -> bool {
            self.online.load(Ordering::SeqCst)
        }

        fn status_changes(&self) -> BoxStream<'static, bool> {
            match self.feed_rx.lock().take() {
                Some(rx) => stream::unfold(rx, |mut rx| async move {
                    rx.recv().await.map(|status| (status, rx))
                })
                .boxed(),
                None => stream::empty().boxed(),
            }
        }
    }
}
