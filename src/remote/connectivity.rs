//! # Connectivity
//!
//! A push-based "is the network reachable" signal.
//!
//! Monitors publish over a `tokio::sync::watch` channel, which only wakes
//! subscribers on a transition. Subscribing hands out a `Subscription`;
//! dropping it unsubscribes.
//!
//! ```text
//! ProbeMonitor task ──probe every N secs──▶ watch::Sender<bool>
//!                                                │ (only on change)
//!                                                ▼
//!                                   Subscription::changed().await
//! ```

use std::time::Duration;

use log::{debug, info};
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Receiving end of a connectivity signal.
pub struct Subscription {
    rx: watch::Receiver<bool>,
}

impl Subscription {
    /// Current state, without waiting.
    pub fn is_connected(&self) -> bool {
        *self.rx.borrow()
    }

    /// Waits for the next transition. Returns None once the monitor is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

pub trait ConnectivityMonitor: Send + Sync {
    /// Start receiving transitions.
    fn subscribe(&self) -> Subscription;

    /// Current state, without subscribing.
    fn is_connected(&self) -> bool;
}

/// Periodically probes a URL. Any HTTP response counts as reachable.
pub struct ProbeMonitor {
    rx: watch::Receiver<bool>,
    task: AbortHandle,
}

impl ProbeMonitor {
    /// Spawn the probe loop. Must be called inside a tokio runtime.
    ///
    /// Starts out assuming connected, so screens can fetch straight away.
    pub fn spawn(url: String, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(true);
        let client = reqwest::Client::builder()
            .timeout(interval)
            .build()
            .unwrap_or_default();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let reachable = probe(&client, &url).await;
                let changed = tx.send_if_modified(|state| {
                    if *state != reachable {
                        *state = reachable;
                        true
                    } else {
                        false
                    }
                });
                if changed {
                    info!(
                        "Connectivity changed: {}",
                        if reachable { "online" } else { "offline" }
                    );
                }
                if tx.is_closed() {
                    debug!("No connectivity subscribers left, stopping probe");
                    return;
                }
            }
        });

        Self {
            rx,
            task: handle.abort_handle(),
        }
    }
}

impl ConnectivityMonitor for ProbeMonitor {
    fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.rx.clone(),
        }
    }

    fn is_connected(&self) -> bool {
        *self.rx.borrow()
    }
}

impl Drop for ProbeMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Single reachability check.
pub async fn probe(client: &reqwest::Client, url: &str) -> bool {
    match client.head(url).send().await {
        Ok(response) => {
            debug!("Probe {} -> {}", url, response.status());
            true
        }
        Err(e) => {
            debug!("Probe {} failed: {}", url, e);
            false
        }
    }
}

/// Monitor whose state is set by hand. Used when gating is off and in tests.
pub struct StaticMonitor {
    tx: watch::Sender<bool>,
}

impl StaticMonitor {
    pub fn new(connected: bool) -> Self {
        let (tx, _rx) = watch::channel(connected);
        Self { tx }
    }

    /// Publish a new state. Subscribers are only woken on a change.
    pub fn set(&self, connected: bool) {
        self.tx.send_if_modified(|state| {
            let changed = *state != connected;
            *state = connected;
            changed
        });
    }
}

impl ConnectivityMonitor for StaticMonitor {
    fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    fn is_connected(&self) -> bool {
        *self.tx.borrow()
    }
}
