//! The live feed
//!
//! ## Lifecycle
//!
//! ```text
//! new(config) ──► start(source) ──► [fetch + load] ──► tick every interval ──► stop()
//!                      │                                                      │
//!                      └──────────── AlreadyRunning if started twice          └─ NotRunning if idle
//! ```
//!
//! The hub lives behind an `Arc<RwLock<_>>`. The feed task takes the write
//! lock once for the load and once per tick, never across an await, so
//! readers holding a [`HubHandle`] see whole ticks only.
//!
//! A snapshot fetch failure is logged and leaves the store empty; the
//! timer still runs, and ticks with no known boats only refresh the
//! last-updated marker. `stop()` during a fetch that has not completed
//! abandons the fetch.
//!
//! Dropping a running feed aborts its task.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use dualray_core::TelemetryHub;
use log::{error, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::FeedConfig;
use crate::errors::{FeedError, FeedResult};
use crate::source::SnapshotSource;

/// Shared, lockable view of the feed's hub
#[derive(Clone)]
pub struct HubHandle {
    hub: Arc<RwLock<TelemetryHub>>,
}

impl HubHandle {
    fn new(hub: TelemetryHub) -> Self {
        Self { hub: Arc::new(RwLock::new(hub)) }
    }

    /// Run `f` against the hub under the read lock
    pub fn read<T>(&self, f: impl FnOnce(&TelemetryHub) -> T) -> FeedResult<T> {
        let hub = self.hub.read().map_err(|_| FeedError::LockPoisoned)?;
        Ok(f(&hub))
    }

    /// Run `f` against the hub under the write lock
    pub fn write<T>(&self, f: impl FnOnce(&mut TelemetryHub) -> T) -> FeedResult<T> {
        let mut hub = self.hub.write().map_err(|_| FeedError::LockPoisoned)?;
        Ok(f(&mut hub))
    }
}

impl std::fmt::Debug for HubHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubHandle")
            .field("handles", &Arc::strong_count(&self.hub))
            .finish()
    }
}

struct Running {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Periodic synthesis over a shared hub
pub struct LiveFeed {
    config: FeedConfig,
    handle: HubHandle,
    running: Option<Running>,
}

impl LiveFeed {
    /// Feed over a fresh hub built from `config`
    pub fn new(config: FeedConfig) -> FeedResult<Self> {
        config.validate()?;
        let hub = match config.seed {
            Some(seed) => TelemetryHub::seeded(seed),
            None => TelemetryHub::new(),
        }
        .with_variant(config.variant)
        .with_capacity(config.capacity);
        Ok(Self::with_hub(config, hub))
    }

    /// Feed over a caller-built hub
    ///
    /// The hub keeps its own clock, variant and capacity; only the tick
    /// interval is taken from `config`.
    pub fn with_hub(config: FeedConfig, hub: TelemetryHub) -> Self {
        Self { config, handle: HubHandle::new(hub), running: None }
    }

    /// Config the feed was built with
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Handle for readers; clones share the same hub
    pub fn handle(&self) -> HubHandle {
        self.handle.clone()
    }

    /// True while the feed task is alive
    pub fn is_running(&self) -> bool {
        self.running.as_ref().is_some_and(|r| !r.task.is_finished())
    }

    /// Load the snapshot from `source` and start ticking
    ///
    /// Must be called inside a tokio runtime. The load happens on the feed
    /// task, so it may not have landed yet when this returns.
    pub fn start<S: SnapshotSource + 'static>(&mut self, source: S) -> FeedResult<()> {
        if self.is_running() {
            return Err(FeedError::AlreadyRunning);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| FeedError::NoRuntime)?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let period = Duration::from_millis(self.config.tick_interval_ms);
        let hub = self.handle.clone();

        info!(
            "starting live feed from {} every {} ms",
            source.describe(),
            self.config.tick_interval_ms
        );
        let task = runtime.spawn(run(hub, source, period, stop_rx));
        self.running = Some(Running { stop: stop_tx, task });
        Ok(())
    }

    /// Stop ticking and wait for the feed task to finish
    pub async fn stop(&mut self) -> FeedResult<()> {
        let running = self.running.take().ok_or(FeedError::NotRunning)?;
        // The task may already be gone; a closed channel is fine
        let _ = running.stop.send(true);
        running.task.await.map_err(|e| FeedError::Task(e.to_string()))?;
        info!("live feed stopped");
        Ok(())
    }

    /// Run one synthesis step now, outside the timer
    pub fn tick_now(&self) -> FeedResult<usize> {
        self.handle.write(|hub| hub.tick())
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.task.abort();
        }
    }
}

impl std::fmt::Debug for LiveFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveFeed")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .finish()
    }
}

async fn run<S: SnapshotSource>(
    hub: HubHandle,
    source: S,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) {
    // A slow or hung fetch must not hold up stop()
    let fetched = tokio::select! {
        fetched = source.fetch() => fetched,
        // Only ever signalled with `true`, or closed when the feed goes away
        _ = stop.changed() => {
            info!("feed stopped before snapshot from {} arrived", source.describe());
            return;
        }
    };

    match fetched {
        Ok(text) => {
            if let Err(e) = hub.write(|h| h.load_snapshot(&text)) {
                error!("snapshot load failed: {}", e);
                return;
            }
        }
        Err(e) => error!("snapshot fetch from {} failed: {}", source.describe(), e),
    }

    // First tick one full period after the load
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = hub.write(|h| h.tick()) {
                    error!("tick failed, stopping feed: {}", e);
                    return;
                }
            }
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    return;
                }
            }
        }
    }
}
