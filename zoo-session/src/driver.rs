//! Periodic timers for a running zoo.
//!
//! Two background tasks share the zoo through `Arc<Mutex<Zoo>>`:
//!
//! - **decay** — one decay pass every `decay.interval_secs`
//! - **countdown** — ticks the session clock every `session.tick_millis`
//!   and exits once it expires
//!
//! The lock is taken only for the synchronous engine call and never held
//! across an `.await`. [`SessionDriver::shutdown`] stops the decay process
//! and cancels both tasks.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

use crate::zoo::Zoo;

/// Shortest timer period; `interval_at` rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A zoo shared between the host and the driver tasks.
pub type SharedZoo = Arc<Mutex<Zoo>>;

/// Handle to the running timer tasks.
#[derive(Debug)]
pub struct SessionDriver {
    zoo: SharedZoo,
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl SessionDriver {
    /// Start the decay and countdown tasks on the current tokio runtime.
    #[must_use]
    pub fn spawn(zoo: SharedZoo) -> Self {
        let (decay_every, tick_every) = {
            let z = zoo.lock();
            (z.config().decay.interval(), z.config().session.tick())
        };
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let tasks = vec![
            tokio::spawn(decay_loop(Arc::clone(&zoo), decay_every, shutdown_rx.clone())),
            tokio::spawn(countdown_loop(Arc::clone(&zoo), tick_every, shutdown_rx)),
        ];
        info!(
            decay_secs = decay_every.as_secs(),
            tick_ms = u64::try_from(tick_every.as_millis()).unwrap_or(u64::MAX),
            "Session driver started"
        );

        Self {
            zoo,
            shutdown_tx,
            tasks,
        }
    }

    /// The shared zoo.
    #[must_use]
    pub fn zoo(&self) -> &SharedZoo {
        &self.zoo
    }

    /// Stop the decay process, cancel the timers and wait for both tasks.
    pub async fn shutdown(self) {
        self.zoo.lock().stop();
        // Receivers may already be gone if both loops finished.
        let _ = self.shutdown_tx.send(true);
        for task in self.tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "Driver task ended abnormally");
            }
        }
        info!("Session driver stopped");
    }
}

async fn decay_loop(zoo: SharedZoo, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let period = period.max(MIN_PERIOD);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let running = zoo.lock().decay_tick();
                if !running {
                    break;
                }
            }
            _ = shutdown.changed() => break,
        }
    }
    debug!("Decay task exited");
}

async fn countdown_loop(zoo: SharedZoo, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let period = period.max(MIN_PERIOD);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let expired = {
                    let mut z = zoo.lock();
                    z.tick_clock(period);
                    z.clock().is_expired()
                };
                if expired {
                    break;
                }
            }
            _ = shutdown.changed() => break,
        }
    }
    debug!("Countdown task exited");
}
