//! Cancellable once-per-period tick source.
//!
//! At most one tokio task is alive per `Ticker`. It is spawned by `arm()`,
//! aborted by `disarm()`, and aborted on drop, so a paused or discarded timer
//! never leaves an interval running.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    tx: mpsc::UnboundedSender<()>,
    rx: mpsc::UnboundedReceiver<()>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            period,
            tx,
            rx,
            task: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Start ticking. The first tick arrives one full period from now.
    ///
    /// Must be called from within a tokio runtime. Arming an armed ticker is a
    /// no-op, so the current period is not restarted.
    pub fn arm(&mut self) {
        if self.task.is_some() {
            return;
        }
        let tx = self.tx.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!(period_ms = period.as_millis() as u64, "ticker armed");
    }

    /// Stop ticking and drop any ticks that were queued but not yet consumed.
    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("ticker disarmed");
        }
        while self.rx.try_recv().is_ok() {}
    }

    /// Wait for the next tick. Pends forever while disarmed.
    pub async fn tick(&mut self) {
        // The ticker keeps its own sender alive, so the channel never closes.
        let _ = self.rx.recv().await;
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
