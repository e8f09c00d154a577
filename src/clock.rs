use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::event::AppEvent;

/// Periodic one-second tick source feeding the app event channel.
///
/// Every `start` bumps a generation counter and stamps it on the ticks it
/// emits; `cancel` bumps the counter again and aborts the task. The event
/// loop checks `is_current` before acting on a tick, so a tick already
/// sitting in the channel when the clock is cancelled can never mutate
/// state that has since moved on.
pub struct Clock {
    tx: mpsc::UnboundedSender<AppEvent>,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Clock {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            tx,
            generation: 0,
            handle: None,
        }
    }

    /// Start emitting ticks, one per second, first tick a full second out.
    pub fn start(&mut self) {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick { generation }).is_err() {
                    return;
                }
            }
        }));
    }

    /// Stop the tick task and invalidate any ticks it already emitted.
    pub fn cancel(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a tick stamped with `generation` is from the live tick task.
    pub fn is_current(&self, generation: u64) -> bool {
        self.handle.is_some() && generation == self.generation
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
