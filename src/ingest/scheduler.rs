// src/ingest/scheduler.rs
use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Fixed-interval driver: first tick fires immediately, then once per `interval`.
/// Ticks run inline on the caller's task, so at most one is ever in flight.
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    state: watch::Sender<SchedulerState>,
    ticks_run: u64,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: watch::Sender::new(SchedulerState::Idle),
            ticks_run: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// Live view of the state, readable while `run` holds the scheduler.
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    /// Drive `job` on the interval, passing the 1-based tick number.
    /// `max_ticks = None` never returns.
    pub async fn run<F, Fut>(&mut self, mut job: F, max_ticks: Option<u64>)
    where
        F: FnMut(u64) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        // A slow tick pushes the schedule back rather than triggering a catch-up burst.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if max_ticks.is_some_and(|max| self.ticks_run >= max) {
                break;
            }
            ticker.tick().await;

            let tick = self.ticks_run + 1;
            self.state.send_replace(SchedulerState::Running);
            tracing::debug!(tick, "tick start");
            job(tick).await;
            self.ticks_run = tick;
            self.state.send_replace(SchedulerState::Idle);
        }
    }
}
