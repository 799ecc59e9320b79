//! Periodic driver for batch passes.
//!
//! The scheduler owns one tokio task that calls a tick function every
//! `period`, starting one period after [`start`](MatchScheduler::start).
//! Start and stop are idempotent. Dropping the scheduler aborts the task.

use std::ops::ControlFlow;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

pub struct MatchScheduler {
    period: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl MatchScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            task: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawn the tick loop unless it is already running.
    ///
    /// `tick` receives the current time and may return
    /// `ControlFlow::Break(())` to end the loop for good. Returns `false`
    /// when called outside a tokio runtime, in which case nothing is spawned.
    pub fn start<F>(&self, mut tick: F) -> bool
    where
        F: FnMut(Instant) -> ControlFlow<()> + Send + 'static,
    {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return true;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("No tokio runtime available, match scheduler not started");
            return false;
        };

        let period = self.period;
        *task = Some(runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tick(Instant::now()).is_break() {
                    debug!("Match scheduler tick loop finished");
                    return;
                }
            }
        }));
        info!(period_ms = period.as_millis() as u64, "Match scheduler started");
        true
    }

    /// Abort the tick loop if it is running.
    pub fn stop(&self) {
        let handle = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            info!("Match scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for MatchScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(
        counter: &Arc<AtomicUsize>,
    ) -> impl FnMut(Instant) -> ControlFlow<()> + Send + 'static {
        let counter = Arc::clone(counter);
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let scheduler = MatchScheduler::new(Duration::from_millis(100));
        assert!(scheduler.start(counting(&ticks)));
        assert!(scheduler.is_running());

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(300)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_are_idempotent() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let scheduler = MatchScheduler::new(Duration::from_millis(100));
        scheduler.start(counting(&ticks));
        scheduler.start(counting(&ticks));

        time::sleep(Duration::from_millis(150)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        scheduler.start(counting(&ticks));
        time::sleep(Duration::from_millis(150)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_break_ends_loop() {
        let scheduler = MatchScheduler::new(Duration::from_millis(10));
        scheduler.start(|_| ControlFlow::Break(()));
        time::sleep(Duration::from_millis(20)).await;
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_start_without_runtime() {
        let scheduler = MatchScheduler::new(Duration::from_millis(10));
        assert!(!scheduler.start(|_| ControlFlow::Continue(())));
        assert!(!scheduler.is_running());
    }
}
