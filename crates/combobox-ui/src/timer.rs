//! Cancellable timers backed by tokio tasks.
//!
//! Both timers abort their pending task when rescheduled or dropped, so a
//! widget that goes away never receives a stale callback. Callbacks that
//! race an abort (already running when `cancel` is called) must tolerate
//! running late; the widget's handlers check the current phase before
//! acting.
//!
//! Timers spawn on an explicit runtime handle. A timer built outside any
//! runtime has none, and `schedule` refuses instead of panicking; callers
//! check `has_runtime` and run the work immediately.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A single pending callback that fires after a delay.
///
/// Scheduling again replaces the pending callback.
#[derive(Debug)]
pub struct ScheduledTask {
    runtime: Option<Handle>,
    handle: Option<JoinHandle<()>>,
}

impl Default for ScheduledTask {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduledTask {
    /// Create a timer on the runtime current at this point, if any.
    pub fn new() -> Self {
        Self::on(Handle::try_current().ok())
    }

    /// Create a timer on the given runtime.
    pub fn on(runtime: Option<Handle>) -> Self {
        Self {
            runtime,
            handle: None,
        }
    }

    pub fn has_runtime(&self) -> bool {
        self.runtime.is_some()
    }

    /// Run `f` after `delay`, cancelling anything already scheduled.
    ///
    /// Returns false, dropping `f`, when there is no runtime to wait on.
    pub fn schedule<F>(&mut self, delay: Duration, f: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let Some(runtime) = &self.runtime else {
            return false;
        };
        self.handle = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        }));
        true
    }

    /// Cancel the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Check whether a callback is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs a callback once a stream of triggers has been quiet for `delay`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    task: ScheduledTask,
}

impl Debouncer {
    /// Create a debouncer on the runtime current at this point, if any.
    pub fn new(delay: Duration) -> Self {
        Self::on(delay, Handle::try_current().ok())
    }

    /// Create a debouncer on the given runtime.
    pub fn on(delay: Duration, runtime: Option<Handle>) -> Self {
        Self {
            delay,
            task: ScheduledTask::on(runtime),
        }
    }

    /// Record a trigger. Only the callback of the last trigger in a quiet
    /// period runs. Returns false without a runtime.
    pub fn trigger<F>(&mut self, f: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.task.schedule(self.delay, f)
    }

    pub fn cancel(&mut self) {
        self.task.cancel();
    }

    pub fn has_runtime(&self) -> bool {
        self.task.has_runtime()
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_pending()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let make = move || {
            let c = c.clone();
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (count, make)
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_task_fires_after_delay() {
        let (count, make) = counter();
        let mut task = ScheduledTask::new();
        task.schedule(Duration::from_millis(150), make());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(task.is_pending());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!task.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_task_cancel() {
        let (count, make) = counter();
        let mut task = ScheduledTask::new();
        task.schedule(Duration::from_millis(150), make());
        task.cancel();

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_task_drop_cancels() {
        let (count, make) = counter();
        {
            let mut task = ScheduledTask::new();
            task.schedule(Duration::from_millis(150), make());
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_runs_once_per_quiet_period() {
        let (count, make) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));

        for _ in 0..5 {
            debouncer.trigger(make());
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // A new burst after the quiet period runs again
        debouncer.trigger(make());
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_schedule_without_runtime_refuses() {
        let (count, make) = counter();
        let mut task = ScheduledTask::new();
        assert!(!task.has_runtime());
        assert!(!task.schedule(Duration::from_millis(150), make()));
        assert!(!task.is_pending());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        assert!(!debouncer.trigger(make()));
    }

    #[test]
    fn test_schedule_on_explicit_runtime() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let (count, make) = counter();

        // Built outside the runtime, driven by it later
        let mut task = ScheduledTask::on(Some(rt.handle().clone()));
        assert!(task.schedule(Duration::from_millis(150), make()));

        rt.block_on(async { tokio::time::sleep(Duration::from_millis(200)).await });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
