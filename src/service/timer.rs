use crate::error::AppError;
use log::{debug, error};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Work driven by a [`RepeatingTimer`].
pub trait Periodic: Send + 'static {
    fn tick(&mut self);

    /// Runs once on the timer thread after the last tick.
    fn finish(&mut self) {}
}

/// Runs a task immediately and then once per interval on a dedicated thread.
///
/// The next tick is scheduled only after the previous one returns, so ticks
/// never overlap.
pub struct RepeatingTimer;

impl RepeatingTimer {
    pub fn start<P: Periodic>(
        name: &str,
        interval: Duration,
        mut task: P,
    ) -> Result<TimerHandle<P>, AppError> {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                loop {
                    task.tick();
                    match cancel_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                task.finish();
                task
            })
            .map_err(|e| AppError::Timer(format!("failed to spawn {name}: {e}")))?;

        debug!("Timer '{name}' started ({interval:?})");
        Ok(TimerHandle {
            cancel: Some(cancel_tx),
            thread: Some(thread),
        })
    }
}

/// Cancellation handle for a running [`RepeatingTimer`]. Dropping it cancels.
pub struct TimerHandle<P> {
    cancel: Option<Sender<()>>,
    thread: Option<JoinHandle<P>>,
}

impl<P> TimerHandle<P> {
    /// Stop ticking, wait for the task's `finish`, and hand the task back.
    pub fn cancel(mut self) -> Result<P, AppError> {
        self.shutdown()
            .ok_or_else(|| AppError::Internal("timer already cancelled".into()))?
    }

    pub fn is_active(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn shutdown(&mut self) -> Option<Result<P, AppError>> {
        if let Some(cancel) = self.cancel.take() {
            // A send error means the thread is already gone; join reports why.
            let _ = cancel.send(());
        }
        let thread = self.thread.take()?;
        Some(
            thread
                .join()
                .map_err(|_| AppError::Timer("timer thread panicked".into())),
        )
    }
}

impl<P> Drop for TimerHandle<P> {
    fn drop(&mut self) {
        if let Some(Err(e)) = self.shutdown() {
            error!("Timer shutdown failed: {e}");
        }
    }
}
