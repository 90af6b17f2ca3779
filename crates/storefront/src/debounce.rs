//! Trailing-edge debouncing.
//!
//! A [`Debouncer`] owns at most one pending timer. Each call to
//! [`Debouncer::schedule`] replaces the pending timer, so the handler runs
//! once per quiet period with the most recent value. Scheduling requires a
//! running tokio runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

type Handler<T> = Arc<dyn Fn(T) + Send + Sync>;

pub struct Debouncer<T> {
    wait: Duration,
    handler: Handler<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
    // Bumped on every schedule/cancel; a timer only fires if it is still current.
    generation: Arc<AtomicU64>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(wait: Duration, handler: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            wait,
            handler: Arc::new(handler),
            pending: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Restart the quiet period with `value` as the latest argument
    pub fn schedule(&self, value: T) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let handler = Arc::clone(&self.handler);
        let wait = self.wait;

        let task = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            if current.load(Ordering::SeqCst) == generation {
                handler(value);
            }
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drop the pending invocation, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match previous {
            Some(task) => {
                let was_pending = !task.is_finished();
                task.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}
