use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after a delay. Tasks cannot be cancelled.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task);
}

/// Real timers on a tokio runtime.
#[derive(Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

/// A virtual clock. Nothing runs until [`ManualScheduler::advance`] moves time forward.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), Task>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.state().now
    }

    pub fn pending(&self) -> usize {
        self.state().pending.len()
    }

    /// Moves the clock forward, running every task that falls due in due order.
    /// Tasks scheduled by those tasks run too if they fall due before the target.
    pub fn advance(&self, by: Duration) {
        let target = self.state().now + by;
        loop {
            // The lock is released before running the task so it can schedule more work.
            let task = {
                let mut state = self.state();
                let due = state.pending.first_key_value().map(|(&(due, _), _)| due);
                match due {
                    Some(due) if due <= target => {
                        state.now = due;
                        state.pending.pop_first().map(|(_, task)| task)
                    }
                    _ => {
                        state.now = target;
                        None
                    }
                }
            };
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut state = self.state();
        let key = (state.now + delay, state.next_seq);
        state.next_seq += 1;
        state.pending.insert(key, task);
    }
}
