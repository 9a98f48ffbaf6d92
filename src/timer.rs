//! Deferred one-shot tasks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle to a task queued on a [`Deferred`] queue.
///
/// Cancelling a handle after its task ran, or twice, does nothing.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
    fired: Rc<Cell<bool>>,
}

impl TimerHandle {
    /// Prevent the task from running.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether the task is still waiting for the end of the turn.
    pub fn is_pending(&self) -> bool {
        !self.cancelled.get() && !self.fired.get()
    }
}

/// One-shot tasks that run after the current event-handling turn.
///
/// Tasks queued while [`run_pending`](Deferred::run_pending) executes are kept
/// for the next turn.
#[derive(Default)]
pub struct Deferred {
    queue: RefCell<Vec<(TimerHandle, Box<dyn FnOnce()>)>>,
}

impl Deferred {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the end of the current turn.
    pub fn schedule(&self, task: impl FnOnce() + 'static) -> TimerHandle {
        let handle = TimerHandle::default();
        self.queue
            .borrow_mut()
            .push((handle.clone(), Box::new(task)));
        handle
    }

    /// Run every task that was not cancelled. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let tasks = std::mem::take(&mut *self.queue.borrow_mut());
        let mut ran = 0;
        for (handle, task) in tasks {
            if handle.cancelled.get() {
                continue;
            }
            handle.fired.set(true);
            task();
            ran += 1;
        }
        ran
    }

    /// Whether no task is waiting, cancelled ones included.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_runs_once_at_end_of_turn() {
        let deferred = Deferred::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let handle = deferred.schedule(move || counter.set(counter.get() + 1));

        assert!(handle.is_pending());
        assert_eq!(count.get(), 0);
        assert_eq!(deferred.run_pending(), 1);
        assert_eq!(count.get(), 1);
        assert!(!handle.is_pending());
        assert_eq!(deferred.run_pending(), 0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_cancelled_task_is_skipped() {
        let deferred = Deferred::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let handle = deferred.schedule(move || counter.set(counter.get() + 1));
        handle.cancel();

        assert_eq!(deferred.run_pending(), 0);
        assert_eq!(count.get(), 0);
        assert!(deferred.is_empty());
    }

    #[test]
    fn test_tasks_queued_while_running_wait_for_next_turn() {
        let deferred = Rc::new(Deferred::new());
        let inner_ran = Rc::new(Cell::new(false));

        let queue = deferred.clone();
        let flag = inner_ran.clone();
        deferred.schedule(move || {
            let flag = flag.clone();
            queue.schedule(move || flag.set(true));
        });

        assert_eq!(deferred.run_pending(), 1);
        assert!(!inner_ran.get());
        assert_eq!(deferred.run_pending(), 1);
        assert!(inner_ran.get());
    }
}
