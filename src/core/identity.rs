//! Process clock and thread/task identity providers
//!
//! These are the collaborators `LogEvent::new` queries: time elapsed since the
//! process clock was first read, a small stable number for the current thread,
//! and the id of the logical task (fiber, coroutine) currently running on it.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static PROCESS_START: OnceLock<Instant> = OnceLock::new();
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Thread-local caches so repeated events on one thread avoid the atomic.
thread_local! {
    static THREAD_ID: Cell<u64> = const { Cell::new(0) };
    static TASK_ID: Cell<u64> = const { Cell::new(0) };
}

/// Pin the process start instant.
///
/// Calling this early in `main` makes elapsed times measure from that point.
/// Otherwise the clock starts on the first call to [`elapsed_since_start`].
pub fn mark_process_start() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

/// Monotonic time since [`mark_process_start`].
pub fn elapsed_since_start() -> Duration {
    mark_process_start().elapsed()
}

/// Small, stable, non-zero id of the calling thread.
pub fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| {
        if id.get() == 0 {
            id.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        id.get()
    })
}

/// Id of the logical task running on this thread, `0` when none was entered.
pub fn current_task_id() -> u64 {
    TASK_ID.with(Cell::get)
}

/// Mark `task_id` as the current task until the returned guard is dropped.
///
/// Guards nest: dropping one restores whatever id was current before it.
#[must_use = "the task id is reset when the guard is dropped"]
pub fn enter_task(task_id: u64) -> TaskGuard {
    let previous = TASK_ID.with(|id| id.replace(task_id));
    TaskGuard { previous }
}

/// Restores the previous task id on drop. See [`enter_task`].
#[derive(Debug)]
pub struct TaskGuard {
    previous: u64,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        TASK_ID.with(|id| id.set(self.previous));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_ids_are_stable_and_distinct() {
        let here = current_thread_id();
        assert_eq!(here, current_thread_id());
        assert_ne!(here, 0);

        let other = std::thread::spawn(current_thread_id).join().unwrap();
        assert_ne!(here, other);
    }

    #[test]
    fn test_task_guard_nesting() {
        assert_eq!(current_task_id(), 0);
        {
            let _outer = enter_task(7);
            assert_eq!(current_task_id(), 7);
            {
                let _inner = enter_task(9);
                assert_eq!(current_task_id(), 9);
            }
            assert_eq!(current_task_id(), 7);
        }
        assert_eq!(current_task_id(), 0);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let first = elapsed_since_start();
        let second = elapsed_since_start();
        assert!(second >= first);
    }
}
