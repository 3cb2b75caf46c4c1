//! Scheduler - Deferred callbacks and timers
//!
//! Everything runs on one thread. There are exactly two kinds of suspension:
//!
//! - **next tick**: a single-shot callback that runs after the current
//!   synchronous update settles (moving focus into a panel that was just
//!   opened). Queued callbacks run on [`Scheduler::flush`].
//! - **timers**: the typeahead debounce. Timers fire when the scheduler's
//!   clock is advanced past their deadline.
//!
//! The clock is explicit. A host advances it from its event loop with
//! `advance_to(Instant::now())`; tests advance it by exact durations.
//!
//! Every scheduled callback returns a [`TaskHandle`]. Cancelling it
//! guarantees the callback never runs, which is how components make sure
//! no callback observes their state after teardown.
//!
//! # Example
//!
//! ```
//! use raxui::state::Scheduler;
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let scheduler = Scheduler::new();
//! let fired = Rc::new(Cell::new(false));
//! let fired_clone = fired.clone();
//!
//! let _task = scheduler.set_timeout(Duration::from_millis(350), move || fired_clone.set(true));
//! scheduler.advance(Duration::from_millis(349));
//! assert!(!fired.get());
//! scheduler.advance(Duration::from_millis(1));
//! assert!(fired.get());
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

type Task = Box<dyn FnOnce()>;

// =============================================================================
// SCHEDULER STATE
// =============================================================================

struct SchedulerInner {
    now: Instant,
    next_id: u64,
    /// Deferred callbacks in FIFO order.
    ticks: VecDeque<(u64, Task)>,
    /// Timers keyed by (deadline, id) so equal deadlines fire in arm order.
    timers: BTreeMap<(Instant, u64), Task>,
    /// Timer id -> deadline, for cancellation.
    deadlines: HashMap<u64, Instant>,
}

impl SchedulerInner {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Handle to the single-threaded scheduler. Clones share the same queues.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create a scheduler whose clock starts now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a scheduler whose clock starts at `now`.
    pub fn starting_at(now: Instant) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now,
                next_id: 0,
                ticks: VecDeque::new(),
                timers: BTreeMap::new(),
                deadlines: HashMap::new(),
            })),
        }
    }

    /// Current time on the scheduler's clock.
    pub fn now(&self) -> Instant {
        self.inner.borrow().now
    }

    /// Queue `task` to run after the current synchronous update.
    pub fn next_tick(&self, task: impl FnOnce() + 'static) -> TaskHandle {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.ticks.push_back((id, Box::new(task)));
            id
        };
        TaskHandle {
            id,
            kind: TaskKind::Tick,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Arm a timer that runs `task` once `delay` has elapsed on the clock.
    pub fn set_timeout(&self, delay: Duration, task: impl FnOnce() + 'static) -> TaskHandle {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            let deadline = inner.now + delay;
            inner.timers.insert((deadline, id), Box::new(task));
            inner.deadlines.insert(id, deadline);
            id
        };
        TaskHandle {
            id,
            kind: TaskKind::Timer,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Run every queued next-tick callback, including ones queued while flushing.
    ///
    /// Returns the number of callbacks run.
    pub fn flush(&self) -> usize {
        let mut ran = 0;
        loop {
            // Borrow is released before the callback runs so it may schedule more work.
            let next = self.inner.borrow_mut().ticks.pop_front();
            match next {
                Some((_, task)) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Advance the clock by `by`, firing due timers.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Advance the clock to `target`, firing due timers in deadline order.
    ///
    /// Deferred callbacks are flushed before the first timer and after each
    /// one. Returns the number of timers fired. A target in the past only
    /// flushes.
    pub fn advance_to(&self, target: Instant) -> usize {
        self.flush();
        let mut fired = 0;
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                let first = inner.timers.keys().next().copied();
                match first {
                    Some(key) if key.0 <= target => {
                        inner.deadlines.remove(&key.1);
                        if inner.now < key.0 {
                            inner.now = key.0;
                        }
                        inner.timers.remove(&key)
                    }
                    _ => None,
                }
            };
            match due {
                Some(task) => {
                    task();
                    fired += 1;
                    self.flush();
                }
                None => break,
            }
        }
        let mut inner = self.inner.borrow_mut();
        if inner.now < target {
            inner.now = target;
        }
        fired
    }

    /// Number of queued next-tick callbacks.
    pub fn pending_ticks(&self) -> usize {
        self.inner.borrow().ticks.len()
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}

// =============================================================================
// TASK HANDLE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskKind {
    Tick,
    Timer,
}

/// Handle to a scheduled callback.
///
/// Dropping the handle does NOT cancel the task; call [`TaskHandle::cancel`].
#[derive(Clone)]
pub struct TaskHandle {
    id: u64,
    kind: TaskKind,
    scheduler: Weak<RefCell<SchedulerInner>>,
}

impl TaskHandle {
    /// Cancel the task. Idempotent; a no-op once the task has run.
    pub fn cancel(&self) {
        let Some(inner) = self.scheduler.upgrade() else { return };
        let mut inner = inner.borrow_mut();
        match self.kind {
            TaskKind::Tick => inner.ticks.retain(|(id, _)| *id != self.id),
            TaskKind::Timer => {
                if let Some(deadline) = inner.deadlines.remove(&self.id) {
                    inner.timers.remove(&(deadline, self.id));
                }
            }
        }
    }

    /// Whether the task is still waiting to run.
    pub fn is_pending(&self) -> bool {
        let Some(inner) = self.scheduler.upgrade() else { return false };
        let inner = inner.borrow();
        match self.kind {
            TaskKind::Tick => inner.ticks.iter().any(|(id, _)| *id == self.id),
            TaskKind::Timer => inner.deadlines.contains_key(&self.id),
        }
    }
}

// =============================================================================
// TASK GROUP
// =============================================================================

/// A set of tasks owned by one component, cancelled together on teardown.
#[derive(Default)]
pub struct TaskGroup {
    tasks: RefCell<Vec<TaskHandle>>,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a task, dropping handles that already ran.
    pub fn track(&self, task: TaskHandle) {
        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(TaskHandle::is_pending);
        tasks.push(task);
    }

    /// Cancel every tracked task.
    pub fn cancel_all(&self) {
        for task in self.tasks.borrow_mut().drain(..) {
            task.cancel();
        }
    }

    /// Number of tracked tasks still pending.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().iter().filter(|t| t.is_pending()).count()
    }
}

impl Drop for TaskGroup {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let make = move || {
            let c = count_clone.clone();
            Box::new(move || c.set(c.get() + 1)) as Box<dyn FnOnce()>
        };
        (count, make)
    }

    #[test]
    fn test_next_tick_runs_on_flush() {
        let scheduler = Scheduler::new();
        let (count, make) = counter();

        scheduler.next_tick(make());
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.pending_ticks(), 1);

        assert_eq!(scheduler.flush(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending_ticks(), 0);
    }

    #[test]
    fn test_ticks_queued_during_flush_also_run() {
        let scheduler = Scheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_outer = order.clone();
        let scheduler_clone = scheduler.clone();
        scheduler.next_tick(move || {
            order_outer.borrow_mut().push("outer");
            let order_inner = order_outer.clone();
            scheduler_clone.next_tick(move || order_inner.borrow_mut().push("inner"));
        });

        assert_eq!(scheduler.flush(), 2);
        assert_eq!(*order.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_cancelled_tick_never_runs() {
        let scheduler = Scheduler::new();
        let (count, make) = counter();

        let task = scheduler.next_tick(make());
        assert!(task.is_pending());
        task.cancel();
        assert!(!task.is_pending());

        scheduler.flush();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let scheduler = Scheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(30, "c"), (10, "a"), (20, "b")] {
            let order = order.clone();
            scheduler.set_timeout(Duration::from_millis(delay), move || order.borrow_mut().push(name));
        }

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(*order.borrow(), vec!["a", "b"]);
        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let scheduler = Scheduler::new();
        let (count, make) = counter();

        let task = scheduler.set_timeout(Duration::from_millis(10), make());
        task.cancel();
        task.cancel();

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn test_clock_moves_to_target() {
        let start = Instant::now();
        let scheduler = Scheduler::starting_at(start);
        scheduler.advance(Duration::from_millis(100));
        assert_eq!(scheduler.now(), start + Duration::from_millis(100));

        // Going backwards leaves the clock alone
        scheduler.advance_to(start);
        assert_eq!(scheduler.now(), start + Duration::from_millis(100));
    }

    #[test]
    fn test_task_group_cancels_on_drop() {
        let scheduler = Scheduler::new();
        let (count, make) = counter();

        {
            let group = TaskGroup::new();
            group.track(scheduler.next_tick(make()));
            group.track(scheduler.set_timeout(Duration::from_millis(5), make()));
            assert_eq!(group.pending(), 2);
        }

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_handle_outlives_scheduler() {
        let scheduler = Scheduler::new();
        let task = scheduler.next_tick(|| {});
        drop(scheduler);
        assert!(!task.is_pending());
        task.cancel();
    }
}
