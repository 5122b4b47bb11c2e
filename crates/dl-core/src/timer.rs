//! Cooperative, virtual-time scheduling for deferred session work.
//!
//! Nothing here sleeps. The host moves time forward and the session pops
//! whatever fell due, in deadline order.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled task, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

/// Work the session defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Periodic power increment while charging.
    ChargeTick,
    /// Publish the result of the draw started in `generation`.
    Resolve {
        /// Session generation the draw belongs to.
        generation: u64,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    id: TaskId,
    due: u64,
    period: Option<u64>,
    task: Task,
}

/// A task that fell due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// Handle of the task.
    pub id: TaskId,
    /// Time the task was due; the scheduler clock now reads this.
    pub at: u64,
    /// The deferred work.
    pub task: Task,
}

/// Virtual clock plus the set of outstanding tasks.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    /// Create a scheduler at time 0 with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `task` once, `delay` from now.
    pub fn once(&mut self, delay: u64, task: Task) -> TaskId {
        self.push(delay, None, task)
    }

    /// Run `task` every `period`, first one `period` from now.
    pub fn every(&mut self, period: u64, task: Task) -> TaskId {
        let period = period.max(1);
        self.push(period, Some(period), task)
    }

    fn push(&mut self, delay: u64, period: Option<u64>, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now.saturating_add(delay),
            period,
            task,
        });
        id
    }

    /// Cancel a task. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every outstanding task.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Whether `id` is still outstanding.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Earliest deadline among outstanding tasks.
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Number of outstanding tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is outstanding.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the earliest task due at or before `until`.
    ///
    /// The clock moves to the task's deadline. Periodic tasks are re-armed
    /// for their next deadline before being returned, so a handler may cancel
    /// them. Ties go to the task scheduled first.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;

        let entry = &self.entries[pos];
        let fired = Fired {
            id: entry.id,
            at: entry.due,
            task: entry.task,
        };
        self.now = self.now.max(fired.at);
        match self.entries[pos].period {
            Some(period) => {
                let entry = &mut self.entries[pos];
                entry.due = entry.due.saturating_add(period);
            }
            None => {
                self.entries.remove(pos);
            }
        }
        Some(fired)
    }

    /// Move the clock forward to `t`. Never moves backwards.
    pub fn advance_to(&mut self, t: u64) {
        self.now = self.now.max(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_at_deadline() {
        let mut s = Scheduler::new();
        let id = s.once(100, Task::Resolve { generation: 0 });
        assert!(s.pop_due(99).is_none());
        let fired = s.pop_due(100).unwrap();
        assert_eq!(fired.id, id);
        assert_eq!(fired.at, 100);
        assert_eq!(s.now(), 100);
        assert!(s.is_empty());
    }

    #[test]
    fn every_rearms() {
        let mut s = Scheduler::new();
        s.every(30, Task::ChargeTick);
        let mut times = Vec::new();
        while let Some(f) = s.pop_due(95) {
            times.push(f.at);
        }
        assert_eq!(times, vec![30, 60, 90]);
        assert_eq!(s.next_due(), Some(120));
    }

    #[test]
    fn pop_orders_by_deadline_then_creation() {
        let mut s = Scheduler::new();
        s.once(50, Task::Resolve { generation: 2 });
        s.every(25, Task::ChargeTick);
        s.once(50, Task::Resolve { generation: 3 });
        let order: Vec<Task> = std::iter::from_fn(|| s.pop_due(50)).map(|f| f.task).collect();
        assert_eq!(
            order,
            vec![
                Task::ChargeTick,
                Task::Resolve { generation: 2 },
                Task::ChargeTick,
                Task::Resolve { generation: 3 },
            ]
        );
    }

    #[test]
    fn cancel_removes_task() {
        let mut s = Scheduler::new();
        let id = s.every(10, Task::ChargeTick);
        assert!(s.is_pending(id));
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.pop_due(1000).is_none());
    }

    #[test]
    fn delays_are_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance_to(500);
        s.once(10, Task::ChargeTick);
        assert_eq!(s.next_due(), Some(510));
        s.advance_to(100);
        assert_eq!(s.now(), 500);
    }

    #[test]
    fn far_deadlines_saturate() {
        let mut s = Scheduler::new();
        s.advance_to(10);
        s.once(u64::MAX, Task::ChargeTick);
        assert_eq!(s.next_due(), Some(u64::MAX));
        s.every(u64::MAX, Task::ChargeTick);
        assert_eq!(s.pop_due(u64::MAX).map(|f| f.at), Some(u64::MAX));
        assert_eq!(s.pop_due(u64::MAX).map(|f| f.at), Some(u64::MAX));
        assert!(s.pop_due(u64::MAX - 1).is_none());
    }

    #[test]
    fn cancel_all_clears() {
        let mut s = Scheduler::new();
        s.once(1, Task::ChargeTick);
        s.every(1, Task::ChargeTick);
        s.cancel_all();
        assert_eq!(s.len(), 0);
    }
}
