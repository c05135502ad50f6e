//! Virtual clock and timer queue.
//!
//! Every delay in the coordinator (typewriter ticks, counter frames, toast
//! dismissal, the simulated submission) is a task scheduled on a `Timeline`.
//! Nothing runs on its own: the owner advances the clock and drains the tasks
//! that fell due, in due order. Tasks due at the same instant come out in the
//! order they were scheduled, which is what keeps animation steps in their
//! literal delay order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    due: u64,
    seq: u64,
    task: T,
}

// Ordered by (due, seq) only; (due, seq) is unique so the task never decides.
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.seq) == (other.due, other.seq)
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// A task a controller hands back to its owner for scheduling.
///
/// Controllers never own the clock. They return the follow-up work their
/// state change implies and the coordinator puts it on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred<T> {
    pub delay_ms: u64,
    pub task: T,
}

impl<T> Deferred<T> {
    pub fn new(delay_ms: u64, task: T) -> Self {
        Self { delay_ms, task }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Deferred<U> {
        Deferred {
            delay_ms: self.delay_ms,
            task: f(self.task),
        }
    }
}

#[derive(Debug)]
pub struct Timeline<T> {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `task` to run `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) {
        let entry = Entry {
            due: self.now.saturating_add(delay_ms),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Schedule every deferred task, in order.
    pub fn schedule_all(&mut self, deferred: impl IntoIterator<Item = Deferred<T>>) {
        for d in deferred {
            self.schedule(d.delay_ms, d.task);
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(e)| e.due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time. Returns `None` once nothing else is due.
    ///
    /// Tasks scheduled while draining are eligible in the same drain if they
    /// fall due before `until`.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        if self.next_due()? > until {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Move the clock forward to `until` without running anything.
    ///
    /// Call after draining with [`pop_due`](Self::pop_due).
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
