//! Virtual-clock scheduler for timeouts, intervals and frame callbacks.
//!
//! Everything runs on one thread. A timer fires when the clock is advanced
//! past its due time; timers due at the same instant fire in the order they
//! were registered. Frame callbacks requested while a frame is running are
//! deferred to the next frame. Nothing can be cancelled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

struct Timer<T> {
    due: Duration,
    seq: u64,
    repeat: Option<Duration>,
    task: T,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

pub struct Scheduler<T> {
    now: Duration,
    seq: u64,
    timers: BinaryHeap<Reverse<Timer<T>>>,
    frame_queue: Vec<T>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler {
            now: Duration::ZERO,
            seq: 0,
            timers: BinaryHeap::new(),
            frame_queue: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn set_timeout(&mut self, delay: Duration, task: T) {
        self.push(self.now + delay, None, task);
    }

    pub fn set_interval(&mut self, period: Duration, task: T) {
        self.push(self.now + period, Some(period), task);
    }

    /// Queues `task` for the next frame
    pub fn request_frame(&mut self, task: T) {
        self.frame_queue.push(task);
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its due time. Intervals are re-armed relative to their due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        if self.timers.peek().map_or(true, |Reverse(t)| t.due > until) {
            return None;
        }
        let Reverse(timer) = self.timers.pop()?;
        self.now = self.now.max(timer.due);
        if let Some(period) = timer.repeat {
            self.push(timer.due + period, Some(period), timer.task.clone());
        }
        Some(timer.task)
    }

    /// Moves the clock forward without firing anything; never goes backwards
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Takes the callbacks queued for this frame
    pub fn take_frame(&mut self) -> Vec<T> {
        std::mem::take(&mut self.frame_queue)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frame_queue.len()
    }

    fn push(&mut self, due: Duration, repeat: Option<Duration>, task: T) {
        self.seq += 1;
        self.timers.push(Reverse(Timer {
            due,
            seq: self.seq,
            repeat,
            task,
        }));
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(s: &mut Scheduler<&'static str>, until: Duration) -> Vec<(&'static str, Duration)> {
        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(until) {
            fired.push((task, s.now()));
        }
        s.set_now(until);
        fired
    }

    #[test]
    fn timeout_fires_exactly_at_due_time() {
        let mut s = Scheduler::new();
        s.set_timeout(ms(3000), "remove");
        assert!(drain(&mut s, ms(2999)).is_empty());
        assert_eq!(drain(&mut s, ms(3000)), vec![("remove", ms(3000))]);
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn same_instant_fires_in_registration_order() {
        let mut s = Scheduler::new();
        s.set_timeout(ms(10), "a");
        s.set_timeout(ms(10), "b");
        s.set_timeout(ms(5), "c");
        let order: Vec<_> = drain(&mut s, ms(10)).into_iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn interval_rearms_without_drift() {
        let mut s = Scheduler::new();
        s.set_interval(ms(4000), "tick");
        let fired = drain(&mut s, ms(12_500));
        assert_eq!(
            fired,
            vec![("tick", ms(4000)), ("tick", ms(8000)), ("tick", ms(12_000))]
        );
        assert_eq!(s.pending_timers(), 1);
    }

    #[test]
    fn nested_timeout_is_relative_to_firing_time() {
        let mut s = Scheduler::new();
        s.set_timeout(ms(1000), "outer");
        assert_eq!(s.pop_due(ms(5000)), Some("outer"));
        s.set_timeout(ms(150), "inner");
        assert_eq!(s.pop_due(ms(5000)), Some("inner"));
        assert_eq!(s.now(), ms(1150));
    }

    #[test]
    fn frames_requested_during_a_frame_wait_for_the_next() {
        let mut s = Scheduler::new();
        s.request_frame("first");
        let frame = s.take_frame();
        assert_eq!(frame, vec!["first"]);
        s.request_frame("second");
        assert_eq!(s.pending_frames(), 1);
        assert_eq!(s.take_frame(), vec!["second"]);
        assert!(s.take_frame().is_empty());
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut s: Scheduler<&str> = Scheduler::new();
        s.set_now(ms(500));
        s.set_now(ms(100));
        assert_eq!(s.now(), ms(500));
    }
}
