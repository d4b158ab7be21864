//! Deterministic one-shot timers driven by the host.
//!
//! The panel never reads a wall clock. The host reports elapsed time through
//! [`TimerQueue::advance`] and receives the timers that became due, in deadline order (ties fire in
//! scheduling order).

use std::collections::BTreeMap;
use std::time::Duration;

/// Identifier of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A queue of one-shot timers carrying a payload of type `T`.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), T>,
}

impl<T> TimerQueue<T> {
    /// Create an empty queue at virtual time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now.saturating_add(delay), id), payload);
        id
    }

    /// Cancel a pending timer, returning its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let key = self.pending.keys().find(|(_, pending)| *pending == id).copied()?;
        self.pending.remove(&key)
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.keys().any(|(_, pending)| *pending == id)
    }

    /// Number of timers waiting to fire.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timer is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time until the earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .keys()
            .next()
            .map(|(due, _)| due.saturating_sub(self.now))
    }

    /// Move virtual time forward and drain every timer that became due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TimerId, T)> {
        self.now = self.now.saturating_add(elapsed);
        let mut due = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            let ((_, id), payload) = entry.remove_entry();
            due.push((id, payload));
        }
        due
    }

    /// Drop every pending timer without firing it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule(Duration::from_millis(300), "late");
        let early = queue.schedule(Duration::from_millis(100), "early");

        assert!(queue.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(queue.advance(Duration::from_millis(1)), vec![(early, "early")]);
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(200)));
        assert_eq!(queue.advance(Duration::from_millis(500)), vec![(late, "late")]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(Duration::from_millis(10), 1);
        assert!(queue.is_pending(id));
        assert_eq!(queue.cancel(id), Some(1));
        assert_eq!(queue.cancel(id), None);
        assert!(queue.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(Duration::from_millis(5), 'a');
        let b = queue.schedule(Duration::from_millis(5), 'b');
        assert_eq!(queue.advance(Duration::from_millis(5)), vec![(a, 'a'), (b, 'b')]);
    }

    #[test]
    fn test_huge_advance_saturates() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(Duration::from_millis(5), ());
        assert_eq!(queue.advance(Duration::MAX), vec![(id, ())]);
        assert_eq!(queue.now(), Duration::MAX);

        assert!(queue.advance(Duration::from_secs(1)).is_empty());
        let late = queue.schedule(Duration::from_secs(1), ());
        assert_eq!(queue.advance(Duration::ZERO), vec![(late, ())]);
    }
}
