//! Delayed actions for the simulation
//!
//! A min-heap of pending timers keyed by due time. Every entry carries the
//! session epoch it was scheduled in; bumping the epoch invalidates
//! everything queued before it, so a restart can never be followed by a
//! stale callback.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// What happens when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Close the umbrella and allow it to be opened again
    UmbrellaClose,
    /// Start the next drop after a catch
    NextDrop { score: u32 },
    /// Start a drop after the shop closes
    ShopResume,
    /// Hide the insufficient-funds banner
    DismissFundsBanner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub due_ms: u64,
    pub kind: TimerKind,
    epoch: u32,
    /// Insertion order, breaks ties between timers due at the same time
    seq: u64,
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Timer>>,
    epoch: u32,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `kind` to fire at `now_ms + delay_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, kind: TimerKind) {
        let timer = Timer {
            due_ms: now_ms.saturating_add(delay_ms),
            kind,
            epoch: self.epoch,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(timer));
    }

    /// Drop every pending timer matching `pred`
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&TimerKind) -> bool) {
        self.queue.retain(|Reverse(t)| !pred(&t.kind));
    }

    /// Invalidate all pending timers (restart, reset, teardown)
    pub fn cancel_all(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.queue.clear();
    }

    /// Pop the earliest timer due at or before `now_ms` from the current epoch
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Timer> {
        while let Some(Reverse(next)) = self.queue.peek() {
            if next.due_ms > now_ms {
                return None;
            }
            let Reverse(timer) = self.queue.pop()?;
            if timer.epoch == self.epoch {
                return Some(timer);
            }
        }
        None
    }

    pub fn is_pending(&self, pred: impl Fn(&TimerKind) -> bool) -> bool {
        self.queue
            .iter()
            .any(|Reverse(t)| t.epoch == self.epoch && pred(&t.kind))
    }

    /// Due time of the first pending timer matching `pred`
    pub fn due_time(&self, pred: impl Fn(&TimerKind) -> bool) -> Option<u64> {
        self.queue
            .iter()
            .filter(|Reverse(t)| t.epoch == self.epoch && pred(&t.kind))
            .map(|Reverse(t)| t.due_ms)
            .min()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = Scheduler::new();
        timers.schedule(0, 300, TimerKind::ShopResume);
        timers.schedule(0, 100, TimerKind::UmbrellaClose);
        timers.schedule(0, 100, TimerKind::DismissFundsBanner);

        assert!(timers.pop_due(99).is_none());
        assert_eq!(timers.pop_due(100).map(|t| t.kind), Some(TimerKind::UmbrellaClose));
        assert_eq!(
            timers.pop_due(100).map(|t| t.kind),
            Some(TimerKind::DismissFundsBanner)
        );
        assert!(timers.pop_due(299).is_none());
        assert_eq!(timers.pop_due(1000).map(|t| t.kind), Some(TimerKind::ShopResume));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel_all_invalidates_pending() {
        let mut timers = Scheduler::new();
        timers.schedule(0, 50, TimerKind::NextDrop { score: 4 });
        timers.cancel_all();
        assert!(timers.pop_due(10_000).is_none());
        assert!(!timers.is_pending(|k| matches!(k, TimerKind::NextDrop { .. })));

        timers.schedule(0, 50, TimerKind::UmbrellaClose);
        assert_eq!(timers.pop_due(50).map(|t| t.kind), Some(TimerKind::UmbrellaClose));
    }

    #[test]
    fn test_cancel_where() {
        let mut timers = Scheduler::new();
        timers.schedule(0, 10, TimerKind::NextDrop { score: 1 });
        timers.schedule(0, 20, TimerKind::UmbrellaClose);
        timers.cancel_where(|k| matches!(k, TimerKind::NextDrop { .. }));
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.due_time(|k| *k == TimerKind::UmbrellaClose), Some(20));
    }
}
