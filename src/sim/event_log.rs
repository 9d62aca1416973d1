//! Bounded in-memory log of station events.

use std::collections::VecDeque;

use serde::Serialize;

use super::types::StationEvent;

/// Default number of retained entries.
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// One line of the station log, stamped with the simulated time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// Monotonic sequence number, never reused after eviction or reset.
    pub seq: u64,
    pub sim_hour: usize,
    pub sim_minute: u32,
    pub message: String,
}

/// Ring buffer of log entries that evicts the oldest entry when full.
///
/// Appending never allocates beyond `capacity` entries and performs no I/O,
/// so it is safe to call while the station lock is held.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl EventLog {
    /// Creates an empty log.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "log capacity must be > 0");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Appends an event stamped with the given simulated time.
    pub fn push(&mut self, sim_hour: usize, sim_minute: u32, event: &StationEvent) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            sim_hour,
            sim_minute,
            message: event.to_string(),
        });
        self.next_seq += 1;
    }

    /// Returns up to `limit` most recent entries, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(hour: usize) -> StationEvent {
        StationEvent::HourAdvanced { hour }
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut log = EventLog::new(3);
        for h in 0..5 {
            log.push(h, 0, &event(h));
        }
        assert_eq!(log.len(), 3);
        let seqs: Vec<u64> = log.recent(10).iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![2, 3, 4]);
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let mut log = EventLog::new(10);
        for h in 0..6 {
            log.push(h, 15, &event(h));
        }
        let tail = log.recent(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].sim_hour, 4);
        assert_eq!(tail[1].sim_hour, 5);
        assert_eq!(tail[1].sim_minute, 15);
        assert_eq!(tail[1].message, "simulated hour 05:00");
    }

    #[test]
    fn default_capacity_is_500() {
        let log = EventLog::default();
        assert_eq!(log.capacity(), 500);
        assert!(log.is_empty());
    }

    #[test]
    #[should_panic]
    fn zero_capacity_panics() {
        EventLog::new(0);
    }
}
