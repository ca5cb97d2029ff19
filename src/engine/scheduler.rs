use std::collections::{BTreeMap, HashMap};

/// Handle returned by [`Scheduler::schedule`]. Owners keep it next to the state the timer touches
/// so cancellation is a plain lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Cooperative timer queue on a caller-supplied millisecond clock.
/// Nothing fires on its own: the owner calls [`Scheduler::pop_due`] from its update loop, which
/// keeps every callback on the same thread as the state it mutates.
#[derive(Debug)]
pub struct Scheduler<T> {
    // (deadline, id) keeps same-deadline timers in scheduling order
    queue: BTreeMap<(i64, TimerId), T>,
    deadlines: HashMap<TimerId, i64>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline_ms: i64, task: T) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.queue.insert((deadline_ms, id), task);
        self.deadlines.insert(id, deadline_ms);
        id
    }

    /// Returns the task if the timer was still pending. Cancelling a fired or unknown timer is a no-op.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.queue.remove(&(deadline, id))
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Earliest timer due at or before `now_ms`, removed from the queue.
    pub fn pop_due(&mut self, now_ms: i64) -> Option<(TimerId, T)> {
        let (&(deadline, id), _) = self.queue.first_key_value()?;
        if deadline > now_ms {
            return None;
        }
        self.deadlines.remove(&id);
        self.queue.remove(&(deadline, id)).map(|task| (id, task))
    }

    pub fn next_deadline(&self) -> Option<i64> {
        self.queue.keys().next().map(|&(deadline, _)| deadline)
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
    fn fires_in_deadline_then_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(200, "late");
        s.schedule(100, "first");
        s.schedule(100, "second");

        assert_eq!(s.next_deadline(), Some(100));
        assert!(s.pop_due(99).is_none());
        assert_eq!(s.pop_due(150).map(|(_, t)| t), Some("first"));
        assert_eq!(s.pop_due(150).map(|(_, t)| t), Some("second"));
        assert!(s.pop_due(150).is_none());
        assert_eq!(s.pop_due(200).map(|(_, t)| t), Some("late"));
        assert!(s.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let keep = s.schedule(10, 1);
        let drop = s.schedule(10, 2);

        assert_eq!(s.cancel(drop), Some(2));
        assert_eq!(s.cancel(drop), None);
        assert!(!s.is_pending(drop));
        assert!(s.is_pending(keep));

        assert_eq!(s.pop_due(1_000), Some((keep, 1)));
        assert!(s.pop_due(1_000).is_none());
        assert_eq!(s.cancel(keep), None);
    }
}
