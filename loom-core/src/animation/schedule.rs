use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A delayed state write for one actor slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MarkEntered,
    FinishEntrance,
    MarkExited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub fire_at: u64,
    pub generation: u64,
    pub slot: usize,
    pub action: Action,
    seq: u64,
}

impl Ord for Entry {
    // BinaryHeap is a max-heap; earliest deadline, then insertion order, on top
    fn cmp(&self, other: &Self) -> Ordering {
        other.fire_at.cmp(&self.fire_at).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending transitions ordered by virtual time.
#[derive(Debug, Default)]
pub struct Schedule {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Schedule {
    pub fn push(&mut self, fire_at: u64, generation: u64, slot: usize, action: Action) {
        self.seq += 1;
        self.heap.push(Entry { fire_at, generation, slot, action, seq: self.seq });
    }

    /// Remove and return the next entry due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Entry> {
        if self.heap.peek()?.fire_at > now {
            return None;
        }
        self.heap.pop()
    }

    pub fn pending(&self, generation: u64) -> usize {
        self.heap.iter().filter(|e| e.generation == generation).count()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_entries_come_out_in_time_then_insertion_order() {
        let mut s = Schedule::default();
        s.push(50, 0, 1, Action::MarkExited);
        s.push(10, 0, 0, Action::MarkEntered);
        s.push(10, 0, 0, Action::FinishEntrance);

        assert!(s.pop_due(9).is_none());
        assert_eq!(s.pop_due(10).map(|e| e.action), Some(Action::MarkEntered));
        assert_eq!(s.pop_due(10).map(|e| e.action), Some(Action::FinishEntrance));
        assert!(s.pop_due(49).is_none());
        assert_eq!(s.pop_due(100).map(|e| e.slot), Some(1));
        assert!(s.is_empty());
    }
}
