//! Bounded event buffer with saturation accounting.

use crate::event::Event;

/// Fixed-capacity event collection for one scanned period.
///
/// Appends beyond capacity are refused rather than silently dropped: the
/// refused events still count toward `offered`, and `saturated` latches so
/// the owning scan can report the truncation alongside the true total.
#[derive(Debug)]
pub struct EventBuffer {
    events: Vec<Event>,
    capacity: usize,
    offered: usize,
    saturated: bool,
}

impl EventBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            capacity,
            offered: 0,
            saturated: false,
        }
    }

    /// Append an event. Returns `false` (and latches the saturation flag)
    /// when the buffer is full; the offered tally advances either way.
    pub fn push(&mut self, event: Event) -> bool {
        self.offered += 1;
        if self.events.len() < self.capacity {
            self.events.push(event);
            true
        } else {
            self.saturated = true;
            false
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events offered over the buffer's whole life, including refusals.
    pub fn offered(&self) -> usize {
        self.offered
    }

    /// Whether any push has ever been refused.
    pub fn saturated(&self) -> bool {
        self.saturated
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut [Event] {
        &mut self.events
    }

    /// Sort `events[start..]` ascending by occurrence time, leaving the
    /// already-ordered prefix alone. Newly appended suffixes are nearly
    /// sorted (discovery order tracks segment order), so insertion sort
    /// stays cheap at this capacity.
    pub fn sort_suffix(&mut self, start: usize) {
        insertion_sort_by(&mut self.events[start..], |a, b| {
            (a.when.date, a.when.minutes) > (b.when.date, b.when.minutes)
        });
    }

    /// Drop the first `n` events, compacting the remainder to the front.
    /// The offered tally and saturation flag are untouched.
    pub fn discard_prefix(&mut self, n: usize) {
        self.events.drain(..n);
    }

    /// Drop every stored event, keeping the tallies.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Stable insertion sort: swaps a new element backward only past strictly
/// later ones, so equal keys keep their discovery order.
pub fn insertion_sort_by<T, F>(slice: &mut [T], after: F)
where
    F: Fn(&T, &T) -> bool,
{
    for i in 1..slice.len() {
        let mut j = i;
        while j > 0 && after(&slice[j - 1], &slice[j]) {
            slice.swap(j - 1, j);
            j -= 1;
        }
    }
}
