// src/model/queues.rs

use std::collections::VecDeque;

/// A person on the waiting list. Only the day they (re-)joined matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    pub day_entered: usize,
}

/// FIFO waiting list. Push at the back on arrival, pop from the front when a
/// slot is offered. No priority reordering.
#[derive(Debug, Clone, Default)]
pub struct WaitingList {
    buffer: VecDeque<QueueEntry>,
}

impl WaitingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` people who all entered on `day`.
    pub fn join(&mut self, day: usize, count: usize) {
        self.buffer
            .extend(std::iter::repeat(QueueEntry { day_entered: day }).take(count));
    }

    /// Next person in arrival order, if anyone is waiting.
    pub fn pop_front(&mut self) -> Option<QueueEntry> {
        self.buffer.pop_front()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Day-indexed counts of people re-entering the list after a rebooked DNA.
///
/// The window covers `days + delay + 2` so any in-horizon return fits.
/// Scheduling past it is refused rather than growing the buffer. Only days
/// inside the horizon are stored, since the day loop never reads the rest;
/// memory stays bounded by `days` whatever the delay.
#[derive(Debug, Clone)]
pub struct RebookingSchedule {
    slots: Vec<usize>,
    window: usize,
}

impl RebookingSchedule {
    pub fn new(days: usize, delay: usize) -> Self {
        Self {
            slots: vec![0; days],
            window: days.saturating_add(delay).saturating_add(2),
        }
    }

    /// Adds one return on `day`. Returns `false` if `day` is outside the
    /// window and the rebooking was dropped.
    pub fn schedule(&mut self, day: usize) -> bool {
        if day >= self.window {
            return false;
        }
        if let Some(count) = self.slots.get_mut(day) {
            *count += 1;
        }
        true
    }

    /// People due back on `day`. Reading does not clear the slot.
    pub fn due(&self, day: usize) -> usize {
        self.slots.get(day).copied().unwrap_or(0)
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
