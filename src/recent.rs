//! Recently used dates.
//!
//! A short most-recent-first list that backs the 1–9 quick-select keys.
//! Using a date again moves it to the front instead of duplicating it, and
//! the oldest entry falls off once the list is full.

use crate::dates::CanonicalDate;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentDates {
    dates: VecDeque<CanonicalDate>,
    capacity: usize,
}

impl RecentDates {
    pub fn new(capacity: usize) -> Self {
        Self {
            dates: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Put `date` at the front, dropping any older copy and anything past capacity.
    pub fn push(&mut self, date: CanonicalDate) {
        self.dates.retain(|d| *d != date);
        self.dates.push_front(date);
        self.dates.truncate(self.capacity);
    }

    /// The `n`-th most recent date, counting from 1.
    pub fn get(&self, n: usize) -> Option<CanonicalDate> {
        n.checked_sub(1).and_then(|i| self.dates.get(i).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = CanonicalDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
