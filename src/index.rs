//! Chronological index over loaded entries.
//!
//! Entries are held newest first. Because a descending sort keeps every
//! month together, each month bucket is a contiguous slice of that sequence:
//!
//! ```text
//! index   0            1            2
//! entry   2024-02-01   2024-01-20   2024-01-05
//! month   [2024-02   ] [2024-01                ]
//! ```
//!
//! Navigation follows the same order. For entry `i`, the *previous* entry
//! (older) is `i + 1` and the *next* entry (newer) is `i - 1`. The oldest
//! entry has no previous and the newest has no next.

use crate::entry::Entry;
use crate::naming::{EntryDate, MonthKey};
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("entries out of order: {newer} is not strictly newer than {older}")]
    NotStrictlyDescending { newer: EntryDate, older: EntryDate },
}

/// Chronological neighbours of one entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    /// The chronologically earlier entry.
    pub previous: Option<&'a Entry>,
    /// The chronologically later entry.
    pub next: Option<&'a Entry>,
}

/// Adjacent months that have entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthNeighbors {
    pub previous: Option<MonthKey>,
    pub next: Option<MonthKey>,
}

#[derive(Debug, Clone, Default)]
pub struct ChronoIndex {
    entries: Vec<Entry>,
    months: Vec<(MonthKey, Range<usize>)>,
}

impl ChronoIndex {
    /// Index `entries`, sorting them newest first.
    pub fn new(mut entries: Vec<Entry>) -> Self {
        entries.sort_by_key(|e| std::cmp::Reverse(e.date()));

        let mut months: Vec<(MonthKey, Range<usize>)> = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            let key = entry.month();
            match months.last_mut() {
                Some((last, range)) if *last == key => range.end = i + 1,
                _ => months.push((key, i..i + 1)),
            }
        }

        Self { entries, months }
    }

    /// Check that dates are strictly descending (unique).
    pub fn verify(&self) -> Result<(), IndexError> {
        match self
            .entries
            .windows(2)
            .find(|w| w[0].date() <= w[1].date())
        {
            Some(w) => Err(IndexError::NotStrictlyDescending {
                newer: w[0].date(),
                older: w[1].date(),
            }),
            None => Ok(()),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct months, newest first.
    pub fn months(&self) -> Vec<MonthKey> {
        self.months.iter().map(|(key, _)| *key).collect()
    }

    pub fn latest_month(&self) -> Option<MonthKey> {
        self.months.first().map(|(key, _)| *key)
    }

    /// Every month with its entries, newest month first.
    pub fn by_month(&self) -> impl Iterator<Item = (MonthKey, &[Entry])> + '_ {
        self.months
            .iter()
            .map(|(key, range)| (*key, &self.entries[range.clone()]))
    }

    /// Entries of one month, newest first. `None` if the month has none.
    pub fn month(&self, key: &MonthKey) -> Option<&[Entry]> {
        self.months
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, range)| &self.entries[range.clone()])
    }

    /// Position of the entry with `date`, if indexed.
    pub fn position(&self, date: EntryDate) -> Option<usize> {
        self.entries.iter().position(|e| e.date() == date)
    }

    /// Older and newer neighbours of the entry at `i`.
    pub fn neighbors(&self, i: usize) -> Neighbors<'_> {
        if i >= self.entries.len() {
            return Neighbors::default();
        }
        Neighbors {
            previous: self.entries.get(i + 1),
            next: i.checked_sub(1).and_then(|j| self.entries.get(j)),
        }
    }

    /// Older and newer months around `key` (only months with entries).
    pub fn month_neighbors(&self, key: &MonthKey) -> MonthNeighbors {
        let Some(pos) = self.months.iter().position(|(k, _)| k == key) else {
            return MonthNeighbors::default();
        };
        MonthNeighbors {
            previous: self.months.get(pos + 1).map(|(k, _)| *k),
            next: pos
                .checked_sub(1)
                .and_then(|j| self.months.get(j))
                .map(|(k, _)| *k),
        }
    }
}
