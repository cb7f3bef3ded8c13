//! Month calendar grids for the archive pages.
//!
//! A grid is laid out Sunday-first. It starts with one placeholder per
//! weekday before the 1st, then one cell per day. There is no trailing
//! padding; the renderer lets the last row end short.
//!
//! ```text
//! March 2024 (1st is a Friday, index 5)
//!
//!  Su Mo Tu We Th Fr Sa
//!  .  .  .  .  .  1  2
//!  3  4  5  6  7  8  9
//!  10 •  12 ...            • = occupied (has an entry)
//! ```

use crate::entry::Entry;
use crate::naming::MonthKey;

/// One cell of a [`CalendarGrid`].
#[derive(Debug, Clone, Copy)]
pub enum CalendarCell<'a> {
    /// Padding before the first day of the month.
    Placeholder,
    /// A day without an entry.
    Empty { day: u32 },
    /// A day with an entry.
    Occupied { day: u32, entry: &'a Entry },
}

impl CalendarCell<'_> {
    pub fn day(&self) -> Option<u32> {
        match self {
            CalendarCell::Placeholder => None,
            CalendarCell::Empty { day } | CalendarCell::Occupied { day, .. } => Some(*day),
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, CalendarCell::Occupied { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CalendarGrid<'a> {
    pub month: MonthKey,
    /// Number of leading placeholders (weekday of the 1st, Sunday = 0).
    pub leading: usize,
    pub cells: Vec<CalendarCell<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Cells for days `1..=days_in_month`, without the leading placeholders.
    pub fn day_cells(&self) -> &[CalendarCell<'a>] {
        &self.cells[self.leading..]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Rows of seven cells, one per rendered calendar week; the last row
    /// may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell<'a>]> {
        self.cells.chunks(7)
    }
}

/// Lay out `month`, marking the days that have an entry.
///
/// Entries from other months are ignored.
pub fn build<'a>(month: MonthKey, entries: &'a [Entry]) -> CalendarGrid<'a> {
    let leading = month.first_weekday() as usize;
    let days = month.days_in_month();

    let mut cells = Vec::with_capacity(leading + days as usize);
    cells.extend(std::iter::repeat_n(CalendarCell::Placeholder, leading));

    for day in 1..=days {
        let entry = month
            .date(day)
            .and_then(|date| entries.iter().find(|e| e.date() == date));
        cells.push(match entry {
            Some(entry) => CalendarCell::Occupied { day, entry },
            None => CalendarCell::Empty { day },
        });
    }

    CalendarGrid {
        month,
        leading,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::entries;

    fn month(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    #[test]
    fn thirty_one_day_month_starting_friday() {
        let es = entries(&["2024-03-10", "2024-03-11", "2024-03-31"]);
        let grid = build(month("2024-03"), &es);

        assert_eq!(grid.leading, 5);
        assert!(grid.cells[..5]
            .iter()
            .all(|c| matches!(c, CalendarCell::Placeholder)));
        assert_eq!(grid.day_cells().len(), 31);
        assert_eq!(grid.cells.len(), 36);
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn day_cells_numbered_in_order() {
        let grid = build(month("2024-02"), &[]);
        let days: Vec<u32> = grid.day_cells().iter().filter_map(|c| c.day()).collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
    }

    #[test]
    fn month_starting_sunday_has_no_placeholders() {
        let grid = build(month("2024-09"), &[]);
        assert_eq!(grid.leading, 0);
        assert_eq!(grid.cells.len(), 30);
    }

    #[test]
    fn occupied_cell_references_its_entry() {
        let es = entries(&["2024-03-10"]);
        let grid = build(month("2024-03"), &es);
        match grid.day_cells()[9] {
            CalendarCell::Occupied { day, entry } => {
                assert_eq!(day, 10);
                assert_eq!(entry.id(), "2024-03-10");
            }
            other => panic!("expected occupied cell, got {other:?}"),
        }
        assert!(matches!(
            grid.day_cells()[8],
            CalendarCell::Empty { day: 9 }
        ));
    }

    #[test]
    fn entries_from_other_months_ignored() {
        let es = entries(&["2024-02-10", "2024-04-10"]);
        let grid = build(month("2024-03"), &es);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn never_emits_trailing_placeholders() {
        for m in ["2024-01", "2024-02", "2024-06", "2023-02", "2021-02"] {
            let grid = build(month(m), &[]);
            assert!(!matches!(grid.cells.last(), Some(CalendarCell::Placeholder)));
        }
    }

    #[test]
    fn weeks_chunk_by_seven() {
        let grid = build(month("2024-03"), &[]);
        let weeks: Vec<usize> = grid.weeks().map(<[_]>::len).collect();
        assert_eq!(weeks, [7, 7, 7, 7, 7, 1]);
    }
}
