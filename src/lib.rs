//! sweepday: next street-sweeping window.
//!
//! Resolves recurring schedules of the form "2nd and 4th Tuesday, 8:00 AM to
//! 10:00 AM" into the next concrete occurrence window relative to a reference
//! instant.
//!
//! # Examples
//!
//! ```
//! use sweepday::ScheduleDescriptor;
//!
//! let schedule = ScheduleDescriptor {
//!     frequency: Some("biweekly".into()),
//!     day: Some("tuesday".into()),
//!     week: Some("2nd, 4th".into()),
//!     start_time: Some("8:00 AM".into()),
//!     end_time: Some("10:00 AM".into()),
//! };
//! let now: jiff::Zoned = "2024-03-01T09:00:00+00:00[UTC]".parse().unwrap();
//! let window = schedule.next_from(&now).unwrap();
//! assert_eq!(sweepday::display::format_short(&window.start), "Tue, Mar 12, 8:00 AM");
//! ```
//!
//! Malformed schedules never produce errors: every bad input degrades to a
//! lenient default (Sunday, midnight) or to `None`, meaning "not available".

pub mod display;
#[cfg(feature = "serde")]
pub mod error;
pub mod eval;
#[cfg(feature = "serde")]
pub mod loader;
pub mod parser;
pub mod schedule;

#[cfg(feature = "serde")]
pub use error::ScheduleError;
pub use schedule::{
    Frequency, OccurrenceWindow, Recurrence, Schedule, ScheduleDescriptor, TimeOfDay, Weekday,
};

use jiff::Zoned;

// --- ScheduleDescriptor convenience methods ---

impl ScheduleDescriptor {
    /// Interpret this record, applying the lenient parsing rules.
    ///
    /// Returns `None` when the record has no day or an unrecognized frequency.
    pub fn parse(&self) -> Option<Schedule> {
        parser::parse(self)
    }

    /// Compute the next occurrence window after `now`.
    pub fn next_from(&self, now: &Zoned) -> Option<OccurrenceWindow> {
        eval::next_occurrence(Some(self), now)
    }

    /// Compute the next occurrence window after the current instant in the
    /// host's local time zone.
    pub fn next(&self) -> Option<OccurrenceWindow> {
        self.next_from(&Zoned::now())
    }
}

impl Schedule {
    /// Compute the next occurrence window after `now`.
    pub fn next_from(&self, now: &Zoned) -> Option<OccurrenceWindow> {
        eval::next_from(self, now)
    }
}
