use jiff::civil::{Date, Time};
use jiff::{Span, Zoned};

use crate::parser;
use crate::schedule::{
    OccurrenceWindow, Recurrence, Schedule, ScheduleDescriptor, TimeOfDay, Weekday,
};

/// Compute the next occurrence window of a schedule record after `now`.
///
/// Returns `None` ("not available") when the record is absent, has no day,
/// has an unrecognized frequency, or no matching date exists in the months
/// searched. Dates are civil dates in the time zone of `now`.
pub fn next_occurrence(
    schedule: Option<&ScheduleDescriptor>,
    now: &Zoned,
) -> Option<OccurrenceWindow> {
    let schedule = parser::parse(schedule?)?;
    next_from(&schedule, now)
}

/// Compute the next occurrence window of an interpreted schedule after `now`.
pub fn next_from(schedule: &Schedule, now: &Zoned) -> Option<OccurrenceWindow> {
    let date = next_date(&schedule.recurrence, now)?;
    let tz = now.time_zone();

    let start = date
        .to_datetime(time_or_midnight(schedule.start_time))
        .to_zoned(tz.clone())
        .ok()?;
    let end = date
        .to_datetime(time_or_midnight(schedule.end_time))
        .to_zoned(tz.clone())
        .ok()?;

    tracing::trace!(%start, %end, "resolved occurrence window");
    Some(OccurrenceWindow { start, end })
}

/// The civil date of the next occurrence, before any time of day is applied.
pub fn next_date(recurrence: &Recurrence, now: &Zoned) -> Option<Date> {
    match recurrence {
        Recurrence::Weekly { day } => next_weekly(*day, now),
        Recurrence::Biweekly { day, weeks } => next_in_months(*day, weeks, now),
        Recurrence::Monthly { day, week } => next_in_months(*day, &[(*week)?], now),
    }
}

fn time_or_midnight(time: Option<TimeOfDay>) -> Time {
    time.map(|t| t.to_jiff()).unwrap_or(Time::midnight())
}

/// A candidate date counts only if its midnight is strictly after `now`.
fn is_after(date: Date, now: &Zoned) -> bool {
    date.to_datetime(Time::midnight()) > now.datetime()
}

/// First matching weekday on a later calendar date than `now`.
///
/// Today never qualifies, even when its window has not started yet.
fn next_weekly(day: Weekday, now: &Zoned) -> Option<Date> {
    let target = day.to_jiff();
    let mut date = now.date();
    for _ in 0..7 {
        date = date.tomorrow().ok()?;
        if date.weekday() == target {
            return Some(date);
        }
    }
    None
}

/// Scan the ordinals, in the order given, for the current month and then the
/// following one, returning the first candidate after `now`.
fn next_in_months(day: Weekday, ordinals: &[u32], now: &Zoned) -> Option<Date> {
    let scan = |month: Date| {
        ordinals
            .iter()
            .filter_map(|&n| nth_weekday_of_month(month.year(), month.month(), day, n))
            .find(|&candidate| is_after(candidate, now))
    };

    let this_month = now.date().first_of_month();
    scan(this_month).or_else(|| {
        let next_month = this_month.checked_add(Span::new().months(1)).ok()?;
        scan(next_month)
    })
}

/// Get the nth occurrence (1-indexed) of `weekday` in a month (1-12).
///
/// Returns `None` if the month has fewer than `n` such days, or for `n == 0`.
pub fn nth_weekday_of_month(year: i16, month: i8, weekday: Weekday, n: u32) -> Option<Date> {
    let first = Date::new(year, month, 1).ok()?;
    let target = weekday.to_jiff();
    let mut count = 0;
    for day in 1..=first.days_in_month() {
        let date = Date::new(year, month, day).ok()?;
        if date.weekday() == target {
            count += 1;
            if count == n {
                return Some(date);
            }
        }
    }
    None
}
