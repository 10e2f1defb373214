//! End-to-end resolver scenarios through the public API.

use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use jiff::Zoned;
use sweepday::display::{format_description, format_short};
use sweepday::eval::next_occurrence;
use sweepday::{Frequency, ScheduleDescriptor, Weekday};

fn at(y: i16, m: i8, d: i8, hour: i8, minute: i8) -> Zoned {
    Date::new(y, m, d)
        .unwrap()
        .to_datetime(Time::new(hour, minute, 0, 0).unwrap())
        .to_zoned(TimeZone::UTC)
        .unwrap()
}

fn schedule(frequency: &str, day: &str, week: Option<&str>) -> ScheduleDescriptor {
    ScheduleDescriptor {
        frequency: Some(frequency.into()),
        day: Some(day.into()),
        week: week.map(Into::into),
        start_time: Some("8:00 AM".into()),
        end_time: Some("12:00 PM".into()),
    }
}

// =============================================================================
// Weekly
// =============================================================================

#[test]
fn weekly_same_weekday_goes_to_next_week() {
    // 2024-03-06 is a Wednesday; the window later today is still skipped.
    let s = schedule("weekly", "wednesday", None);
    let w = s.next_from(&at(2024, 3, 6, 6, 0)).unwrap();
    assert_eq!(w.start.date(), Date::new(2024, 3, 13).unwrap());
    assert_eq!(w.start.time(), Time::new(8, 0, 0, 0).unwrap());
    assert_eq!(w.end.date(), Date::new(2024, 3, 13).unwrap());
    assert_eq!(w.end.time(), Time::new(12, 0, 0, 0).unwrap());
}

#[test]
fn weekly_abbreviation_matches_full_name() {
    let now = at(2024, 3, 6, 6, 0);
    let full = schedule("weekly", "Tuesday", None).next_from(&now);
    let short = schedule("weekly", "Tues", None).next_from(&now);
    assert_eq!(full, short);
    assert_eq!(full.unwrap().start.date(), Date::new(2024, 3, 12).unwrap());
}

#[test]
fn weekly_unknown_day_is_sunday() {
    let w = schedule("weekly", "Funday", None)
        .next_from(&at(2024, 3, 6, 6, 0))
        .unwrap();
    assert_eq!(w.start.date(), Date::new(2024, 3, 10).unwrap());
    assert_eq!(w.start.weekday(), jiff::civil::Weekday::Sunday);
}

// =============================================================================
// Monthly
// =============================================================================

#[test]
fn monthly_second_tuesday() {
    let w = schedule("monthly", "tuesday", Some("2nd"))
        .next_from(&at(2024, 3, 1, 0, 0))
        .unwrap();
    assert_eq!(w.start.date(), Date::new(2024, 3, 12).unwrap());
}

#[test]
fn monthly_without_week_is_not_available() {
    let s = schedule("monthly", "tuesday", None);
    assert_eq!(s.next_from(&at(2024, 3, 1, 0, 0)), None);
    let s = schedule("monthly", "tuesday", Some("last"));
    assert_eq!(s.next_from(&at(2024, 3, 1, 0, 0)), None);
}

// =============================================================================
// Biweekly
// =============================================================================

#[test]
fn biweekly_first_and_third() {
    // 2024-03: Mondays are 4, 11, 18, 25
    let s = schedule("biweekly", "mon", Some("1st,3rd"));
    assert_eq!(
        s.next_from(&at(2024, 3, 1, 0, 0)).unwrap().start.date(),
        Date::new(2024, 3, 4).unwrap()
    );
    assert_eq!(
        s.next_from(&at(2024, 3, 5, 0, 0)).unwrap().start.date(),
        Date::new(2024, 3, 18).unwrap()
    );
    assert_eq!(
        s.next_from(&at(2024, 3, 19, 0, 0)).unwrap().start.date(),
        Date::new(2024, 4, 1).unwrap()
    );
}

#[test]
fn biweekly_empty_or_invalid_weeks() {
    let now = at(2024, 3, 1, 0, 0);
    assert_eq!(schedule("biweekly", "mon", Some("")).next_from(&now), None);
    assert_eq!(schedule("biweekly", "mon", None).next_from(&now), None);
    assert_eq!(
        schedule("biweekly", "mon", Some("last, fifth")).next_from(&now),
        None
    );
}

#[test]
fn biweekly_december_rolls_into_january() {
    // Fridays in Dec 2024: 6, 13, 20, 27. Jan 2025: 3, 10, ...
    let s = schedule("biweekly", "friday", Some("2nd, 4th"));
    let w = s.next_from(&at(2024, 12, 28, 0, 0)).unwrap();
    assert_eq!(w.start.date(), Date::new(2025, 1, 10).unwrap());
}

// =============================================================================
// Input validation
// =============================================================================

#[test]
fn absent_inputs_are_not_available() {
    let now = at(2024, 3, 1, 0, 0);
    assert_eq!(next_occurrence(None, &now), None);

    let mut s = schedule("weekly", "monday", None);
    s.day = None;
    assert_eq!(next_occurrence(Some(&s), &now), None);

    let s = schedule("fortnightly", "monday", None);
    assert_eq!(next_occurrence(Some(&s), &now), None);
}

#[test]
fn unparseable_times_are_midnight() {
    let mut s = schedule("weekly", "friday", None);
    s.start_time = Some("early".into());
    s.end_time = None;
    let w = s.next_from(&at(2024, 3, 6, 12, 0)).unwrap();
    assert_eq!(w.start.time(), Time::midnight());
    assert_eq!(w.end.time(), Time::midnight());
    assert_eq!(w.start.date(), Date::new(2024, 3, 8).unwrap());
}

#[test]
fn parsed_schedule_reports_day_and_frequency() {
    let parsed = schedule("biweekly", "thurs", Some("1st, 3rd")).parse().unwrap();
    assert_eq!(parsed.recurrence.day(), Weekday::Thursday);
    assert_eq!(parsed.recurrence.frequency(), Frequency::Biweekly);
    assert_eq!(
        parsed.next_from(&at(2024, 3, 6, 9, 0)).unwrap().start.date(),
        Date::new(2024, 3, 21).unwrap()
    );
}

#[test]
fn next_uses_current_clock() {
    let before = Zoned::now();
    let w = schedule("weekly", "friday", None).next().unwrap();
    assert_eq!(w.start.weekday(), jiff::civil::Weekday::Friday);
    assert!(w.start.timestamp() > before.timestamp());
    assert_eq!(
        w.start.time_zone().iana_name(),
        before.time_zone().iana_name()
    );
}

#[test]
fn repeated_calls_agree() {
    let s = schedule("biweekly", "thu", Some("2nd, 4th"));
    let now = at(2024, 3, 6, 9, 0);
    assert_eq!(s.next_from(&now), s.next_from(&now));
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn formatted_window() {
    let w = schedule("weekly", "wednesday", None)
        .next_from(&at(2024, 3, 6, 6, 0))
        .unwrap();
    assert_eq!(format_short(&w.start), "Wed, Mar 13, 8:00 AM");
    assert_eq!(format_short(&w.end), "Wed, Mar 13, 12:00 PM");
    assert_eq!(format_description(&w.start), "Wednesday, March 13th at 8 AM");
    assert_eq!(w.to_string(), "Wed, Mar 13, 8:00 AM until Wed, Mar 13, 12:00 PM");
}
