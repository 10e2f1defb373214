//! Lenient interpretation of schedule records.
//!
//! Every function here is total. Unknown weekday names fall back to Sunday,
//! unknown ordinal tokens are dropped, and time strings that do not look like
//! `H:MM AM/PM` read as "no time". The only way a record fails to produce a
//! [`Schedule`] is a missing day or an unrecognized frequency.

use crate::schedule::{Frequency, Recurrence, Schedule, ScheduleDescriptor, TimeOfDay, Weekday};

/// Interpret a schedule record.
pub fn parse(descriptor: &ScheduleDescriptor) -> Option<Schedule> {
    let day = match descriptor.day.as_deref() {
        Some(d) if !d.is_empty() => parse_weekday(d),
        _ => return None,
    };

    let recurrence = match parse_frequency(descriptor.frequency.as_deref()) {
        Frequency::Weekly => Recurrence::Weekly { day },
        Frequency::Biweekly => Recurrence::Biweekly {
            day,
            weeks: parse_weeks(descriptor.week.as_deref().unwrap_or("")),
        },
        Frequency::Monthly => Recurrence::Monthly {
            day,
            week: descriptor.week.as_deref().and_then(parse_ordinal),
        },
        Frequency::Unrecognized => return None,
    };

    Some(Schedule {
        recurrence,
        start_time: descriptor.start_time.as_deref().and_then(parse_time),
        end_time: descriptor.end_time.as_deref().and_then(parse_time),
    })
}

/// Frequency names are matched exactly.
pub fn parse_frequency(s: Option<&str>) -> Frequency {
    match s {
        Some("weekly") => Frequency::Weekly,
        Some("biweekly") => Frequency::Biweekly,
        Some("monthly") => Frequency::Monthly,
        _ => Frequency::Unrecognized,
    }
}

/// Case-insensitive weekday name; anything unrecognized is Sunday.
///
/// Surrounding whitespace is not stripped, so `" tuesday"` is Sunday.
pub fn parse_weekday(s: &str) -> Weekday {
    match s.to_lowercase().as_str() {
        "sunday" | "sun" => Weekday::Sunday,
        "monday" | "mon" => Weekday::Monday,
        "tuesday" | "tue" | "tues" => Weekday::Tuesday,
        "wednesday" | "wed" => Weekday::Wednesday,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thursday,
        "friday" | "fri" => Weekday::Friday,
        "saturday" | "sat" => Weekday::Saturday,
        _ => Weekday::Sunday,
    }
}

/// Parse a comma-separated ordinal week list such as `"2nd, 4th"` or `"1,3"`.
///
/// Each token contributes every ordinal (1 to 4) it contains as `1st`..`4th`,
/// or the one it equals as a bare digit. Tokens matching nothing are dropped.
pub fn parse_weeks(s: &str) -> Vec<u32> {
    const ORDINALS: [(&str, &str, u32); 4] = [
        ("1st", "1", 1),
        ("2nd", "2", 2),
        ("3rd", "3", 3),
        ("4th", "4", 4),
    ];

    let lower = s.to_lowercase();
    let mut weeks = Vec::new();
    for part in lower.split(',').map(str::trim) {
        for (suffixed, bare, n) in ORDINALS {
            if part.contains(suffixed) || part == bare {
                weeks.push(n);
            }
        }
    }
    weeks
}

/// Extract a single ordinal by discarding every non-digit character.
///
/// `"2nd"` is 2. `"last"` has no digits and yields `None`.
pub fn parse_ordinal(s: &str) -> Option<u32> {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Find the first `<digits>:<digits>[spaces](AM|PM)` run in `s`.
///
/// 12 PM stays 12, 12 AM becomes 0 and other PM hours gain 12. Hours above 12
/// and minutes above 59 are rejected.
pub fn parse_time(s: &str) -> Option<TimeOfDay> {
    let bytes = s.as_bytes();
    let (hour, minute, pm) = (0..bytes.len()).find_map(|i| match_time_at(bytes, i))?;

    let hour: u8 = hour.parse().ok()?;
    let minute: u8 = minute.parse().ok()?;
    if hour > 12 {
        return None;
    }
    let hour = match (pm, hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };
    TimeOfDay::new(hour, minute)
}

/// Try to match a clock time starting exactly at `start`.
fn match_time_at(bytes: &[u8], start: usize) -> Option<(&str, &str, bool)> {
    let digits_from = |from: usize| {
        let len = bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        (len > 0).then_some(from + len)
    };

    let hour_end = digits_from(start)?;
    if bytes.get(hour_end) != Some(&b':') {
        return None;
    }
    let minute_end = digits_from(hour_end + 1)?;

    let mut pos = minute_end;
    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }
    let meridiem = bytes.get(pos..pos + 2)?;
    let pm = if meridiem.eq_ignore_ascii_case(b"pm") {
        true
    } else if meridiem.eq_ignore_ascii_case(b"am") {
        false
    } else {
        return None;
    };

    // Only ASCII digits lie in these ranges, so they are valid UTF-8.
    let hour = std::str::from_utf8(&bytes[start..hour_end]).ok()?;
    let minute = std::str::from_utf8(&bytes[hour_end + 1..minute_end]).ok()?;
    Some((hour, minute, pm))
}
