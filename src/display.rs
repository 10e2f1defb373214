use std::fmt;

use jiff::Zoned;

use crate::schedule::*;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Short display form: `Wed, Mar 13, 8:00 AM`.
pub fn format_short(dt: &Zoned) -> String {
    let weekday = Weekday::from_jiff(dt.weekday());
    let (hour, meridiem) = twelve_hour(dt.hour());
    format!(
        "{}, {} {}, {hour}:{:02} {meridiem}",
        weekday.short(),
        &month_name(dt.month())[..3],
        dt.day(),
        dt.minute(),
    )
}

/// Narrative form: `Wednesday, March 13th at 8 AM`, or `at 8:30 AM` when
/// the minute is non-zero.
pub fn format_description(dt: &Zoned) -> String {
    let weekday = Weekday::from_jiff(dt.weekday());
    let (hour, meridiem) = twelve_hour(dt.hour());
    let day = dt.day() as u8;
    let minutes = match dt.minute() {
        0 => String::new(),
        m => format!(":{m:02}"),
    };
    format!(
        "{}, {} {day}{} at {hour}{minutes} {meridiem}",
        weekday.name(),
        month_name(dt.month()),
        ordinal_suffix(day),
    )
}

/// English ordinal suffix for a day of month: 1st, 2nd, 3rd, 4th, 11th, 21st.
pub fn ordinal_suffix(day: u8) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Basic calendar stamp `YYYYMMDDTHHMMSS` built from the local wall-clock
/// fields. No conversion to UTC is done and no `Z` is appended.
pub fn calendar_stamp(dt: &Zoned) -> String {
    format!(
        "{:04}{:02}{:02}T{:02}{:02}00",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
    )
}

/// The `dates` value of an external calendar link: `<start>/<end>`.
pub fn calendar_dates(window: &OccurrenceWindow) -> String {
    format!(
        "{}/{}",
        calendar_stamp(&window.start),
        calendar_stamp(&window.end)
    )
}

fn month_name(month: i8) -> &'static str {
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

fn twelve_hour(hour: i8) -> (i8, &'static str) {
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    match hour % 12 {
        0 => (12, meridiem),
        h => (h, meridiem),
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, meridiem) = twelve_hour(self.hour() as i8);
        write!(f, "{hour}:{:02} {meridiem}", self.minute())
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Weekly { day } => write!(f, "every {day}"),
            Recurrence::Biweekly { day, weeks } => {
                for (i, n) in weeks.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{n}{}", ordinal_suffix(*n as u8))?;
                }
                write!(f, " {day} of the month")
            }
            Recurrence::Monthly { day, week } => match week {
                Some(n) => write!(f, "{n}{} {day} of the month", ordinal_suffix(*n as u8)),
                None => write!(f, "monthly on {day}"),
            },
        }
    }
}

impl fmt::Display for OccurrenceWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} until {}",
            format_short(&self.start),
            format_short(&self.end)
        )
    }
}
