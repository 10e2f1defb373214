use jiff::civil::Time;
use jiff::Zoned;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A schedule record as supplied by the data files.
///
/// Every field is kept as the raw string it arrived as; interpretation is
/// deferred to [`crate::parser::parse`], which never fails on bad values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleDescriptor {
    /// `weekly`, `biweekly` or `monthly`.
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "loose_string",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub frequency: Option<String>,
    /// Weekday name, full or abbreviated.
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "loose_string",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub day: Option<String>,
    /// Ordinal week(s) of the month: `"2nd, 4th"` or `"1st"`.
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "loose_string",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub week: Option<String>,
    /// `H:MM AM/PM`.
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "loose_string",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub start_time: Option<String>,
    /// `H:MM AM/PM`.
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "loose_string",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub end_time: Option<String>,
}

/// Accept strings and numbers (`"week": 2`); anything else reads as absent.
#[cfg(feature = "serde")]
pub(crate) fn loose_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A schedule record after lenient interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub recurrence: Recurrence,
    /// `None` when the start time did not parse; the window then starts at midnight.
    pub start_time: Option<TimeOfDay>,
    /// `None` when the end time did not parse; the window then ends at midnight.
    pub end_time: Option<TimeOfDay>,
}

/// The recurrence pattern (which dates the schedule falls on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// Every week on `day`.
    Weekly { day: Weekday },
    /// The listed ordinal weeks of every month, e.g. 2nd and 4th Tuesday.
    /// Ordinals are kept in the order given; duplicates are harmless.
    Biweekly { day: Weekday, weeks: Vec<u32> },
    /// One ordinal week of every month. `None` when the week had no digits.
    Monthly { day: Weekday, week: Option<u32> },
}

impl Recurrence {
    pub fn day(&self) -> Weekday {
        match self {
            Self::Weekly { day } | Self::Biweekly { day, .. } | Self::Monthly { day, .. } => *day,
        }
    }

    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Weekly { .. } => Frequency::Weekly,
            Self::Biweekly { .. } => Frequency::Biweekly,
            Self::Monthly { .. } => Frequency::Monthly,
        }
    }
}

/// Schedule frequency. Parsing is total: unknown values map to `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Unrecognized,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Day of week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Days since Sunday: Sunday=0, Saturday=6.
    pub fn index(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    pub fn from_index(n: u8) -> Option<Self> {
        match n {
            0 => Some(Self::Sunday),
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }

    pub fn to_jiff(self) -> jiff::civil::Weekday {
        match self {
            Self::Sunday => jiff::civil::Weekday::Sunday,
            Self::Monday => jiff::civil::Weekday::Monday,
            Self::Tuesday => jiff::civil::Weekday::Tuesday,
            Self::Wednesday => jiff::civil::Weekday::Wednesday,
            Self::Thursday => jiff::civil::Weekday::Thursday,
            Self::Friday => jiff::civil::Weekday::Friday,
            Self::Saturday => jiff::civil::Weekday::Saturday,
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Sunday => Self::Sunday,
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
        }
    }
}

/// Wall-clock time of day (24-hour), always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// `None` unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn to_jiff(self) -> Time {
        Time::constant(self.hour as i8, self.minute as i8, 0, 0)
    }
}

/// The next occurrence: start and end instants on the same civil date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceWindow {
    pub start: Zoned,
    pub end: Zoned,
}

#[cfg(feature = "serde")]
impl Serialize for OccurrenceWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("start", &self.start.to_string())?;
        map.serialize_entry("end", &self.end.to_string())?;
        map.end()
    }
}
