//! Street-segment data loading.
//!
//! Segment properties carry one schedule per street side. A schedule value may
//! be a structured record or a JSON string (sometimes with a stray trailing
//! comma); both are normalized here into a [`ScheduleDescriptor`] before the
//! resolver sees them.

use std::collections::BTreeMap;

use jiff::Zoned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::display::format_short;
use crate::error::ScheduleError;
use crate::eval::next_occurrence;
use crate::schedule::{loose_string, OccurrenceWindow, ScheduleDescriptor};

/// Shown in place of a date when a side has no next occurrence.
pub const NOT_AVAILABLE: &str = "Not available";

/// Street name used when a segment has neither `name` nor `NAME`.
pub const UNKNOWN_STREET: &str = "Unknown Street";

/// A schedule value as found in segment properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSchedule {
    Text(String),
    /// A JSON object. Arrays are never read as records.
    Record(ScheduleDescriptor),
    /// Numbers, arrays and the like; never resolves.
    Other(Value),
}

impl<'de> Deserialize<'de> for RawSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self::Text(s)),
            v @ Value::Object(_) => record(v)
                .map(Self::Record)
                .map_err(serde::de::Error::custom),
            v => Ok(Self::Other(v)),
        }
    }
}

/// Read a record from a JSON object; any other value is rejected.
fn record(value: Value) -> Result<ScheduleDescriptor, serde_json::Error> {
    match value {
        v @ Value::Object(_) => serde_json::from_value(v),
        _ => Err(serde::de::Error::custom(
            "schedule is neither a record nor a string",
        )),
    }
}

impl RawSchedule {
    /// Normalize into a schedule record.
    pub fn resolve(&self) -> Result<ScheduleDescriptor, ScheduleError> {
        match self {
            Self::Record(d) => Ok(d.clone()),
            Self::Text(s) => {
                let trimmed = s.trim();
                let cleaned = trimmed.strip_suffix(',').unwrap_or(trimmed);
                serde_json::from_str(cleaned)
                    .and_then(record)
                    .map_err(|e| ScheduleError::json(e.to_string(), s))
            }
            Self::Other(v) => Err(ScheduleError::json(
                "schedule is neither a record nor a string",
                v.to_string(),
            )),
        }
    }

    /// Blank text counts as no schedule at all.
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

/// Normalize a schedule value, logging and discarding values that do not parse.
pub fn parse_schedule(raw: &RawSchedule) -> Option<ScheduleDescriptor> {
    match raw.resolve() {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(error = %e, "error parsing schedule");
            None
        }
    }
}

/// A side of a street segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    /// Property-key prefix: `north` for `north_schedule`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
            Self::East => "East",
            Self::West => "West",
        }
    }
}

/// The next occurrence of one side's schedule, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideSummary {
    /// Short display form of the start, or [`NOT_AVAILABLE`].
    pub next: String,
    /// Short display form of the end, or [`NOT_AVAILABLE`].
    pub until: String,
    #[serde(serialize_with = "zoned_opt")]
    pub next_date: Option<Zoned>,
    #[serde(serialize_with = "zoned_opt")]
    pub until_date: Option<Zoned>,
    pub schedule: ScheduleDescriptor,
}

impl SideSummary {
    pub fn new(schedule: ScheduleDescriptor, now: &Zoned) -> Self {
        let window = next_occurrence(Some(&schedule), now);
        Self::from_window(schedule, window)
    }

    pub fn from_window(schedule: ScheduleDescriptor, window: Option<OccurrenceWindow>) -> Self {
        match window {
            Some(OccurrenceWindow { start, end }) => Self {
                next: format_short(&start),
                until: format_short(&end),
                next_date: Some(start),
                until_date: Some(end),
                schedule,
            },
            None => Self {
                next: NOT_AVAILABLE.to_string(),
                until: NOT_AVAILABLE.to_string(),
                next_date: None,
                until_date: None,
                schedule,
            },
        }
    }

    pub fn window(&self) -> Option<OccurrenceWindow> {
        match (&self.next_date, &self.until_date) {
            (Some(start), Some(end)) => Some(OccurrenceWindow {
                start: start.clone(),
                end: end.clone(),
            }),
            _ => None,
        }
    }
}

fn zoned_opt<S: Serializer>(value: &Option<Zoned>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(z) => serializer.serialize_str(&z.to_string()),
        None => serializer.serialize_none(),
    }
}

/// The properties of one street-segment feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StreetSegment {
    #[serde(deserialize_with = "loose_string")]
    name: Option<String>,
    #[serde(rename = "NAME", deserialize_with = "loose_string")]
    upper_name: Option<String>,
    pub north_schedule: Option<RawSchedule>,
    pub south_schedule: Option<RawSchedule>,
    pub east_schedule: Option<RawSchedule>,
    pub west_schedule: Option<RawSchedule>,
}

impl StreetSegment {
    /// `name`, then `NAME`, then [`UNKNOWN_STREET`].
    pub fn street_name(&self) -> &str {
        [&self.name, &self.upper_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_STREET)
    }

    pub fn schedule(&self, side: Side) -> Option<&RawSchedule> {
        match side {
            Side::North => self.north_schedule.as_ref(),
            Side::South => self.south_schedule.as_ref(),
            Side::East => self.east_schedule.as_ref(),
            Side::West => self.west_schedule.as_ref(),
        }
    }

    /// Next occurrence per side. Sides without a schedule, or whose schedule
    /// text does not parse, are left out.
    pub fn summarize(&self, now: &Zoned) -> BTreeMap<Side, SideSummary> {
        let mut sides = BTreeMap::new();
        for side in Side::ALL {
            let Some(raw) = self.schedule(side).filter(|r| !r.is_blank()) else {
                continue;
            };
            let Some(descriptor) = parse_schedule(raw) else {
                continue;
            };
            let summary = SideSummary::new(descriptor, now);
            tracing::debug!(
                street = self.street_name(),
                side = side.as_str(),
                next = %summary.next,
                "resolved side schedule"
            );
            sides.insert(side, summary);
        }
        sides
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<StreetSegment>,
}

/// Parse the street segments of a GeoJSON feature collection.
pub fn load_segments(json: &str) -> Result<Vec<StreetSegment>, ScheduleError> {
    let collection: FeatureCollection =
        serde_json::from_str(json).map_err(|e| ScheduleError::json(e.to_string(), json))?;
    Ok(collection
        .features
        .into_iter()
        .map(|f| f.properties.unwrap_or_default())
        .collect())
}

/// Data file name for a neighborhood: lowercased, whitespace removed.
///
/// `"Silver Lake"` becomes `silverlake.geojson`.
pub fn neighborhood_file_name(name: &str) -> String {
    let stem: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("{stem}.geojson")
}

/// Serializable summary of one segment, as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentReport {
    pub street: String,
    pub sides: BTreeMap<Side, SideSummary>,
}

impl SegmentReport {
    pub fn new(segment: &StreetSegment, now: &Zoned) -> Self {
        Self {
            street: segment.street_name().to_string(),
            sides: segment.summarize(now),
        }
    }
}
