//! Value formatting helpers shared by the screens
//!
//! Speeds arrive in knots, distances in meters, times in UTC.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde_json::Value;

use crate::i18n::translate;

const KNOTS_TO_KMH: f64 = 1.852;
const KNOTS_TO_MPH: f64 = 1.150_78;
const METERS_TO_MILES: f64 = 0.000_621_371;
const METERS_TO_NAUTICAL_MILES: f64 = 0.000_539_957;
const METERS_TO_FEET: f64 = 3.280_84;

/// How much of a timestamp to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    /// `YYYY-MM-DD`
    Date,
    /// Clock time only
    Time,
    /// Date plus hours and minutes
    Minutes,
    /// Date plus full clock time
    Seconds,
}

/// Speed display unit (`speedUnit` preference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedUnit {
    #[default]
    Knots,
    Kmh,
    Mph,
}

/// Distance display unit (`distanceUnit` preference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Km,
    Mi,
    Nmi,
}

/// Altitude display unit (`altitudeUnit` preference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AltitudeUnit {
    #[default]
    Meters,
    Feet,
}

impl SpeedUnit {
    /// Parses the preference value, unknown values give the default
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("kmh") => SpeedUnit::Kmh,
            Some("mph") => SpeedUnit::Mph,
            _ => SpeedUnit::Knots,
        }
    }
}

impl DistanceUnit {
    /// Parses the preference value, unknown values give the default
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("mi") => DistanceUnit::Mi,
            Some("nmi") => DistanceUnit::Nmi,
            _ => DistanceUnit::Km,
        }
    }
}

impl AltitudeUnit {
    /// Parses the preference value, unknown values give the default
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("ft") => AltitudeUnit::Feet,
            _ => AltitudeUnit::Meters,
        }
    }
}

/// Display preferences resolved from the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatContext {
    pub hours12: bool,
    pub speed_unit: SpeedUnit,
    pub distance_unit: DistanceUnit,
    pub altitude_unit: AltitudeUnit,
    /// Offset timestamps are shown in
    pub offset: FixedOffset,
}

impl Default for FormatContext {
    fn default() -> Self {
        Self {
            hours12: false,
            speed_unit: SpeedUnit::default(),
            distance_unit: DistanceUnit::default(),
            altitude_unit: AltitudeUnit::default(),
            offset: utc_offset(),
        }
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Formats a timestamp in the given offset, empty when absent
pub fn format_time(
    value: Option<&DateTime<Utc>>,
    style: TimeStyle,
    hours12: bool,
    offset: FixedOffset,
) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let pattern = match (style, hours12) {
        (TimeStyle::Date, _) => "%Y-%m-%d",
        (TimeStyle::Time, false) => "%H:%M:%S",
        (TimeStyle::Time, true) => "%I:%M:%S %p",
        (TimeStyle::Minutes, false) => "%Y-%m-%d %H:%M",
        (TimeStyle::Minutes, true) => "%Y-%m-%d %I:%M %p",
        (TimeStyle::Seconds, false) => "%Y-%m-%d %H:%M:%S",
        (TimeStyle::Seconds, true) => "%Y-%m-%d %I:%M:%S %p",
    };
    value.with_timezone(&offset).format(pattern).to_string()
}

/// Decimal degrees with six places
pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}°", value)
}

/// Converts knots to the display unit
pub fn format_speed(knots: f64, unit: SpeedUnit) -> String {
    match unit {
        SpeedUnit::Knots => format!("{:.2} {}", knots, translate("sharedKn")),
        SpeedUnit::Kmh => format!("{:.2} {}", knots * KNOTS_TO_KMH, translate("sharedKmh")),
        SpeedUnit::Mph => format!("{:.2} {}", knots * KNOTS_TO_MPH, translate("sharedMph")),
    }
}

/// Converts meters to the display unit
pub fn format_distance(meters: f64, unit: DistanceUnit) -> String {
    match unit {
        DistanceUnit::Km => format!("{:.2} {}", meters / 1000.0, translate("sharedKm")),
        DistanceUnit::Mi => format!("{:.2} {}", meters * METERS_TO_MILES, translate("sharedMi")),
        DistanceUnit::Nmi => format!(
            "{:.2} {}",
            meters * METERS_TO_NAUTICAL_MILES,
            translate("sharedNmi")
        ),
    }
}

/// Converts meters to the altitude display unit
pub fn format_altitude(meters: f64, unit: AltitudeUnit) -> String {
    match unit {
        AltitudeUnit::Meters => format!("{:.2} {}", meters, translate("sharedMeters")),
        AltitudeUnit::Feet => format!("{:.2} {}", meters * METERS_TO_FEET, translate("sharedFeet")),
    }
}

/// Course as one of eight arrows, north up
pub fn format_course(degrees: f64) -> String {
    const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
    let normalized = (degrees + 22.5).rem_euclid(360.0);
    let index = (normalized / 45.0) as usize % ARROWS.len();
    ARROWS[index].to_string()
}

/// Yes/No
pub fn format_boolean(value: bool) -> String {
    translate(if value { "sharedYes" } else { "sharedNo" }).to_string()
}

/// Integers as-is, fractions with two decimals
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Generic rendering of an arbitrary JSON value
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => format_boolean(*b),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}
