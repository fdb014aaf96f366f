//! Selecting and formatting the rows of the status card

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fields::PositionField;
use crate::api::Position;
use crate::format::{
    format_altitude, format_boolean, format_coordinate, format_course, format_distance,
    format_speed, format_time, format_value, FormatContext, TimeStyle,
};

/// Where a row's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Fixed position schema
    Property,
    /// Open attribute mapping
    Attribute,
}

/// One row of the status card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusItem {
    pub field: PositionField,
    pub source: ValueSource,
}

/// Rows to render for `position`, in `position_items` order.
///
/// Keys are taken verbatim between commas. A key is kept only if the
/// position carries it as a property or an attribute; properties shadow
/// attributes of the same name.
pub fn visible_items(position_items: &str, position: &Position) -> Vec<StatusItem> {
    position_items
        .split(',')
        .filter_map(|key| StatusItem::for_key(key, position))
        .collect()
}

impl StatusItem {
    /// Row for `key`, or `None` if the position carries no such value
    pub fn for_key(key: &str, position: &Position) -> Option<Self> {
        let source = if position.has_property(key) {
            ValueSource::Property
        } else if position.has_attribute(key) {
            ValueSource::Attribute
        } else {
            return None;
        };
        Some(StatusItem {
            field: PositionField::from_key(key),
            source,
        })
    }

    /// Formats the row value for display
    pub fn value(&self, position: &Position, ctx: &FormatContext) -> String {
        match self.source {
            ValueSource::Property => property_value(&self.field, position, ctx),
            ValueSource::Attribute => position
                .attribute(self.field.key())
                .map(|value| attribute_value(&self.field, value, ctx))
                .unwrap_or_default(),
        }
    }
}

fn property_value(field: &PositionField, position: &Position, ctx: &FormatContext) -> String {
    let time = |value: Option<&DateTime<Utc>>| {
        format_time(value, TimeStyle::Seconds, ctx.hours12, ctx.offset)
    };
    match field {
        PositionField::Identifier => position.id.to_string(),
        PositionField::DeviceTime => time(position.device_time.as_ref()),
        PositionField::FixTime => time(position.fix_time.as_ref()),
        PositionField::ServerTime => time(position.server_time.as_ref()),
        PositionField::Latitude => format_coordinate(position.latitude),
        PositionField::Longitude => format_coordinate(position.longitude),
        PositionField::Speed => format_speed(position.speed, ctx.speed_unit),
        PositionField::Course => format_course(position.course),
        PositionField::Altitude => format_altitude(position.altitude, ctx.altitude_unit),
        PositionField::Accuracy => format_distance(position.accuracy, ctx.distance_unit),
        PositionField::Valid => format_boolean(position.valid),
        PositionField::Address => position.address.clone().unwrap_or_default(),
        PositionField::Protocol => position.protocol.clone().unwrap_or_default(),
        other => position
            .property(other.key())
            .map(|value| format_value(&value))
            .unwrap_or_default(),
    }
}

fn attribute_value(field: &PositionField, value: &Value, ctx: &FormatContext) -> String {
    match (field, value.as_f64()) {
        (PositionField::Distance | PositionField::Odometer, Some(meters)) => {
            format_distance(meters, ctx.distance_unit)
        }
        (PositionField::Other(key), Some(meters)) if key == "totalDistance" => {
            format_distance(meters, ctx.distance_unit)
        }
        _ => format_value(value),
    }
}
