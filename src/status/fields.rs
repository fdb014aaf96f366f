//! Closed set of position field kinds shown on the status card

use crate::i18n::translate;

/// A position field or attribute the card knows how to label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositionField {
    Identifier,
    DeviceTime,
    FixTime,
    ServerTime,
    Latitude,
    Longitude,
    Speed,
    Course,
    Altitude,
    Accuracy,
    Valid,
    Address,
    Protocol,
    Event,
    Odometer,
    Geofences,
    Ignition,
    Distance,
    /// Any other property or attribute, labeled by its key
    Other(String),
}

impl PositionField {
    /// Maps a wire key to its field kind
    pub fn from_key(key: &str) -> Self {
        match key {
            "id" => PositionField::Identifier,
            "deviceTime" => PositionField::DeviceTime,
            "fixTime" => PositionField::FixTime,
            "serverTime" => PositionField::ServerTime,
            "latitude" => PositionField::Latitude,
            "longitude" => PositionField::Longitude,
            "speed" => PositionField::Speed,
            "course" => PositionField::Course,
            "altitude" => PositionField::Altitude,
            "accuracy" => PositionField::Accuracy,
            "valid" => PositionField::Valid,
            "address" => PositionField::Address,
            "protocol" => PositionField::Protocol,
            "event" => PositionField::Event,
            "odometer" => PositionField::Odometer,
            "geofenceIds" => PositionField::Geofences,
            "ignition" => PositionField::Ignition,
            "distance" => PositionField::Distance,
            other => PositionField::Other(other.to_string()),
        }
    }

    /// Wire key
    pub fn key(&self) -> &str {
        match self {
            PositionField::Identifier => "id",
            PositionField::DeviceTime => "deviceTime",
            PositionField::FixTime => "fixTime",
            PositionField::ServerTime => "serverTime",
            PositionField::Latitude => "latitude",
            PositionField::Longitude => "longitude",
            PositionField::Speed => "speed",
            PositionField::Course => "course",
            PositionField::Altitude => "altitude",
            PositionField::Accuracy => "accuracy",
            PositionField::Valid => "valid",
            PositionField::Address => "address",
            PositionField::Protocol => "protocol",
            PositionField::Event => "event",
            PositionField::Odometer => "odometer",
            PositionField::Geofences => "geofenceIds",
            PositionField::Ignition => "ignition",
            PositionField::Distance => "distance",
            PositionField::Other(key) => key,
        }
    }

    /// String key of the label; unknown fields use their wire key
    pub fn label_key(&self) -> &str {
        match self {
            PositionField::Identifier => "positionIdentifier",
            PositionField::DeviceTime => "positionDeviceTime",
            PositionField::FixTime => "positionFixTime",
            PositionField::ServerTime => "positionServerTime",
            PositionField::Latitude => "positionLatitude",
            PositionField::Longitude => "positionLongitude",
            PositionField::Speed => "positionSpeed",
            PositionField::Course => "positionCourse",
            PositionField::Altitude => "positionAltitude",
            PositionField::Accuracy => "positionAccuracy",
            PositionField::Valid => "positionValid",
            PositionField::Address => "positionAddress",
            PositionField::Protocol => "positionProtocol",
            PositionField::Event => "positionEvent",
            PositionField::Odometer => "positionOdometer",
            PositionField::Geofences => "sharedGeofences",
            PositionField::Ignition => "positionIgnition",
            PositionField::Distance => "positionDistance",
            PositionField::Other(key) => key,
        }
    }

    /// Localized display label
    pub fn label(&self) -> &str {
        translate(self.label_key())
    }

    /// Icon glyph, if the field has one
    pub fn icon(&self) -> Option<&'static str> {
        let icon = match self {
            PositionField::Identifier => "🆔",
            PositionField::DeviceTime => "🕓",
            PositionField::FixTime => "🔄",
            PositionField::ServerTime => "☁",
            PositionField::Latitude | PositionField::Longitude => "📍",
            PositionField::Speed => "⏱",
            PositionField::Course => "🧭",
            PositionField::Altitude => "⛰",
            PositionField::Accuracy => "🎯",
            PositionField::Valid => "✔",
            PositionField::Address => "🏠",
            PositionField::Protocol => "📡",
            PositionField::Event => "📋",
            PositionField::Odometer => "🔢",
            PositionField::Geofences => "🗺",
            PositionField::Ignition => "🔌",
            PositionField::Distance => "🚗",
            PositionField::Other(_) => return None,
        };
        Some(icon)
    }
}
