//! Wire types exchanged with the tracking server
//!
//! Field names follow the server's camelCase JSON. Unknown fields are
//! ignored everywhere so newer servers keep working.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Keys of the fixed position schema
pub const POSITION_PROPERTY_KEYS: &[&str] = &[
    "id",
    "deviceId",
    "protocol",
    "serverTime",
    "deviceTime",
    "fixTime",
    "outdated",
    "valid",
    "latitude",
    "longitude",
    "altitude",
    "speed",
    "course",
    "address",
    "accuracy",
    "network",
    "geofenceIds",
];

/// A tracked device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub unique_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub position_id: Option<i64>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Device {
    /// Name of the uploaded device image, if any
    pub fn image(&self) -> Option<&str> {
        self.attributes
            .get("deviceImage")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// A timestamped position report
///
/// Remembers which fixed keys the server actually sent, so a missing
/// `address` is told apart from an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Position {
    pub id: i64,
    pub device_id: i64,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub server_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub device_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fix_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub outdated: bool,
    #[serde(default)]
    pub valid: bool,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
    /// Speed in knots
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub course: f64,
    #[serde(default)]
    pub address: Option<String>,
    /// Accuracy in meters
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub network: Option<Value>,
    #[serde(default)]
    pub geofence_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(skip)]
    present: BTreeSet<&'static str>,
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let present = POSITION_PROPERTY_KEYS
            .iter()
            .copied()
            .filter(|key| map.contains_key(*key))
            .collect();
        let mut position = Position::deserialize(Value::Object(map)).map_err(de::Error::custom)?;
        position.present = present;
        Ok(position)
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Position::serialize(self, serializer)
    }
}

impl Position {
    /// Creates a position with only the required fields set
    pub fn new(id: i64, device_id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            device_id,
            protocol: None,
            server_time: None,
            device_time: None,
            fix_time: None,
            outdated: false,
            valid: true,
            latitude,
            longitude,
            altitude: 0.0,
            speed: 0.0,
            course: 0.0,
            address: None,
            accuracy: 0.0,
            network: None,
            geofence_ids: None,
            attributes: Map::new(),
            present: ["id", "deviceId", "latitude", "longitude"].into_iter().collect(),
        }
    }

    /// Returns true if `key` is a fixed property this position carries
    pub fn has_property(&self, key: &str) -> bool {
        self.present.contains(key)
    }

    /// Returns true if `key` belongs to the fixed position schema
    pub fn is_property_key(key: &str) -> bool {
        POSITION_PROPERTY_KEYS.contains(&key)
    }

    /// Fixed properties this position carries, in schema order
    pub fn property_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        POSITION_PROPERTY_KEYS
            .iter()
            .copied()
            .filter(|key| self.present.contains(key))
    }

    /// Marks a fixed property as carried after setting its field directly
    pub fn mark_present(&mut self, key: &str) {
        if let Some(key) = POSITION_PROPERTY_KEYS.iter().find(|k| **k == key) {
            self.present.insert(*key);
        }
    }

    /// Returns true if `key` is present in the attribute mapping
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Returns a fixed property as a JSON value
    pub fn property(&self, key: &str) -> Option<Value> {
        let value = match key {
            "id" => Value::from(self.id),
            "deviceId" => Value::from(self.device_id),
            "protocol" => option_value(self.protocol.clone()),
            "serverTime" => option_value(self.server_time.map(|t| t.to_rfc3339())),
            "deviceTime" => option_value(self.device_time.map(|t| t.to_rfc3339())),
            "fixTime" => option_value(self.fix_time.map(|t| t.to_rfc3339())),
            "outdated" => Value::from(self.outdated),
            "valid" => Value::from(self.valid),
            "latitude" => Value::from(self.latitude),
            "longitude" => Value::from(self.longitude),
            "altitude" => Value::from(self.altitude),
            "speed" => Value::from(self.speed),
            "course" => Value::from(self.course),
            "address" => option_value(self.address.clone()),
            "accuracy" => Value::from(self.accuracy),
            "network" => self.network.clone().unwrap_or(Value::Null),
            "geofenceIds" => option_value(self.geofence_ids.clone()),
            _ => return None,
        };
        Some(value)
    }

    /// Returns an attribute value
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

fn option_value<T: Into<Value>>(value: Option<T>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}

/// Payload for creating a geofence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGeofence {
    pub name: String,
    pub area: String,
}

/// A geofence as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub id: i64,
    pub name: String,
    pub area: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// Link between a device and a geofence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub device_id: i64,
    pub geofence_id: i64,
}

/// One aggregated usage statistics interval
///
/// Counters keep whatever JSON the server sent; they are shown as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsRecord {
    pub id: Option<i64>,
    pub capture_time: Option<DateTime<Utc>>,
    pub active_users: Option<Value>,
    pub active_devices: Option<Value>,
    pub requests: Option<Value>,
    pub messages_received: Option<Value>,
    pub messages_stored: Option<Value>,
    pub mail_sent: Option<Value>,
    pub sms_sent: Option<Value>,
    pub geocoder_requests: Option<Value>,
    pub geolocation_requests: Option<Value>,
}

/// The signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub administrator: bool,
    pub readonly: bool,
    pub device_readonly: bool,
    pub temporary: bool,
    pub twelve_hour_format: Option<bool>,
    pub attributes: Map<String, Value>,
}

/// Server-wide settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Server {
    pub id: i64,
    pub readonly: bool,
    pub device_readonly: bool,
    pub twelve_hour_format: bool,
    pub attributes: Map<String, Value>,
}
