//! Session store
//!
//! Screens read an immutable [`SessionSnapshot`] and report changes by
//! sending [`StoreEvent`]s. Only [`Store`] replaces the snapshot, once per
//! drained event.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::FixedOffset;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::{Device, Position, Server, TrackerApi, User};
use crate::config::preferences::DEFAULT_POSITION_ITEMS;
use crate::error::ApiResult;
use crate::format::{AltitudeUnit, DistanceUnit, FormatContext, SpeedUnit};

/// Read-only view of the session, devices and latest positions
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub user: User,
    pub server: Server,
    pub devices: BTreeMap<i64, Device>,
    /// Latest position keyed by device id
    pub positions: HashMap<i64, Position>,
}

impl SessionSnapshot {
    /// Looks up a loaded device
    pub fn device(&self, id: i64) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Latest position of a device
    pub fn position(&self, device_id: i64) -> Option<&Position> {
        self.positions.get(&device_id)
    }

    /// Finds a position by its own id
    pub fn position_by_id(&self, position_id: i64) -> Option<&Position> {
        self.positions.values().find(|p| p.id == position_id)
    }

    /// Attribute lookup: user attributes first, then server attributes
    pub fn attribute_preference(&self, key: &str) -> Option<&Value> {
        self.user
            .attributes
            .get(key)
            .or_else(|| self.server.attributes.get(key))
    }

    fn string_preference(&self, key: &str) -> Option<&str> {
        self.attribute_preference(key).and_then(Value::as_str)
    }

    /// Whether device sharing is turned off server-wide
    pub fn share_disabled(&self) -> bool {
        self.server
            .attributes
            .get("disableShare")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether the user may not modify devices
    pub fn device_readonly(&self) -> bool {
        !self.user.administrator
            && (self.server.readonly
                || self.user.readonly
                || self.server.device_readonly
                || self.user.device_readonly)
    }

    /// User setting wins over the server default
    pub fn twelve_hour_format(&self) -> bool {
        self.user
            .twelve_hour_format
            .unwrap_or(self.server.twelve_hour_format)
    }

    /// Status card field list: local override, then user/server
    /// attribute, then the built-in default
    pub fn position_items(&self, local_override: Option<&str>) -> String {
        local_override
            .or_else(|| self.string_preference("positionItems"))
            .unwrap_or(DEFAULT_POSITION_ITEMS)
            .to_string()
    }

    /// Resolves display units and clock style for value formatting
    pub fn format_context(&self, offset: FixedOffset) -> FormatContext {
        FormatContext {
            hours12: self.twelve_hour_format(),
            speed_unit: SpeedUnit::from_preference(self.string_preference("speedUnit")),
            distance_unit: DistanceUnit::from_preference(self.string_preference("distanceUnit")),
            altitude_unit: AltitudeUnit::from_preference(self.string_preference("altitudeUnit")),
            offset,
        }
    }
}

/// Changes published by screens and background tasks
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// Session user and server settings were (re)loaded
    SessionLoaded { user: User, server: Server },
    /// Full device list replaces the current one
    DevicesRefreshed(Vec<Device>),
    /// Latest positions, merged per device
    PositionsUpdated(Vec<Position>),
}

/// Sending half handed to screens and tasks
pub type StoreSender = mpsc::UnboundedSender<StoreEvent>;

/// Owner of the session snapshot
pub struct Store {
    snapshot: Arc<SessionSnapshot>,
    event_tx: StoreSender,
    event_rx: mpsc::UnboundedReceiver<StoreEvent>,
}

impl Store {
    /// Creates an empty store
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            snapshot: Arc::new(SessionSnapshot::default()),
            event_tx,
            event_rx,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Get a sender for store events
    pub fn sender(&self) -> StoreSender {
        self.event_tx.clone()
    }

    /// Applies every queued event; returns true if anything changed
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply(event);
            changed = true;
        }
        changed
    }

    /// Applies a single event, producing a new snapshot
    pub fn apply(&mut self, event: StoreEvent) {
        let mut next = SessionSnapshot::clone(&self.snapshot);

        match event {
            StoreEvent::SessionLoaded { user, server } => {
                debug!("Session loaded for user {}", user.id);
                next.user = user;
                next.server = server;
            }
            StoreEvent::DevicesRefreshed(devices) => {
                debug!("Device list refreshed ({} devices)", devices.len());
                next.devices = devices.into_iter().map(|d| (d.id, d)).collect();
                let devices = &next.devices;
                next.positions.retain(|device_id, _| devices.contains_key(device_id));
            }
            StoreEvent::PositionsUpdated(positions) => {
                debug!("{} positions updated", positions.len());
                for position in positions {
                    next.positions.insert(position.device_id, position);
                }
            }
        }

        self.snapshot = Arc::new(next);
    }
}

/// Loads session, server settings, devices and latest positions
///
/// Each result is published as soon as it arrives.
///
/// # Errors
///
/// Stops at the first failing request and returns its error
pub async fn load_session<A: TrackerApi>(api: &A, store: &StoreSender) -> ApiResult<()> {
    let user = api.session().await?;
    let server = api.server().await?;
    info!("Signed in as {}", user.name);
    // Receiver is gone only when the app is shutting down
    let _ = store.send(StoreEvent::SessionLoaded { user, server });

    let devices = api.devices().await?;
    let _ = store.send(StoreEvent::DevicesRefreshed(devices));

    let positions = api.positions().await?;
    let _ = store.send(StoreEvent::PositionsUpdated(positions));
    Ok(())
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use serde_json::json;

    fn device(id: i64, name: &str) -> Device {
        serde_json::from_value(json!({ "id": id, "name": name, "uniqueId": format!("u{}", id) }))
            .unwrap()
    }

    #[test]
    fn test_events_replace_snapshot() {
        let mut store = Store::new();
        let before = store.snapshot();

        store
            .sender()
            .send(StoreEvent::DevicesRefreshed(vec![device(1, "Truck"), device(2, "Van")]))
            .unwrap();
        assert!(store.drain());

        let after = store.snapshot();
        assert!(before.devices.is_empty());
        assert_eq!(after.devices.len(), 2);
        assert_eq!(after.device(2).unwrap().name, "Van");
        assert!(!store.drain());
    }

    #[test]
    fn test_refresh_drops_positions_of_removed_devices() {
        let mut store = Store::new();
        store.apply(StoreEvent::DevicesRefreshed(vec![device(1, "A"), device(2, "B")]));
        store.apply(StoreEvent::PositionsUpdated(vec![
            Position::new(10, 1, 1.0, 1.0),
            Position::new(20, 2, 2.0, 2.0),
        ]));
        store.apply(StoreEvent::DevicesRefreshed(vec![device(1, "A")]));

        let snapshot = store.snapshot();
        assert!(snapshot.position(1).is_some());
        assert!(snapshot.position(2).is_none());
        assert_eq!(snapshot.position_by_id(10).unwrap().device_id, 1);
    }

    #[test]
    fn test_positions_keep_latest_per_device() {
        let mut store = Store::new();
        store.apply(StoreEvent::PositionsUpdated(vec![Position::new(10, 1, 1.0, 1.0)]));
        store.apply(StoreEvent::PositionsUpdated(vec![Position::new(11, 1, 5.0, 5.0)]));

        assert_eq!(store.snapshot().position(1).unwrap().id, 11);
    }

    #[test]
    fn test_preferences_resolution() {
        let mut snapshot = SessionSnapshot::default();
        assert_eq!(snapshot.position_items(None), DEFAULT_POSITION_ITEMS);

        snapshot
            .server
            .attributes
            .insert("positionItems".to_string(), json!("speed,course"));
        assert_eq!(snapshot.position_items(None), "speed,course");

        snapshot
            .user
            .attributes
            .insert("positionItems".to_string(), json!("ignition"));
        assert_eq!(snapshot.position_items(None), "ignition");
        assert_eq!(snapshot.position_items(Some("valid")), "valid");
    }

    #[test]
    fn test_twelve_hour_format() {
        let mut snapshot = SessionSnapshot::default();
        snapshot.server.twelve_hour_format = true;
        assert!(snapshot.twelve_hour_format());

        snapshot.user.twelve_hour_format = Some(false);
        assert!(!snapshot.twelve_hour_format());
    }

    #[test]
    fn test_permissions() {
        let mut snapshot = SessionSnapshot::default();
        assert!(!snapshot.share_disabled());
        assert!(!snapshot.device_readonly());

        snapshot
            .server
            .attributes
            .insert("disableShare".to_string(), json!(true));
        snapshot.server.device_readonly = true;
        assert!(snapshot.share_disabled());
        assert!(snapshot.device_readonly());

        snapshot.user.administrator = true;
        assert!(!snapshot.device_readonly());
    }

    #[test]
    fn test_load_session_publishes_everything() {
        let api = FakeApi::with(|s| {
            s.user.name = "admin".to_string();
            s.devices = vec![device(1, "Truck")];
            s.positions = vec![Position::new(10, 1, 1.0, 1.0)];
        });
        let mut store = Store::new();

        tokio_test::block_on(load_session(&api, &store.sender())).unwrap();
        store.drain();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.user.name, "admin");
        assert_eq!(snapshot.position(1).unwrap().id, 10);
    }

    #[test]
    fn test_load_session_stops_on_error() {
        let api = FakeApi::with(|s| s.fail_devices = Some("Unauthorized".into()));
        let mut store = Store::new();

        let err = tokio_test::block_on(load_session(&api, &store.sender())).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
        assert!(store.drain());
        assert!(!api.calls().contains(&"GET /api/positions".to_string()));
    }

    #[test]
    fn test_format_context_units() {
        let mut snapshot = SessionSnapshot::default();
        snapshot
            .user
            .attributes
            .insert("speedUnit".to_string(), json!("kmh"));
        let context = snapshot.format_context(FixedOffset::east_opt(0).unwrap());
        assert_eq!(context.speed_unit, SpeedUnit::Kmh);
        assert_eq!(context.distance_unit, DistanceUnit::Km);
    }
}
