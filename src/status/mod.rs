//! Device status display
//!
//! The floating card for one device, its field selection and its
//! contextual actions.

pub mod card;
pub mod fields;
pub mod geofence;
pub mod items;
pub mod links;
pub mod menu;
pub mod remove;

pub use card::{CardAction, CardContext, StatusCard};
pub use fields::PositionField;
pub use geofence::{create_geofence_for_position, GeofenceError, OrphanPolicy};
pub use items::{visible_items, StatusItem, ValueSource};
pub use menu::{MenuAction, MenuState};
pub use remove::{refresh_devices, remove_device, RemoveDialog, RemoveResponse};
