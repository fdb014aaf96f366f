//! Creating a geofence around a position
//!
//! Two phases: create the geofence, then grant the device a permission on
//! it. A failed grant leaves the geofence behind unless the caller asks
//! for a compensating delete.

use thiserror::Error;
use tracing::{info, warn};

use crate::api::{Geofence, NewGeofence, Permission, Position, TrackerApi};
use crate::error::ApiError;

/// Radius of geofences created from the status card, in meters
pub const GEOFENCE_RADIUS: u32 = 50;

/// What to do with the geofence when the permission grant fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Leave the geofence on the server
    #[default]
    Keep,
    /// Try to delete the geofence again
    Delete,
}

/// Result of the compensating step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Policy was `Keep`
    NotAttempted,
    /// Geofence was deleted
    Deleted,
    /// Delete failed with this message; the geofence remains
    Failed(String),
}

/// Failure of the two-phase creation
#[derive(Error, Debug)]
pub enum GeofenceError {
    /// Phase one failed, nothing was created
    #[error("{0}")]
    Create(ApiError),

    /// Phase two failed after the geofence was created
    #[error("{source}")]
    Permission {
        geofence: Geofence,
        source: ApiError,
        compensation: Compensation,
    },
}

/// Area descriptor of a circle, `CIRCLE (lat lon, radius)`
pub fn circle_area(latitude: f64, longitude: f64, radius: u32) -> String {
    format!("CIRCLE ({} {}, {})", latitude, longitude, radius)
}

/// Creates a geofence centered on `position` and links it to the device
///
/// # Errors
///
/// Returns [`GeofenceError::Create`] if the geofence could not be
/// created, or [`GeofenceError::Permission`] if the grant failed
pub async fn create_geofence_for_position<A: TrackerApi>(
    api: &A,
    name: &str,
    position: &Position,
    policy: OrphanPolicy,
) -> Result<Geofence, GeofenceError> {
    let request = NewGeofence {
        name: name.to_string(),
        area: circle_area(position.latitude, position.longitude, GEOFENCE_RADIUS),
    };

    let geofence = api
        .create_geofence(&request)
        .await
        .map_err(GeofenceError::Create)?;
    info!("Created geofence {} ({})", geofence.id, geofence.area);

    let permission = Permission {
        device_id: position.device_id,
        geofence_id: geofence.id,
    };

    if let Err(source) = api.create_permission(&permission).await {
        warn!(
            "Linking device {} to geofence {} failed: {}",
            position.device_id, geofence.id, source
        );
        let compensation = compensate(api, &geofence, policy).await;
        return Err(GeofenceError::Permission {
            geofence,
            source,
            compensation,
        });
    }

    Ok(geofence)
}

async fn compensate<A: TrackerApi>(api: &A, geofence: &Geofence, policy: OrphanPolicy) -> Compensation {
    match policy {
        OrphanPolicy::Keep => {
            warn!("Geofence {} left without permission", geofence.id);
            Compensation::NotAttempted
        }
        OrphanPolicy::Delete => match api.delete_geofence(geofence.id).await {
            Ok(()) => {
                info!("Deleted orphaned geofence {}", geofence.id);
                Compensation::Deleted
            }
            Err(e) => {
                warn!("Could not delete orphaned geofence {}: {}", geofence.id, e);
                Compensation::Failed(e.to_string())
            }
        },
    }
}
