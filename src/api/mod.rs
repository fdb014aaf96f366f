//! REST access to the tracking server
//!
//! [`TrackerApi`] is the seam between the screens and the network:
//! [`ApiClient`] implements it over HTTP, tests implement it in memory.

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error::ApiResult;

pub use client::ApiClient;
pub use types::{
    Device, Geofence, NewGeofence, Permission, Position, Server, StatisticsRecord, User,
};

/// Operations the client needs from the tracking server
pub trait TrackerApi: Send + Sync {
    /// `GET /api/session`
    fn session(&self) -> impl Future<Output = ApiResult<User>> + Send;

    /// `GET /api/server`
    fn server(&self) -> impl Future<Output = ApiResult<Server>> + Send;

    /// `GET /api/devices`
    fn devices(&self) -> impl Future<Output = ApiResult<Vec<Device>>> + Send;

    /// `GET /api/positions` (latest position per device)
    fn positions(&self) -> impl Future<Output = ApiResult<Vec<Position>>> + Send;

    /// `DELETE /api/devices/{id}`
    fn delete_device(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send;

    /// `POST /api/geofences`
    fn create_geofence(
        &self,
        geofence: &NewGeofence,
    ) -> impl Future<Output = ApiResult<Geofence>> + Send;

    /// `DELETE /api/geofences/{id}`
    fn delete_geofence(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send;

    /// `POST /api/permissions`
    fn create_permission(
        &self,
        permission: &Permission,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    /// `GET /api/statistics?from=..&to=..`
    fn statistics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = ApiResult<Vec<StatisticsRecord>>> + Send;

    /// `GET /api/media/{uniqueId}/{name}` as raw bytes
    fn media(
        &self,
        unique_id: &str,
        name: &str,
    ) -> impl Future<Output = ApiResult<Vec<u8>>> + Send;
}
