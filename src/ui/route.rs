//! Screens the application can navigate to

use std::fmt;

/// Navigation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Device list with the status card
    #[default]
    Devices,
    /// Full detail of one position
    PositionDetails(i64),
    /// Settings of a geofence
    GeofenceSettings(i64),
    /// Sharing settings of a device
    DeviceShare(i64),
    /// Usage statistics report
    Statistics,
}

impl Route {
    /// Path of the equivalent web route
    pub fn path(&self) -> String {
        match self {
            Route::Devices => "/".to_string(),
            Route::PositionDetails(id) => format!("/position/{}", id),
            Route::GeofenceSettings(id) => format!("/settings/geofence/{}", id),
            Route::DeviceShare(id) => format!("/settings/device/{}/share", id),
            Route::Statistics => "/reports/statistics".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
