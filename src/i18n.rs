//! Built-in English strings
//!
//! Lookups fall back to the key itself, so an unknown key renders as-is.

/// Translates a string key
pub fn translate(key: &str) -> &str {
    match key {
        "sharedGeofence" => "Geofence",
        "sharedShowDetails" => "More Details",
        "sharedCreateGeofence" => "Create Geofence",
        "sharedRemove" => "Remove",
        "sharedRemoveConfirm" => "Remove item?",
        "sharedCancel" => "Cancel",
        "sharedYes" => "Yes",
        "sharedNo" => "No",
        "sharedShare" => "Share",
        "sharedMaintenance" => "Maintenance",
        "sharedWallet" => "Wallet",
        "sharedMore" => "More",
        "sharedShow" => "Show",
        "sharedLoading" => "Loading...",
        "sharedDevices" => "Devices",
        "sharedRefresh" => "Refresh",
        "sharedBack" => "Back",
        "linkGoogleMaps" => "Google Maps",
        "linkAppleMaps" => "Apple Maps",
        "linkStreetView" => "Street View",
        "deviceShare" => "Share Device",
        "deviceSelect" => "Select a device",
        "reportTitle" => "Reports",
        "reportPeriod" => "Period",
        "reportFrom" => "From",
        "reportTo" => "To",
        "reportToday" => "Today",
        "reportYesterday" => "Yesterday",
        "reportThisWeek" => "This Week",
        "reportPreviousWeek" => "Previous Week",
        "reportThisMonth" => "This Month",
        "reportPreviousMonth" => "Previous Month",
        "reportCustom" => "Custom",
        "reportInvalidRange" => "Enter a valid date range",
        "reportNoData" => "No data",
        "sharedColumns" => "Columns",
        "sharedGeofences" => "Geofences",
        "positionIdentifier" => "Identifier",
        "positionDeviceTime" => "Device Time",
        "positionFixTime" => "Fix Time",
        "positionServerTime" => "Server Time",
        "positionLatitude" => "Latitude",
        "positionLongitude" => "Longitude",
        "positionSpeed" => "Speed",
        "positionCourse" => "Course",
        "positionAltitude" => "Altitude",
        "positionAccuracy" => "Accuracy",
        "positionValid" => "Valid",
        "positionAddress" => "Address",
        "positionProtocol" => "Protocol",
        "positionEvent" => "Event",
        "positionOdometer" => "Odometer",
        "positionIgnition" => "Ignition",
        "positionDistance" => "Distance",
        "statisticsTitle" => "Statistics",
        "statisticsCaptureTime" => "Capture",
        "statisticsActiveUsers" => "Active Users",
        "statisticsActiveDevices" => "Active Devices",
        "statisticsRequests" => "Requests",
        "statisticsMessagesReceived" => "Messages Received",
        "statisticsMessagesStored" => "Messages Stored",
        "notificatorMail" => "Mail",
        "notificatorSms" => "SMS",
        "statisticsGeocoder" => "Geocoder Requests",
        "statisticsGeolocation" => "Geolocation Requests",
        "sharedKn" => "kn",
        "sharedKmh" => "km/h",
        "sharedMph" => "mph",
        "sharedKm" => "km",
        "sharedMi" => "mi",
        "sharedNmi" => "nmi",
        "sharedMeters" => "m",
        "sharedFeet" => "ft",
        other => other,
    }
}
