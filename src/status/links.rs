//! External map links and device media paths

use crate::api::Position;

/// Google Maps search centered on the position
pub fn google_maps_url(position: &Position) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}%2C{}",
        position.latitude, position.longitude
    )
}

/// Apple Maps at the position
pub fn apple_maps_url(position: &Position) -> String {
    format!(
        "http://maps.apple.com/?ll={},{}",
        position.latitude, position.longitude
    )
}

/// Street View panorama looking along the course
pub fn street_view_url(position: &Position) -> String {
    format!(
        "https://www.google.com/maps/@?api=1&map_action=pano&viewpoint={}%2C{}&heading={}",
        position.latitude, position.longitude, position.course
    )
}

/// Server path of an uploaded device image
pub fn media_path(unique_id: &str, image: &str) -> String {
    format!("/api/media/{}/{}", unique_id, image)
}
