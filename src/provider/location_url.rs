//! Viewer URL for a location

use crate::domain::Location;

/// Fill a viewer template's `{lat}`, `{lng}` and `{pano}` placeholders.
///
/// Coordinates are written with six decimals and never range-checked; a bad
/// coordinate is for the provider to reject.
pub fn build_location_url(template: &str, location: &Location) -> String {
    template
        .replace("{lat}", &format!("{:.6}", location.lat))
        .replace("{lng}", &format!("{:.6}", location.lng))
        .replace("{pano}", &location.pano_id)
}
