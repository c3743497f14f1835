//! Url command implementation

use earthwalker::Location;
use earthwalker::config::Config;
use earthwalker::provider::build_location_url;

/// Print the viewer URL the server would fetch for this location
pub fn url_command(config: &Config, lat: f64, lng: f64, pano: String) {
    let location = Location::new(lat, lng, pano);
    println!(
        "{}",
        build_location_url(&config.provider.viewer_url_template, &location)
    );
}
