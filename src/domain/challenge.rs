use serde::{Deserialize, Serialize};

/// Opaque challenge identifier, as issued by the challenge store
pub type ChallengeId = String;

/// A point on the globe plus the provider's panorama at that point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    /// Provider-specific panorama identifier, passed through untouched
    #[serde(default)]
    pub pano_id: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, pano_id: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            pano_id: pano_id.into(),
        }
    }
}

/// One round of a challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub location: Location,
    /// Optional authoring note, never shown while playing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Place {
    pub fn at(location: Location) -> Self {
        Self {
            location,
            label: None,
        }
    }
}

/// An ordered set of places shared by every player of the challenge.
///
/// Challenges are immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    #[serde(default)]
    pub places: Vec<Place>,
}

impl Challenge {
    pub fn new(id: impl Into<ChallengeId>, places: Vec<Place>) -> Self {
        Self {
            id: id.into(),
            places,
        }
    }

    /// Number of rounds in this challenge
    pub fn rounds(&self) -> usize {
        self.places.len()
    }
}
