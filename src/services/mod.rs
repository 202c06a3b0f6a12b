//! External collaborators of the trip planner
//!
//! Each collaborator is a trait so the planner can be driven by the live
//! HTTP services or by in-memory fakes.

pub mod mapbox;
pub mod nominatim;
pub mod notify;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub use mapbox::MapboxRouter;
pub use nominatim::NominatimGeocoder;
pub use notify::ConsoleNotifier;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(anyhow!("Latitude out of range: {} (must be -90 to 90)", lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(anyhow!("Longitude out of range: {} (must be -180 to 180)", lon));
        }
        Ok(Self { lat, lon })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Address lookups in both directions
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Address to coordinates; `Ok(None)` when nothing matched
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>>;

    /// Coordinates to a short human-readable place name
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>>;
}

/// Travel time estimates between two points
#[async_trait]
pub trait Router: Send + Sync {
    /// Total travel time of the best route; `Ok(None)` when no route exists
    async fn travel_time(&self, from: Coordinates, to: Coordinates) -> Result<Option<Duration>>;

    /// Routing profile in use, e.g. `mapbox/driving`
    fn profile(&self) -> &str;
}

/// Surface for short-lived user messages
pub trait Notifier: Send + Sync {
    /// Something went wrong and the user should act
    fn alert(&self, message: &str, display_for: Duration);

    /// A result the user asked for
    fn notify(&self, message: &str, display_for: Duration);
}
