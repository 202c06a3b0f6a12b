//! Parsing of `lat,lon` pairs typed on the command line

use crate::services::Coordinates;
use anyhow::{anyhow, Result};

/// Parse "43.6188,-116.2150" into [`Coordinates`]
///
/// Returns an error when either half is not a number or falls outside the
/// valid latitude/longitude range.
pub fn parse_coordinates(input: &str) -> Result<Coordinates> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected coordinates as LAT,LON, got '{}'", input))?;

    let lat: f64 = lat.trim().parse().map_err(|_| anyhow!("Invalid latitude: '{}'", lat.trim()))?;
    let lon: f64 =
        lon.trim().parse().map_err(|_| anyhow!("Invalid longitude: '{}'", lon.trim()))?;

    Coordinates::new(lat, lon)
}

/// Whether the input looks like a coordinate pair rather than an address
pub fn looks_like_coordinates(input: &str) -> bool {
    parse_coordinates(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        let coords = parse_coordinates("43.618881, -116.215019").unwrap();
        assert_eq!(coords.lat, 43.618881);
        assert_eq!(coords.lon, -116.215019);
    }

    #[test]
    fn test_parse_coordinates_rejects_bad_input() {
        assert!(parse_coordinates("43.6").is_err());
        assert!(parse_coordinates("north,west").is_err());
        assert!(parse_coordinates("91,0").is_err());
        assert!(parse_coordinates("0,181").is_err());
    }

    #[test]
    fn test_looks_like_coordinates() {
        assert!(looks_like_coordinates("1.5,2.5"));
        assert!(!looks_like_coordinates("Boise, Idaho"));
    }
}
