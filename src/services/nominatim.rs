//! Nominatim (OpenStreetMap) geocoding client

use super::{Coordinates, Geocoder};
use crate::config::GeocodingConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct ReverseHit {
    display_name: Option<String>,
}

pub struct NominatimGeocoder {
    client: Client,
    base_url: Url,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid geocoding base URL: {}", config.base_url))?;
        // Nominatim's usage policy rejects requests without an identifying agent.
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build geocoding HTTP client")?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Geocoding base URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        let url = self.endpoint("search")?;
        debug!("Geocoding '{}' via {}", address, url);

        let body = self
            .client
            .get(url)
            .query(&[("format", "json"), ("q", address)])
            .send()
            .await
            .context("Geocoding request failed")?
            .error_for_status()
            .context("Geocoding service returned an error")?
            .text()
            .await
            .context("Failed to read geocoding response")?;

        parse_search_response(&body)
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>> {
        let url = self.endpoint("reverse")?;
        debug!("Reverse geocoding {} via {}", coords, url);

        let body = self
            .client
            .get(url)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .context("Reverse geocoding request failed")?
            .error_for_status()
            .context("Reverse geocoding service returned an error")?
            .text()
            .await
            .context("Failed to read reverse geocoding response")?;

        parse_reverse_response(&body)
    }
}

/// First hit of a `/search` response, if any
pub fn parse_search_response(body: &str) -> Result<Option<Coordinates>> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).context("Failed to parse geocoding response")?;

    let Some(hit) = hits.first() else {
        warn!("No geocoding results found");
        return Ok(None);
    };

    let lat: f64 = hit.lat.parse().with_context(|| format!("Invalid latitude '{}'", hit.lat))?;
    let lon: f64 = hit.lon.parse().with_context(|| format!("Invalid longitude '{}'", hit.lon))?;
    Coordinates::new(lat, lon).map(Some)
}

/// Short label from a `/reverse` response
///
/// `display_name` runs from most to least specific ("12, Main Street, Boise, ...");
/// the second component is used as the label.
pub fn parse_reverse_response(body: &str) -> Result<Option<String>> {
    let hit: ReverseHit =
        serde_json::from_str(body).context("Failed to parse reverse geocoding response")?;

    Ok(hit
        .display_name
        .as_deref()
        .and_then(|name| name.split(',').nth(1))
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"[{"lat":"43.6150","lon":"-116.2023","display_name":"Boise"},
                       {"lat":"0","lon":"0"}]"#;
        let coords = parse_search_response(body).unwrap().unwrap();
        assert_eq!(coords.lat, 43.615);
        assert_eq!(coords.lon, -116.2023);
    }

    #[test]
    fn test_parse_search_response_empty() {
        assert_eq!(parse_search_response("[]").unwrap(), None);
    }

    #[test]
    fn test_parse_search_response_malformed() {
        assert!(parse_search_response(r#"{"error":"bad"}"#).is_err());
        assert!(parse_search_response(r#"[{"lat":"x","lon":"1"}]"#).is_err());
    }

    #[test]
    fn test_parse_reverse_response() {
        let body = r#"{"display_name":"1200, West Jefferson Street, Boise, Idaho, USA"}"#;
        assert_eq!(
            parse_reverse_response(body).unwrap(),
            Some("West Jefferson Street".to_string())
        );
    }

    #[test]
    fn test_parse_reverse_response_without_second_part() {
        assert_eq!(parse_reverse_response(r#"{"display_name":"Ocean"}"#).unwrap(), None);
        assert_eq!(parse_reverse_response(r#"{"error":"Unable to geocode"}"#).unwrap(), None);
    }

    #[test]
    fn test_endpoint_joins_path() {
        let config = GeocodingConfig {
            base_url: "https://nominatim.example.org/".to_string(),
            user_agent: "ontime-test".to_string(),
        };
        let geocoder = NominatimGeocoder::new(&config).unwrap();
        assert_eq!(
            geocoder.endpoint("search").unwrap().as_str(),
            "https://nominatim.example.org/search"
        );
    }
}
