//! Mapbox Directions client used for travel time estimates

use super::{Coordinates, Router};
use crate::config::RoutingConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    code: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Route {
    /// Seconds
    duration: f64,
}

pub struct MapboxRouter {
    client: Client,
    base_url: Url,
    profile: String,
    access_token: SecretString,
}

impl MapboxRouter {
    pub fn new(config: &RoutingConfig, access_token: SecretString) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid routing base URL: {}", config.base_url))?;
        if config.profile.split('/').count() != 2 {
            return Err(anyhow!(
                "Invalid routing profile '{}'. Expected e.g. mapbox/driving",
                config.profile
            ));
        }
        Ok(Self { client: Client::new(), base_url, profile: config.profile.clone(), access_token })
    }

    fn directions_url(&self, from: Coordinates, to: Coordinates) -> Result<Url> {
        let waypoints = format!("{},{};{},{}", from.lon, from.lat, to.lon, to.lat);
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("Routing base URL cannot be a base: {}", self.base_url))?;
            segments.pop_if_empty().push("directions").push("v5");
            for part in self.profile.split('/') {
                segments.push(part);
            }
            segments.push(&waypoints);
        }
        url.query_pairs_mut()
            .append_pair("access_token", self.access_token.expose_secret())
            .append_pair("overview", "false");
        Ok(url)
    }
}

#[async_trait]
impl Router for MapboxRouter {
    async fn travel_time(&self, from: Coordinates, to: Coordinates) -> Result<Option<Duration>> {
        let url = self.directions_url(from, to)?;
        debug!("Requesting {} route from {} to {}", self.profile, from, to);

        let body = self
            .client
            .get(url)
            .send()
            .await
            .context("Routing request failed")?
            .text()
            .await
            .context("Failed to read routing response")?;

        let travel = parse_directions_response(&body)?;
        if let Some(duration) = travel {
            info!("Route for: {} takes {}s", self.profile, duration.as_secs());
        }
        Ok(travel)
    }

    fn profile(&self) -> &str {
        &self.profile
    }
}

/// Duration of the first route in a Directions response
pub fn parse_directions_response(body: &str) -> Result<Option<Duration>> {
    let response: DirectionsResponse =
        serde_json::from_str(body).context("Failed to parse routing response")?;

    match response.code.as_deref() {
        Some("Ok") => {}
        Some(code @ ("NoRoute" | "NoSegment")) => {
            warn!("Routing service found no route: {}", code);
            return Ok(None);
        }
        other => {
            return Err(anyhow!(
                "Routing service error {}: {}",
                other.unwrap_or("unknown"),
                response.message.unwrap_or_default()
            ));
        }
    }

    let Some(route) = response.routes.first() else {
        return Ok(None);
    };
    let duration = Duration::try_from_secs_f64(route.duration).map_err(|e| {
        anyhow!("Routing service returned invalid duration {}: {}", route.duration, e)
    })?;
    Ok(Some(duration))
}
