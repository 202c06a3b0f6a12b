//! In-memory collaborators for driving `TripPlanner` in tests

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ontime::services::{Coordinates, Geocoder, Notifier, Router};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn coords(lat: f64, lon: f64) -> Coordinates {
    Coordinates::new(lat, lon).unwrap()
}

#[derive(Default)]
pub struct FakeGeocoder {
    pub places: HashMap<String, Coordinates>,
    pub labels: Vec<(Coordinates, String)>,
    pub fail: bool,
}

impl FakeGeocoder {
    pub fn with_place(mut self, address: &str, at: Coordinates) -> Self {
        self.places.insert(address.to_string(), at);
        self
    }

    pub fn with_label(mut self, at: Coordinates, label: &str) -> Self {
        self.labels.push((at, label.to_string()));
        self
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        if self.fail {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.places.get(address).copied())
    }

    async fn reverse_geocode(&self, at: Coordinates) -> Result<Option<String>> {
        if self.fail {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.labels.iter().find(|(c, _)| *c == at).map(|(_, label)| label.clone()))
    }
}

pub struct FakeRouter {
    pub travel: Result<Option<Duration>, String>,
    pub requests: Arc<Mutex<Vec<(Coordinates, Coordinates)>>>,
}

impl FakeRouter {
    pub fn taking(seconds: u64) -> Self {
        Self { travel: Ok(Some(Duration::from_secs(seconds))), requests: Arc::default() }
    }

    pub fn no_route() -> Self {
        Self { travel: Ok(None), requests: Arc::default() }
    }

    pub fn broken() -> Self {
        Self { travel: Err("503 Service Unavailable".to_string()), requests: Arc::default() }
    }
}

#[async_trait]
impl Router for FakeRouter {
    async fn travel_time(&self, from: Coordinates, to: Coordinates) -> Result<Option<Duration>> {
        self.requests.lock().unwrap().push((from, to));
        self.travel.clone().map_err(|e| anyhow!(e))
    }

    fn profile(&self) -> &str {
        "mapbox/driving"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Alert(String),
    Notification(String),
}

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    pub shown: Arc<Mutex<Vec<(Shown, Duration)>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().iter().map(|(shown, _)| shown.clone()).collect()
    }

    /// Every message together with how long it was asked to stay up
    pub fn displayed(&self) -> Vec<(Shown, Duration)> {
        self.shown.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str, display_for: Duration) {
        self.shown.lock().unwrap().push((Shown::Alert(message.to_string()), display_for));
    }

    fn notify(&self, message: &str, display_for: Duration) {
        self.shown.lock().unwrap().push((Shown::Notification(message.to_string()), display_for));
    }
}
