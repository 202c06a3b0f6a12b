//! Trip planning controller
//!
//! `TripPlanner` owns the start and end points and drives the collaborators
//! in order: geocode, route, compute the leave-by time, tell the user.

use super::leave_time::LeaveTime;
use crate::config::NotificationConfig;
use crate::parser::{parse_time, TimeOfDay, TimeParseError};
use crate::services::{Coordinates, Geocoder, Notifier, Router};
use log::{debug, error, info};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub const MISSING_INPUT_MESSAGE: &str =
    "Please select a start, end location, and desired arrival time.";
pub const INVALID_TIME_MESSAGE: &str =
    "Invalid arrival time format. Please use HH:mm[am/pm] format.";
pub const INVALID_ADDRESS_MESSAGE: &str = "Invalid address, please try again.";
pub const NO_ROUTE_MESSAGE: &str = "No route found between the selected locations.";

/// Errors from the trip workflow
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("a start location, an end location and an arrival time are required")]
    MissingInput,
    #[error("invalid arrival time: {0}")]
    InvalidArrivalTime(#[from] TimeParseError),
    #[error("address not found: {0}")]
    AddressNotFound(String),
    #[error("no route between the selected locations")]
    NoRoute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Start,
    End,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Start => write!(f, "start"),
            Slot::End => write!(f, "end"),
        }
    }
}

/// A chosen point with the place name it was resolved to, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub coords: Coordinates,
    pub label: Option<String>,
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({})", label, self.coords),
            None => write!(f, "{}", self.coords),
        }
    }
}

/// Outcome of a successful [`TripPlanner::plan_travel`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub start: Waypoint,
    pub end: Waypoint,
    pub arrival: TimeOfDay,
    pub profile: String,
    pub leave: LeaveTime,
}

pub struct TripPlanner<G, R, N> {
    geocoder: G,
    router: R,
    notifier: N,
    alert_for: Duration,
    notify_for: Duration,
    start: Option<Waypoint>,
    end: Option<Waypoint>,
}

impl<G: Geocoder, R: Router, N: Notifier> TripPlanner<G, R, N> {
    pub fn new(geocoder: G, router: R, notifier: N) -> Self {
        Self {
            geocoder,
            router,
            notifier,
            alert_for: Duration::ZERO,
            notify_for: Duration::ZERO,
            start: None,
            end: None,
        }
        .with_notifications(&NotificationConfig::default())
    }

    /// How long alerts and notifications stay on screen
    pub fn with_notifications(mut self, config: &NotificationConfig) -> Self {
        self.alert_for = Duration::from_secs(config.alert_seconds);
        self.notify_for = Duration::from_secs(config.notification_seconds);
        self
    }

    pub fn start(&self) -> Option<&Waypoint> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Waypoint> {
        self.end.as_ref()
    }

    pub fn waypoint(&self, slot: Slot) -> Option<&Waypoint> {
        match slot {
            Slot::Start => self.start.as_ref(),
            Slot::End => self.end.as_ref(),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn alert(&self, message: &str) {
        self.notifier.alert(message, self.alert_for);
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Waypoint> {
        match slot {
            Slot::Start => &mut self.start,
            Slot::End => &mut self.end,
        }
    }

    pub fn clear(&mut self, slot: Slot) {
        if self.slot_mut(slot).take().is_some() {
            debug!("Removed {} location", slot);
        }
    }

    /// Resolve a typed address into the given slot
    ///
    /// A blank address clears the slot. An address the geocoder cannot find
    /// leaves the slot untouched and alerts the user.
    pub async fn set_location(&mut self, slot: Slot, address: &str) -> Result<(), PlanError> {
        let address = address.trim();
        debug!("Setting {} location to '{}'", slot, address);

        if address.is_empty() {
            self.clear(slot);
            return Ok(());
        }

        let coords = match self.geocoder.geocode(address).await {
            Ok(Some(coords)) => coords,
            Ok(None) => {
                self.alert(INVALID_ADDRESS_MESSAGE);
                return Err(PlanError::AddressNotFound(address.to_string()));
            }
            Err(e) => {
                error!("Error fetching geocoding data: {:#}", e);
                self.alert(INVALID_ADDRESS_MESSAGE);
                return Err(PlanError::AddressNotFound(address.to_string()));
            }
        };

        *self.slot_mut(slot) = Some(Waypoint { coords, label: Some(address.to_string()) });
        Ok(())
    }

    /// Drop a point at `coords`: it becomes the start if none is set yet,
    /// the end otherwise. Returns the slot that was filled.
    pub async fn place_at(&mut self, coords: Coordinates) -> Slot {
        let slot = if self.start.is_none() { Slot::Start } else { Slot::End };
        self.pin(slot, coords).await;
        slot
    }

    /// Put `coords` into a specific slot, labelled by reverse geocoding
    pub async fn pin(&mut self, slot: Slot, coords: Coordinates) {
        let label = self.lookup_label(coords).await;
        debug!("Pinned {} at {} ({:?})", slot, coords, label);
        *self.slot_mut(slot) = Some(Waypoint { coords, label });
    }

    /// Use the device's reported position as the start point
    pub async fn use_current_position(&mut self, coords: Coordinates) {
        info!("Using current position {} as start", coords);
        self.pin(Slot::Start, coords).await;
    }

    async fn lookup_label(&self, coords: Coordinates) -> Option<String> {
        match self.geocoder.reverse_geocode(coords).await {
            Ok(label) => label,
            Err(e) => {
                error!("Error fetching reverse geocoding data: {:#}", e);
                None
            }
        }
    }

    /// Work out when to leave to arrive at `arrival_text`
    pub async fn plan_travel(&mut self, arrival_text: &str) -> Result<TripPlan, PlanError> {
        let arrival_text = arrival_text.trim();
        let (start, end) = match (&self.start, &self.end) {
            (Some(start), Some(end)) if !arrival_text.is_empty() => (start.clone(), end.clone()),
            _ => {
                self.alert(MISSING_INPUT_MESSAGE);
                return Err(PlanError::MissingInput);
            }
        };

        let arrival = match parse_time(arrival_text) {
            Ok(arrival) => arrival,
            Err(e) => {
                debug!("Rejected arrival time '{}': {}", arrival_text, e);
                self.alert(INVALID_TIME_MESSAGE);
                return Err(e.into());
            }
        };

        let travel = match self.router.travel_time(start.coords, end.coords).await {
            Ok(Some(travel)) => travel,
            Ok(None) => {
                self.alert(NO_ROUTE_MESSAGE);
                return Err(PlanError::NoRoute);
            }
            Err(e) => {
                error!("Error fetching route: {:#}", e);
                self.alert(NO_ROUTE_MESSAGE);
                return Err(PlanError::NoRoute);
            }
        };

        let leave = LeaveTime::compute(arrival, travel);
        self.notifier.notify(&leave.to_string(), self.notify_for);

        Ok(TripPlan { start, end, arrival, profile: self.router.profile().to_string(), leave })
    }
}
