use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub mod narrative;
pub mod route;

pub use narrative::{render_narrative, NarrativeRow, NarrativeTable};
pub use route::{DirectionsResponse, Leg, Maneuver, Route, Sign};

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 20;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("a route needs at least two waypoints, got {0}")]
    NotEnoughWaypoints(usize),
    #[error("route provider is unavailable")]
    ProviderUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    #[default]
    Map,
    Satellite,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Identifier of the surface the widget mounts into.
    pub mount_point: String,
    pub zoom: u8,
    pub center: LatLng,
    pub map_type: MapType,
}

impl MapConfig {
    pub fn new(
        mount_point: impl Into<String>,
        zoom: u8,
        center: LatLng,
        map_type: MapType,
    ) -> Self {
        Self {
            mount_point: mount_point.into(),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            center,
            map_type,
        }
    }
}

/// A stop along the route: free-form address text or a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Waypoint {
    Address(String),
    Coordinate(LatLng),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    #[default]
    Fastest,
    Shortest,
    Pedestrian,
    Bicycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteOptions {
    pub unit: DistanceUnit,
    pub route_type: RouteType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub avoid: Vec<String>,
}

#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn compute_route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Route, MapError>;
}

pub struct MissingRouteProvider;

#[async_trait]
impl RouteProvider for MissingRouteProvider {
    async fn compute_route(
        &self,
        _waypoints: &[Waypoint],
        _options: &RouteOptions,
    ) -> Result<Route, MapError> {
        Err(MapError::ProviderUnavailable)
    }
}

/// Serves a route computed elsewhere, e.g. a saved directions response.
pub struct StaticRouteProvider {
    route: Route,
}

impl StaticRouteProvider {
    pub fn new(route: Route) -> Self {
        Self { route }
    }
}

#[async_trait]
impl RouteProvider for StaticRouteProvider {
    async fn compute_route(
        &self,
        _waypoints: &[Waypoint],
        _options: &RouteOptions,
    ) -> Result<Route, MapError> {
        Ok(self.route.clone())
    }
}

pub struct MapWidget {
    config: MapConfig,
    provider: Arc<dyn RouteProvider>,
}

impl MapWidget {
    pub fn new(config: MapConfig, provider: Arc<dyn RouteProvider>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Computes a route through `waypoints` and renders its narrative.
    pub async fn show_route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<NarrativeTable, MapError> {
        if waypoints.len() < 2 {
            return Err(MapError::NotEnoughWaypoints(waypoints.len()));
        }
        debug!(
            mount = %self.config.mount_point,
            waypoints = waypoints.len(),
            "map: computing route"
        );
        let route = self.provider.compute_route(waypoints, options).await?;
        let table = render_narrative(&route);
        info!(
            mount = %self.config.mount_point,
            rows = table.rows.len(),
            "map: route narrative rendered"
        );
        Ok(table)
    }
}
