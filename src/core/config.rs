//! Sampling limits for the area aggregator

use wilderness_bridge::MAX_BATCH_COORDINATES;

/// Limits applied by [`crate::AreaAggregator`] before any I/O.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatorConfig {
    /// Largest radius for a plain terrain map.
    pub max_map_radius: i32,
    /// Largest radius when every point is also enriched with overlays
    /// (one spatial store query per point).
    pub max_overlay_radius: i32,
    /// Sample cap for route analysis.
    pub route_sample_cap: usize,
    /// Sample cap for elevation profiles.
    pub profile_sample_cap: usize,
    /// Radius passed to the spatial store when probing a single point.
    pub overlay_search_radius: f64,
    /// Coordinates per batch request; never above the bridge's own cap.
    pub batch_limit: i64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_map_radius: 31,
            max_overlay_radius: 15,
            route_sample_cap: 50,
            profile_sample_cap: 100,
            overlay_search_radius: 0.5,
            batch_limit: MAX_BATCH_COORDINATES,
        }
    }
}

impl AggregatorConfig {
    /// Radius cap for a map request
    pub fn radius_limit(&self, with_overlays: bool) -> i32 {
        if with_overlays {
            self.max_overlay_radius
        } else {
            self.max_map_radius
        }
    }

    /// Batch size actually used, clamped to the bridge limit
    pub fn effective_batch_limit(&self) -> i64 {
        self.batch_limit.clamp(1, MAX_BATCH_COORDINATES)
    }
}
