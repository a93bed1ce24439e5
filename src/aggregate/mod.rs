//! Area and line sampling over terrain + overlays
//!
//! [`AreaAggregator`] owns its terrain source and overlay store; both are
//! injected so tests can substitute fakes. All per-point work is sequential.

pub mod grid;
pub mod line;
pub mod route;

pub use grid::{MapCell, MapData};
pub use line::{sample_line, ElevationProfile};
pub use route::{classify_route, RouteAnalysis, RouteDifficulty, DifficultSpot};

use wilderness_bridge::TerrainSource;

use crate::compositor::{composite_set, CompositedSample};
use crate::core::{AggregatorConfig, Coordinate, Result, TerrainSample};
use crate::overlay::SpatialOverlayStore;

pub struct AreaAggregator<T, S> {
    terrain: T,
    store: S,
    config: AggregatorConfig,
}

impl<T: TerrainSource, S: SpatialOverlayStore> AreaAggregator<T, S> {
    pub fn new(terrain: T, store: S) -> Self {
        Self::with_config(terrain, store, AggregatorConfig::default())
    }

    pub fn with_config(terrain: T, store: S, config: AggregatorConfig) -> Self {
        Self {
            terrain,
            store,
            config,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Terrain at one point, optionally composited with its overlays.
    ///
    /// A store failure here fails the call; there is no partial result for a
    /// single point.
    pub async fn terrain_at(&self, x: i32, y: i32, with_overlays: bool) -> Result<CompositedSample> {
        let base = self.terrain.get_terrain(x, y).await?;
        if !with_overlays {
            return Ok(CompositedSample::from_base(&base));
        }
        let overlays = self
            .store
            .find_overlays_near(x, y, self.config.overlay_search_radius)
            .await?;
        Ok(composite_set(&base, &overlays))
    }

    /// Base terrain for an inclusive box (at most 1000 coordinates)
    pub async fn terrain_area(
        &self,
        x_min: i32,
        y_min: i32,
        x_max: i32,
        y_max: i32,
    ) -> Result<Vec<TerrainSample>> {
        Ok(self.terrain.get_terrain_batch(x_min, y_min, x_max, y_max).await?)
    }

    /// Fetch terrain for each coordinate in order; the first failure aborts
    async fn fetch_points(&self, points: &[Coordinate]) -> Result<Vec<TerrainSample>> {
        let mut samples = Vec::with_capacity(points.len());
        for p in points {
            samples.push(self.terrain.get_terrain(p.x, p.y).await?);
        }
        Ok(samples)
    }
}
