//! Circular map sampling

use std::collections::HashSet;

use serde::Serialize;
use wilderness_bridge::TerrainSource;

use super::AreaAggregator;
use crate::compositor::{composite_set, CompositedSample};
use crate::core::{Coordinate, Error, Result, WORLD_MAX, WORLD_MIN};
use crate::overlay::{PathOverlay, RegionOverlay, SpatialOverlayStore};

/// One map point
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapCell {
    #[serde(flatten)]
    pub sample: CompositedSample,
    /// Set when the overlay lookup for this point failed; `sample` is then base terrain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Terrain (and optionally overlays) for every point within a radius
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapData {
    pub center: Coordinate,
    pub radius: i32,
    pub with_overlays: bool,
    pub point_count: usize,
    /// Percentage (0-100) of points touched by at least one overlay
    pub overlay_coverage: f64,
    /// Points whose overlay lookup failed
    pub failed_points: usize,
    pub points: Vec<MapCell>,
    /// Every region that affected a point, once each
    pub regions: Vec<RegionOverlay>,
    /// Every path that affected a point, once each
    pub paths: Vec<PathOverlay>,
}

/// Split an inclusive box into row strips of at most `limit` coordinates
pub(crate) fn batch_strips(
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
    limit: i64,
) -> Vec<(i32, i32, i32, i32)> {
    let width = (x_max - x_min + 1).max(1) as i64;
    let rows = (limit / width).max(1) as i32;

    let mut strips = Vec::new();
    let mut y = y_min;
    while y <= y_max {
        let end = (y + rows - 1).min(y_max);
        strips.push((x_min, y, x_max, end));
        y = end + 1;
    }
    strips
}

impl<T: TerrainSource, S: SpatialOverlayStore> AreaAggregator<T, S> {
    /// Sample every point within Euclidean `radius` of the center.
    ///
    /// The bounding box is fetched in batches; a batch failure aborts the
    /// whole map. With overlays, each point costs one store query, and a
    /// failed query is recorded on that point instead of aborting.
    pub async fn map_data(
        &self,
        center_x: i32,
        center_y: i32,
        radius: i32,
        with_overlays: bool,
    ) -> Result<MapData> {
        let center = Coordinate::new(center_x, center_y);
        center.validate()?;

        let limit = self.config.radius_limit(with_overlays);
        if !(0..=limit).contains(&radius) {
            return Err(Error::InvalidRequest(format!(
                "radius {} outside 0..={}{}",
                radius,
                limit,
                if with_overlays { " for overlay maps" } else { "" }
            )));
        }

        let x_min = (center_x - radius).max(WORLD_MIN);
        let x_max = (center_x + radius).min(WORLD_MAX);
        let y_min = (center_y - radius).max(WORLD_MIN);
        let y_max = (center_y + radius).min(WORLD_MAX);

        let r2 = radius as i64 * radius as i64;
        let mut base = Vec::new();
        for (sx0, sy0, sx1, sy1) in
            batch_strips(x_min, y_min, x_max, y_max, self.config.effective_batch_limit())
        {
            let strip = self.terrain.get_terrain_batch(sx0, sy0, sx1, sy1).await?;
            base.extend(strip.into_iter().filter(|s| {
                let dx = s.x as i64 - center_x as i64;
                let dy = s.y as i64 - center_y as i64;
                dx * dx + dy * dy <= r2
            }));
        }

        let mut points = Vec::with_capacity(base.len());
        let mut regions = Vec::new();
        let mut paths = Vec::new();
        let mut seen_regions = HashSet::new();
        let mut seen_paths = HashSet::new();
        let mut failed_points = 0;

        for sample in &base {
            if !with_overlays {
                points.push(MapCell {
                    sample: CompositedSample::from_base(sample),
                    error: None,
                });
                continue;
            }

            match self
                .store
                .find_overlays_near(sample.x, sample.y, self.config.overlay_search_radius)
                .await
            {
                Ok(overlays) => {
                    for region in &overlays.regions {
                        if seen_regions.insert(region.vnum) {
                            regions.push(region.clone());
                        }
                    }
                    for path in &overlays.paths {
                        if seen_paths.insert(path.vnum) {
                            paths.push(path.clone());
                        }
                    }
                    points.push(MapCell {
                        sample: composite_set(sample, &overlays),
                        error: None,
                    });
                }
                Err(e) => {
                    log::warn!("Overlay lookup failed at ({}, {}): {}", sample.x, sample.y, e);
                    failed_points += 1;
                    points.push(MapCell {
                        sample: CompositedSample::from_base(sample),
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let point_count = points.len();
        let covered = points.iter().filter(|p| p.sample.has_overlays).count();
        let overlay_coverage = if point_count == 0 {
            0.0
        } else {
            covered as f64 * 100.0 / point_count as f64
        };

        log::info!(
            "Map at {:?} r={}: {} points, {:.1}% overlaid, {} regions, {} paths, {} failed",
            center,
            radius,
            point_count,
            overlay_coverage,
            regions.len(),
            paths.len(),
            failed_points
        );

        Ok(MapData {
            center,
            radius,
            with_overlays,
            point_count,
            overlay_coverage,
            failed_points,
            points,
            regions,
            paths,
        })
    }
}
