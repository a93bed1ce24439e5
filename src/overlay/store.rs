//! Spatial overlay store interface and an in-memory snapshot implementation
//!
//! Containment is the store's business. The composition engine only asks
//! "what touches this point / box" and consumes the answer.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;

use super::{OverlaySet, PathOverlay, RegionOverlay};
use crate::core::{Coordinate, Result};

/// External store that resolves overlay geometry
#[allow(async_fn_in_trait)]
pub trait SpatialOverlayStore {
    /// Overlays whose geometry lies within `radius` of the point
    async fn find_overlays_near(&self, x: i32, y: i32, radius: f64) -> Result<OverlaySet>;

    /// Overlays whose geometry intersects the inclusive box
    async fn find_overlays_in_box(
        &self,
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    ) -> Result<OverlaySet>;
}

impl<T: SpatialOverlayStore> SpatialOverlayStore for &T {
    async fn find_overlays_near(&self, x: i32, y: i32, radius: f64) -> Result<OverlaySet> {
        (**self).find_overlays_near(x, y, radius).await
    }

    async fn find_overlays_in_box(
        &self,
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    ) -> Result<OverlaySet> {
        (**self).find_overlays_in_box(min_x, min_y, max_x, max_y).await
    }
}

/// Store with nothing in it
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOverlays;

impl SpatialOverlayStore for NoOverlays {
    async fn find_overlays_near(&self, _x: i32, _y: i32, _radius: f64) -> Result<OverlaySet> {
        Ok(OverlaySet::default())
    }

    async fn find_overlays_in_box(&self, _: i32, _: i32, _: i32, _: i32) -> Result<OverlaySet> {
        Ok(OverlaySet::default())
    }
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    regions: Vec<CoveredRegion>,
    #[serde(default)]
    paths: Vec<CoveredPath>,
}

#[derive(Deserialize)]
struct CoveredRegion {
    region: RegionOverlay,
    cells: Vec<Coordinate>,
}

#[derive(Deserialize)]
struct CoveredPath {
    path: PathOverlay,
    cells: Vec<Coordinate>,
}

/// Immutable snapshot of overlays with their covered cells listed explicitly.
///
/// Snapshot JSON:
/// ```json
/// {
///   "regions": [{"region": {"vnum": 1, "name": "Vale", "region_type": 1}, "cells": [[0, 0], [1, 0]]}],
///   "paths":   [{"path": {"vnum": 9, "name": "Old Road", "path_type": 2}, "cells": [[0, 1]]}]
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryOverlayStore {
    regions: Vec<RegionOverlay>,
    paths: Vec<PathOverlay>,
    /// cell -> (region indices, path indices), in insertion order
    cells: HashMap<Coordinate, (Vec<usize>, Vec<usize>)>,
}

impl MemoryOverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, region: RegionOverlay, cells: impl IntoIterator<Item = Coordinate>) {
        let idx = self.regions.len();
        self.regions.push(region);
        for cell in cells {
            self.cells.entry(cell).or_default().0.push(idx);
        }
    }

    pub fn add_path(&mut self, path: PathOverlay, cells: impl IntoIterator<Item = Coordinate>) {
        let idx = self.paths.len();
        self.paths.push(path);
        for cell in cells {
            self.cells.entry(cell).or_default().1.push(idx);
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut store = Self::new();
        for covered in snapshot.regions {
            store.add_region(covered.region, covered.cells);
        }
        for covered in snapshot.paths {
            store.add_path(covered.path, covered.cells);
        }
        log::info!(
            "Loaded overlay snapshot: {} regions, {} paths, {} cells",
            store.regions.len(),
            store.paths.len(),
            store.cells.len()
        );
        Ok(store)
    }

    /// Load a snapshot file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&json)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    fn collect<'a>(&self, cells: impl Iterator<Item = &'a Coordinate>) -> OverlaySet {
        let mut region_ids = BTreeSet::new();
        let mut path_ids = BTreeSet::new();
        for cell in cells {
            if let Some((regions, paths)) = self.cells.get(cell) {
                region_ids.extend(regions.iter().copied());
                path_ids.extend(paths.iter().copied());
            }
        }
        OverlaySet {
            regions: region_ids.into_iter().map(|i| self.regions[i].clone()).collect(),
            paths: path_ids.into_iter().map(|i| self.paths[i].clone()).collect(),
        }
    }
}

impl SpatialOverlayStore for MemoryOverlayStore {
    async fn find_overlays_near(&self, x: i32, y: i32, radius: f64) -> Result<OverlaySet> {
        // NaN and negative radii degrade to an exact-point lookup
        let radius = radius.max(0.0);
        let near = self.cells.keys().filter(|c| {
            let dx = (c.x as i64 - x as i64) as f64;
            let dy = (c.y as i64 - y as i64) as f64;
            dx.hypot(dy) <= radius
        });
        Ok(self.collect(near))
    }

    async fn find_overlays_in_box(
        &self,
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    ) -> Result<OverlaySet> {
        let inside = self
            .cells
            .keys()
            .filter(|c| (min_x..=max_x).contains(&c.x) && (min_y..=max_y).contains(&c.y));
        Ok(self.collect(inside))
    }
}
