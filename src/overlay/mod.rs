//! Author-placed overlays: regions, paths, and the store that finds them

pub mod region;
pub mod path;
pub mod store;

pub use region::{RegionKind, RegionOverlay};
pub use path::{PathKind, PathOverlay};
pub use store::{MemoryOverlayStore, NoOverlays, SpatialOverlayStore};

use serde::{Deserialize, Serialize};

/// Regions and paths whose geometry touches a queried point or box
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlaySet {
    #[serde(default)]
    pub regions: Vec<RegionOverlay>,
    #[serde(default)]
    pub paths: Vec<PathOverlay>,
}

impl OverlaySet {
    pub fn new(regions: Vec<RegionOverlay>, paths: Vec<PathOverlay>) -> Self {
        Self { regions, paths }
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && self.paths.is_empty()
    }
}
