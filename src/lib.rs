//! Wilderness - terrain overlay composition engine
//!
//! Base terrain comes from the external terrain engine through
//! [`wilderness_bridge`]; author-placed regions and paths come from a
//! [`SpatialOverlayStore`]. The [`compositor`] merges the two and the
//! [`aggregate`] drivers sample areas and lines for maps and route analysis.

pub mod core;
pub mod sector;
pub mod overlay;
pub mod compositor;
pub mod aggregate;

pub use crate::core::{Error, Result};
pub use aggregate::AreaAggregator;
pub use compositor::{composite, CompositedSample};
pub use overlay::{OverlaySet, PathOverlay, RegionOverlay, SpatialOverlayStore};
pub use sector::RegionSector;
