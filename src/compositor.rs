//! Overlay composition: base terrain + matching regions and paths
//!
//! Regions apply in ascending type order (geographic, encounter, transform,
//! override) so a later type wins any field it shares with an earlier one.
//! Paths apply after every region and always win the sector fields. The
//! function is pure; the same inputs always give the same output.

use serde::{Deserialize, Serialize};

use crate::core::TerrainSample;
use crate::overlay::{OverlaySet, PathOverlay, RegionKind, RegionOverlay};

/// Moisture a river or stream adds to the ground it crosses
pub const WATERCOURSE_MOISTURE: u8 = 20;

/// Terrain at one coordinate after all overlays have been merged
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositedSample {
    pub x: i32,
    pub y: i32,
    pub elevation: i32,
    pub temperature: i32,
    pub moisture: u8,
    pub sector_type: i32,
    pub sector_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_bonus: Option<f32>,
    pub has_overlays: bool,
    /// Human-readable audit trail, in application order
    #[serde(default)]
    pub modifications: Vec<String>,
}

impl CompositedSample {
    /// The base sample with nothing applied
    pub fn from_base(base: &TerrainSample) -> Self {
        Self {
            x: base.x,
            y: base.y,
            elevation: base.elevation,
            temperature: base.temperature,
            moisture: base.moisture,
            sector_type: base.sector_type,
            sector_name: base.sector_name.clone(),
            geographic_name: None,
            encounter_zone: None,
            movement_bonus: None,
            has_overlays: false,
            modifications: Vec::new(),
        }
    }

    fn apply_region(&mut self, region: &RegionOverlay) {
        match region.kind {
            RegionKind::Geographic => {
                self.geographic_name = Some(region.name.clone());
                self.modifications.push(format!("Named '{}'", region.name));
            }
            RegionKind::Encounter => {
                self.encounter_zone = Some(region.name.clone());
                let entry = match region.reset_data.as_deref().map(str::trim) {
                    Some(spawns) if !spawns.is_empty() => {
                        format!("Encounter zone '{}' (spawns: {})", region.name, spawns)
                    }
                    _ => format!("Encounter zone '{}'", region.name),
                };
                self.modifications.push(entry);
            }
            RegionKind::SectorTransform { elevation_delta } => {
                self.elevation = self.elevation.saturating_add(elevation_delta);
                self.modifications
                    .push(format!("Elevation affected by {}", region.name));
            }
            RegionKind::SectorOverride { sector } => {
                self.sector_type = sector.id();
                self.sector_name = sector.name().to_string();
                self.modifications.push(format!(
                    "Sector overridden to {} by {}",
                    self.sector_name, region.name
                ));
            }
        }
    }

    fn apply_path(&mut self, path: &PathOverlay) {
        if let Some((sector, label)) = path.kind.sector() {
            self.sector_type = sector.id();
            self.sector_name = label.to_string();
            self.modifications
                .push(format!("Sector changed to {} by {}", label, path.name));
        }

        if path.kind.is_watercourse() {
            self.moisture = self.moisture.saturating_add(WATERCOURSE_MOISTURE);
            self.modifications
                .push(format!("Moisture increased by {}", path.name));
        }

        if let Some(bonus) = path.kind.movement_bonus() {
            self.movement_bonus = Some(bonus);
            self.modifications
                .push(format!("Movement bonus {}x from {}", bonus, path.name));
        }
    }
}

/// Merge the overlays covering a sample's coordinate into it
pub fn composite(
    base: &TerrainSample,
    regions: &[RegionOverlay],
    paths: &[PathOverlay],
) -> CompositedSample {
    let mut out = CompositedSample::from_base(base);

    let mut ordered: Vec<&RegionOverlay> = regions.iter().collect();
    // Stable: equal types keep store order, so the later one wins
    ordered.sort_by_key(|r| r.kind.code());

    for region in ordered {
        out.apply_region(region);
    }
    for path in paths {
        out.apply_path(path);
    }

    out.has_overlays = !regions.is_empty() || !paths.is_empty();
    out
}

/// [`composite`] over an [`OverlaySet`]
pub fn composite_set(base: &TerrainSample, overlays: &OverlaySet) -> CompositedSample {
    composite(base, &overlays.regions, &overlays.paths)
}
