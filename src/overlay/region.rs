//! Region overlays

use serde::{Deserialize, Serialize};

use crate::sector::RegionSector;

/// What a region does to the terrain it covers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    /// Names the area
    Geographic,
    /// Marks an encounter zone
    Encounter,
    /// Nudges elevation by a signed amount
    SectorTransform { elevation_delta: i32 },
    /// Replaces the sector outright
    SectorOverride { sector: RegionSector },
}

impl RegionKind {
    /// Stored `region_type` code (1-4); also the application order
    pub fn code(&self) -> i32 {
        match self {
            RegionKind::Geographic => 1,
            RegionKind::Encounter => 2,
            RegionKind::SectorTransform { .. } => 3,
            RegionKind::SectorOverride { .. } => 4,
        }
    }

    /// Stored `props` value
    pub fn props(&self) -> Option<i32> {
        match self {
            RegionKind::Geographic | RegionKind::Encounter => None,
            RegionKind::SectorTransform { elevation_delta } => Some(*elevation_delta),
            RegionKind::SectorOverride { sector } => Some(sector.id()),
        }
    }

    /// Decode the stored `(region_type, props)` pair
    pub fn from_raw(region_type: i32, props: Option<i32>) -> Result<Self, String> {
        match region_type {
            1 => Ok(RegionKind::Geographic),
            2 => Ok(RegionKind::Encounter),
            3 => Ok(RegionKind::SectorTransform {
                elevation_delta: props.unwrap_or(0),
            }),
            4 => {
                let id = props.ok_or("sector override region has no sector")?;
                RegionSector::from_id(id)
                    .map(|sector| RegionKind::SectorOverride { sector })
                    .ok_or_else(|| format!("sector override {} is outside 0-36", id))
            }
            other => Err(format!("unknown region type {}", other)),
        }
    }
}

/// A region record as held by the spatial store. Geometry stays in the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRegion", into = "StoredRegion")]
pub struct RegionOverlay {
    pub vnum: i32,
    pub name: String,
    pub kind: RegionKind,
    /// Opaque reset data, e.g. comma-separated spawn ids for encounters
    pub reset_data: Option<String>,
}

impl RegionOverlay {
    pub fn new(vnum: i32, name: impl Into<String>, kind: RegionKind) -> Self {
        Self {
            vnum,
            name: name.into(),
            kind,
            reset_data: None,
        }
    }

    pub fn with_reset_data(mut self, reset_data: impl Into<String>) -> Self {
        self.reset_data = Some(reset_data.into());
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredRegion {
    vnum: i32,
    name: String,
    region_type: i32,
    #[serde(default)]
    props: Option<i32>,
    #[serde(default)]
    reset_data: Option<String>,
}

impl TryFrom<StoredRegion> for RegionOverlay {
    type Error = String;

    fn try_from(raw: StoredRegion) -> Result<Self, Self::Error> {
        let kind = RegionKind::from_raw(raw.region_type, raw.props)
            .map_err(|e| format!("region {}: {}", raw.vnum, e))?;
        Ok(Self {
            vnum: raw.vnum,
            name: raw.name,
            kind,
            reset_data: raw.reset_data,
        })
    }
}

impl From<RegionOverlay> for StoredRegion {
    fn from(region: RegionOverlay) -> Self {
        Self {
            vnum: region.vnum,
            region_type: region.kind.code(),
            props: region.kind.props(),
            name: region.name,
            reset_data: region.reset_data,
        }
    }
}
