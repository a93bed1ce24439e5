//! Path overlays: roads, rivers, streams

use serde::{Deserialize, Serialize};

use crate::sector::RegionSector;

/// Stored `path_type`. Code 4 is unassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathKind {
    Paved,
    Dirt,
    Geographic,
    River,
    Stream,
    /// Any code without a known meaning; carries no sector change
    Unmapped(i32),
}

impl PathKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => PathKind::Paved,
            2 => PathKind::Dirt,
            3 => PathKind::Geographic,
            5 => PathKind::River,
            6 => PathKind::Stream,
            other => PathKind::Unmapped(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            PathKind::Paved => 1,
            PathKind::Dirt => 2,
            PathKind::Geographic => 3,
            PathKind::River => 5,
            PathKind::Stream => 6,
            PathKind::Unmapped(code) => *code,
        }
    }

    /// Sector a path imposes, with the name shown for it.
    ///
    /// Geographic paths and unmapped codes have no entry.
    pub fn sector(&self) -> Option<(RegionSector, &'static str)> {
        match self {
            PathKind::Paved => Some((RegionSector::RoadNorthSouth, "Paved Road")),
            PathKind::Dirt => Some((RegionSector::DirtRoadNorthSouth, "Dirt Road")),
            PathKind::River => Some((RegionSector::River, "River")),
            PathKind::Stream => Some((RegionSector::WaterSwim, "Stream")),
            PathKind::Geographic | PathKind::Unmapped(_) => None,
        }
    }

    /// Travel speed multiplier for roads
    pub fn movement_bonus(&self) -> Option<f32> {
        match self {
            PathKind::Paved => Some(1.5),
            PathKind::Dirt => Some(1.2),
            _ => None,
        }
    }

    /// Whether the path adds moisture to the ground it crosses
    pub fn is_watercourse(&self) -> bool {
        matches!(self, PathKind::River | PathKind::Stream)
    }
}

/// A path record as held by the spatial store. Geometry stays in the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPath", into = "StoredPath")]
pub struct PathOverlay {
    pub vnum: i32,
    pub name: String,
    pub kind: PathKind,
    /// Optional sector hint; carried through but not applied
    pub props: Option<i32>,
}

impl PathOverlay {
    pub fn new(vnum: i32, name: impl Into<String>, kind: PathKind) -> Self {
        Self {
            vnum,
            name: name.into(),
            kind,
            props: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredPath {
    vnum: i32,
    name: String,
    path_type: i32,
    #[serde(default)]
    props: Option<i32>,
}

impl From<StoredPath> for PathOverlay {
    fn from(raw: StoredPath) -> Self {
        Self {
            vnum: raw.vnum,
            name: raw.name,
            kind: PathKind::from_code(raw.path_type),
            props: raw.props,
        }
    }
}

impl From<PathOverlay> for StoredPath {
    fn from(path: PathOverlay) -> Self {
        Self {
            vnum: path.vnum,
            path_type: path.kind.code(),
            name: path.name,
            props: path.props,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        for code in [1, 2, 3, 5, 6] {
            assert_eq!(PathKind::from_code(code).code(), code);
        }
        assert_eq!(PathKind::from_code(4), PathKind::Unmapped(4));
    }

    #[test]
    fn test_geographic_and_unmapped_have_no_sector() {
        assert!(PathKind::Geographic.sector().is_none());
        assert!(PathKind::Unmapped(4).sector().is_none());
        assert_eq!(PathKind::River.sector().unwrap().0.id(), 36);
    }

    #[test]
    fn test_secondary_effects() {
        assert_eq!(PathKind::Paved.movement_bonus(), Some(1.5));
        assert_eq!(PathKind::Dirt.movement_bonus(), Some(1.2));
        assert_eq!(PathKind::River.movement_bonus(), None);
        assert!(PathKind::Stream.is_watercourse());
        assert!(!PathKind::Dirt.is_watercourse());
    }
}
