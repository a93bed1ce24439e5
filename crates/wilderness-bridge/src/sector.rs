//! Player-facing map sector table (16 entries)
//!
//! This numbering is the one the terrain engine reports and the one map and
//! terrain endpoints show. Region overrides use a separate 37-entry table
//! that lives in the composition engine; the two never convert into each
//! other.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapSector {
    Inside,
    City,
    Field,
    Forest,
    Hills,
    Mountains,
    WaterSwim,
    WaterNoSwim,
    Underwater,
    Flying,
    Desert,
    Ocean,
    Marshland,
    HighMountain,
    Road,
    ZoneEntrance,
}

impl MapSector {
    pub const ALL: [MapSector; 16] = [
        MapSector::Inside,
        MapSector::City,
        MapSector::Field,
        MapSector::Forest,
        MapSector::Hills,
        MapSector::Mountains,
        MapSector::WaterSwim,
        MapSector::WaterNoSwim,
        MapSector::Underwater,
        MapSector::Flying,
        MapSector::Desert,
        MapSector::Ocean,
        MapSector::Marshland,
        MapSector::HighMountain,
        MapSector::Road,
        MapSector::ZoneEntrance,
    ];

    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn id(&self) -> i32 {
        *self as i32
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapSector::Inside => "Inside",
            MapSector::City => "City",
            MapSector::Field => "Field",
            MapSector::Forest => "Forest",
            MapSector::Hills => "Hills",
            MapSector::Mountains => "Mountains",
            MapSector::WaterSwim => "Water-Swim",
            MapSector::WaterNoSwim => "Water-No-Swim",
            MapSector::Underwater => "Underwater",
            MapSector::Flying => "Flying",
            MapSector::Desert => "Desert",
            MapSector::Ocean => "Ocean",
            MapSector::Marshland => "Marshland",
            MapSector::HighMountain => "High Mountain",
            MapSector::Road => "Road",
            MapSector::ZoneEntrance => "Zone Entrance",
        }
    }

    /// Sectors that count against a route's difficulty
    pub fn is_difficult(&self) -> bool {
        matches!(
            self,
            MapSector::HighMountain | MapSector::WaterNoSwim | MapSector::Ocean
        )
    }

    /// Reverse lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for (i, sector) in MapSector::ALL.iter().enumerate() {
            assert_eq!(sector.id(), i as i32);
            assert_eq!(MapSector::from_id(i as i32), Some(*sector));
        }
        assert_eq!(MapSector::from_id(16), None);
        assert_eq!(MapSector::from_id(-1), None);
    }

    #[test]
    fn test_difficult_set() {
        let difficult: Vec<_> = MapSector::ALL.iter().filter(|s| s.is_difficult()).collect();
        assert_eq!(difficult.len(), 3);
        assert_eq!(MapSector::from_name("High Mountain"), Some(MapSector::HighMountain));
        assert!(MapSector::from_name("Water-No-Swim").unwrap().is_difficult());
    }
}
