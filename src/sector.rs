//! Region-override sector table (37 entries, ids 0-36)
//!
//! Used only by sector-override regions. Its numbering differs from the
//! player-facing [`MapSector`](wilderness_bridge::MapSector) table even for
//! small ids, so the two are kept as unrelated types.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionSector {
    Inside,
    City,
    Field,
    Forest,
    Hills,
    Mountain,
    WaterSwim,
    WaterNoSwim,
    Flying,
    Underwater,
    ZoneEntrance,
    RoadNorthSouth,
    RoadEastWest,
    RoadIntersection,
    Desert,
    Ocean,
    Marshland,
    HighMountain,
    OuterPlanes,
    UnderdarkWild,
    UnderdarkCity,
    UnderdarkInside,
    UnderdarkWaterSwim,
    UnderdarkWaterNoSwim,
    UnderdarkNoGround,
    Lava,
    DirtRoadNorthSouth,
    DirtRoadEastWest,
    DirtRoadIntersection,
    Cave,
    Jungle,
    Tundra,
    Taiga,
    Beach,
    SeaPort,
    InsideRoom,
    River,
}

impl RegionSector {
    pub const COUNT: usize = 37;

    pub const ALL: [RegionSector; Self::COUNT] = [
        RegionSector::Inside,
        RegionSector::City,
        RegionSector::Field,
        RegionSector::Forest,
        RegionSector::Hills,
        RegionSector::Mountain,
        RegionSector::WaterSwim,
        RegionSector::WaterNoSwim,
        RegionSector::Flying,
        RegionSector::Underwater,
        RegionSector::ZoneEntrance,
        RegionSector::RoadNorthSouth,
        RegionSector::RoadEastWest,
        RegionSector::RoadIntersection,
        RegionSector::Desert,
        RegionSector::Ocean,
        RegionSector::Marshland,
        RegionSector::HighMountain,
        RegionSector::OuterPlanes,
        RegionSector::UnderdarkWild,
        RegionSector::UnderdarkCity,
        RegionSector::UnderdarkInside,
        RegionSector::UnderdarkWaterSwim,
        RegionSector::UnderdarkWaterNoSwim,
        RegionSector::UnderdarkNoGround,
        RegionSector::Lava,
        RegionSector::DirtRoadNorthSouth,
        RegionSector::DirtRoadEastWest,
        RegionSector::DirtRoadIntersection,
        RegionSector::Cave,
        RegionSector::Jungle,
        RegionSector::Tundra,
        RegionSector::Taiga,
        RegionSector::Beach,
        RegionSector::SeaPort,
        RegionSector::InsideRoom,
        RegionSector::River,
    ];

    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn id(&self) -> i32 {
        *self as i32
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegionSector::Inside => "Inside",
            RegionSector::City => "City",
            RegionSector::Field => "Field",
            RegionSector::Forest => "Forest",
            RegionSector::Hills => "Hills",
            RegionSector::Mountain => "Mountains",
            RegionSector::WaterSwim => "Water (Swim)",
            RegionSector::WaterNoSwim => "Water (No Swim)",
            RegionSector::Flying => "Flying",
            RegionSector::Underwater => "Underwater",
            RegionSector::ZoneEntrance => "Zone Entrance",
            RegionSector::RoadNorthSouth => "Road North-South",
            RegionSector::RoadEastWest => "Road East-West",
            RegionSector::RoadIntersection => "Road Intersection",
            RegionSector::Desert => "Desert",
            RegionSector::Ocean => "Ocean",
            RegionSector::Marshland => "Marshland",
            RegionSector::HighMountain => "High Mountain",
            RegionSector::OuterPlanes => "Outer Planes",
            RegionSector::UnderdarkWild => "Underdark - Wild",
            RegionSector::UnderdarkCity => "Underdark - City",
            RegionSector::UnderdarkInside => "Underdark - Inside",
            RegionSector::UnderdarkWaterSwim => "Underdark - Water (Swim)",
            RegionSector::UnderdarkWaterNoSwim => "Underdark - Water (No Swim)",
            RegionSector::UnderdarkNoGround => "Underdark - No Ground",
            RegionSector::Lava => "Lava",
            RegionSector::DirtRoadNorthSouth => "Dirt Road North-South",
            RegionSector::DirtRoadEastWest => "Dirt Road East-West",
            RegionSector::DirtRoadIntersection => "Dirt Road Intersection",
            RegionSector::Cave => "Cave",
            RegionSector::Jungle => "Jungle",
            RegionSector::Tundra => "Tundra",
            RegionSector::Taiga => "Taiga",
            RegionSector::Beach => "Beach",
            RegionSector::SeaPort => "Sea Port",
            RegionSector::InsideRoom => "Inside Room",
            RegionSector::River => "River",
        }
    }

    pub fn is_road(&self) -> bool {
        matches!(
            self,
            RegionSector::RoadNorthSouth | RegionSector::RoadEastWest | RegionSector::RoadIntersection
        )
    }
}
