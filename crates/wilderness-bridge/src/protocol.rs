//! Bridge protocol - JSON command/response definitions

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bounds::Coordinate;
use crate::error::TerrainBridgeError;
use crate::sector::MapSector;

/// Commands sent to the terrain engine, one per connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BridgeCommand {
    /// Health check
    Ping,
    /// Terrain facts at one coordinate
    GetTerrain { x: i32, y: i32 },
    /// Terrain facts for every coordinate of an inclusive box
    GetTerrainBatch { params: BatchBounds },
    /// Pre-authored rooms placed on the grid
    GetStaticRoomsList { limit: u32 },
    /// Full record of one room, exits included
    GetRoomDetails { vnum: i32 },
    /// Room at an exact coordinate, if any
    GetStaticRoomByCoordinates { x: i32, y: i32 },
    /// Rooms with exits leading out of the wilderness zone
    GetWildernessExits,
}

impl BridgeCommand {
    /// Wire name of the command, for logs
    pub fn name(&self) -> &'static str {
        match self {
            BridgeCommand::Ping => "ping",
            BridgeCommand::GetTerrain { .. } => "get_terrain",
            BridgeCommand::GetTerrainBatch { .. } => "get_terrain_batch",
            BridgeCommand::GetStaticRoomsList { .. } => "get_static_rooms_list",
            BridgeCommand::GetRoomDetails { .. } => "get_room_details",
            BridgeCommand::GetStaticRoomByCoordinates { .. } => "get_static_room_by_coordinates",
            BridgeCommand::GetWildernessExits => "get_wilderness_exits",
        }
    }
}

/// Inclusive box for a batch terrain request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchBounds {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

/// Reply envelope from the terrain engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Successful reply without a payload
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }

    /// Unwrap the envelope, turning `success: false` into an error
    pub fn into_data(self) -> Result<Option<Value>, TerrainBridgeError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(TerrainBridgeError::new(
                self.error
                    .unwrap_or_else(|| "engine reported failure without a message".into()),
            ))
        }
    }

    /// Unwrap the envelope and decode a required payload
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, TerrainBridgeError> {
        match self.into_data()? {
            Some(data) => Ok(serde_json::from_value(data)?),
            None => Err(TerrainBridgeError::new("response carried no data")),
        }
    }
}

/// Terrain facts as the engine sends them
///
/// Batch entries carry their own coordinates; single-point replies do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    pub elevation: i32,
    pub temperature: i32,
    pub moisture: i32,
    pub sector_type: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_name: Option<String>,
}

/// Base terrain at one grid coordinate, before any overlays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainSample {
    pub x: i32,
    pub y: i32,
    pub elevation: i32,
    pub temperature: i32,
    pub moisture: u8,
    pub sector_type: i32,
    pub sector_name: String,
}

impl TerrainSample {
    /// Build a sample from engine facts.
    ///
    /// `at` supplies the coordinate when the facts do not carry one. Moisture
    /// is clamped to 0-255 and the sector name comes from the map sector
    /// table, falling back to the engine's own name for unknown codes.
    pub fn from_facts(facts: TerrainFacts, at: Option<Coordinate>) -> Result<Self, TerrainBridgeError> {
        let coord = match (facts.x, facts.y, at) {
            (Some(x), Some(y), _) => Coordinate::new(x, y),
            (_, _, Some(c)) => c,
            _ => return Err(TerrainBridgeError::new("terrain entry is missing its coordinates")),
        };

        let sector_name = match MapSector::from_id(facts.sector_type) {
            Some(sector) => sector.name().to_string(),
            None => facts.sector_name.unwrap_or_else(|| "Unknown".into()),
        };

        Ok(Self {
            x: coord.x,
            y: coord.y,
            elevation: facts.elevation,
            temperature: facts.temperature,
            moisture: facts.moisture.clamp(0, 255) as u8,
            sector_type: facts.sector_type,
            sector_name,
        })
    }

    pub fn coord(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    pub fn map_sector(&self) -> Option<MapSector> {
        MapSector::from_id(self.sector_type)
    }
}

/// Engine status returned by `ping`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingStatus {
    #[serde(default)]
    pub status: String,
    /// Seconds since the engine started
    #[serde(default)]
    pub uptime: f64,
}

/// Summary of a pre-authored room on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRoomSummary {
    pub vnum: i32,
    pub name: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomExit {
    pub direction: String,
    pub to_room: i32,
    #[serde(default)]
    pub to_sector: Option<i32>,
}

/// Full room record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetails {
    pub vnum: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub sector_type: Option<i32>,
    #[serde(default)]
    pub exits: Vec<RoomExit>,
}

/// Room whose exits lead outside the wilderness zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildernessExit {
    pub vnum: i32,
    pub name: String,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub exits: Vec<RoomExit>,
}

/// Interpret a room-by-coordinates payload; absence is not an error
pub fn decode_room_lookup(data: Option<Value>) -> Result<Option<StaticRoomSummary>, TerrainBridgeError> {
    match data {
        None | Some(Value::Null) => Ok(None),
        Some(v) if v.get("found").and_then(Value::as_bool) == Some(false) => Ok(None),
        Some(v) => Ok(Some(serde_json::from_value(v)?)),
    }
}
