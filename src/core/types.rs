//! Core type aliases and re-exports

pub use wilderness_bridge::{
    Coordinate, MapSector, TerrainSample,
    WORLD_MAX, WORLD_MIN,
};

/// Standard Result type for the engine
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
