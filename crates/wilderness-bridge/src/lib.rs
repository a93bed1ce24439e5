//! Bridge to the external wilderness terrain engine.
//!
//! Every call opens its own TCP connection, writes one newline-terminated
//! JSON command and reads one newline-terminated JSON reply:
//! ```ignore
//! let client = TerrainBridgeClient::new(BridgeConfig::default());
//! let sample = client.get_terrain(12, -40).await?;
//! ```
//!
//! The [`server`] module hosts a stub engine speaking the same protocol,
//! used by tests and for local development.

pub mod bounds;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod sector;
pub mod server;

pub use bounds::{Coordinate, MAX_BATCH_COORDINATES, WORLD_MAX, WORLD_MIN};
pub use client::{TerrainBridgeClient, TerrainSource};
pub use config::{BridgeConfig, DEFAULT_MAX_REPLY_BYTES};
pub use error::TerrainBridgeError;
pub use protocol::*;
pub use sector::MapSector;
pub use server::{BridgeServer, TerrainEngine};

/// Default terrain engine port
pub const DEFAULT_PORT: u16 = 8182;
