//! TCP client for the terrain engine
//!
//! One connection per call, no pooling and no retry. A refused connection,
//! a timeout or a malformed reply fails that call immediately.

use std::time::Instant;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::bounds::{check_axis, validate_batch, Coordinate};
use crate::config::BridgeConfig;
use crate::error::TerrainBridgeError;
use crate::protocol::{
    decode_room_lookup, BatchBounds, BridgeCommand, BridgeResponse, PingStatus, RoomDetails,
    StaticRoomSummary, TerrainFacts, TerrainSample, WildernessExit,
};

/// Source of base terrain facts.
///
/// [`TerrainBridgeClient`] is the production implementation; tests substitute
/// in-process fakes.
#[allow(async_fn_in_trait)]
pub trait TerrainSource {
    async fn get_terrain(&self, x: i32, y: i32) -> Result<TerrainSample, TerrainBridgeError>;

    async fn get_terrain_batch(
        &self,
        x_min: i32,
        y_min: i32,
        x_max: i32,
        y_max: i32,
    ) -> Result<Vec<TerrainSample>, TerrainBridgeError>;
}

impl<T: TerrainSource> TerrainSource for &T {
    async fn get_terrain(&self, x: i32, y: i32) -> Result<TerrainSample, TerrainBridgeError> {
        (**self).get_terrain(x, y).await
    }

    async fn get_terrain_batch(
        &self,
        x_min: i32,
        y_min: i32,
        x_max: i32,
        y_max: i32,
    ) -> Result<Vec<TerrainSample>, TerrainBridgeError> {
        (**self).get_terrain_batch(x_min, y_min, x_max, y_max).await
    }
}

/// Client handle for the terrain engine.
///
/// Holds only configuration, so it is cheap to clone and safe to share
/// between tasks.
#[derive(Clone, Debug, Default)]
pub struct TerrainBridgeClient {
    config: BridgeConfig,
}

impl TerrainBridgeClient {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Send one command over a fresh connection and read one reply line
    async fn send(&self, cmd: &BridgeCommand) -> Result<BridgeResponse, TerrainBridgeError> {
        let started = Instant::now();
        let addr = self.config.address();
        let limit = self.config.timeout;

        let stream = timeout(limit, TcpStream::connect(&addr))
            .await
            .map_err(|_| {
                TerrainBridgeError::new(format!("timed out connecting to terrain engine at {}", addr))
            })?
            .map_err(|e| {
                TerrainBridgeError::new(format!("cannot connect to terrain engine at {}: {}", addr, e))
            })?;

        let (reader, mut writer) = stream.into_split();

        let mut request = serde_json::to_string(cmd)?;
        request.push('\n');
        timeout(limit, async {
            writer.write_all(request.as_bytes()).await?;
            writer.flush().await?;
            Ok::<(), std::io::Error>(())
        })
        .await
        .map_err(|_| TerrainBridgeError::new(format!("timed out sending {}", cmd.name())))??;

        let cap = self.config.max_reply_bytes;
        let mut reader = BufReader::new(reader.take(cap));
        let mut reply = String::new();
        let read = timeout(limit, reader.read_line(&mut reply))
            .await
            .map_err(|_| {
                TerrainBridgeError::new(format!("timed out waiting for {} reply", cmd.name()))
            })??;
        if read == 0 {
            return Err(TerrainBridgeError::new(format!(
                "terrain engine closed the connection without answering {}",
                cmd.name()
            )));
        }
        if !reply.ends_with('\n') && read as u64 >= cap {
            return Err(TerrainBridgeError::new(format!(
                "{} reply exceeds {} bytes",
                cmd.name(),
                cap
            )));
        }

        let response: BridgeResponse = serde_json::from_str(reply.trim())?;
        log::debug!(
            "{} -> success={} in {:?}",
            cmd.name(),
            response.success,
            started.elapsed()
        );
        Ok(response)
    }

    /// Engine status and uptime
    pub async fn ping(&self) -> Result<PingStatus, TerrainBridgeError> {
        let data = self.send(&BridgeCommand::Ping).await?.into_data()?;
        match data {
            Some(v) => Ok(serde_json::from_value(v)?),
            None => Ok(PingStatus {
                status: "ok".into(),
                uptime: 0.0,
            }),
        }
    }

    /// `true` iff a ping succeeds; every failure reads as unhealthy
    pub async fn health_check(&self) -> bool {
        match self.ping().await {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Terrain engine health check failed: {}", e);
                false
            }
        }
    }

    pub async fn get_terrain(&self, x: i32, y: i32) -> Result<TerrainSample, TerrainBridgeError> {
        check_axis("x", x)?;
        check_axis("y", y)?;

        let facts: TerrainFacts = self.send(&BridgeCommand::GetTerrain { x, y }).await?.decode()?;
        TerrainSample::from_facts(facts, Some(Coordinate::new(x, y)))
    }

    /// Terrain for an inclusive box of at most 1000 coordinates
    pub async fn get_terrain_batch(
        &self,
        x_min: i32,
        y_min: i32,
        x_max: i32,
        y_max: i32,
    ) -> Result<Vec<TerrainSample>, TerrainBridgeError> {
        validate_batch(x_min, y_min, x_max, y_max)?;

        let cmd = BridgeCommand::GetTerrainBatch {
            params: BatchBounds { x_min, y_min, x_max, y_max },
        };
        let facts: Vec<TerrainFacts> = self.send(&cmd).await?.decode()?;
        facts
            .into_iter()
            .map(|f| TerrainSample::from_facts(f, None))
            .collect()
    }

    pub async fn get_static_rooms_list(
        &self,
        limit: u32,
    ) -> Result<Vec<StaticRoomSummary>, TerrainBridgeError> {
        self.send(&BridgeCommand::GetStaticRoomsList { limit })
            .await?
            .decode()
    }

    pub async fn get_room_details(&self, vnum: i32) -> Result<RoomDetails, TerrainBridgeError> {
        self.send(&BridgeCommand::GetRoomDetails { vnum }).await?.decode()
    }

    /// Room at an exact coordinate; `Ok(None)` when there is none
    pub async fn get_static_room_by_coordinates(
        &self,
        x: i32,
        y: i32,
    ) -> Result<Option<StaticRoomSummary>, TerrainBridgeError> {
        check_axis("x", x)?;
        check_axis("y", y)?;

        let data = self
            .send(&BridgeCommand::GetStaticRoomByCoordinates { x, y })
            .await?
            .into_data()?;
        decode_room_lookup(data)
    }

    pub async fn get_wilderness_exits(&self) -> Result<Vec<WildernessExit>, TerrainBridgeError> {
        self.send(&BridgeCommand::GetWildernessExits).await?.decode()
    }
}

impl TerrainSource for TerrainBridgeClient {
    async fn get_terrain(&self, x: i32, y: i32) -> Result<TerrainSample, TerrainBridgeError> {
        TerrainBridgeClient::get_terrain(self, x, y).await
    }

    async fn get_terrain_batch(
        &self,
        x_min: i32,
        y_min: i32,
        x_max: i32,
        y_max: i32,
    ) -> Result<Vec<TerrainSample>, TerrainBridgeError> {
        TerrainBridgeClient::get_terrain_batch(self, x_min, y_min, x_max, y_max).await
    }
}
