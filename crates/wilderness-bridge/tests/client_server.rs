use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use wilderness_bridge::{
    BridgeCommand, BridgeConfig, BridgeResponse, BridgeServer, TerrainBridgeClient, TerrainEngine,
};

/// Deterministic engine: elevation = x + y, everything else fixed
#[derive(Default)]
struct RecordingEngine {
    seen: Vec<BridgeCommand>,
}

fn facts(x: i32, y: i32) -> serde_json::Value {
    json!({
        "x": x,
        "y": y,
        "elevation": x + y,
        "temperature": 15,
        "moisture": 90,
        "sector_type": 3,
        "sector_name": "Forest"
    })
}

impl TerrainEngine for RecordingEngine {
    fn handle(&mut self, cmd: BridgeCommand) -> BridgeResponse {
        self.seen.push(cmd.clone());
        match cmd {
            BridgeCommand::Ping => BridgeResponse::ok(json!({"status": "running", "uptime": 42.5})),
            BridgeCommand::GetTerrain { x, y } => BridgeResponse::ok(json!({
                "elevation": x + y,
                "temperature": 15,
                "moisture": 90,
                "sector_type": 3,
                "sector_name": "Forest"
            })),
            BridgeCommand::GetTerrainBatch { params } => {
                let mut out = Vec::new();
                for y in params.y_min..=params.y_max {
                    for x in params.x_min..=params.x_max {
                        out.push(facts(x, y));
                    }
                }
                BridgeResponse::ok(json!(out))
            }
            BridgeCommand::GetStaticRoomsList { limit } => {
                let rooms: Vec<_> = (0..limit.min(3))
                    .map(|i| json!({"vnum": 1000 + i, "name": format!("Room {}", i), "x": i, "y": 0}))
                    .collect();
                BridgeResponse::ok(json!(rooms))
            }
            BridgeCommand::GetRoomDetails { vnum } if vnum == 1000 => BridgeResponse::ok(json!({
                "vnum": 1000,
                "name": "Crossroads",
                "description": "Four roads meet.",
                "x": 0,
                "y": 0,
                "sector_type": 11,
                "exits": [{"direction": "north", "to_room": 1001, "to_sector": 2}]
            })),
            BridgeCommand::GetRoomDetails { vnum } => {
                BridgeResponse::error(format!("Room {} not found", vnum))
            }
            BridgeCommand::GetStaticRoomByCoordinates { x, y } if (x, y) == (10, 10) => {
                BridgeResponse::ok(json!({"vnum": 2000, "name": "Tower", "x": 10, "y": 10}))
            }
            BridgeCommand::GetStaticRoomByCoordinates { .. } => {
                BridgeResponse::ok(json!({"found": false}))
            }
            BridgeCommand::GetWildernessExits => BridgeResponse::ok(json!([
                {"vnum": 3000, "name": "City Gate", "exits": [{"direction": "east", "to_room": 3100}]}
            ])),
        }
    }
}

async fn start() -> (BridgeServer, Arc<Mutex<RecordingEngine>>, TerrainBridgeClient) {
    let engine = Arc::new(Mutex::new(RecordingEngine::default()));
    let server = BridgeServer::bind(engine.clone(), "127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = server.local_addr();
    let client = TerrainBridgeClient::new(
        BridgeConfig::new(addr.ip().to_string(), addr.port()).with_timeout(Duration::from_secs(2)),
    );
    (server, engine, client)
}

#[tokio::test]
async fn test_ping_and_health() {
    let (_server, _engine, client) = start().await;
    let status = client.ping().await.expect("ping failed");
    assert_eq!(status.status, "running");
    assert_eq!(status.uptime, 42.5);
    assert!(client.health_check().await);
}

#[tokio::test]
async fn test_get_terrain() {
    let (_server, engine, client) = start().await;
    let sample = client.get_terrain(7, -3).await.expect("terrain failed");
    assert_eq!((sample.x, sample.y), (7, -3));
    assert_eq!(sample.elevation, 4);
    assert_eq!(sample.sector_name, "Forest");
    assert_eq!(engine.lock().await.seen.len(), 1);
}

#[tokio::test]
async fn test_invalid_coordinates_never_reach_engine() {
    let (_server, engine, client) = start().await;
    assert!(client.get_terrain(1025, 0).await.is_err());
    assert!(client.get_terrain_batch(-1025, 0, 0, 0).await.is_err());
    // 40x40 box
    assert!(client.get_terrain_batch(0, 0, 39, 39).await.is_err());
    assert!(client.get_static_room_by_coordinates(0, -2048).await.is_err());
    assert!(engine.lock().await.seen.is_empty());
}

#[tokio::test]
async fn test_get_terrain_batch() {
    let (_server, _engine, client) = start().await;
    let samples = client.get_terrain_batch(-2, -2, 2, 2).await.expect("batch failed");
    assert_eq!(samples.len(), 25);
    assert!(samples.iter().all(|s| s.elevation == s.x + s.y));
}

#[tokio::test]
async fn test_room_queries() {
    let (_server, _engine, client) = start().await;

    let rooms = client.get_static_rooms_list(2).await.unwrap();
    assert_eq!(rooms.len(), 2);

    let details = client.get_room_details(1000).await.unwrap();
    assert_eq!(details.exits.len(), 1);
    assert_eq!(details.exits[0].to_room, 1001);

    let err = client.get_room_details(5).await.unwrap_err();
    assert_eq!(err.message(), "Room 5 not found");

    let found = client.get_static_room_by_coordinates(10, 10).await.unwrap();
    assert_eq!(found.map(|r| r.vnum), Some(2000));
    let missing = client.get_static_room_by_coordinates(11, 10).await.unwrap();
    assert!(missing.is_none());

    let exits = client.get_wilderness_exits().await.unwrap();
    assert_eq!(exits[0].name, "City Gate");
}

#[tokio::test]
async fn test_every_call_opens_its_own_connection() {
    let (server, engine, client) = start().await;
    client.ping().await.unwrap();
    client.get_terrain(1, 2).await.unwrap();
    client.get_terrain_batch(0, 0, 1, 1).await.unwrap();
    assert_eq!(server.connections(), 3);
    assert_eq!(engine.lock().await.seen.len(), 3);
}

#[tokio::test]
async fn test_server_closes_after_one_reply() {
    let (server, engine, _client) = start().await;
    let stream = TcpStream::connect(server.local_addr()).await.unwrap();
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    writer.write_all(b"{\"command\":\"ping\"}\n").await.unwrap();
    let mut first = String::new();
    reader.read_line(&mut first).await.unwrap();
    let response: BridgeResponse = serde_json::from_str(first.trim()).unwrap();
    assert!(response.success);

    // The peer is already gone; the write may or may not report it
    let _ = writer.write_all(b"{\"command\":\"ping\"}\n").await;
    let mut second = String::new();
    let read = tokio::time::timeout(Duration::from_secs(2), reader.read_line(&mut second))
        .await
        .expect("connection left open");
    match read {
        Ok(n) => assert_eq!(n, 0),
        Err(e) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
    }
    assert!(second.is_empty());
    assert_eq!(engine.lock().await.seen.len(), 1);
}

/// Accept one connection, read the request line and answer with `reply`
async fn raw_server(reply: Option<&'static str>) -> TerrainBridgeClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut line = String::new();
        BufReader::new(reader).read_line(&mut line).await.unwrap();
        match reply {
            Some(text) => {
                writer.write_all(text.as_bytes()).await.unwrap();
            }
            None => tokio::time::sleep(Duration::from_secs(5)).await,
        }
    });
    TerrainBridgeClient::new(
        BridgeConfig::new(addr.ip().to_string(), addr.port())
            .with_timeout(Duration::from_millis(300)),
    )
}

#[tokio::test]
async fn test_malformed_reply() {
    let client = raw_server(Some("this is not json\n")).await;
    let err = client.get_terrain(0, 0).await.unwrap_err();
    assert!(err.message().starts_with("malformed JSON"));
}

#[tokio::test]
async fn test_reply_timeout() {
    let client = raw_server(None).await;
    let err = client.get_terrain(0, 0).await.unwrap_err();
    assert!(err.message().contains("timed out"));
}

#[tokio::test]
async fn test_engine_failure_envelope() {
    let client = raw_server(Some("{\"success\": false, \"error\": \"generator offline\"}\n")).await;
    let err = client.get_terrain(0, 0).await.unwrap_err();
    assert_eq!(err.message(), "generator offline");
}

#[tokio::test]
async fn test_oversized_reply_rejected() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut line = String::new();
        BufReader::new(reader).read_line(&mut line).await.unwrap();
        // No newline ever arrives; only the cap can end the read
        let chunk = vec![b'x'; 4096];
        while writer.write_all(&chunk).await.is_ok() {}
    });
    let client = TerrainBridgeClient::new(
        BridgeConfig::new(addr.ip().to_string(), addr.port())
            .with_timeout(Duration::from_secs(2))
            .with_max_reply_bytes(1024),
    );

    let err = client.get_terrain(0, 0).await.unwrap_err();
    assert_eq!(err.message(), "get_terrain reply exceeds 1024 bytes");
}
