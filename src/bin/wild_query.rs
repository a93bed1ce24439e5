//! Wilderness query - inspect a live terrain engine through the composition engine.
//!
//! Usage: cargo run --bin wild_query -- <COMMAND> [ARGS] [OPTIONS]
//!
//! Commands:
//!   ping                       Engine status and uptime
//!   point <X> <Y>              Terrain at a point (composited if --overlays given)
//!   map <X> <Y> <R>            Circular map around a center
//!   profile <X1> <Y1> <X2> <Y2>  Elevation profile along a line
//!   route <X1> <Y1> <X2> <Y2>    Route difficulty analysis
//!   rooms [LIMIT]              Static rooms on the grid (default limit 50)
//!   room <VNUM>                Full room record
//!   exits                      Rooms leading out of the wilderness
//!
//! Options:
//!   --host <HOST>        Terrain engine host (default: $WILDERNESS_BRIDGE_HOST or 127.0.0.1)
//!   --port <PORT>        Terrain engine port (default: $WILDERNESS_BRIDGE_PORT or 8182)
//!   --timeout-ms <MS>    Per-call timeout (default: 5000)
//!   --overlays <FILE>    Overlay snapshot JSON; enables composition

use std::process::ExitCode;
use std::time::Duration;

use serde::Serialize;

use wilderness::aggregate::AreaAggregator;
use wilderness::core::Coordinate;
use wilderness::overlay::MemoryOverlayStore;
use wilderness_bridge::{BridgeConfig, TerrainBridgeClient};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .target(env_logger::Target::Stderr)
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), String> {
    let (positional, options) = split_args(args);
    let command = positional.first().map(String::as_str).unwrap_or("ping");

    let mut config = BridgeConfig::from_env();
    if let Some(host) = option(&options, "--host") {
        config.host = host.to_string();
    }
    if let Some(port) = parse_option(&options, "--port")? {
        config.port = port;
    }
    if let Some(ms) = parse_option(&options, "--timeout-ms")? {
        config.timeout = Duration::from_millis(ms);
    }

    let overlay_file = option(&options, "--overlays");
    let store = match overlay_file {
        Some(path) => MemoryOverlayStore::load(path).await.map_err(|e| e.to_string())?,
        None => MemoryOverlayStore::new(),
    };
    let with_overlays = overlay_file.is_some();

    let client = TerrainBridgeClient::new(config);
    let aggregator = AreaAggregator::new(&client, store);

    match command {
        "ping" => {
            let status = client.ping().await.map_err(|e| e.to_string())?;
            print_json(&status)
        }
        "point" => {
            let (x, y) = (int_arg(&positional, 1)?, int_arg(&positional, 2)?);
            let sample = aggregator
                .terrain_at(x, y, with_overlays)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&sample)
        }
        "map" => {
            let (x, y, r) = (
                int_arg(&positional, 1)?,
                int_arg(&positional, 2)?,
                int_arg(&positional, 3)?,
            );
            let map = aggregator
                .map_data(x, y, r, with_overlays)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&map)
        }
        "profile" => {
            let (from, to) = line_args(&positional)?;
            let profile = aggregator
                .elevation_profile(from, to)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&profile)
        }
        "route" => {
            let (from, to) = line_args(&positional)?;
            let route = aggregator
                .analyze_route(from, to)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&route)
        }
        "rooms" => {
            let limit = match positional.get(1) {
                Some(raw) => raw.parse().map_err(|_| format!("invalid limit {:?}", raw))?,
                None => 50,
            };
            let rooms = client
                .get_static_rooms_list(limit)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&rooms)
        }
        "room" => {
            let vnum = int_arg(&positional, 1)?;
            let room = client.get_room_details(vnum).await.map_err(|e| e.to_string())?;
            print_json(&room)
        }
        "exits" => {
            let exits = client.get_wilderness_exits().await.map_err(|e| e.to_string())?;
            print_json(&exits)
        }
        other => Err(format!("unknown command {:?}", other)),
    }
}

/// Separate `--flag value` pairs from positional arguments
fn split_args(args: &[String]) -> (Vec<String>, Vec<(String, String)>) {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            let value = iter.next().cloned().unwrap_or_default();
            options.push((arg.clone(), value));
        } else {
            positional.push(arg.clone());
        }
    }
    (positional, options)
}

fn option<'a>(options: &'a [(String, String)], name: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn parse_option<T: std::str::FromStr>(
    options: &[(String, String)],
    name: &str,
) -> Result<Option<T>, String> {
    option(options, name)
        .map(|raw| raw.parse().map_err(|_| format!("invalid value {:?} for {}", raw, name)))
        .transpose()
}

fn int_arg(positional: &[String], index: usize) -> Result<i32, String> {
    let raw = positional
        .get(index)
        .ok_or_else(|| format!("missing argument {}", index))?;
    raw.parse().map_err(|_| format!("argument {} is not an integer: {:?}", index, raw))
}

fn line_args(positional: &[String]) -> Result<(Coordinate, Coordinate), String> {
    Ok((
        Coordinate::new(int_arg(positional, 1)?, int_arg(positional, 2)?),
        Coordinate::new(int_arg(positional, 3)?, int_arg(positional, 4)?),
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}
