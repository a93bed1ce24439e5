//! Wilderness grid bounds and client-side argument validation

use serde::{Deserialize, Serialize};

use crate::error::TerrainBridgeError;

/// Lowest valid coordinate on either axis
pub const WORLD_MIN: i32 = -1024;
/// Highest valid coordinate on either axis
pub const WORLD_MAX: i32 = 1024;
/// Largest number of coordinates a single batch request may cover
pub const MAX_BATCH_COORDINATES: i64 = 1000;

/// Integer position on the wilderness grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both axes lie inside the wilderness grid
    pub fn in_bounds(&self) -> bool {
        in_range(self.x) && in_range(self.y)
    }

    pub fn validate(&self) -> Result<(), TerrainBridgeError> {
        check_axis("x", self.x)?;
        check_axis("y", self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

fn in_range(v: i32) -> bool {
    (WORLD_MIN..=WORLD_MAX).contains(&v)
}

/// Reject a single axis value outside the grid
pub fn check_axis(name: &str, value: i32) -> Result<(), TerrainBridgeError> {
    if in_range(value) {
        Ok(())
    } else {
        Err(TerrainBridgeError::new(format!(
            "{} = {} is outside [{}, {}]",
            name, value, WORLD_MIN, WORLD_MAX
        )))
    }
}

/// Number of coordinates in an inclusive box, zero if the box is inverted
pub fn box_area(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> i64 {
    let w = (x_max as i64 - x_min as i64 + 1).max(0);
    let h = (y_max as i64 - y_min as i64 + 1).max(0);
    w * h
}

/// Validate all four bounds of a batch box and its coordinate count
pub fn validate_batch(
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
) -> Result<(), TerrainBridgeError> {
    check_axis("x_min", x_min)?;
    check_axis("y_min", y_min)?;
    check_axis("x_max", x_max)?;
    check_axis("y_max", y_max)?;

    if x_min > x_max || y_min > y_max {
        return Err(TerrainBridgeError::new(format!(
            "inverted batch box ({}, {})..({}, {})",
            x_min, y_min, x_max, y_max
        )));
    }

    let area = box_area(x_min, y_min, x_max, y_max);
    if area > MAX_BATCH_COORDINATES {
        return Err(TerrainBridgeError::new(format!(
            "batch of {} coordinates exceeds the limit of {}",
            area, MAX_BATCH_COORDINATES
        )));
    }
    Ok(())
}
