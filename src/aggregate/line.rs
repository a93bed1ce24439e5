//! Straight-line sampling and elevation profiles

use glam::DVec2;
use serde::Serialize;
use wilderness_bridge::TerrainSource;

use super::AreaAggregator;
use crate::core::{Coordinate, Result, TerrainSample};
use crate::overlay::SpatialOverlayStore;

/// Evenly spaced, integer-rounded points from `from` to `to` inclusive.
///
/// Takes `round(distance) + 1` samples, capped at `cap`. Neighbouring samples
/// may round to the same cell; that is accepted. A zero-length line yields
/// just the start.
pub fn sample_line(from: Coordinate, to: Coordinate, cap: usize) -> Vec<Coordinate> {
    let a = DVec2::new(from.x as f64, from.y as f64);
    let b = DVec2::new(to.x as f64, to.y as f64);
    let n = (a.distance(b).round() as usize + 1).min(cap.max(1));

    if n == 1 {
        return vec![from];
    }

    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            let p = a.lerp(b, t);
            Coordinate::new(p.x.round() as i32, p.y.round() as i32)
        })
        .collect()
}

/// Elevation along a line
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElevationProfile {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance: f64,
    pub samples: Vec<TerrainSample>,
    pub min_elevation: i32,
    pub max_elevation: i32,
    pub total_ascent: i64,
    pub total_descent: i64,
}

impl ElevationProfile {
    pub fn from_samples(from: Coordinate, to: Coordinate, samples: Vec<TerrainSample>) -> Self {
        let min_elevation = samples.iter().map(|s| s.elevation).min().unwrap_or(0);
        let max_elevation = samples.iter().map(|s| s.elevation).max().unwrap_or(0);

        let (mut ascent, mut descent) = (0i64, 0i64);
        for pair in samples.windows(2) {
            let step = pair[1].elevation as i64 - pair[0].elevation as i64;
            if step > 0 {
                ascent += step;
            } else {
                descent -= step;
            }
        }

        Self {
            from,
            to,
            distance: line_distance(from, to),
            samples,
            min_elevation,
            max_elevation,
            total_ascent: ascent,
            total_descent: descent,
        }
    }
}

pub(crate) fn line_distance(from: Coordinate, to: Coordinate) -> f64 {
    DVec2::new(from.x as f64, from.y as f64).distance(DVec2::new(to.x as f64, to.y as f64))
}

impl<T: TerrainSource, S: SpatialOverlayStore> AreaAggregator<T, S> {
    /// Sample base terrain along a line (at most `profile_sample_cap` points).
    ///
    /// Any failed sample aborts the profile.
    pub async fn elevation_profile(&self, from: Coordinate, to: Coordinate) -> Result<ElevationProfile> {
        from.validate()?;
        to.validate()?;

        let points = sample_line(from, to, self.config.profile_sample_cap);
        let samples = self.fetch_points(&points).await?;
        let profile = ElevationProfile::from_samples(from, to, samples);

        log::debug!(
            "Elevation profile {:?} -> {:?}: {} samples, range {}..{}",
            from,
            to,
            profile.samples.len(),
            profile.min_elevation,
            profile.max_elevation
        );
        Ok(profile)
    }
}
