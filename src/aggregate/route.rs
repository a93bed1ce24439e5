//! Route difficulty analysis

use serde::Serialize;
use wilderness_bridge::{MapSector, TerrainSource};

use super::line::{line_distance, sample_line};
use super::AreaAggregator;
use crate::core::{Coordinate, Result, TerrainSample};
use crate::overlay::SpatialOverlayStore;

/// Mean elevation change below which a route with no difficult terrain is easy
pub const EASY_ELEVATION_CHANGE: f64 = 10.0;
/// Mean elevation change at or above which a route is hard
pub const HARD_ELEVATION_CHANGE: f64 = 25.0;
/// Difficult samples at or above which a route is hard
pub const HARD_DIFFICULT_SAMPLES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteDifficulty {
    Easy,
    Moderate,
    Hard,
}

/// Sample on difficult terrain
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DifficultSpot {
    pub x: i32,
    pub y: i32,
    pub sector_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteAnalysis {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance: f64,
    pub samples: Vec<TerrainSample>,
    pub mean_elevation_change: f64,
    pub max_elevation_change: i64,
    pub difficult_terrain: Vec<DifficultSpot>,
    pub difficulty: RouteDifficulty,
}

pub fn classify_route(mean_elevation_change: f64, difficult_samples: usize) -> RouteDifficulty {
    if mean_elevation_change < EASY_ELEVATION_CHANGE && difficult_samples == 0 {
        RouteDifficulty::Easy
    } else if mean_elevation_change >= HARD_ELEVATION_CHANGE
        || difficult_samples >= HARD_DIFFICULT_SAMPLES
    {
        RouteDifficulty::Hard
    } else {
        RouteDifficulty::Moderate
    }
}

fn is_difficult(sample: &TerrainSample) -> bool {
    MapSector::from_name(&sample.sector_name).is_some_and(|s| s.is_difficult())
}

impl RouteAnalysis {
    pub fn from_samples(from: Coordinate, to: Coordinate, samples: Vec<TerrainSample>) -> Self {
        let changes: Vec<i64> = samples
            .windows(2)
            .map(|pair| (pair[1].elevation as i64 - pair[0].elevation as i64).abs())
            .collect();
        let mean_elevation_change = if changes.is_empty() {
            0.0
        } else {
            changes.iter().map(|&c| c as f64).sum::<f64>() / changes.len() as f64
        };
        let max_elevation_change = changes.iter().copied().max().unwrap_or(0);

        let difficult_terrain: Vec<DifficultSpot> = samples
            .iter()
            .filter(|s| is_difficult(s))
            .map(|s| DifficultSpot {
                x: s.x,
                y: s.y,
                sector_name: s.sector_name.clone(),
            })
            .collect();

        let difficulty = classify_route(mean_elevation_change, difficult_terrain.len());

        Self {
            from,
            to,
            distance: line_distance(from, to),
            samples,
            mean_elevation_change,
            max_elevation_change,
            difficult_terrain,
            difficulty,
        }
    }
}

impl<T: TerrainSource, S: SpatialOverlayStore> AreaAggregator<T, S> {
    /// Sample a straight route (at most `route_sample_cap` points) and grade it.
    ///
    /// Unlike map mode there is no per-point tolerance: any failed sample
    /// aborts the analysis.
    pub async fn analyze_route(&self, from: Coordinate, to: Coordinate) -> Result<RouteAnalysis> {
        from.validate()?;
        to.validate()?;

        let points = sample_line(from, to, self.config.route_sample_cap);
        let samples = self.fetch_points(&points).await?;
        let analysis = RouteAnalysis::from_samples(from, to, samples);

        log::info!(
            "Route {:?} -> {:?}: {} samples, mean change {:.1}, {} difficult, {:?}",
            from,
            to,
            analysis.samples.len(),
            analysis.mean_elevation_change,
            analysis.difficult_terrain.len(),
            analysis.difficulty
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(classify_route(0.0, 0), RouteDifficulty::Easy);
        assert_eq!(classify_route(9.9, 0), RouteDifficulty::Easy);
        assert_eq!(classify_route(9.9, 1), RouteDifficulty::Moderate);
        assert_eq!(classify_route(10.0, 0), RouteDifficulty::Moderate);
        assert_eq!(classify_route(24.9, 2), RouteDifficulty::Moderate);
        assert_eq!(classify_route(25.0, 0), RouteDifficulty::Hard);
        assert_eq!(classify_route(1.0, 3), RouteDifficulty::Hard);
        assert_eq!(classify_route(30.0, 4), RouteDifficulty::Hard);
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(RouteDifficulty::Moderate).unwrap(),
            serde_json::json!("moderate")
        );
    }

    fn sample_at(y: i32, elevation: i32) -> TerrainSample {
        TerrainSample {
            x: 0,
            y,
            elevation,
            temperature: 0,
            moisture: 0,
            sector_type: 2,
            sector_name: "Field".into(),
        }
    }

    #[test]
    fn test_extreme_elevations_do_not_overflow() {
        let from = Coordinate::new(0, 0);
        let to = Coordinate::new(0, 2);
        let samples = vec![
            sample_at(0, i32::MAX),
            sample_at(1, -1),
            sample_at(2, i32::MIN),
        ];
        let analysis = RouteAnalysis::from_samples(from, to, samples);

        let first = i32::MAX as i64 + 1;
        let second = i32::MAX as i64;
        assert_eq!(analysis.max_elevation_change, first);
        assert_eq!(analysis.mean_elevation_change, (first + second) as f64 / 2.0);
        assert_eq!(analysis.difficulty, RouteDifficulty::Hard);
    }

    #[test]
    fn test_single_sample_route() {
        let sample = TerrainSample {
            x: 4,
            y: 4,
            elevation: 70,
            temperature: 0,
            moisture: 0,
            sector_type: 11,
            sector_name: "Ocean".into(),
        };
        let c = Coordinate::new(4, 4);
        let analysis = RouteAnalysis::from_samples(c, c, vec![sample]);
        assert_eq!(analysis.mean_elevation_change, 0.0);
        assert_eq!(analysis.difficult_terrain.len(), 1);
        assert_eq!(analysis.difficulty, RouteDifficulty::Moderate);
    }
}
