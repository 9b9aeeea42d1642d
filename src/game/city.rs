//! Procedural City
//!
//! A square grid of block buildings with a street every few rows, generated
//! from a seed so the same config always yields the same city.
//!
//! Building ids run row by row (outer x index, inner z index), which is the
//! order the obstacle index and the refuel set refer to.

use fastrand::Rng;
use glam::Vec2;
use tracing::debug;

use crate::game::config::CityConfig;
use crate::world::{Obstacle, RefuelSet};

/// Obstacles and refuel roofs of a generated city.
#[derive(Debug, Clone)]
pub struct CityLayout {
    pub obstacles: Vec<Obstacle>,
    pub refuel: RefuelSet,
}

impl CityLayout {
    pub fn generate(config: &CityConfig) -> Self {
        let mut rng = Rng::with_seed(config.seed);
        let span = config.half_span.max(0);

        let mut obstacles = Vec::new();
        for i in -span..=span {
            if is_street(i, config.street_period) {
                continue;
            }
            for j in -span..=span {
                if is_street(j, config.street_period) {
                    continue;
                }
                let center = Vec2::new(i as f32, j as f32) * config.spacing;
                let factor = lerp(
                    config.height_factor_min,
                    config.height_factor_max,
                    rng.f32(),
                );
                let height = config.height_unit * factor;
                obstacles.push(
                    Obstacle::new(obstacles.len(), center, height)
                        .with_half_extent(config.building_half_extent),
                );
            }
        }

        let refuel = pick_refuel_stations(&mut rng, config, obstacles.len());
        debug!(
            buildings = obstacles.len(),
            stations = refuel.len(),
            seed = config.seed,
            "city generated"
        );

        Self { obstacles, refuel }
    }
}

/// Index `i` lies on a street when it is at phase 0 or -1 of the period.
#[inline]
fn is_street(i: i32, period: i32) -> bool {
    period > 0 && (i % period == 0 || (i + 1) % period == 0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// The home pad plus up to `random_refuel_count` distinct other buildings.
fn pick_refuel_stations(rng: &mut Rng, config: &CityConfig, buildings: usize) -> RefuelSet {
    let mut refuel = RefuelSet::new();
    if buildings == 0 {
        return refuel;
    }
    if config.home_pad < buildings {
        refuel.insert(config.home_pad);
    }

    // Cap so the loop below always terminates on small cities
    let target = (refuel.len() + config.random_refuel_count).min(buildings);
    while refuel.len() < target {
        refuel.insert(rng.usize(0..buildings));
    }
    refuel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_pattern() {
        let kept: Vec<i32> = (-6..=6).filter(|&i| !is_street(i, 4)).collect();
        assert_eq!(kept, vec![-6, -3, -2, 1, 2, 5, 6]);
    }

    #[test]
    fn test_small_city() {
        let config = CityConfig {
            half_span: 3,
            home_pad: 0,
            random_refuel_count: 100,
            ..Default::default()
        };
        let city = CityLayout::generate(&config);

        // Kept indices on each axis: -3, -2, 1, 2
        assert_eq!(city.obstacles.len(), 16);
        // Capped at the building count
        assert_eq!(city.refuel.len(), 16);
        assert!(city.obstacles.iter().enumerate().all(|(i, o)| o.id == i));
        assert_eq!(city.obstacles[0].center, Vec2::new(-24.0, -24.0));
    }

    #[test]
    fn test_heights_in_range() {
        let city = CityLayout::generate(&CityConfig::default());
        assert!(
            city.obstacles
                .iter()
                .all(|o| (10.0..=30.0).contains(&o.height) && o.half_extent == 3.0)
        );
    }

    #[test]
    fn test_same_seed_same_city() {
        let config = CityConfig::default();
        let a = CityLayout::generate(&config);
        let b = CityLayout::generate(&config);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.refuel, b.refuel);
    }
}
