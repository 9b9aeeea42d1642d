//! City Configuration
//!
//! Parameters of the procedural city: a square grid of block buildings cut by
//! two-lane streets, with a handful of roofs marked as refuel pads.

use serde::{Deserialize, Serialize};

/// Layout parameters for [`crate::game::CityLayout::generate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Grid indices run over `-half_span..=half_span` on both axes
    pub half_span: i32,
    /// Distance between neighbouring grid indices (meters)
    pub spacing: f32,
    /// Every `street_period` indices, the ones at phase 0 and -1 are streets
    pub street_period: i32,
    /// Half side length of every building footprint
    pub building_half_extent: f32,
    /// Building height = `height_unit` * U[`height_factor_min`, `height_factor_max`)
    pub height_unit: f32,
    pub height_factor_min: f32,
    pub height_factor_max: f32,
    /// Building index that is always a refuel pad (next to spawn)
    pub home_pad: usize,
    /// Additional refuel pads picked at random
    pub random_refuel_count: usize,
    /// Seed for heights and refuel pad selection
    pub seed: u64,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            half_span: 60,
            spacing: 8.0,
            street_period: 4,
            building_half_extent: 3.0,
            height_unit: 10.0,
            height_factor_min: 1.0,
            height_factor_max: 3.0,
            home_pad: 1830,
            random_refuel_count: 200,
            seed: 0x5eed_c17e,
        }
    }
}
