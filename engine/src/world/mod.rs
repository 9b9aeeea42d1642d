//! World Module
//!
//! Static world data the simulation collides against: block obstacles, the
//! spatial hash used to find the ones near the vehicle, and the set of
//! obstacles that double as refuel stations.

pub mod obstacles;

pub use obstacles::{
    CELL_HASH_STRIDE, CELL_SIZE, DEFAULT_HALF_EXTENT, Obstacle, ObstacleId, ObstacleIndex,
    RefuelSet, cell_coords, cell_hash,
};
