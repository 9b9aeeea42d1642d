//! Obstacle field and spatial hash
//!
//! Obstacles are axis-aligned blocks standing on the ground. The index buckets
//! them by the 20x20 grid cell their center falls in and is never mutated
//! after it is built.
//!
//! ## Cell Hash
//! `hash(x, z) = floor(x / 20) * 100 + floor(z / 20)`
//!
//! Two different cells share a hash once the z cell index leaves `[0, 100)`
//! (e.g. cells `(0, -1)` and `(-1, 99)`). The default city spans cells -24..24
//! so this never shows up there, but callers placing obstacles further out
//! should know the buckets can alias.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

/// Side length of one spatial hash cell (meters)
pub const CELL_SIZE: f32 = 20.0;
/// Multiplier applied to the x cell index when packing the hash
pub const CELL_HASH_STRIDE: i32 = 100;
/// Half-extent of a block obstacle's square footprint (meters)
pub const DEFAULT_HALF_EXTENT: f32 = 3.0;

/// Index into the obstacle list the field was built from.
pub type ObstacleId = usize;

/// A static block obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Position in the list the index was built from
    pub id: ObstacleId,
    /// Footprint center on the ground plane (x, z)
    pub center: Vec2,
    /// Half side length of the square footprint
    pub half_extent: f32,
    /// World-space y of the top surface
    pub height: f32,
}

impl Obstacle {
    pub fn new(id: ObstacleId, center: Vec2, height: f32) -> Self {
        Self {
            id,
            center,
            half_extent: DEFAULT_HALF_EXTENT,
            height,
        }
    }

    pub fn with_half_extent(mut self, half_extent: f32) -> Self {
        self.half_extent = half_extent;
        self
    }
}

/// Integer cell coordinates containing the planar point (x, z).
#[inline]
pub fn cell_coords(x: f32, z: f32) -> (i32, i32) {
    ((x / CELL_SIZE).floor() as i32, (z / CELL_SIZE).floor() as i32)
}

/// Packs the cell containing (x, z) into a single bucket key.
#[inline]
pub fn cell_hash(x: f32, z: f32) -> i32 {
    let (cx, cz) = cell_coords(x, z);
    pack(cx, cz)
}

#[inline]
fn pack(cx: i32, cz: i32) -> i32 {
    // Far-out cells alias instead of overflowing
    cx.wrapping_mul(CELL_HASH_STRIDE).wrapping_add(cz)
}

/// Read-only spatial hash over obstacle footprints.
///
/// Obstacles are stored by id; each bucket lists the ids whose center lies in
/// that cell, in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct ObstacleIndex {
    obstacles: Vec<Obstacle>,
    cells: HashMap<i32, Vec<ObstacleId>>,
}

impl ObstacleIndex {
    /// Builds the index. Each obstacle's `id` is rewritten to its list position.
    pub fn build(obstacles: Vec<Obstacle>) -> Self {
        let mut cells: HashMap<i32, Vec<ObstacleId>> = HashMap::new();
        let obstacles: Vec<Obstacle> = obstacles
            .into_iter()
            .enumerate()
            .map(|(id, obstacle)| Obstacle { id, ..obstacle })
            .collect();

        for obstacle in &obstacles {
            cells
                .entry(cell_hash(obstacle.center.x, obstacle.center.y))
                .or_default()
                .push(obstacle.id);
        }

        Self { obstacles, cells }
    }

    /// Ids sharing the exact cell that contains (x, z).
    ///
    /// Only that one cell is checked: an obstacle whose center sits just across
    /// a cell boundary is not returned even if its footprint overlaps the point.
    pub fn query_cell(&self, x: f32, z: f32) -> &[ObstacleId] {
        self.cells
            .get(&cell_hash(x, z))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids in the 3x3 block of cells around the one containing (x, z).
    pub fn query_neighborhood(&self, x: f32, z: f32) -> Vec<ObstacleId> {
        let (cx, cz) = cell_coords(x, z);
        let mut keys = Vec::with_capacity(9);
        for dx in -1..=1 {
            for dz in -1..=1 {
                let key = pack(cx.wrapping_add(dx), cz.wrapping_add(dz));
                // Aliased cells would otherwise be visited twice
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }

        let mut ids: Vec<ObstacleId> = keys
            .iter()
            .filter_map(|key| self.cells.get(key))
            .flatten()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}

/// Obstacle ids whose roofs refill the tank on landing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefuelSet(HashSet<ObstacleId>);

impl RefuelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a station. Returns false if it was already present.
    pub fn insert(&mut self, id: ObstacleId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: ObstacleId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObstacleId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ObstacleId> for RefuelSet {
    fn from_iter<I: IntoIterator<Item = ObstacleId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(x: f32, z: f32) -> Obstacle {
        Obstacle::new(0, Vec2::new(x, z), 10.0)
    }

    #[test]
    fn test_cell_hash_values() {
        assert_eq!(cell_hash(0.0, 0.0), 0);
        assert_eq!(cell_hash(19.9, 19.9), 0);
        assert_eq!(cell_hash(20.0, 0.0), 100);
        assert_eq!(cell_hash(0.0, 20.0), 1);
        assert_eq!(cell_hash(-0.1, 0.0), -100);
        assert_eq!(cell_hash(-8.0, -8.0), -101);
        assert_eq!(cell_hash(45.0, -25.0), 198);
    }

    #[test]
    fn test_cell_hash_far_out_wraps() {
        // Cell indices saturate at i32::MAX; packing them must not overflow
        let far = cell_hash(1.0e12, -1.0e12);
        assert_eq!(far, i32::MAX.wrapping_mul(100).wrapping_add(i32::MIN));

        let index = ObstacleIndex::build(vec![block(1.0e12, 1.0e12)]);
        assert_eq!(index.query_cell(1.0e12, 1.0e12), &[0]);
        assert_eq!(index.query_neighborhood(1.0e12, 1.0e12), vec![0]);
    }

    #[test]
    fn test_build_assigns_ids_and_buckets() {
        let index = ObstacleIndex::build(vec![block(8.0, 8.0), block(16.0, 8.0), block(24.0, 8.0)]);

        assert_eq!(index.len(), 3);
        assert_eq!(index.get(2).map(|o| o.id), Some(2));
        assert_eq!(index.query_cell(1.0, 1.0), &[0, 1]);
        assert_eq!(index.query_cell(30.0, 5.0), &[2]);
        assert_eq!(index.cell_count(), 2);
    }

    #[test]
    fn test_query_empty_cell() {
        let index = ObstacleIndex::build(vec![block(8.0, 8.0)]);
        assert!(index.query_cell(100.0, 100.0).is_empty());
        assert!(ObstacleIndex::default().query_cell(0.0, 0.0).is_empty());
    }

    #[test]
    fn test_single_cell_misses_neighbor_across_boundary() {
        // Center at x=21 is one cell over from a query at x=19
        let index = ObstacleIndex::build(vec![block(21.0, 5.0)]);
        assert!(index.query_cell(19.0, 5.0).is_empty());
        assert_eq!(index.query_neighborhood(19.0, 5.0), vec![0]);
    }

    #[test]
    fn test_neighborhood_covers_three_by_three() {
        let index = ObstacleIndex::build(vec![
            block(-10.0, -10.0),
            block(30.0, 30.0),
            block(50.0, 10.0),
        ]);
        // Query cell (0, 0): (-1, -1) and (1, 1) are neighbors, (2, 0) is not
        assert_eq!(index.query_neighborhood(10.0, 10.0), vec![0, 1]);
    }

    #[test]
    fn test_refuel_set() {
        let mut refuel: RefuelSet = [3, 7].into_iter().collect();
        assert!(refuel.contains(3));
        assert!(!refuel.contains(4));
        assert!(!refuel.insert(7));
        assert!(refuel.insert(4));
        assert_eq!(refuel.len(), 3);
    }
}
