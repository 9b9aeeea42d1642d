//! Contact Resolution
//!
//! Discrete, once-per-step collision response against the ground plane and the
//! block obstacles. Collision is sampled at the post-integration position only,
//! so a fast airframe can pass through a thin block between two steps.
//!
//! ## Roof bands
//!
//! For an obstacle of height `h` (with the default band 1 and clearance 2):
//!
//! ```text
//! altitude >= h + 2        above the roof, no contact
//! h + 1 <= altitude < h + 2 landing zone, rest on the roof
//! altitude < h + 1          side impact, crash
//! ```

use std::borrow::Cow;

use glam::Vec3;
use serde::Serialize;
use tracing::debug;

use crate::game::config::{BroadPhase, ContactConfig};
use crate::physics::collision::edges_intersect;
use crate::physics::types::planar;
use crate::physics::{RigidBody, footprint_corners, footprint_edges, square_edges};
use crate::world::{ObstacleId, ObstacleIndex};

/// What kind of obstacle contact occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    /// Touched down inside the roof's landing zone
    Landing,
    /// Hit the obstacle below its landing zone
    Crash,
}

/// A resolved obstacle contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contact {
    pub obstacle: ObstacleId,
    pub kind: ContactKind,
    /// Top surface height of the obstacle
    pub roof: f32,
}

/// Applies ground and obstacle responses to a rigid body.
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    config: ContactConfig,
}

impl CollisionResolver {
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Keeps the body at or above ground level.
    ///
    /// Returns true when the body was below ground and got clamped.
    pub fn ground_clamp(&self, body: &mut RigidBody) -> bool {
        if body.position.y >= self.config.ground_level {
            return false;
        }
        body.position.y = self.config.ground_level;
        self.damp(body);
        true
    }

    /// Tests the body's footprint against nearby obstacles and applies the
    /// response for the first one it overlaps inside the roof band.
    ///
    /// Candidates are checked in ascending id order. A landing moves the body
    /// onto the roof; a crash leaves it untouched so the caller can freeze it.
    pub fn resolve(&self, body: &mut RigidBody, index: &ObstacleIndex) -> Option<Contact> {
        let position = body.position;
        let candidates: Cow<'_, [ObstacleId]> = match self.config.broad_phase {
            BroadPhase::SingleCell => Cow::Borrowed(index.query_cell(position.x, position.z)),
            BroadPhase::Neighborhood => {
                Cow::Owned(index.query_neighborhood(position.x, position.z))
            }
        };
        if candidates.is_empty() {
            return None;
        }

        let corners = footprint_corners(&body.transform(), self.config.footprint_half_extent);
        let edges = footprint_edges(&corners);

        for &id in candidates.iter() {
            let Some(obstacle) = index.get(id) else {
                continue;
            };
            let roof = obstacle.height;
            if position.y >= roof + self.config.roof_clearance {
                continue;
            }
            if !edges_intersect(&edges, &square_edges(obstacle.center, obstacle.half_extent)) {
                continue;
            }

            let kind = if position.y >= roof + self.config.landing_band {
                body.position.y = roof + self.config.roof_clearance;
                self.damp(body);
                ContactKind::Landing
            } else {
                ContactKind::Crash
            };

            debug!(obstacle = id, ?kind, roof, altitude = position.y, "obstacle contact");
            return Some(Contact {
                obstacle: id,
                kind,
                roof,
            });
        }

        None
    }

    /// Stops downward motion and bleeds off planar and angular velocity.
    fn damp(&self, body: &mut RigidBody) {
        let r = self.config.restitution;
        let horizontal = planar(body.velocity) * r;
        body.velocity = Vec3::new(horizontal.x, body.velocity.y.max(0.0), horizontal.y);
        body.angular_velocity *= r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Obstacle;
    use glam::Vec2;

    fn resolver() -> CollisionResolver {
        CollisionResolver::new(&ContactConfig::default())
    }

    fn body_at(position: Vec3) -> RigidBody {
        RigidBody::new(5.0e3, position).unwrap()
    }

    fn single_block(height: f32) -> ObstacleIndex {
        ObstacleIndex::build(vec![Obstacle::new(0, Vec2::new(4.0, 4.0), height)])
    }

    #[test]
    fn test_ground_clamp() {
        let r = resolver();
        let mut body = body_at(Vec3::new(0.0, 1.5, 0.0));
        body.velocity = Vec3::new(8.0, -3.0, -4.0);
        body.angular_velocity = Vec3::new(0.0, 2.0, 0.0);

        assert!(r.ground_clamp(&mut body));
        assert_eq!(body.position.y, 2.0);
        assert_eq!(body.velocity, Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(body.angular_velocity, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_ground_clamp_keeps_upward_velocity() {
        let r = resolver();
        let mut body = body_at(Vec3::new(0.0, 1.9, 0.0));
        body.velocity = Vec3::new(0.0, 3.0, 0.0);

        r.ground_clamp(&mut body);
        assert_eq!(body.velocity.y, 3.0);
    }

    #[test]
    fn test_ground_clamp_above_ground_is_noop() {
        let r = resolver();
        let mut body = body_at(Vec3::new(0.0, 2.0, 0.0));
        body.velocity = Vec3::new(1.0, -1.0, 1.0);
        let before = body.clone();

        assert!(!r.ground_clamp(&mut body));
        assert_eq!(body, before);
    }

    #[test]
    fn test_landing_in_band() {
        let r = resolver();
        let index = single_block(10.0);
        let mut body = body_at(Vec3::new(0.0, 11.5, 0.0));
        body.velocity = Vec3::new(4.0, -2.0, 0.0);

        let contact = r.resolve(&mut body, &index).unwrap();

        assert_eq!(contact.kind, ContactKind::Landing);
        assert_eq!(contact.obstacle, 0);
        assert_eq!(body.position.y, 12.0);
        assert_eq!(body.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_crash_below_band_leaves_body() {
        let r = resolver();
        let index = single_block(10.0);
        let mut body = body_at(Vec3::new(0.0, 5.0, 0.0));
        body.velocity = Vec3::new(4.0, -2.0, 0.0);
        let before = body.clone();

        let contact = r.resolve(&mut body, &index).unwrap();

        assert_eq!(contact.kind, ContactKind::Crash);
        assert_eq!(body, before);
    }

    #[test]
    fn test_above_roof_no_contact() {
        let r = resolver();
        let index = single_block(10.0);
        let mut body = body_at(Vec3::new(0.0, 12.0, 0.0));

        assert!(r.resolve(&mut body, &index).is_none());
    }

    #[test]
    fn test_no_overlap_no_contact() {
        let r = resolver();
        // Footprint spans [-3, 3], block spans [9, 15]
        let index = ObstacleIndex::build(vec![Obstacle::new(0, Vec2::new(12.0, 12.0), 10.0)]);
        let mut body = body_at(Vec3::new(0.0, 5.0, 0.0));

        assert!(r.resolve(&mut body, &index).is_none());
    }

    #[test]
    fn test_single_cell_misses_neighbour_cell() {
        // Vehicle just left of x = 20; block just right of it in the next cell
        let index = ObstacleIndex::build(vec![Obstacle::new(0, Vec2::new(21.0, 5.0), 10.0)]);
        let mut body = body_at(Vec3::new(19.0, 5.0, 5.0));

        assert!(resolver().resolve(&mut body, &index).is_none());

        let neighborhood = CollisionResolver::new(&ContactConfig {
            broad_phase: BroadPhase::Neighborhood,
            ..Default::default()
        });
        let contact = neighborhood.resolve(&mut body, &index).unwrap();
        assert_eq!(contact.kind, ContactKind::Crash);
    }

    #[test]
    fn test_first_obstacle_wins() {
        let index = ObstacleIndex::build(vec![
            Obstacle::new(0, Vec2::new(4.0, 4.0), 10.0),
            Obstacle::new(1, Vec2::new(2.0, 4.0), 10.0),
        ]);
        let mut body = body_at(Vec3::new(0.0, 11.5, 0.0));
        body.velocity = Vec3::new(4.0, 0.0, 0.0);

        let contact = resolver().resolve(&mut body, &index).unwrap();

        assert_eq!(contact.obstacle, 0);
        // Restitution applied once, not per overlapping obstacle
        assert_eq!(body.velocity.x, 1.0);
    }
}
