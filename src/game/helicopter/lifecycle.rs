//! Lifecycle
//!
//! Flying -> Exploding -> Flying. A crash freezes the last pose for a fixed
//! window of real time, after which the airframe respawns.

use glam::Mat4;
use serde::Serialize;

/// Observable phase of the airframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Flying,
    Exploding,
}

/// Phase plus the data that only exists while exploding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifecycleState {
    Flying,
    Exploding {
        /// Pose at the moment of the crash
        frozen: Mat4,
        /// Seconds left before respawn
        remaining: f32,
    },
}

/// Crash timer and frozen pose.
#[derive(Debug, Clone)]
pub struct LifecycleController {
    state: LifecycleState,
    /// Length of the exploding window (seconds)
    duration: f32,
}

impl LifecycleController {
    pub fn new(duration: f32) -> Self {
        Self {
            state: LifecycleState::Flying,
            duration: duration.max(0.0),
        }
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn phase(&self) -> LifecyclePhase {
        match self.state {
            LifecycleState::Flying => LifecyclePhase::Flying,
            LifecycleState::Exploding { .. } => LifecyclePhase::Exploding,
        }
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.state, LifecycleState::Flying)
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Pose held while exploding.
    pub fn frozen_transform(&self) -> Option<Mat4> {
        match self.state {
            LifecycleState::Exploding { frozen, .. } => Some(frozen),
            LifecycleState::Flying => None,
        }
    }

    /// Seconds until respawn, 0 while flying.
    pub fn remaining(&self) -> f32 {
        match self.state {
            LifecycleState::Exploding { remaining, .. } => remaining,
            LifecycleState::Flying => 0.0,
        }
    }

    /// Starts exploding at `frozen`. Returns false if already exploding, in
    /// which case the running timer is left alone.
    pub fn explode(&mut self, frozen: Mat4) -> bool {
        if !self.is_flying() {
            return false;
        }
        self.state = LifecycleState::Exploding {
            frozen,
            remaining: self.duration,
        };
        true
    }

    /// Counts the timer down by `dt`. Returns true once the window has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        match &mut self.state {
            LifecycleState::Exploding { remaining, .. } => {
                *remaining = (*remaining - dt).max(0.0);
                *remaining <= 0.0
            }
            LifecycleState::Flying => false,
        }
    }

    /// Back to flying. Returns false if it was not exploding.
    pub fn expire(&mut self) -> bool {
        if self.is_flying() {
            return false;
        }
        self.state = LifecycleState::Flying;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_starts_flying() {
        let lc = LifecycleController::new(0.6);
        assert_eq!(lc.phase(), LifecyclePhase::Flying);
        assert!(lc.frozen_transform().is_none());
        assert_eq!(lc.remaining(), 0.0);
    }

    #[test]
    fn test_explode_then_expire() {
        let mut lc = LifecycleController::new(0.6);
        let pose = Mat4::from_translation(Vec3::new(1.0, 5.0, 2.0));

        assert!(lc.explode(pose));
        assert_eq!(lc.phase(), LifecyclePhase::Exploding);
        assert_eq!(lc.frozen_transform(), Some(pose));

        assert!(!lc.tick(0.25));
        assert!(!lc.tick(0.25));
        assert!(lc.tick(0.25));
        assert_eq!(lc.remaining(), 0.0);

        assert!(lc.expire());
        assert!(lc.is_flying());
        assert!(!lc.expire());
    }

    #[test]
    fn test_explode_twice_keeps_timer() {
        let mut lc = LifecycleController::new(0.6);
        lc.explode(Mat4::IDENTITY);
        lc.tick(0.4);

        assert!(!lc.explode(Mat4::from_translation(Vec3::X)));
        assert_eq!(lc.frozen_transform(), Some(Mat4::IDENTITY));
        assert!((lc.remaining() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_tick_while_flying() {
        let mut lc = LifecycleController::new(0.6);
        assert!(!lc.tick(10.0));
        assert!(lc.is_flying());
    }
}
