//! Helicopter Simulation
//!
//! Owns the rigid body, force model, collision resolver and lifecycle, and
//! runs them in a fixed order each frame:
//!
//! 1. Exploding: rotors stay cut, the crash timer runs, respawn when due
//! 2. Flying: force model, integrator, ground clamp, obstacle contact
//! 3. Landing on a refuel roof fills the tank; a crash freezes the airframe
//!
//! Rendering, audio and real input are outside; they read the pose and gauges
//! through accessors and receive [`SimEvent`]s through an [`EventSink`].

use glam::{Mat4, Vec3};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::game::config::FlightConfig;
use crate::game::error::SimError;
use crate::physics::{RigidBody, step};
use crate::world::{Obstacle, ObstacleId, ObstacleIndex, RefuelSet};

use super::contact::{CollisionResolver, Contact, ContactKind};
use super::controls::{ControlCommand, ControlState};
use super::events::{EventLog, EventSink, SimEvent};
use super::forces::ForceModel;
use super::lifecycle::{LifecycleController, LifecyclePhase, LifecycleState};

/// Outcome of one [`HelicopterSim::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// Obstacle contact resolved this frame, if any
    pub contact: Option<Contact>,
    /// The ground clamp engaged this frame
    pub grounded: bool,
    /// The airframe respawned this frame
    pub respawned: bool,
    /// Phase after the frame
    pub phase: LifecyclePhase,
}

/// A single helicopter flying through a static obstacle field.
pub struct HelicopterSim<S: EventSink = EventLog> {
    config: FlightConfig,
    body: RigidBody,
    forces: ForceModel,
    resolver: CollisionResolver,
    lifecycle: LifecycleController,
    obstacles: ObstacleIndex,
    refuel: RefuelSet,
    sink: S,
    /// Simulated seconds since construction
    elapsed: f32,
}

impl<S: EventSink> HelicopterSim<S> {
    /// Validates `config`, indexes `obstacles` and spawns the airframe at rest.
    pub fn new(
        config: FlightConfig,
        obstacles: Vec<Obstacle>,
        refuel: RefuelSet,
        sink: S,
    ) -> Result<Self, SimError> {
        Self::with_index(config, ObstacleIndex::build(obstacles), refuel, sink)
    }

    /// Like [`Self::new`] with an already built obstacle index.
    pub fn with_index(
        config: FlightConfig,
        obstacles: ObstacleIndex,
        refuel: RefuelSet,
        sink: S,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let body = RigidBody::new(config.body.mass, config.body.spawn)?;

        info!(
            obstacles = obstacles.len(),
            cells = obstacles.cell_count(),
            stations = refuel.len(),
            "helicopter spawned"
        );

        Ok(Self {
            forces: ForceModel::new(&config),
            resolver: CollisionResolver::new(&config.contact),
            lifecycle: LifecycleController::new(config.lifecycle.explode_duration_secs),
            body,
            obstacles,
            refuel,
            sink,
            config,
            elapsed: 0.0,
        })
    }

    /// Advances the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Result<FrameReport, SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimestep(dt));
        }
        self.elapsed += dt;

        if !self.lifecycle.is_flying() {
            self.stop_rotors();
            let respawned = self.lifecycle.tick(dt) && self.respawn();
            return Ok(self.report(None, false, respawned));
        }

        let was_running = self.main_rotor_power() > 0.0;
        step(&mut self.body, &mut self.forces, dt);
        if was_running && self.main_rotor_power() <= 0.0 {
            info!(fuel = self.fuel(), "flameout");
            self.sink.emit(SimEvent::EngineStopped);
        }
        let grounded = self.resolver.ground_clamp(&mut self.body);
        let contact = self.resolver.resolve(&mut self.body, &self.obstacles);

        if let Some(contact) = contact {
            match contact.kind {
                ContactKind::Landing => {
                    self.try_refuel(contact.obstacle, true);
                }
                ContactKind::Crash => {
                    self.crash();
                    // Crash path repeats the landing refuel, without the cue
                    self.try_refuel(contact.obstacle, false);
                }
            }
        }

        Ok(self.report(contact, grounded, false))
    }

    fn report(&self, contact: Option<Contact>, grounded: bool, respawned: bool) -> FrameReport {
        FrameReport {
            contact,
            grounded,
            respawned,
            phase: self.lifecycle.phase(),
        }
    }

    fn crash(&mut self) {
        self.stop_rotors();
        if self.lifecycle.explode(self.body.transform()) {
            info!(position = ?self.body.position, "crashed");
            self.sink.emit(SimEvent::Died {
                position: self.body.position,
            });
        }
    }

    /// Cuts both rotors, reporting the stop if the main rotor was running.
    fn stop_rotors(&mut self) {
        let was_running = self.main_rotor_power() > 0.0;
        self.forces.controls_mut().cut_rotors();
        if was_running {
            self.sink.emit(SimEvent::EngineStopped);
        }
    }

    /// Fills the tank when `station` is a refuel roof.
    fn try_refuel(&mut self, station: ObstacleId, audible: bool) -> bool {
        if !self.refuel.contains(station) {
            return false;
        }
        self.forces.controls_mut().fill_tank();
        info!(station, audible, "refueled");
        self.sink.emit(SimEvent::Refueled {
            station: Some(station),
            audible,
        });
        true
    }

    /// Ends the exploding window early: back to the spawn pose at rest.
    ///
    /// Fuel is left as it was. Returns false (and does nothing) while flying.
    pub fn respawn(&mut self) -> bool {
        if !self.lifecycle.expire() {
            warn!("respawn requested while flying, ignored");
            return false;
        }
        self.body.reset_to(self.config.body.spawn);
        self.stop_rotors();
        info!(fuel = self.fuel(), "respawned");
        self.sink.emit(SimEvent::Respawned);
        true
    }

    // ---- Controls ----

    /// Main rotor to full power. Ignored while exploding.
    pub fn engine_on(&mut self) {
        if !self.lifecycle.is_flying() {
            debug!("engine on ignored while exploding");
            return;
        }
        let was_off = self.main_rotor_power() <= 0.0;
        let max = self.config.rotor.main_max_power;
        self.forces.controls_mut().set_main_rotor_power(max);
        if was_off && self.main_rotor_power() > 0.0 {
            debug!("engine on");
            self.sink.emit(SimEvent::EngineStarted);
        }
    }

    pub fn engine_off(&mut self) {
        let was_on = self.main_rotor_power() > 0.0;
        self.forces.controls_mut().set_main_rotor_power(0.0);
        if was_on {
            debug!("engine off");
            self.sink.emit(SimEvent::EngineStopped);
        }
    }

    pub fn yaw_left(&mut self) {
        let power = self.yaw_power();
        self.forces.controls_mut().set_tail_rotor_power(power);
    }

    pub fn yaw_right(&mut self) {
        let power = -self.yaw_power();
        self.forces.controls_mut().set_tail_rotor_power(power);
    }

    pub fn yaw_stop(&mut self) {
        self.forces.controls_mut().set_tail_rotor_power(0.0);
    }

    fn yaw_power(&self) -> f32 {
        self.config.rotor.yaw_power_fraction * self.config.rotor.tail_max_power
    }

    /// Forward/back tilt in degrees, clamped to the configured bound.
    pub fn set_tilt_forward_back(&mut self, degrees: f32) {
        self.forces.controls_mut().set_tilt_forward_back(degrees);
    }

    /// Left/right tilt in degrees, clamped to the configured bound.
    pub fn set_tilt_left_right(&mut self, degrees: f32) {
        self.forces.controls_mut().set_tilt_left_right(degrees);
    }

    pub fn apply(&mut self, command: ControlCommand) {
        debug!(?command, "control");
        match command {
            ControlCommand::EngineOn => self.engine_on(),
            ControlCommand::EngineOff => self.engine_off(),
            ControlCommand::YawLeft => self.yaw_left(),
            ControlCommand::YawRight => self.yaw_right(),
            ControlCommand::YawStop => self.yaw_stop(),
            ControlCommand::TiltForwardBack(degrees) => self.set_tilt_forward_back(degrees),
            ControlCommand::TiltLeftRight(degrees) => self.set_tilt_left_right(degrees),
        }
    }

    /// Fills the tank regardless of position.
    pub fn refuel(&mut self) {
        self.forces.controls_mut().fill_tank();
        self.sink.emit(SimEvent::Refueled {
            station: None,
            audible: true,
        });
    }

    // ---- Accessors ----

    /// Pose to render: the live body while flying, the crash pose while exploding.
    pub fn transform(&self) -> Mat4 {
        self.lifecycle
            .frozen_transform()
            .unwrap_or_else(|| self.body.transform())
    }

    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    /// Direct access for tests and tools that need to place the airframe.
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn controls(&self) -> &ControlState {
        self.forces.controls()
    }

    pub fn fuel(&self) -> f32 {
        self.forces.controls().fuel()
    }

    pub fn main_rotor_power(&self) -> f32 {
        self.forces.controls().main_rotor_power()
    }

    pub fn tail_rotor_power(&self) -> f32 {
        self.forces.controls().tail_rotor_power()
    }

    /// (forward/back, left/right) tilt in degrees.
    pub fn tilt(&self) -> (f32, f32) {
        let controls = self.forces.controls();
        (controls.tilt_forward_back(), controls.tilt_left_right())
    }

    pub fn lifecycle_phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    pub fn lifecycle_state(&self) -> &LifecycleState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    pub fn frozen_transform(&self) -> Option<Mat4> {
        self.lifecycle.frozen_transform()
    }

    pub fn obstacles(&self) -> &ObstacleIndex {
        &self.obstacles
    }

    pub fn refuel_stations(&self) -> &RefuelSet {
        &self.refuel
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn empty_sim() -> HelicopterSim {
        HelicopterSim::new(
            FlightConfig::default(),
            Vec::new(),
            RefuelSet::default(),
            EventLog::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_dt() {
        let mut sim = empty_sim();
        for dt in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(sim.update(dt), Err(SimError::InvalidTimestep(_))));
        }
        assert_eq!(sim.elapsed(), 0.0);
    }

    #[test]
    fn test_rejects_bad_config() {
        let mut config = FlightConfig::default();
        config.body.mass = -1.0;
        let result = HelicopterSim::new(config, Vec::new(), RefuelSet::default(), EventLog::default());
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn test_engine_events_on_transition_only() {
        let mut sim = empty_sim();
        sim.engine_on();
        sim.engine_on();
        sim.engine_off();
        sim.engine_off();

        assert_eq!(
            sim.sink().events(),
            &[SimEvent::EngineStarted, SimEvent::EngineStopped]
        );
    }

    #[test]
    fn test_flameout_reports_engine_stopped() {
        let mut config = FlightConfig::default();
        config.fuel.initial = 0.0;
        let mut sim =
            HelicopterSim::new(config, Vec::new(), RefuelSet::default(), EventLog::default())
                .unwrap();

        sim.engine_on();
        sim.update(0.01).unwrap();
        assert_eq!(sim.main_rotor_power(), 0.0);
        // Releasing the key after the flameout adds nothing
        sim.engine_off();

        assert_eq!(
            sim.sink().events(),
            &[SimEvent::EngineStarted, SimEvent::EngineStopped]
        );
    }

    #[test]
    fn test_yaw_controls() {
        let mut sim = empty_sim();
        sim.yaw_left();
        assert_eq!(sim.tail_rotor_power(), 1.0e3);
        sim.yaw_right();
        assert_eq!(sim.tail_rotor_power(), -1.0e3);
        sim.yaw_stop();
        assert_eq!(sim.tail_rotor_power(), 0.0);
    }

    #[test]
    fn test_apply_tilt_is_clamped() {
        let mut sim = empty_sim();
        sim.apply(ControlCommand::TiltForwardBack(-60.0));
        sim.apply(ControlCommand::TiltLeftRight(20.0));
        assert_eq!(sim.tilt(), (-30.0, 20.0));
    }

    #[test]
    fn test_crash_freezes_and_respawns() {
        let mut sim = HelicopterSim::new(
            FlightConfig::default(),
            vec![Obstacle::new(0, Vec2::new(4.0, 4.0), 10.0)],
            RefuelSet::default(),
            EventLog::default(),
        )
        .unwrap();
        sim.body_mut().position = Vec3::new(0.0, 5.0, 0.0);
        sim.engine_on();

        let report = sim.update(0.01).unwrap();
        assert_eq!(report.phase, LifecyclePhase::Exploding);
        assert_eq!(sim.main_rotor_power(), 0.0);
        let frozen = sim.transform();

        // Pose stays frozen and engine input is ignored while exploding
        sim.engine_on();
        assert_eq!(sim.main_rotor_power(), 0.0);
        let report = sim.update(0.3).unwrap();
        assert!(!report.respawned);
        assert_eq!(sim.transform(), frozen);
        assert_eq!(sim.main_rotor_power(), 0.0);

        let report = sim.update(0.35).unwrap();
        assert!(report.respawned);
        assert_eq!(report.phase, LifecyclePhase::Flying);
        assert_eq!(sim.position(), Vec3::new(0.0, 2.0, 0.0));
        assert!(sim.sink().events().contains(&SimEvent::Respawned));

        let events = sim.sink().events();
        assert_eq!(&events[..2], &[SimEvent::EngineStarted, SimEvent::EngineStopped]);
        assert!(matches!(events[2], SimEvent::Died { .. }));
        assert_eq!(&events[3..], &[SimEvent::Respawned]);
    }

    #[test]
    fn test_respawn_while_flying_is_ignored() {
        let mut sim = empty_sim();
        sim.body_mut().position = Vec3::new(5.0, 50.0, 5.0);
        assert!(!sim.respawn());
        assert_eq!(sim.position(), Vec3::new(5.0, 50.0, 5.0));
    }

    #[test]
    fn test_null_sink() {
        let mut sim = HelicopterSim::new(
            FlightConfig::default(),
            Vec::new(),
            RefuelSet::default(),
            crate::game::helicopter::NullSink,
        )
        .unwrap();
        sim.engine_on();
        sim.update(0.1).unwrap();
        assert!(sim.position().y >= 2.0);
    }

    #[test]
    fn test_direct_refuel() {
        let mut sim = empty_sim();
        sim.forces.controls_mut().burn(40.0);
        sim.refuel();
        assert_eq!(sim.fuel(), 100.0);
    }
}
