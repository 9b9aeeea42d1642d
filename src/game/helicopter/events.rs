//! Simulation events
//!
//! Notifications for the audio and UI layers. The simulation only emits them;
//! what plays or shows in response is up to the sink.

use glam::Vec3;
use serde::Serialize;

use crate::world::ObstacleId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// Main rotor went from off to on
    EngineStarted,
    /// Main rotor went from on to off
    EngineStopped,
    /// Crash; the airframe is frozen at `position` until respawn
    Died { position: Vec3 },
    /// Tank filled. `station` is the roof landed on, `None` for a direct refuel.
    /// Silent refuels (crash path) carry `audible: false`.
    Refueled {
        station: Option<ObstacleId>,
        audible: bool,
    },
    /// Back at the spawn pose after exploding
    Respawned,
}

/// Receives simulation events.
pub trait EventSink {
    fn emit(&mut self, event: SimEvent);
}

/// Collects events in order until drained.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Takes every event emitted since the last drain.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}

impl EventSink for Vec<SimEvent> {
    fn emit(&mut self, event: SimEvent) {
        self.push(event);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: SimEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_drain() {
        let mut log = EventLog::default();
        log.emit(SimEvent::EngineStarted);
        log.emit(SimEvent::Respawned);
        assert_eq!(log.len(), 2);

        let drained = log.drain();
        assert_eq!(drained, vec![SimEvent::EngineStarted, SimEvent::Respawned]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&SimEvent::Refueled {
            station: Some(1830),
            audible: true,
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"refueled","station":1830,"audible":true}"#);
    }
}
