//! Galaxy snapshot — the complete visible state handed to the rendering
//! collaborator after each tick. Everything here is read-only from the
//! renderer's perspective.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::colors::ColorName;
use crate::enums::{BodyKind, GameOutcome, TorpedoKind, TorpedoOwner};
use crate::events::GameEvent;
use crate::types::SimClock;

/// Complete per-tick state for the renderer and HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalaxySnapshot {
    pub clock: SimClock,
    pub settings: SettingsView,
    pub outcome: GameOutcome,
    pub ship: ShipView,
    pub bodies: Vec<BodyView>,
    pub torpedoes: Vec<TorpedoView>,
    pub emplacements: Vec<EmplacementView>,
    pub fountain: FountainView,
    pub events: Vec<GameEvent>,
}

/// Player-visible simulation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsView {
    pub gravity_on: bool,
    /// Frame pacing the driver should apply, in milliseconds.
    pub quantum_ms: u64,
    pub bounding_spheres: bool,
    pub wireframe: bool,
    pub debug_axes: bool,
}

/// The player ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub name: String,
    /// World position from the orientation matrix.
    pub position: Vec3,
    /// Raw logical position.
    pub absolute_position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub speed: f32,
    pub alive: bool,
    pub moving: bool,
    pub torpedoes_fired: u32,
    pub bounding_radius: f32,
    pub explosion_radius: f32,
}

/// Any drawable celestial body or obstacle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyView {
    pub name: String,
    pub kind: BodyKind,
    /// Effective world position (parent-composed for moons).
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub radius: f32,
    pub bounding_radius: f32,
    pub alive: bool,
    pub color: ColorName,
    pub solid: bool,
    pub debug_axes: bool,
    pub bounding_visible: bool,
    pub explosion_radius: f32,
}

/// A pooled torpedo slot, live or dead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorpedoView {
    pub owner: TorpedoOwner,
    pub kind: TorpedoKind,
    pub position: Vec3,
    pub target: Vec3,
    pub alive: bool,
    pub frame: u32,
    pub lives: u32,
    pub speed: f32,
    pub color: ColorName,
    pub explosion_radius: f32,
}

/// Fire-control site status for the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmplacementView {
    pub name: String,
    pub position: Vec3,
    pub detection_radius: f32,
    pub missiles_left: u32,
    pub alive: bool,
    pub ship_detected: bool,
    pub round_alive: bool,
}

/// The sun's particle fountain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FountainView {
    pub particles: Vec<FountainParticleView>,
}

/// One fountain particle, pre-tilted into the emitter frame the renderer
/// expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FountainParticleView {
    pub position: Vec3,
    pub color: [f32; 3],
    /// Fades from 1 at birth to 0 at end of life.
    pub alpha: f32,
}
