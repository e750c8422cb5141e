//! ECS components for hecs entities.
//!
//! Components are plain data; game logic lives in the simulation systems.
//! Capability composition replaces an inheritance hierarchy: an entity is
//! whatever set of components it carries, and the orchestrator dispatches
//! on marker tags.

use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::colors::ColorName;
use crate::enums::TorpedoOwner;

/// Display name, carried into logs, events, and snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Body radius used for drawing (the collision radius lives in
/// `BoundingSphere` and includes a margin).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Radius(pub f32);

/// Single-sphere collision capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub radius: f32,
    pub collidable: bool,
}

/// Soft destruction state. Death is a flag flip, never a despawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Destructible {
    pub alive: bool,
}

impl Destructible {
    pub fn alive() -> Self {
        Self { alive: true }
    }
}

/// Cosmetic explosion countdown: set on destruction, shrunk each tick,
/// read by the renderer. Not gameplay state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Explosion {
    pub radius: f32,
}

/// Self-advancing orbital angle, applied to the yaw each tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Orbiter {
    pub degrees_per_tick: f32,
}

/// Hierarchical composition: this entity's effective world position is
/// the parent's position plus its own swept position. The cached parent
/// position is refreshed by the hierarchy pass each tick, parents first.
#[derive(Debug, Clone)]
pub struct Satellite {
    pub parent: Entity,
    pub parent_position: Vec3,
}

impl Satellite {
    pub fn of(parent: Entity) -> Self {
        Self {
            parent,
            parent_position: Vec3::ZERO,
        }
    }
}

/// Fire-control site state. The outstanding round is an arena handle into
/// the world, not a pointer; at most one is live at a time and the
/// orchestrator checks its aliveness before asking for another.
#[derive(Debug, Clone)]
pub struct Emplacement {
    /// Ship detection range for this site.
    pub detection_radius: f32,
    /// Rounds remaining in stock.
    pub missiles_left: u32,
    /// Lifetime granted to each round this site fires.
    pub round_lives: u32,
    /// The pooled round owned by this site, once the first shot spawns it.
    pub torpedo: Option<Entity>,
    /// Whether the ship was inside the detection radius last scan.
    pub ship_detected: bool,
}

impl Emplacement {
    pub fn new(detection_radius: f32, missiles_left: u32, round_lives: u32) -> Self {
        Self {
            detection_radius,
            missiles_left,
            round_lives,
            torpedo: None,
            ship_detected: false,
        }
    }
}

/// Player ship state.
#[derive(Debug, Clone)]
pub struct ShipControl {
    /// Units moved per thrust command.
    pub speed: f32,
    /// Degrees per turn command.
    pub turn_degrees: f32,
    /// Rounds expended so far (finite stock; running out loses the game).
    pub torpedoes_fired: u32,
    /// Thruster flag for the renderer, set by thrust commands.
    pub moving: bool,
    /// Emplacement the current round is homing on.
    pub target: Option<Entity>,
    /// The ship's pooled round, once first fired.
    pub torpedo: Option<Entity>,
}

impl ShipControl {
    pub fn new(speed: f32, turn_degrees: f32) -> Self {
        Self {
            speed,
            turn_degrees,
            torpedoes_fired: 0,
            moving: false,
            target: None,
            torpedo: None,
        }
    }

    pub fn out_of_torpedoes(&self) -> bool {
        self.torpedoes_fired == crate::constants::SHIP_TORPEDO_STOCK
    }
}

/// Render-facing display flags, toggled by player commands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Display {
    pub solid: bool,
    pub debug_axes: bool,
    pub bounding_visible: bool,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            solid: true,
            debug_axes: false,
            bounding_visible: false,
        }
    }
}

/// Named color for the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tint(pub ColorName);

/// Which side launched this torpedo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FiredBy(pub TorpedoOwner);

/// One particle of the sun's fountain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: [f32; 3],
    pub time_alive: f32,
    pub life_span: f32,
}

/// The sun's particle fountain: a fixed-size pool of recycled particles
/// driven in fixed substeps by the fountain system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fountain {
    pub particles: Vec<Particle>,
    /// Hue cycle phase in [0, 1).
    pub color_time: f32,
    /// Emitter sweep angle in radians.
    pub angle: f32,
    /// Seconds left until the next substep fires.
    pub time_until_next_step: f32,
}

// --- Kind markers ---

/// The player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Wingman ship mirroring the player's orientation. Not collidable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Escort {
    /// Formation offset from the ship, used when warping.
    pub offset: Vec3,
}

/// The sun at the origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sun;

/// An orbiting planet; owns zero or more satellites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Planet;

/// A moon orbiting a planet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Moon;

/// A stationary ring (torus) obstacle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingObstacle;
