//! Simulation constants and tuning parameters.

/// Selectable frame pacing values (milliseconds between ticks), cycled at
/// runtime by the player.
pub const TIME_QUANTUM_MS: [u64; 5] = [20, 40, 100, 250, 500];

// --- Gravity ---

/// Gravitational constant for the inverse-square sun field.
pub const GRAVITY: f32 = 90_000_000.0;

/// Inside this radius from the sun the field is cut off to zero.
pub const GRAVITY_WELL_RADIUS: f32 = 1800.0;

// --- Torpedoes ---

/// Ticks of flight before an emplacement round starts homing on the ship.
/// Until then it stays aimed at its spawn-time climb point.
pub const TRACKING_WARMUP_FRAMES: u32 = 50;

/// Default powered-flight lifetime in ticks.
pub const TORPEDO_LIVES: u32 = 1000;

/// Body radius of a torpedo round.
pub const TORPEDO_RADIUS: f32 = 50.0;

/// Speed (units per tick) of the ship's rounds.
pub const SHIP_TORPEDO_SPEED: f32 = 20.0;

/// Speed (units per tick) of emplacement rounds.
pub const EMPLACEMENT_TORPEDO_SPEED: f32 = 10.0;

/// Launch pad lift: rounds spawn this far above the emplacement.
pub const LAUNCH_LIFT: f32 = 500.0;

/// Initial climb aim point sits this far above the emplacement.
pub const LAUNCH_CLIMB: f32 = 5000.0;

/// The ship aims a fresh round this far along its forward vector.
pub const SHIP_AIM_DISTANCE: f32 = 100.0;

// --- Ship ---

/// Total rounds the ship may expend before the game is lost.
pub const SHIP_TORPEDO_STOCK: u32 = 20;

/// Degrees per turn command.
pub const SHIP_TURN_DEGREES: f32 = 2.0;

/// Collision radius of the ship.
pub const SHIP_BOUNDING_RADIUS: f32 = 130.0;

/// Speed cycling: each adjust adds this much...
pub const SHIP_SPEED_STEP: f32 = 10.0;

/// ...until the cap, after which speed snaps back to the floor.
pub const SHIP_SPEED_CAP: f32 = 200.0;
pub const SHIP_SPEED_FLOOR: f32 = 50.0;

// --- Emplacements ---

/// Missile stock of an armed emplacement.
pub const EMPLACEMENT_MISSILE_STOCK: u32 = 10;

// --- Collision ---

/// Padding added to a body's radius to form its bounding sphere.
pub const BOUNDING_MARGIN: f32 = 10.0;

/// The sun gets a wider margin.
pub const SUN_BOUNDING_MARGIN: f32 = 100.0;

/// Distance from a ring obstacle's center to the middle of its tube.
pub const RING_TUBE_OFFSET: f32 = 1000.0;

/// Multiplier on the sample count when approximating a ring with spheres.
pub const RING_SAMPLE_DENSITY: f32 = 4.0;

// --- Explosions ---

/// Initial explosion radius shown when the ship or a torpedo dies.
pub const EXPLOSION_LARGE: f32 = 1000.0;

/// Initial explosion radius for moons and emplacements.
pub const EXPLOSION_SMALL: f32 = 500.0;

/// Radius shrink per tick while an explosion plays out.
pub const EXPLOSION_DECAY: f32 = 50.0;

// --- Particle fountain ---

/// Particle count of the sun's fountain.
pub const FOUNTAIN_PARTICLES: usize = 2000;

/// Substep length in seconds.
pub const FOUNTAIN_STEP_SECS: f32 = 0.01;

/// Simulated seconds advanced per tick.
pub const FOUNTAIN_TICK_SECS: f32 = 0.04;

/// Seconds of pre-roll at construction so the fountain starts full.
pub const FOUNTAIN_PRIME_SECS: f32 = 5.0;

/// Downward acceleration on fountain particles.
pub const FOUNTAIN_GRAVITY: f32 = 3.0;

/// Emitter tilt applied when handing particle positions to the renderer.
pub const FOUNTAIN_TILT_DEGREES: f32 = -30.0;
