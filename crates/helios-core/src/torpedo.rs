//! Homing torpedo state machine.
//!
//! Torpedoes are pooled: a destroyed round is flagged dead and later
//! reborn at a new pad with a fresh target, never deallocated, so rapid
//! fire causes no allocation churn. The lifecycle is Dead -> Alive (on
//! construction or `reborn`) -> Dead (on `destroy` or lifetime expiry).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::TorpedoKind;
use crate::math;
use crate::spatial::Spatial;

/// Guidance and lifecycle state for one pooled torpedo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Torpedo {
    alive: bool,
    pub kind: TorpedoKind,
    /// Current aim point. A raw position, not an entity reference: the
    /// owner re-tracks it every tick while homing.
    target: Vec3,
    pub speed: f32,
    /// Ticks of powered flight before the round self-expires.
    lives: u32,
    /// Ticks since launch/rebirth.
    frame: u32,
    gravity_on: bool,
    /// Pull cached by the last gravity pass, consumed by steering.
    gravity: Vec3,
}

impl Torpedo {
    pub fn new(kind: TorpedoKind, target: Vec3, speed: f32, lives: u32) -> Self {
        Self {
            alive: true,
            kind,
            target,
            speed,
            lives,
            frame: 0,
            gravity_on: false,
            gravity: Vec3::ZERO,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Overwrite the aim point; takes effect on the next `advance`.
    pub fn track(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Kill the round and reset its flight counter so an immediate
    /// rebirth starts from a clean lifetime.
    pub fn destroy(&mut self) {
        self.alive = false;
        self.frame = 0;
    }

    /// Bring a pooled round back to life. Position and target are NOT
    /// reset here; the launcher must set both before rebirth or the round
    /// continues toward its previous aim point from wherever it died.
    pub fn reborn(&mut self) {
        self.alive = true;
        self.frame = 0;
    }

    /// Enable gravity influence and cache the current pull.
    pub fn apply_gravity(&mut self, gravity: Vec3) {
        self.gravity_on = true;
        self.gravity = gravity;
    }

    pub fn set_gravity(&mut self, enabled: bool) {
        self.gravity_on = enabled;
    }

    /// One guidance step: count the frame, expire past the lifetime,
    /// otherwise aim and move toward the target.
    pub fn advance(&mut self, spatial: &mut Spatial) {
        self.frame += 1;
        if !self.alive {
            return;
        }
        if self.frame <= self.lives {
            self.steer(spatial);
        } else {
            self.alive = false;
        }
    }

    /// Re-derive the orientation matrix from the travel direction, then
    /// advance the position. The matrix is rebuilt before the move, so
    /// readers this tick observe the pre-step position, consistent with
    /// every other entity having updated at the top of the tick.
    fn steer(&mut self, spatial: &mut Spatial) {
        let to_target = self.target - spatial.position;

        let forward = spatial.forward();
        let axis = math::rotation_axis(to_target, forward);
        let mut angle = math::rotation_angle(forward, to_target);
        if axis.x + axis.y + axis.z >= 0.0 {
            angle = 180.0 - angle;
        } else {
            angle = -angle;
        }
        spatial.orient_about_axis(axis, angle);

        if self.gravity_on {
            // The blend is the unnormalized sum of the two unit vectors,
            // not a weighted average; it doubles the step length when the
            // pull lines up with the chase.
            if self.gravity.length() != 0.0 {
                spatial.position +=
                    (to_target.normalize_or_zero() + self.gravity.normalize()) * self.speed;
            }
        } else {
            spatial.position += to_target.normalize_or_zero() * self.speed;
        }
    }
}
