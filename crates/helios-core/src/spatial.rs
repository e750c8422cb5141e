//! Per-entity orientation and transform state.
//!
//! Every simulated object owns a logical position plus pitch/yaw/roll
//! angles (degrees), from which a 4x4 orientation matrix is re-derived at
//! the start of the entity's update each tick. Readers (collision,
//! guidance, the renderer) take forward/up/position from the cached
//! matrix, never from the raw angle fields, so the matrix must be current
//! before any of them run that frame.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Orientation and transform state for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spatial {
    /// Logical position, set by game logic (not derived).
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    /// Orbiters rotate first and translate second, sweeping the position
    /// around the pivot; free movers translate first and spin in place.
    /// Fixed at construction.
    pub rotate_about: bool,
    matrix: Mat4,
}

impl Spatial {
    /// A free-moving entity at `position`, axes aligned with the world.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            rotate_about: false,
            matrix: Mat4::from_translation(position),
        }
    }

    /// An entity that orbits about the origin of its parent frame.
    pub fn orbiting(position: Vec3) -> Self {
        Self {
            rotate_about: true,
            ..Self::new(position)
        }
    }

    /// Advance the orbital angle, wrapping at the 360 threshold.
    ///
    /// The wrap is an exact reset, not a modulo: once the angle reaches or
    /// passes 360 it restarts from 0, so an evenly dividing step returns
    /// to exactly 0 with no accumulated drift.
    pub fn advance_orbit(&mut self, degrees: f32) {
        self.yaw += degrees;
        if self.yaw >= 360.0 {
            self.yaw = 0.0;
        }
    }

    /// Rebuild the orientation matrix from the current angles and position.
    /// Rotation order is roll, then yaw, then pitch.
    pub fn recompute_matrix(&mut self) {
        let rotation = Mat4::from_rotation_z(self.roll.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians());
        self.matrix = if self.rotate_about {
            rotation * Mat4::from_translation(self.position)
        } else {
            Mat4::from_translation(self.position) * rotation
        };
    }

    /// Point the entity along an arbitrary axis/angle instead of the
    /// pitch/yaw/roll state. Used by homing projectiles, which aim with a
    /// rotation computed from their travel direction.
    pub fn orient_about_axis(&mut self, axis: Vec3, degrees: f32) {
        self.matrix = Mat4::from_translation(self.position)
            * Mat4::from_axis_angle(axis, degrees.to_radians());
    }

    /// Forward vector, read from the matrix.
    pub fn forward(&self) -> Vec3 {
        self.matrix.z_axis.truncate()
    }

    /// Up vector, read from the matrix.
    pub fn up(&self) -> Vec3 {
        self.matrix.y_axis.truncate()
    }

    /// World position as carried in the matrix. For orbiters this is the
    /// swept position; for free movers it equals the logical position as
    /// of the last recompute.
    pub fn matrix_position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// The raw logical position, bypassing the matrix.
    pub fn absolute_position(&self) -> Vec3 {
        self.position
    }

    /// Move the entity to a new location outright.
    pub fn teleport(&mut self, destination: Vec3) {
        self.position = destination;
    }

    /// Gravity bends the trajectory rather than displacing along the pull
    /// alone: forward motion is always added in.
    pub fn apply_gravity(&mut self, gravity: Vec3) {
        let forward = self.forward();
        self.position += forward + gravity;
    }
}
