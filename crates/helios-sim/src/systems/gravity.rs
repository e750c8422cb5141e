//! The sun's gravity field.
//!
//! Inverse-square pull toward the origin with a near-field cutoff, plus
//! an explicit zero-distance guard: a position exactly on the sun must
//! yield zero force, not a division by zero. (The cutoff alone does not
//! cover it — it compares raw distance, and the guard documents the
//! chosen policy of returning zero rather than clamping.)
//!
//! Applied once per tick to every alive, gravity-subscribed mover: the
//! ship's position takes `forward + pull` directly, while torpedoes only
//! cache the pull for their steering blend.

use glam::Vec3;
use hecs::World;

use helios_core::components::{Destructible, Emplacement, ShipControl};
use helios_core::constants::{GRAVITY, GRAVITY_WELL_RADIUS};
use helios_core::spatial::Spatial;
use helios_core::torpedo::Torpedo;

use crate::world_setup::GalaxyHandles;

/// Gravity vector and force magnitude at a world position.
pub fn field_at(position: Vec3) -> (Vec3, f32) {
    let distance = position.length();
    if distance == 0.0 {
        return (Vec3::ZERO, 0.0);
    }
    let force = if distance < GRAVITY_WELL_RADIUS {
        0.0
    } else {
        GRAVITY / (distance * distance)
    };
    let direction = -position / distance;
    (direction * force, force)
}

pub fn run(world: &mut World, handles: &GalaxyHandles) {
    let ship_alive = world
        .get::<&Destructible>(handles.ship)
        .map(|d| d.alive)
        .unwrap_or(false);
    if ship_alive {
        if let Ok(spatial) = world.query_one_mut::<&mut Spatial>(handles.ship) {
            let (pull, _) = field_at(spatial.absolute_position());
            spatial.apply_gravity(pull);
        }
    }

    let rounds: Vec<hecs::Entity> = handles
        .emplacements
        .iter()
        .filter_map(|&site| world.get::<&Emplacement>(site).ok().and_then(|e| e.torpedo))
        .chain(
            world
                .get::<&ShipControl>(handles.ship)
                .ok()
                .and_then(|control| control.torpedo),
        )
        .collect();
    for round in rounds {
        if let Ok((torpedo, spatial)) = world.query_one_mut::<(&mut Torpedo, &mut Spatial)>(round)
        {
            if torpedo.is_alive() {
                let (pull, _) = field_at(spatial.matrix_position());
                torpedo.apply_gravity(pull);
            }
        }
    }
}
