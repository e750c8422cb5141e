//! Independent-mover update: advances orbital angles and rebuilds every
//! entity's orientation matrix at the top of the tick, before anything
//! reads forward/up/position for the frame.
//!
//! Satellites are not touched here; the hierarchy pass updates them once
//! their parents are current.

use hecs::World;

use helios_core::components::{Destructible, Escort, Orbiter, Planet, PlayerShip, RingObstacle, Sun};
use helios_core::spatial::Spatial;

use crate::world_setup::GalaxyHandles;

pub fn run(world: &mut World, handles: &GalaxyHandles) {
    for planet in &handles.planets {
        if let Ok((spatial, orbiter, _)) =
            world.query_one_mut::<(&mut Spatial, &Orbiter, &Planet)>(planet.entity)
        {
            spatial.advance_orbit(orbiter.degrees_per_tick);
            spatial.recompute_matrix();
        }
    }

    for &ring in &handles.obstacles {
        if let Ok((spatial, _)) = world.query_one_mut::<(&mut Spatial, &RingObstacle)>(ring) {
            spatial.recompute_matrix();
        }
    }

    if let Ok((spatial, orbiter, _)) =
        world.query_one_mut::<(&mut Spatial, &Orbiter, &Sun)>(handles.sun)
    {
        spatial.advance_orbit(orbiter.degrees_per_tick);
        spatial.recompute_matrix();
    }

    for &oracle in &handles.oracles {
        if let Ok((spatial, orbiter)) = world.query_one_mut::<(&mut Spatial, &Orbiter)>(oracle) {
            spatial.advance_orbit(orbiter.degrees_per_tick);
            spatial.recompute_matrix();
        }
    }

    // The ship and its wingmen update only while the ship lives; a dead
    // ship keeps its final matrix for the explosion display.
    let ship_alive = world
        .get::<&Destructible>(handles.ship)
        .map(|d| d.alive)
        .unwrap_or(false);
    if !ship_alive {
        return;
    }

    let (pitch, yaw, roll) =
        match world.query_one_mut::<(&mut Spatial, &PlayerShip)>(handles.ship) {
            Ok((spatial, _)) => {
                spatial.recompute_matrix();
                (spatial.pitch, spatial.yaw, spatial.roll)
            }
            Err(_) => return,
        };

    // Wingmen mirror the ship's orientation.
    for &escort in &handles.escorts {
        if let Ok((spatial, _)) = world.query_one_mut::<(&mut Spatial, &Escort)>(escort) {
            spatial.pitch = pitch;
            spatial.yaw = yaw;
            spatial.roll = roll;
            spatial.recompute_matrix();
        }
    }
}
