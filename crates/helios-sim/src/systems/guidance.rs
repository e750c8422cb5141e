//! Per-tick torpedo guidance and retargeting.
//!
//! Emplacement rounds climb blind through a warm-up window, then re-track
//! the ship's current position every tick. The ship's round re-tracks its
//! designated emplacement from launch. Either way the torpedo then takes
//! one steering step, which also expires it past its lifetime.

use glam::Vec3;
use hecs::{Entity, World};

use helios_core::components::{Emplacement, Satellite, ShipControl};
use helios_core::constants::TRACKING_WARMUP_FRAMES;
use helios_core::spatial::Spatial;
use helios_core::torpedo::Torpedo;

use crate::world_setup::GalaxyHandles;

pub fn run(world: &mut World, handles: &GalaxyHandles) {
    let ship_position = world
        .get::<&Spatial>(handles.ship)
        .map(|s| s.matrix_position())
        .unwrap_or(Vec3::ZERO);

    for &site in &handles.emplacements {
        let round = world
            .get::<&Emplacement>(site)
            .ok()
            .and_then(|emplacement| emplacement.torpedo);
        let Some(round) = round else { continue };
        if let Ok((torpedo, spatial)) = world.query_one_mut::<(&mut Torpedo, &mut Spatial)>(round)
        {
            if torpedo.is_alive() {
                if torpedo.frame() > TRACKING_WARMUP_FRAMES {
                    torpedo.track(ship_position);
                }
                torpedo.advance(spatial);
            }
        }
    }

    let (round, target) = world
        .get::<&ShipControl>(handles.ship)
        .map(|control| (control.torpedo, control.target))
        .unwrap_or((None, None));
    let Some(round) = round else { return };
    let target_position = target.and_then(|site| emplacement_position(world, site));
    if let Ok((torpedo, spatial)) = world.query_one_mut::<(&mut Torpedo, &mut Spatial)>(round) {
        if torpedo.is_alive() {
            if let Some(position) = target_position {
                torpedo.track(position);
            }
            torpedo.advance(spatial);
        }
    }
}

/// Effective (parent-composed) position of an emplacement moon.
fn emplacement_position(world: &World, site: Entity) -> Option<Vec3> {
    let mut query = world.query_one::<(&Satellite, &Spatial)>(site).ok()?;
    query
        .get()
        .map(|(satellite, spatial)| satellite.parent_position + spatial.matrix_position())
}
