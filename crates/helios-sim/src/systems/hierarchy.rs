//! Parent/child position composition.
//!
//! Each planet pushes its freshly computed position into every owned
//! satellite, then the satellite advances its own orbit. Runs strictly
//! after the movement pass so no satellite ever composes with a stale
//! parent position.

use glam::Vec3;
use hecs::World;

use helios_core::components::{Moon, Orbiter, Satellite};
use helios_core::spatial::Spatial;

use crate::world_setup::GalaxyHandles;

pub fn run(world: &mut World, handles: &GalaxyHandles) {
    for planet in &handles.planets {
        let parent_position = world
            .get::<&Spatial>(planet.entity)
            .map(|s| s.matrix_position())
            .unwrap_or(Vec3::ZERO);

        for &moon in &planet.moons {
            if let Ok((satellite, spatial, orbiter, _)) =
                world.query_one_mut::<(&mut Satellite, &mut Spatial, &Orbiter, &Moon)>(moon)
            {
                satellite.parent_position = parent_position;
                spatial.advance_orbit(orbiter.degrees_per_tick);
                spatial.recompute_matrix();
            }
        }
    }
}
