//! Explosion countdown decay.
//!
//! Destruction seeds an explosion radius; this pass shrinks it each tick
//! until it reaches zero. Purely cosmetic state read by the renderer.

use hecs::World;

use helios_core::components::Explosion;
use helios_core::constants::EXPLOSION_DECAY;

pub fn run(world: &mut World) {
    for (_entity, explosion) in world.query_mut::<&mut Explosion>() {
        if explosion.radius > 0.0 {
            explosion.radius = (explosion.radius - EXPLOSION_DECAY).max(0.0);
        }
    }
}
