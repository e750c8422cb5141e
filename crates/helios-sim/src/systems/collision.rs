//! Collision detection and resolution.
//!
//! The predicates are pure functions of effective positions and radii;
//! outcomes are applied only here in the orchestrated pass, in a fixed
//! priority order: torpedoes and the ship against each planet, then each
//! planet's moons (with the armed-site special case), then the ship
//! against enemy rounds, the sun, and finally the ring obstacles.

use std::f32::consts::TAU;

use glam::Vec3;
use hecs::{Entity, World};

use helios_core::components::{
    BoundingSphere, Destructible, Emplacement, Explosion, Name, Radius, Satellite, ShipControl,
};
use helios_core::constants::{
    EXPLOSION_LARGE, EXPLOSION_SMALL, RING_SAMPLE_DENSITY, RING_TUBE_OFFSET,
};
use helios_core::events::GameEvent;
use helios_core::math;
use helios_core::spatial::Spatial;
use helios_core::torpedo::Torpedo;

use crate::world_setup::GalaxyHandles;

/// Bounding-sphere test: two entities collide iff the distance between
/// their effective positions is within the sum of their radii.
pub fn spheres_intersect(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    math::distance(a, b) <= radius_a + radius_b
}

/// Ring-obstacle test: the torus is approximated by a chain of spheres
/// sampled around its major circle, the count derived from the ring
/// geometry. A fast, small object can slip between samples; that is an
/// accepted limit of the approximation, not a bug.
pub fn ring_intersects_sphere(
    center: Vec3,
    tube_radius: f32,
    ring_bounding: f32,
    other: Vec3,
    other_bounding: f32,
) -> bool {
    let outer = RING_TUBE_OFFSET + tube_radius;
    let samples = ((2.0 * outer / tube_radius) * RING_SAMPLE_DENSITY) as usize;
    let step = TAU / samples as f32;
    let mut angle = 0.0_f32;
    for _ in 0..samples {
        let sample = center + Vec3::new(outer * angle.cos(), outer * angle.sin(), 0.0);
        if math::distance(sample, other) < ring_bounding + other_bounding {
            return true;
        }
        angle += step;
    }
    false
}

/// Position/radius/aliveness of one party to a test.
struct Contact {
    position: Vec3,
    bounding: f32,
    alive: bool,
    name: String,
}

pub fn run(world: &mut World, handles: &GalaxyHandles, events: &mut Vec<GameEvent>) {
    let emplacement_rounds: Vec<Entity> = handles
        .emplacements
        .iter()
        .filter_map(|&site| world.get::<&Emplacement>(site).ok().and_then(|e| e.torpedo))
        .collect();
    let ship_round: Option<Entity> = world
        .get::<&ShipControl>(handles.ship)
        .ok()
        .and_then(|control| control.torpedo);

    for planet in &handles.planets {
        let Some(planet_contact) = body_contact(world, planet.entity) else {
            continue;
        };

        for &round in emplacement_rounds.iter().chain(ship_round.iter()) {
            torpedo_vs_body(world, round, &planet_contact, events);
        }
        ship_vs_body(world, handles.ship, &planet_contact, events);

        for &moon in &planet.moons {
            // Refresh the cached parent position right before testing:
            // a test issued any earlier would see last tick's orbit.
            if let Ok(mut satellite) = world.get::<&mut Satellite>(moon) {
                satellite.parent_position = planet_contact.position;
            }
            let Some(moon_contact) = moon_contact(world, moon) else {
                continue;
            };
            let armed_site = world.get::<&Emplacement>(moon).is_ok();

            for &round in &emplacement_rounds {
                moon_vs_torpedo(world, &moon_contact, round, events);
            }
            if let Some(round) = ship_round {
                if armed_site {
                    site_vs_ship_round(world, moon, &moon_contact, round, events);
                } else {
                    moon_vs_torpedo(world, &moon_contact, round, events);
                }
            }
            moon_vs_ship(world, handles.ship, &moon_contact, events);
        }
    }

    // The ship's round against incoming rounds: point defense by mutual
    // destruction. Rounds carry zero bounding radius, so this only fires
    // on an exact crossing.
    if let Some(own) = ship_round {
        for &round in &emplacement_rounds {
            let Some(own_contact) = torpedo_contact(world, own) else {
                break;
            };
            let Some(enemy_contact) = torpedo_contact(world, round) else {
                continue;
            };
            if own_contact.alive
                && enemy_contact.alive
                && spheres_intersect(
                    own_contact.position,
                    own_contact.bounding,
                    enemy_contact.position,
                    enemy_contact.bounding,
                )
            {
                destroy_torpedo(world, own);
                destroy_torpedo(world, round);
                report(events, &own_contact.name, &enemy_contact.name);
            }
        }
    }

    // Enemy rounds reaching the ship take it down with them.
    for &round in &emplacement_rounds {
        let Some(round_contact) = torpedo_contact(world, round) else {
            continue;
        };
        let Some(ship_contact) = ship_contact(world, handles.ship) else {
            continue;
        };
        if round_contact.alive
            && ship_contact.alive
            && spheres_intersect(
                ship_contact.position,
                ship_contact.bounding,
                round_contact.position,
                round_contact.bounding,
            )
        {
            destroy_torpedo(world, round);
            destroy_ship(world, handles.ship);
            report(events, &ship_contact.name, &round_contact.name);
        }
    }

    if let Some(sun_contact) = body_contact(world, handles.sun) {
        for &round in emplacement_rounds.iter().chain(ship_round.iter()) {
            torpedo_vs_body(world, round, &sun_contact, events);
        }
        ship_vs_body(world, handles.ship, &sun_contact, events);
    }

    for &ring in &handles.obstacles {
        let Some(ship_contact) = ship_contact(world, handles.ship) else {
            break;
        };
        if !ship_contact.alive {
            break;
        }
        let Some((ring_position, tube_radius, ring_bounding, ring_name)) = ring_state(world, ring)
        else {
            continue;
        };
        if ring_intersects_sphere(
            ring_position,
            tube_radius,
            ring_bounding,
            ship_contact.position,
            ship_contact.bounding,
        ) {
            destroy_ship(world, handles.ship);
            report(events, &ship_contact.name, &ring_name);
        }
    }
}

fn torpedo_vs_body(world: &mut World, round: Entity, body: &Contact, events: &mut Vec<GameEvent>) {
    let Some(round_contact) = torpedo_contact(world, round) else {
        return;
    };
    if round_contact.alive
        && spheres_intersect(
            round_contact.position,
            round_contact.bounding,
            body.position,
            body.bounding,
        )
    {
        destroy_torpedo(world, round);
        report(events, &round_contact.name, &body.name);
    }
}

fn ship_vs_body(world: &mut World, ship: Entity, body: &Contact, events: &mut Vec<GameEvent>) {
    let Some(ship_contact) = ship_contact(world, ship) else {
        return;
    };
    if ship_contact.alive
        && spheres_intersect(
            ship_contact.position,
            ship_contact.bounding,
            body.position,
            body.bounding,
        )
    {
        destroy_ship(world, ship);
        report(events, &ship_contact.name, &body.name);
    }
}

/// A moon shields itself: any round flying into it is lost.
fn moon_vs_torpedo(world: &mut World, moon: &Contact, round: Entity, events: &mut Vec<GameEvent>) {
    let Some(round_contact) = torpedo_contact(world, round) else {
        return;
    };
    if round_contact.alive
        && spheres_intersect(
            moon.position,
            moon.bounding,
            round_contact.position,
            round_contact.bounding,
        )
    {
        destroy_torpedo(world, round);
        report(events, &round_contact.name, &moon.name);
    }
}

/// The ship's round reaching an armed site destroys both.
fn site_vs_ship_round(
    world: &mut World,
    site: Entity,
    moon: &Contact,
    round: Entity,
    events: &mut Vec<GameEvent>,
) {
    let Some(round_contact) = torpedo_contact(world, round) else {
        return;
    };
    if round_contact.alive
        && moon.alive
        && spheres_intersect(
            moon.position,
            moon.bounding,
            round_contact.position,
            round_contact.bounding,
        )
    {
        destroy_site(world, site);
        destroy_torpedo(world, round);
        report(events, &round_contact.name, &moon.name);
    }
}

fn moon_vs_ship(world: &mut World, ship: Entity, moon: &Contact, events: &mut Vec<GameEvent>) {
    let Some(ship_contact) = ship_contact(world, ship) else {
        return;
    };
    if ship_contact.alive
        && spheres_intersect(
            moon.position,
            moon.bounding,
            ship_contact.position,
            ship_contact.bounding,
        )
    {
        destroy_ship(world, ship);
        report(events, &ship_contact.name, &moon.name);
    }
}

fn body_contact(world: &World, entity: Entity) -> Option<Contact> {
    let mut query = world
        .query_one::<(&Spatial, &BoundingSphere, &Name)>(entity)
        .ok()?;
    query.get().map(|(spatial, bounding, name)| Contact {
        position: spatial.matrix_position(),
        bounding: bounding.radius,
        alive: true,
        name: name.0.clone(),
    })
}

/// Effective position of a moon: parent position plus its own swept
/// position, with the parent refreshed this tick.
fn moon_contact(world: &World, moon: Entity) -> Option<Contact> {
    let mut query = world
        .query_one::<(&Satellite, &Spatial, &BoundingSphere, &Name)>(moon)
        .ok()?;
    let (satellite, spatial, bounding, name) = query.get()?;
    let alive = world
        .get::<&Destructible>(moon)
        .map(|d| d.alive)
        .unwrap_or(true);
    Some(Contact {
        position: satellite.parent_position + spatial.matrix_position(),
        bounding: bounding.radius,
        alive,
        name: name.0.clone(),
    })
}

fn ship_contact(world: &World, ship: Entity) -> Option<Contact> {
    let mut query = world
        .query_one::<(&Spatial, &BoundingSphere, &Destructible, &Name)>(ship)
        .ok()?;
    query
        .get()
        .map(|(spatial, bounding, destructible, name)| Contact {
            position: spatial.matrix_position(),
            bounding: bounding.radius,
            alive: destructible.alive,
            name: name.0.clone(),
        })
}

fn torpedo_contact(world: &World, round: Entity) -> Option<Contact> {
    let mut query = world
        .query_one::<(&Torpedo, &Spatial, &BoundingSphere, &Name)>(round)
        .ok()?;
    query.get().map(|(torpedo, spatial, bounding, name)| Contact {
        position: spatial.matrix_position(),
        bounding: bounding.radius,
        alive: torpedo.is_alive(),
        name: name.0.clone(),
    })
}

fn ring_state(world: &World, ring: Entity) -> Option<(Vec3, f32, f32, String)> {
    let mut query = world
        .query_one::<(&Spatial, &Radius, &BoundingSphere, &Name)>(ring)
        .ok()?;
    query.get().map(|(spatial, radius, bounding, name)| {
        (
            spatial.matrix_position(),
            radius.0,
            bounding.radius,
            name.0.clone(),
        )
    })
}

fn destroy_torpedo(world: &mut World, round: Entity) {
    if let Ok((torpedo, explosion)) = world.query_one_mut::<(&mut Torpedo, &mut Explosion)>(round)
    {
        torpedo.destroy();
        explosion.radius = EXPLOSION_LARGE;
    }
}

fn destroy_ship(world: &mut World, ship: Entity) {
    if let Ok((destructible, explosion)) =
        world.query_one_mut::<(&mut Destructible, &mut Explosion)>(ship)
    {
        destructible.alive = false;
        explosion.radius = EXPLOSION_LARGE;
    }
}

fn destroy_site(world: &mut World, site: Entity) {
    if let Ok((destructible, explosion)) =
        world.query_one_mut::<(&mut Destructible, &mut Explosion)>(site)
    {
        destructible.alive = false;
        explosion.radius = EXPLOSION_SMALL;
    }
}

fn report(events: &mut Vec<GameEvent>, a: &str, b: &str) {
    log::info!("{a} collides with {b}");
    events.push(GameEvent::Collision {
        a: a.to_string(),
        b: b.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spheres_intersect_symmetry() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(150.0, 0.0, 0.0);
        assert_eq!(
            spheres_intersect(a, 100.0, b, 60.0),
            spheres_intersect(b, 60.0, a, 100.0)
        );
        assert!(spheres_intersect(a, 100.0, b, 60.0));
        assert!(!spheres_intersect(a, 100.0, b, 40.0));
    }

    #[test]
    fn test_spheres_touching_exactly_collide() {
        let a = Vec3::ZERO;
        let b = Vec3::new(160.0, 0.0, 0.0);
        assert!(spheres_intersect(a, 100.0, b, 60.0));
    }

    #[test]
    fn test_ring_hit_on_tube_miss_in_hole() {
        let center = Vec3::ZERO;
        let tube_radius = 500.0;
        let ring_bounding = tube_radius + 10.0;
        // On the major circle (x = offset + tube radius): hit.
        let on_tube = Vec3::new(RING_TUBE_OFFSET + tube_radius, 0.0, 0.0);
        assert!(ring_intersects_sphere(
            center,
            tube_radius,
            ring_bounding,
            on_tube,
            130.0
        ));
        // Dead center of the hole: miss.
        assert!(!ring_intersects_sphere(
            center,
            tube_radius,
            ring_bounding,
            center,
            130.0
        ));
    }

    #[test]
    fn test_ring_sample_count_from_geometry() {
        // outer = 1500, so (2 * 1500 / 500) * 4 = 24 samples; consecutive
        // samples sit 15 degrees apart. A probe between two samples but
        // within bounding distance of one must still hit.
        let tube_radius = 500.0;
        let outer = RING_TUBE_OFFSET + tube_radius;
        let angle = (2.0 * TAU / 24.0) * 0.5; // halfway between samples
        let probe = Vec3::new(outer * angle.cos(), outer * angle.sin(), 0.0);
        assert!(ring_intersects_sphere(
            Vec3::ZERO,
            tube_radius,
            tube_radius + 10.0,
            probe,
            130.0
        ));
    }
}
