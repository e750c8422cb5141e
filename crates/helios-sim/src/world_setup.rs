//! Entity spawn factories for setting up the galaxy.
//!
//! Spawn order is fixed by the scenario tables; the returned handle sets
//! preserve it so every per-tick traversal (and therefore every collision
//! resolution) runs in a deterministic order.

use glam::Vec3;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use helios_core::colors::ColorName;
use helios_core::components::*;
use helios_core::constants::*;
use helios_core::spatial::Spatial;

use crate::scenario;
use crate::systems::fountain;

/// A planet and its satellites, in spawn order.
#[derive(Debug, Clone)]
pub struct PlanetHandle {
    pub entity: Entity,
    pub moons: Vec<Entity>,
}

/// Stable entity handles for ordered traversal by the systems.
#[derive(Debug, Clone)]
pub struct GalaxyHandles {
    pub sun: Entity,
    pub ship: Entity,
    pub escorts: Vec<Entity>,
    pub planets: Vec<PlanetHandle>,
    /// Armed fire-control sites, in planet order.
    pub emplacements: Vec<Entity>,
    /// Scanning-only sites.
    pub oracles: Vec<Entity>,
    pub obstacles: Vec<Entity>,
    pub fountain: Entity,
}

/// Build the whole scene from the scenario tables.
pub fn setup_galaxy(world: &mut World, rng: &mut ChaCha8Rng) -> GalaxyHandles {
    let sun = spawn_sun(world);
    let fountain = spawn_fountain(world, rng);
    let ship = spawn_ship(world);
    let escorts = spawn_escorts(world);

    let mut planets = Vec::new();
    let mut emplacements = Vec::new();
    for def in &scenario::PLANETS {
        let planet = spawn_planet(world, def);
        let mut moons = Vec::new();
        for moon_def in def.moons {
            let moon = spawn_moon(world, planet, moon_def);
            if moon_def.emplacement.is_some() {
                emplacements.push(moon);
            }
            moons.push(moon);
        }
        planets.push(PlanetHandle {
            entity: planet,
            moons,
        });
    }

    let oracles = scenario::ORACLES
        .iter()
        .map(|def| spawn_oracle(world, def))
        .collect();
    let obstacles = scenario::RINGS
        .iter()
        .map(|def| spawn_ring(world, def))
        .collect();

    GalaxyHandles {
        sun,
        ship,
        escorts,
        planets,
        emplacements,
        oracles,
        obstacles,
        fountain,
    }
}

fn spawn_sun(world: &mut World) -> Entity {
    world.spawn((
        Sun,
        Name::new(scenario::SUN_NAME),
        Spatial::new(Vec3::ZERO),
        Orbiter {
            degrees_per_tick: 0.0,
        },
        Radius(scenario::SUN_RADIUS),
        BoundingSphere {
            radius: scenario::SUN_RADIUS + SUN_BOUNDING_MARGIN,
            collidable: true,
        },
        Display::default(),
        Tint(ColorName::Yellow),
    ))
}

fn spawn_fountain(world: &mut World, rng: &mut ChaCha8Rng) -> Entity {
    let mut state = Fountain::default();
    fountain::prime(&mut state, rng);
    world.spawn((Name::new("fountain"), state))
}

fn spawn_ship(world: &mut World) -> Entity {
    world.spawn((
        PlayerShip,
        Name::new(scenario::SHIP_NAME),
        Spatial::new(scenario::SHIP_POSITION),
        ShipControl::new(scenario::SHIP_SPEED, SHIP_TURN_DEGREES),
        BoundingSphere {
            radius: SHIP_BOUNDING_RADIUS,
            collidable: true,
        },
        Destructible::alive(),
        Explosion::default(),
        Display::default(),
        Tint(ColorName::Red),
    ))
}

fn spawn_escorts(world: &mut World) -> Vec<Entity> {
    scenario::ESCORT_OFFSETS
        .iter()
        .enumerate()
        .map(|(i, offset)| {
            world.spawn((
                Escort { offset: *offset },
                Name(format!("Wingman-{}", i + 1)),
                Spatial::new(scenario::SHIP_POSITION + *offset),
                Display::default(),
                Tint(ColorName::DarkOrchid),
            ))
        })
        .collect()
}

fn spawn_planet(world: &mut World, def: &scenario::PlanetDef) -> Entity {
    world.spawn((
        Planet,
        Name::new(def.name),
        Spatial::orbiting(def.position),
        Orbiter {
            degrees_per_tick: def.degrees_per_tick,
        },
        Radius(def.radius),
        BoundingSphere {
            radius: def.radius + BOUNDING_MARGIN,
            collidable: true,
        },
        Display::default(),
        Tint(def.color),
    ))
}

fn spawn_moon(world: &mut World, parent: Entity, def: &scenario::MoonDef) -> Entity {
    let moon = world.spawn((
        Moon,
        Name::new(def.name),
        Spatial::orbiting(def.position),
        Orbiter {
            degrees_per_tick: def.degrees_per_tick,
        },
        Satellite::of(parent),
        Radius(def.radius),
        BoundingSphere {
            radius: def.radius + BOUNDING_MARGIN,
            collidable: true,
        },
        Display::default(),
        Tint(def.color),
    ));
    if let Some(emp) = def.emplacement {
        let _ = world.insert(
            moon,
            (
                Emplacement::new(emp.detection_radius, emp.missile_stock, emp.round_lives),
                Destructible::alive(),
                Explosion::default(),
            ),
        );
    }
    moon
}

fn spawn_oracle(world: &mut World, def: &scenario::OracleDef) -> Entity {
    world.spawn((
        Name::new(def.name),
        Spatial::orbiting(def.position),
        Orbiter {
            degrees_per_tick: def.degrees_per_tick,
        },
        Radius(def.radius),
        BoundingSphere {
            radius: def.radius,
            collidable: false,
        },
        Emplacement::new(def.detection_radius, 0, 0),
        Display::default(),
        Tint(def.color),
    ))
}

fn spawn_ring(world: &mut World, def: &scenario::RingDef) -> Entity {
    world.spawn((
        RingObstacle,
        Name::new(def.name),
        Spatial::new(def.position),
        Radius(def.tube_radius),
        BoundingSphere {
            radius: def.tube_radius + BOUNDING_MARGIN,
            collidable: true,
        },
        Display::default(),
        Tint(def.color),
    ))
}

/// Spawn one pooled torpedo round. Pooled rounds are never despawned;
/// they die and are reborn at a new pad.
///
/// A round's own bounding radius is zero: the target's sphere alone
/// decides the hit. The near site sits 25 units off its planet's
/// surface, so any fatter round would die on the planet before it could
/// ever reach the site.
pub fn spawn_torpedo(
    world: &mut World,
    start: Vec3,
    torpedo: helios_core::torpedo::Torpedo,
    fired_by: FiredBy,
) -> Entity {
    world.spawn((
        Name::new("torpedo"),
        Spatial::new(start),
        torpedo,
        fired_by,
        Radius(TORPEDO_RADIUS),
        BoundingSphere {
            radius: 0.0,
            collidable: true,
        },
        Explosion::default(),
        Display::default(),
        Tint(ColorName::Red),
    ))
}
