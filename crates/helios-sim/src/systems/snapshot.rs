//! Snapshot assembly — flattens the ECS world into the render-facing
//! view structs at the end of each tick.

use glam::Vec3;
use hecs::{Entity, World};

use helios_core::components::*;
use helios_core::constants::FOUNTAIN_TILT_DEGREES;
use helios_core::enums::{BodyKind, GameOutcome};
use helios_core::events::GameEvent;
use helios_core::math;
use helios_core::spatial::Spatial;
use helios_core::state::*;
use helios_core::torpedo::Torpedo;
use helios_core::types::SimClock;

use crate::world_setup::GalaxyHandles;

pub fn build_snapshot(
    world: &World,
    handles: &GalaxyHandles,
    clock: SimClock,
    settings: SettingsView,
    outcome: GameOutcome,
    events: Vec<GameEvent>,
) -> GalaxySnapshot {
    GalaxySnapshot {
        clock,
        settings,
        outcome,
        ship: ship_view(world, handles.ship),
        bodies: body_views(world, handles),
        torpedoes: torpedo_views(world, handles),
        emplacements: emplacement_views(world, handles),
        fountain: fountain_view(world, handles.fountain),
        events,
    }
}

fn ship_view(world: &World, ship: Entity) -> ShipView {
    let Ok(mut query) = world.query_one::<(
        &Name,
        &Spatial,
        &ShipControl,
        &BoundingSphere,
        &Destructible,
        &Explosion,
    )>(ship) else {
        return ShipView::default();
    };
    let Some((name, spatial, control, bounding, destructible, explosion)) = query.get() else {
        return ShipView::default();
    };
    ShipView {
        name: name.0.clone(),
        position: spatial.matrix_position(),
        absolute_position: spatial.absolute_position(),
        forward: spatial.forward(),
        up: spatial.up(),
        pitch: spatial.pitch,
        yaw: spatial.yaw,
        roll: spatial.roll,
        speed: control.speed,
        alive: destructible.alive,
        moving: control.moving,
        torpedoes_fired: control.torpedoes_fired,
        bounding_radius: bounding.radius,
        explosion_radius: explosion.radius,
    }
}

fn body_views(world: &World, handles: &GalaxyHandles) -> Vec<BodyView> {
    let mut views = Vec::new();
    push_body(world, handles.sun, BodyKind::Sun, &mut views);
    for planet in &handles.planets {
        push_body(world, planet.entity, BodyKind::Planet, &mut views);
        for &moon in &planet.moons {
            let kind = if world.get::<&Emplacement>(moon).is_ok() {
                BodyKind::Emplacement
            } else {
                BodyKind::Moon
            };
            push_body(world, moon, kind, &mut views);
        }
    }
    for &oracle in &handles.oracles {
        push_body(world, oracle, BodyKind::Oracle, &mut views);
    }
    for &ring in &handles.obstacles {
        push_body(world, ring, BodyKind::RingObstacle, &mut views);
    }
    for &escort in &handles.escorts {
        push_body(world, escort, BodyKind::Escort, &mut views);
    }
    views
}

fn push_body(world: &World, entity: Entity, kind: BodyKind, views: &mut Vec<BodyView>) {
    let Ok(mut query) = world.query_one::<(&Name, &Spatial, &Display, &Tint)>(entity) else {
        return;
    };
    let Some((name, spatial, display, tint)) = query.get() else {
        return;
    };
    // Moons report their parent-composed position.
    let position = world
        .get::<&Satellite>(entity)
        .map(|satellite| satellite.parent_position + spatial.matrix_position())
        .unwrap_or_else(|_| spatial.matrix_position());
    let radius = world.get::<&Radius>(entity).map(|r| r.0).unwrap_or(0.0);
    let bounding_radius = world
        .get::<&BoundingSphere>(entity)
        .map(|b| b.radius)
        .unwrap_or(0.0);
    let alive = world
        .get::<&Destructible>(entity)
        .map(|d| d.alive)
        .unwrap_or(true);
    let explosion_radius = world
        .get::<&Explosion>(entity)
        .map(|e| e.radius)
        .unwrap_or(0.0);
    views.push(BodyView {
        name: name.0.clone(),
        kind,
        position,
        forward: spatial.forward(),
        up: spatial.up(),
        radius,
        bounding_radius,
        alive,
        color: tint.0,
        solid: display.solid,
        debug_axes: display.debug_axes,
        bounding_visible: display.bounding_visible,
        explosion_radius,
    });
}

fn torpedo_views(world: &World, handles: &GalaxyHandles) -> Vec<TorpedoView> {
    let mut rounds: Vec<Entity> = handles
        .emplacements
        .iter()
        .filter_map(|&site| world.get::<&Emplacement>(site).ok().and_then(|e| e.torpedo))
        .collect();
    if let Some(round) = world
        .get::<&ShipControl>(handles.ship)
        .ok()
        .and_then(|control| control.torpedo)
    {
        rounds.push(round);
    }

    rounds
        .into_iter()
        .filter_map(|round| {
            let mut query = world
                .query_one::<(&Torpedo, &Spatial, &FiredBy, &Tint, &Explosion)>(round)
                .ok()?;
            let (torpedo, spatial, fired_by, tint, explosion) = query.get()?;
            Some(TorpedoView {
                owner: fired_by.0,
                kind: torpedo.kind,
                position: spatial.matrix_position(),
                target: torpedo.target(),
                alive: torpedo.is_alive(),
                frame: torpedo.frame(),
                lives: torpedo.lives(),
                speed: torpedo.speed,
                color: tint.0,
                explosion_radius: explosion.radius,
            })
        })
        .collect()
}

fn emplacement_views(world: &World, handles: &GalaxyHandles) -> Vec<EmplacementView> {
    handles
        .emplacements
        .iter()
        .chain(handles.oracles.iter())
        .filter_map(|&entity| {
            let mut query = world
                .query_one::<(&Emplacement, &Spatial, &Name)>(entity)
                .ok()?;
            let (emplacement, spatial, name) = query.get()?;
            let position = world
                .get::<&Satellite>(entity)
                .map(|satellite| satellite.parent_position + spatial.matrix_position())
                .unwrap_or_else(|_| spatial.matrix_position());
            let alive = world
                .get::<&Destructible>(entity)
                .map(|d| d.alive)
                .unwrap_or(true);
            let round_alive = emplacement
                .torpedo
                .map(|round| {
                    world
                        .get::<&Torpedo>(round)
                        .map(|t| t.is_alive())
                        .unwrap_or(false)
                })
                .unwrap_or(false);
            Some(EmplacementView {
                name: name.0.clone(),
                position,
                detection_radius: emplacement.detection_radius,
                missiles_left: emplacement.missiles_left,
                alive,
                ship_detected: emplacement.ship_detected,
                round_alive,
            })
        })
        .collect()
}

fn fountain_view(world: &World, fountain: Entity) -> FountainView {
    let Ok(state) = world.get::<&Fountain>(fountain) else {
        return FountainView::default();
    };
    let particles = state
        .particles
        .iter()
        .map(|particle| FountainParticleView {
            // Pre-tilt into the emitter frame the renderer draws in.
            position: math::rotate_about(particle.position, Vec3::X, FOUNTAIN_TILT_DEGREES),
            color: particle.color,
            alpha: 1.0 - particle.time_alive / particle.life_span,
        })
        .collect();
    FountainView { particles }
}
