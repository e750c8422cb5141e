//! Emplacement fire control: detection scans and torpedo launches.
//!
//! A site fires only while the ship is inside its detection radius and
//! its previous round is dead — at most one live round per site, gated
//! here by the aliveness check, never inside the torpedo itself. Stock
//! runs down one round per launch; a dry site goes quiet for the rest of
//! the game.

use glam::Vec3;
use hecs::{Entity, World};

use helios_core::components::{Destructible, Emplacement, FiredBy, Name, Satellite};
use helios_core::constants::{EMPLACEMENT_TORPEDO_SPEED, LAUNCH_CLIMB, LAUNCH_LIFT};
use helios_core::enums::{TorpedoKind, TorpedoOwner};
use helios_core::events::GameEvent;
use helios_core::math;
use helios_core::spatial::Spatial;
use helios_core::torpedo::Torpedo;

use crate::world_setup::{self, GalaxyHandles};

pub fn run(world: &mut World, handles: &GalaxyHandles, events: &mut Vec<GameEvent>) {
    let ship_alive = world
        .get::<&Destructible>(handles.ship)
        .map(|d| d.alive)
        .unwrap_or(false);
    let ship_position = world
        .get::<&Spatial>(handles.ship)
        .map(|s| s.matrix_position())
        .unwrap_or(Vec3::ZERO);

    // Scan pass: record detection and collect sites cleared to fire.
    let mut detections: Vec<(Entity, bool)> = Vec::new();
    let mut ready: Vec<(Entity, Vec3)> = Vec::new();
    for &entity in &handles.emplacements {
        let Ok(mut query) = world.query_one::<(&Emplacement, &Satellite, &Spatial)>(entity) else {
            continue;
        };
        let Some((emplacement, satellite, spatial)) = query.get() else {
            continue;
        };
        let pad = satellite.parent_position + spatial.matrix_position();
        // The gate is range plus round-aliveness only: even a destroyed
        // site keeps its battery running while stock lasts.
        let detected = ship_alive
            && math::distance(pad, ship_position) < emplacement.detection_radius;
        let round_alive = emplacement
            .torpedo
            .map(|t| {
                world
                    .get::<&Torpedo>(t)
                    .map(|round| round.is_alive())
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        detections.push((entity, detected));
        if detected && !round_alive {
            ready.push((entity, pad));
        }
    }

    for (entity, detected) in detections {
        if let Ok(mut emplacement) = world.get::<&mut Emplacement>(entity) {
            emplacement.ship_detected = detected;
        }
    }

    for (entity, pad) in ready {
        launch(world, entity, pad, events);
    }

    // Scanning-only sites track the ship but never fire.
    for &entity in &handles.oracles {
        let Ok((emplacement, spatial, name)) =
            world.query_one_mut::<(&mut Emplacement, &Spatial, &Name)>(entity)
        else {
            continue;
        };
        let detected = ship_alive
            && math::distance(spatial.matrix_position(), ship_position)
                < emplacement.detection_radius;
        if detected && !emplacement.ship_detected {
            log::debug!("{} has acquired the ship", name.0);
        }
        emplacement.ship_detected = detected;
    }
}

/// Expend one round from stock and put it on the pad: reborn the pooled
/// round if the site already owns one, otherwise spawn it. Rounds launch
/// straight up and only start homing after the tracking warm-up.
fn launch(world: &mut World, entity: Entity, pad: Vec3, events: &mut Vec<GameEvent>) {
    let (slot, round_lives, name) = {
        let Ok(mut emplacement) = world.get::<&mut Emplacement>(entity) else {
            return;
        };
        let name = world
            .get::<&Name>(entity)
            .map(|n| n.0.clone())
            .unwrap_or_default();
        let had_stock = emplacement.missiles_left;
        emplacement.missiles_left = emplacement.missiles_left.saturating_sub(1);
        if emplacement.missiles_left == 0 {
            if had_stock == 1 {
                log::info!("{} is out of missiles", name);
                events.push(GameEvent::StockExhausted { emplacement: name });
            }
            return;
        }
        (emplacement.torpedo, emplacement.round_lives, name)
    };

    let start = pad + Vec3::new(0.0, LAUNCH_LIFT, 0.0);
    let climb = pad + Vec3::new(0.0, LAUNCH_CLIMB, 0.0);

    match slot {
        Some(round) => {
            if let Ok((torpedo, spatial)) =
                world.query_one_mut::<(&mut Torpedo, &mut Spatial)>(round)
            {
                spatial.teleport(start);
                torpedo.track(climb);
                torpedo.set_lives(round_lives);
                torpedo.reborn();
            }
        }
        None => {
            let torpedo = Torpedo::new(
                TorpedoKind::Aim4Falcon,
                climb,
                EMPLACEMENT_TORPEDO_SPEED,
                round_lives,
            );
            let round =
                world_setup::spawn_torpedo(world, start, torpedo, FiredBy(TorpedoOwner::Emplacement));
            if let Ok(mut emplacement) = world.get::<&mut Emplacement>(entity) {
                emplacement.torpedo = Some(round);
            }
        }
    }

    log::info!("{} shoots at the ship", name);
    events.push(GameEvent::TorpedoFired { shooter: name });
}
