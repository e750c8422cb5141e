//! The sun's particle fountain.
//!
//! A fixed pool of particles driven in fixed-length substeps; expired
//! particles are relaunched from the emitter rather than reallocated.
//! The emitter sweeps in a circle and cycles its hue continuously.

use std::f32::consts::TAU;

use glam::Vec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use helios_core::components::{Fountain, Particle};
use helios_core::constants::*;

use crate::world_setup::GalaxyHandles;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, handles: &GalaxyHandles) {
    if let Ok(fountain) = world.query_one_mut::<&mut Fountain>(handles.fountain) {
        advance(fountain, rng, FOUNTAIN_TICK_SECS);
    }
}

/// Fill the pool and pre-roll the fountain so it starts mid-flow instead
/// of as a burst from the emitter.
pub fn prime(fountain: &mut Fountain, rng: &mut ChaCha8Rng) {
    fountain.particles = (0..FOUNTAIN_PARTICLES)
        .map(|_| spawn_particle(fountain.angle, fountain.color_time, rng))
        .collect();
    let steps = (FOUNTAIN_PRIME_SECS / FOUNTAIN_STEP_SECS) as usize;
    for _ in 0..steps {
        step(fountain, rng);
    }
}

/// Advance the fountain by `dt` seconds, firing whole substeps and
/// banking the remainder.
pub fn advance(fountain: &mut Fountain, rng: &mut ChaCha8Rng, mut dt: f32) {
    while dt > 0.0 {
        if fountain.time_until_next_step < dt {
            dt -= fountain.time_until_next_step;
            step(fountain, rng);
            fountain.time_until_next_step = FOUNTAIN_STEP_SECS;
        } else {
            fountain.time_until_next_step -= dt;
            dt = 0.0;
        }
    }
}

fn step(fountain: &mut Fountain, rng: &mut ChaCha8Rng) {
    fountain.color_time += FOUNTAIN_STEP_SECS / 10.0;
    while fountain.color_time >= 1.0 {
        fountain.color_time -= 1.0;
    }
    fountain.angle += 0.5 * FOUNTAIN_STEP_SECS;
    while fountain.angle > TAU {
        fountain.angle -= TAU;
    }

    let angle = fountain.angle;
    let color_time = fountain.color_time;
    for particle in &mut fountain.particles {
        particle.position += particle.velocity * FOUNTAIN_STEP_SECS;
        particle.velocity += Vec3::new(0.0, -FOUNTAIN_GRAVITY * FOUNTAIN_STEP_SECS, 0.0);
        particle.time_alive += FOUNTAIN_STEP_SECS;
        if particle.time_alive > particle.life_span {
            *particle = spawn_particle(angle, color_time, rng);
        }
    }
}

fn spawn_particle(angle: f32, color_time: f32, rng: &mut ChaCha8Rng) -> Particle {
    let jitter = Vec3::new(
        0.5 * rng.gen::<f32>() - 0.25,
        0.5 * rng.gen::<f32>() - 0.25,
        0.5 * rng.gen::<f32>() - 0.25,
    );
    Particle {
        position: Vec3::ZERO,
        velocity: Vec3::new(2.0 * angle.cos(), 2.0, 2.0 * angle.sin()) + jitter,
        color: emitter_color(color_time),
        time_alive: 0.0,
        life_span: rng.gen::<f32>() + 1.0,
    }
}

/// Hue of particles currently leaving the emitter: a six-segment cycle
/// through red, yellow, green, cyan, blue, magenta and back.
pub fn emitter_color(color_time: f32) -> [f32; 3] {
    let t = color_time;
    let mut color = if t < 1.0 / 6.0 {
        [1.0, t * 6.0, 0.0]
    } else if t < 2.0 / 6.0 {
        [(2.0 / 6.0 - t) * 6.0, 1.0, 0.0]
    } else if t < 0.5 {
        [0.0, 1.0, (t - 2.0 / 6.0) * 6.0]
    } else if t < 4.0 / 6.0 {
        [0.0, (4.0 / 6.0 - t) * 6.0, 1.0]
    } else if t < 5.0 / 6.0 {
        [(t - 4.0 / 6.0) * 6.0, 0.0, 1.0]
    } else {
        [1.0, 0.0, (1.0 - t) * 6.0]
    };
    for channel in &mut color {
        *channel = channel.clamp(0.0, 1.0);
    }
    color
}
