//! Galaxy engine — the core of the game.
//!
//! `GalaxyEngine` owns the hecs ECS world, processes player commands at
//! tick boundaries, runs all systems in a fixed order, and produces
//! `GalaxySnapshot`s. Completely headless; the rendering and input
//! collaborators only see commands in and snapshots out.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use helios_core::commands::PlayerCommand;
use helios_core::components::{
    Destructible, Display, Emplacement, Escort, Name, Satellite, ShipControl,
};
use helios_core::constants::{
    SHIP_AIM_DISTANCE, SHIP_SPEED_CAP, SHIP_SPEED_FLOOR, SHIP_SPEED_STEP, SHIP_TORPEDO_SPEED,
    SHIP_TORPEDO_STOCK, TORPEDO_LIVES,
};
use helios_core::enums::{Direction, GameOutcome, TorpedoKind, TorpedoOwner};
use helios_core::events::GameEvent;
use helios_core::math;
use helios_core::spatial::Spatial;
use helios_core::state::{GalaxySnapshot, SettingsView};
use helios_core::torpedo::Torpedo;
use helios_core::types::SimClock;

use crate::scenario;
use crate::systems;
use crate::world_setup::{self, GalaxyHandles};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Global simulation toggles, mutated only through player commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimSettings {
    pub gravity_on: bool,
    pub bounding_spheres: bool,
    pub wireframe: bool,
    pub debug_axes: bool,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct GalaxyEngine {
    world: World,
    clock: SimClock,
    settings: SimSettings,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    handles: GalaxyHandles,
    /// Cycles through the planets on each warp command.
    warp_index: usize,
    game_over_announced: bool,
}

impl GalaxyEngine {
    /// Create a new engine with the scenario fully set up.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let handles = world_setup::setup_galaxy(&mut world, &mut rng);
        Self {
            world,
            clock: SimClock::default(),
            settings: SimSettings::default(),
            rng,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            handles,
            warp_index: 0,
            game_over_announced: false,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. The pipeline order is fixed: transforms, hierarchy,
    /// fountain, fire control, guidance, collisions, explosion decay,
    /// then gravity.
    pub fn tick(&mut self) -> GalaxySnapshot {
        if let Ok(mut control) = self.world.get::<&mut ShipControl>(self.handles.ship) {
            control.moving = false;
        }

        if self.outcome() == GameOutcome::Playing {
            self.process_commands();
        } else {
            // Input is dead once the game is decided; the scene keeps
            // animating.
            self.command_queue.clear();
        }

        systems::movement::run(&mut self.world, &self.handles);
        systems::hierarchy::run(&mut self.world, &self.handles);
        systems::fountain::run(&mut self.world, &mut self.rng, &self.handles);
        systems::fire_control::run(&mut self.world, &self.handles, &mut self.events);
        systems::guidance::run(&mut self.world, &self.handles);
        systems::collision::run(&mut self.world, &self.handles, &mut self.events);
        systems::explosion::run(&mut self.world);
        if self.settings.gravity_on {
            systems::gravity::run(&mut self.world, &self.handles);
        }

        self.clock.advance();

        let outcome = self.outcome();
        if outcome != GameOutcome::Playing && !self.game_over_announced {
            self.game_over_announced = true;
            let won = outcome == GameOutcome::Won;
            log::info!("game over: {}", if won { "you win" } else { "you lose" });
            self.events.push(GameEvent::GameOver { won });
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.handles,
            self.clock,
            self.settings_view(),
            outcome,
            events,
        )
    }

    /// The player loses with a dead ship or an empty magazine.
    pub fn is_player_lose(&self) -> bool {
        let ship_dead = !self
            .world
            .get::<&Destructible>(self.handles.ship)
            .map(|d| d.alive)
            .unwrap_or(false);
        let out_of_rounds = self
            .world
            .get::<&ShipControl>(self.handles.ship)
            .map(|control| control.out_of_torpedoes())
            .unwrap_or(false);
        ship_dead || out_of_rounds
    }

    /// The player wins once every armed emplacement is dead.
    pub fn is_player_win(&self) -> bool {
        self.handles.emplacements.iter().all(|&site| {
            !self
                .world
                .get::<&Destructible>(site)
                .map(|d| d.alive)
                .unwrap_or(false)
        })
    }

    /// Current outcome, recomputed from alive flags on demand.
    pub fn outcome(&self) -> GameOutcome {
        if self.is_player_lose() {
            GameOutcome::Lost
        } else if self.is_player_win() {
            GameOutcome::Won
        } else {
            GameOutcome::Playing
        }
    }

    /// Gravity vector and force at a position, for the HUD.
    pub fn gravity_vector_and_force_at(&self, position: Vec3) -> (Vec3, f32) {
        systems::gravity::field_at(position)
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    /// Milliseconds the frame driver should wait between ticks.
    pub fn time_quantum_ms(&self) -> u64 {
        self.clock.quantum_ms()
    }

    pub fn settings(&self) -> SimSettings {
        self.settings
    }

    /// Read-only access to the ECS world for collaborators.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Stable entity handles, in scenario order.
    pub fn handles(&self) -> &GalaxyHandles {
        &self.handles
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn settings_view(&self) -> SettingsView {
        SettingsView {
            gravity_on: self.settings.gravity_on,
            quantum_ms: self.clock.quantum_ms(),
            bounding_spheres: self.settings.bounding_spheres,
            wireframe: self.settings.wireframe,
            debug_axes: self.settings.debug_axes,
        }
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Turn { direction } => self.turn_ship(direction),
            PlayerCommand::MoveForward => self.thrust(1.0),
            PlayerCommand::MoveBackward => self.thrust(-1.0),
            PlayerCommand::AdjustSpeed => self.adjust_speed(),
            PlayerCommand::Warp => self.warp(),
            PlayerCommand::Fire => self.fire(),
            PlayerCommand::ToggleGravity => self.toggle_gravity(),
            PlayerCommand::CycleTimeQuantum => self.clock.cycle_quantum(),
            PlayerCommand::ToggleBoundingSpheres => {
                self.settings.bounding_spheres = !self.settings.bounding_spheres;
                let on = self.settings.bounding_spheres;
                for (_entity, display) in self.world.query_mut::<&mut Display>() {
                    display.bounding_visible = on;
                }
            }
            PlayerCommand::ToggleWireframe => {
                self.settings.wireframe = !self.settings.wireframe;
                let solid = !self.settings.wireframe;
                for (_entity, display) in self.world.query_mut::<&mut Display>() {
                    display.solid = solid;
                }
            }
            PlayerCommand::ToggleDebugAxes => {
                self.settings.debug_axes = !self.settings.debug_axes;
                let on = self.settings.debug_axes;
                for (_entity, display) in self.world.query_mut::<&mut Display>() {
                    display.debug_axes = on;
                }
            }
        }
    }

    fn turn_ship(&mut self, direction: Direction) {
        let Ok((spatial, control)) = self
            .world
            .query_one_mut::<(&mut Spatial, &ShipControl)>(self.handles.ship)
        else {
            return;
        };
        let amount = control.turn_degrees;
        match direction {
            Direction::Down => {
                spatial.pitch += amount;
                if spatial.pitch > 360.0 {
                    spatial.pitch -= 360.0;
                }
            }
            Direction::Up => {
                spatial.pitch -= amount;
                if spatial.pitch < 0.0 {
                    spatial.pitch += 360.0;
                }
            }
            Direction::Left => {
                spatial.yaw += amount;
                if spatial.yaw > 360.0 {
                    spatial.yaw -= 360.0;
                }
            }
            Direction::Right => {
                spatial.yaw -= amount;
                if spatial.yaw < 0.0 {
                    spatial.yaw += 360.0;
                }
            }
            Direction::Forward => {
                spatial.roll += amount;
                if spatial.roll > 360.0 {
                    spatial.roll -= 360.0;
                }
            }
            Direction::Backward => {
                spatial.roll -= amount;
                if spatial.roll < 0.0 {
                    spatial.roll += 360.0;
                }
            }
        }
    }

    /// Thrust along the forward vector; the wingmen move with the ship.
    fn thrust(&mut self, sign: f32) {
        let speed = {
            let Ok((spatial, control)) = self
                .world
                .query_one_mut::<(&mut Spatial, &mut ShipControl)>(self.handles.ship)
            else {
                return;
            };
            let step = spatial.forward() * control.speed * sign;
            spatial.position = spatial.matrix_position() + step;
            control.moving = true;
            control.speed
        };
        for &escort in &self.handles.escorts {
            if let Ok(spatial) = self.world.query_one_mut::<&mut Spatial>(escort) {
                let step = spatial.forward() * speed * sign;
                spatial.position = spatial.matrix_position() + step;
            }
        }
    }

    fn adjust_speed(&mut self) {
        if let Ok(mut control) = self.world.get::<&mut ShipControl>(self.handles.ship) {
            if control.speed >= SHIP_SPEED_CAP {
                control.speed = SHIP_SPEED_FLOOR;
            } else {
                control.speed += SHIP_SPEED_STEP;
            }
        }
    }

    /// Teleport above the next planet in the cycle, facing down, with the
    /// wingmen re-formed around the ship.
    fn warp(&mut self) {
        self.warp_index = (self.warp_index + 1) % self.handles.planets.len();
        let planet = &self.handles.planets[self.warp_index];
        let Ok(planet_position) = self
            .world
            .get::<&Spatial>(planet.entity)
            .map(|s| s.matrix_position())
        else {
            return;
        };
        let destination = planet_position + scenario::WARP_OFFSETS[self.warp_index];

        let ship_absolute = {
            let Ok(spatial) = self.world.query_one_mut::<&mut Spatial>(self.handles.ship) else {
                return;
            };
            spatial.teleport(destination);
            spatial.pitch = 90.0;
            spatial.yaw = 180.0;
            spatial.roll = 0.0;
            spatial.absolute_position()
        };

        for &escort in &self.handles.escorts {
            if let Ok((spatial, wing)) = self
                .world
                .query_one_mut::<(&mut Spatial, &Escort)>(escort)
            {
                spatial.pitch = 90.0;
                spatial.yaw = 180.0;
                spatial.roll = 0.0;
                spatial.position = ship_absolute + wing.offset;
            }
        }
    }

    /// Designate the closest surviving emplacement and, if the previous
    /// round is dead, expend one round at it. Counting happens before the
    /// stock gate, so a dry trigger pull still runs down the magazine.
    fn fire(&mut self) {
        let (ship_position, forward) = {
            let Ok(spatial) = self.world.get::<&Spatial>(self.handles.ship) else {
                return;
            };
            (spatial.matrix_position(), spatial.forward())
        };

        let mut closest: Option<(Entity, f32)> = None;
        for &site in &self.handles.emplacements {
            let alive = self
                .world
                .get::<&Destructible>(site)
                .map(|d| d.alive)
                .unwrap_or(false);
            if !alive {
                continue;
            }
            let Some(position) = site_position(&self.world, site) else {
                continue;
            };
            let range = math::distance(ship_position, position);
            if closest.map(|(_, best)| range < best).unwrap_or(true) {
                closest = Some((site, range));
            }
        }
        let Some((target, _)) = closest else {
            return;
        };
        let target_name = self
            .world
            .get::<&Name>(target)
            .map(|n| n.0.clone())
            .unwrap_or_default();

        let slot = {
            let Ok(mut control) = self.world.get::<&mut ShipControl>(self.handles.ship) else {
                return;
            };
            // A round already in flight is redirected to the new target.
            control.target = Some(target);
            let round_alive = control
                .torpedo
                .map(|round| {
                    self.world
                        .get::<&Torpedo>(round)
                        .map(|t| t.is_alive())
                        .unwrap_or(false)
                })
                .unwrap_or(false);
            if round_alive {
                return;
            }
            control.torpedoes_fired += 1;
            if control.torpedoes_fired >= SHIP_TORPEDO_STOCK {
                return;
            }
            control.torpedo
        };

        let aim = ship_position + forward * SHIP_AIM_DISTANCE;
        match slot {
            Some(round) => {
                if let Ok((torpedo, spatial)) = self
                    .world
                    .query_one_mut::<(&mut Torpedo, &mut Spatial)>(round)
                {
                    spatial.teleport(ship_position);
                    torpedo.track(aim);
                    torpedo.set_lives(TORPEDO_LIVES);
                    torpedo.reborn();
                }
            }
            None => {
                let torpedo = Torpedo::new(
                    TorpedoKind::Aim4Falcon,
                    aim,
                    SHIP_TORPEDO_SPEED,
                    TORPEDO_LIVES,
                );
                let round = world_setup::spawn_torpedo(
                    &mut self.world,
                    ship_position,
                    torpedo,
                    helios_core::components::FiredBy(TorpedoOwner::Ship),
                );
                if let Ok(mut control) = self.world.get::<&mut ShipControl>(self.handles.ship) {
                    control.torpedo = Some(round);
                }
            }
        }

        log::info!("ship fires at {target_name}");
        self.events.push(GameEvent::ShipFired {
            target: target_name,
        });
    }

    fn toggle_gravity(&mut self) {
        self.settings.gravity_on = !self.settings.gravity_on;
        let enabled = self.settings.gravity_on;
        for round in self.torpedo_slots() {
            if let Ok(mut torpedo) = self.world.get::<&mut Torpedo>(round) {
                torpedo.set_gravity(enabled);
            }
        }
    }

    /// All pooled rounds, emplacement slots first, then the ship's.
    fn torpedo_slots(&self) -> Vec<Entity> {
        self.handles
            .emplacements
            .iter()
            .filter_map(|&site| {
                self.world
                    .get::<&Emplacement>(site)
                    .ok()
                    .and_then(|e| e.torpedo)
            })
            .chain(
                self.world
                    .get::<&ShipControl>(self.handles.ship)
                    .ok()
                    .and_then(|control| control.torpedo),
            )
            .collect()
    }
}

/// Effective (parent-composed) position of an emplacement site.
fn site_position(world: &World, site: Entity) -> Option<Vec3> {
    let mut query = world.query_one::<(&Satellite, &Spatial)>(site).ok()?;
    query
        .get()
        .map(|(satellite, spatial)| satellite.parent_position + spatial.matrix_position())
}
