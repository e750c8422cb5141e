//! Per-tick systems, run by the engine in a fixed order.
//!
//! Within one tick: all orientation/position updates happen before any
//! collision test, and collision resolution happens before gravity is
//! applied. The fixed order is what makes stale-parent reads impossible.

pub mod collision;
pub mod explosion;
pub mod fire_control;
pub mod fountain;
pub mod gravity;
pub mod guidance;
pub mod hierarchy;
pub mod movement;
pub mod snapshot;
