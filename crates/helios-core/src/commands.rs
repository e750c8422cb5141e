//! Player commands sent from the input collaborator to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Once the
//! game is decided (win or lose) further commands are dropped.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Flight ---
    /// Rotate the ship about one of its axes.
    Turn { direction: Direction },
    /// Thrust along the ship's forward vector.
    MoveForward,
    /// Thrust against the ship's forward vector.
    MoveBackward,
    /// Cycle ship speed (+10 per step, wrapping from the cap to the floor).
    AdjustSpeed,
    /// Teleport above the next planet in the cycle, facing down.
    Warp,

    // --- Combat ---
    /// Fire at the closest surviving emplacement.
    Fire,

    // --- Simulation toggles ---
    /// Toggle the sun's gravity field on or off.
    ToggleGravity,
    /// Step to the next frame-pacing quantum.
    CycleTimeQuantum,

    // --- Display toggles (state only; the renderer reads these) ---
    /// Show or hide bounding spheres.
    ToggleBoundingSpheres,
    /// Switch between solid and wireframe drawing.
    ToggleWireframe,
    /// Show or hide per-entity debug axes.
    ToggleDebugAxes,
}
