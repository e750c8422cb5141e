//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discrete turn/thrust axes for the player ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Forward,
    Backward,
}

/// Torpedo airframe flavor. Purely cosmetic to the guidance code; the
/// renderer picks a model by it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TorpedoKind {
    Agm84Harpoon,
    #[default]
    Aim4Falcon,
}

/// Who launched a torpedo; drives collision priority and snapshot labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TorpedoOwner {
    Ship,
    Emplacement,
}

/// Entity kind tag carried into snapshots for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Sun,
    Planet,
    Moon,
    Emplacement,
    Oracle,
    RingObstacle,
    Escort,
}

/// Overall game status, recomputed on demand from alive flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    Playing,
    Won,
    Lost,
}
