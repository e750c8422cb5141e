//! Events emitted by the simulation for the UI and sound collaborators.

use serde::{Deserialize, Serialize};

/// One tick's noteworthy happenings, drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An emplacement launched a round at the ship.
    TorpedoFired { shooter: String },
    /// The ship launched a round at an emplacement.
    ShipFired { target: String },
    /// Two entities collided; the loser(s) were destroyed.
    Collision { a: String, b: String },
    /// An emplacement ran dry and will never fire again.
    StockExhausted { emplacement: String },
    /// The game has been decided.
    GameOver { won: bool },
}
