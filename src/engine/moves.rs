use super::board::Position;
use super::card::Card;
use std::fmt;

/// A card placed at a position, with the score the engine gave it.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub card: Card,
    pub position: Position,
    pub score: f64,
}

impl Move {
    pub fn new(card: Card, position: Position) -> Self {
        Self {
            card,
            position,
            score: 0.0,
        }
    }

    /// Tile coordinates without the side, e.g. `(4, 14)`.
    pub fn tile(&self) -> String {
        format!("({:.0}, {:.0})", self.position.x, self.position.y)
    }
}

// Two moves are the same play regardless of how they were scored.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.card.name == other.card.name && self.position == other.position
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.card.name, self.tile())
    }
}
