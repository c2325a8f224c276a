use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Friendly,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Friendly => Side::Enemy,
            Side::Enemy => Side::Friendly,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Side::Friendly => "friendly",
            Side::Enemy => "enemy",
        }
    }
}

/// A tile coordinate in the arena. `x` runs 0..=18 across, `y` 0..=32 from
/// the friendly end to the enemy end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub side: Side,
}

impl Position {
    pub const fn new(x: f64, y: f64, side: Side) -> Self {
        Self { x, y, side }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.side.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tower {
    King,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Towers {
    king: bool,
    left: bool,
    right: bool,
}

impl Towers {
    const ALL_STANDING: Towers = Towers {
        king: true,
        left: true,
        right: true,
    };

    fn standing(self, tower: Tower) -> bool {
        match tower {
            Tower::King => self.king,
            Tower::Left => self.left,
            Tower::Right => self.right,
        }
    }

    fn slot(&mut self, tower: Tower) -> &mut bool {
        match tower {
            Tower::King => &mut self.king,
            Tower::Left => &mut self.left,
            Tower::Right => &mut self.right,
        }
    }
}

pub const WIDTH: f64 = 18.0;
pub const HEIGHT: f64 = 32.0;
pub const MIDLINE: f64 = 16.0;

#[rustfmt::skip]
const FRIENDLY_DEPLOYMENT_ZONES: [(f64, f64); 12] = [
    // Left lane
    (4.0, 4.0), (4.0, 6.0), (4.0, 8.0),
    // Center
    (9.0, 4.0), (9.0, 6.0), (9.0, 8.0),
    // Right lane
    (14.0, 4.0), (14.0, 6.0), (14.0, 8.0),
    // Bridge
    (4.0, 14.0), (9.0, 14.0), (14.0, 14.0),
];

#[rustfmt::skip]
const ENEMY_DEPLOYMENT_ZONES: [(f64, f64); 12] = [
    (4.0, 18.0), (4.0, 20.0), (4.0, 22.0),
    (9.0, 18.0), (9.0, 20.0), (9.0, 22.0),
    (14.0, 18.0), (14.0, 20.0), (14.0, 22.0),
    // Bridge tiles coincide with the front row
    (4.0, 18.0), (9.0, 18.0), (14.0, 18.0),
];

pub const FRIENDLY_KING_TOWER: Position = Position::new(9.0, 2.0, Side::Friendly);
pub const FRIENDLY_LEFT_TOWER: Position = Position::new(4.0, 10.0, Side::Friendly);
pub const FRIENDLY_RIGHT_TOWER: Position = Position::new(14.0, 10.0, Side::Friendly);

pub const ENEMY_KING_TOWER: Position = Position::new(9.0, 30.0, Side::Enemy);
pub const ENEMY_LEFT_TOWER: Position = Position::new(4.0, 22.0, Side::Enemy);
pub const ENEMY_RIGHT_TOWER: Position = Position::new(14.0, 22.0, Side::Enemy);

/// The arena, split at the midline, with three towers per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    friendly_towers: Towers,
    enemy_towers: Towers,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            friendly_towers: Towers::ALL_STANDING,
            enemy_towers: Towers::ALL_STANDING,
        }
    }

    fn towers_mut(&mut self, side: Side) -> &mut Towers {
        match side {
            Side::Friendly => &mut self.friendly_towers,
            Side::Enemy => &mut self.enemy_towers,
        }
    }

    pub fn destroy_tower(&mut self, side: Side, tower: Tower) {
        *self.towers_mut(side).slot(tower) = false;
    }

    pub fn is_tower_standing(&self, side: Side, tower: Tower) -> bool {
        let towers = match side {
            Side::Friendly => self.friendly_towers,
            Side::Enemy => self.enemy_towers,
        };
        towers.standing(tower)
    }

    pub fn deployment_positions(&self, side: Side) -> Vec<Position> {
        let zones = match side {
            Side::Friendly => &FRIENDLY_DEPLOYMENT_ZONES,
            Side::Enemy => &ENEMY_DEPLOYMENT_ZONES,
        };
        zones
            .iter()
            .map(|&(x, y)| Position::new(x, y, side))
            .collect()
    }

    /// Inside the arena and on the owning side of the midline.
    pub fn is_valid_position(&self, position: &Position) -> bool {
        if !(0.0..=WIDTH).contains(&position.x) || !(0.0..=HEIGHT).contains(&position.y) {
            return false;
        }
        match position.side {
            Side::Friendly => position.y <= MIDLINE,
            Side::Enemy => position.y >= MIDLINE,
        }
    }

    /// Closest standing tower of `side`; ties go to left, then right, then king.
    pub fn nearest_tower(&self, position: &Position, side: Side) -> Option<Position> {
        let (towers, left, right, king) = match side {
            Side::Friendly => (
                self.friendly_towers,
                FRIENDLY_LEFT_TOWER,
                FRIENDLY_RIGHT_TOWER,
                FRIENDLY_KING_TOWER,
            ),
            Side::Enemy => (
                self.enemy_towers,
                ENEMY_LEFT_TOWER,
                ENEMY_RIGHT_TOWER,
                ENEMY_KING_TOWER,
            ),
        };

        [(towers.left, left), (towers.right, right), (towers.king, king)]
            .into_iter()
            .filter_map(|(standing, tower)| standing.then_some(tower))
            .min_by(|a, b| position.distance_to(a).total_cmp(&position.distance_to(b)))
    }
}
