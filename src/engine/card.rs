use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Troop,
    Spell,
    Building,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// What a card is able to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Ground,
    Air,
    Both,
    Buildings,
}

impl TargetType {
    pub fn hits_air(self) -> bool {
        matches!(self, TargetType::Air | TargetType::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: &'static str,
    pub card_type: CardType,
    pub elixir_cost: u32,
    pub rarity: Rarity,
    pub target_type: TargetType,
    /// Damage per hit, or per cast for spells
    pub damage: u32,
    /// Seconds between attacks
    pub hit_speed: f64,
    /// Attack or effect range, in tiles
    pub range: f64,
    pub area_damage: bool,
    pub splash_radius: f64,
}

const BLANK: Card = Card {
    name: "",
    card_type: CardType::Troop,
    elixir_cost: 0,
    rarity: Rarity::Common,
    target_type: TargetType::Ground,
    damage: 0,
    hit_speed: 0.0,
    range: 0.0,
    area_damage: false,
    splash_radius: 0.0,
};

impl Card {
    /// A card with no attack stats.
    pub const fn new(
        name: &'static str,
        card_type: CardType,
        elixir_cost: u32,
        rarity: Rarity,
        target_type: TargetType,
    ) -> Self {
        Card {
            name,
            card_type,
            elixir_cost,
            rarity,
            target_type,
            ..BLANK
        }
    }

    pub fn elixir(&self) -> f64 {
        f64::from(self.elixir_cost)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.elixir_cost)
    }
}

pub const KNIGHT: Card = Card {
    name: "Knight",
    elixir_cost: 3,
    damage: 100,
    hit_speed: 1.1,
    range: 0.5,
    ..BLANK
};

pub const ARCHERS: Card = Card {
    name: "Archers",
    elixir_cost: 3,
    target_type: TargetType::Both,
    damage: 60,
    hit_speed: 1.2,
    range: 5.0,
    ..BLANK
};

pub const GIANT: Card = Card {
    name: "Giant",
    elixir_cost: 5,
    rarity: Rarity::Rare,
    target_type: TargetType::Buildings,
    damage: 120,
    hit_speed: 1.5,
    range: 0.5,
    ..BLANK
};

pub const FIREBALL: Card = Card {
    name: "Fireball",
    card_type: CardType::Spell,
    elixir_cost: 4,
    rarity: Rarity::Rare,
    target_type: TargetType::Both,
    damage: 325,
    area_damage: true,
    splash_radius: 2.5,
    ..BLANK
};

pub const MUSKETEER: Card = Card {
    name: "Musketeer",
    elixir_cost: 4,
    rarity: Rarity::Rare,
    target_type: TargetType::Both,
    damage: 100,
    hit_speed: 1.0,
    range: 6.0,
    ..BLANK
};

pub const MINI_PEKKA: Card = Card {
    name: "Mini P.E.K.K.A",
    elixir_cost: 4,
    rarity: Rarity::Rare,
    damage: 400,
    hit_speed: 1.8,
    range: 0.5,
    ..BLANK
};

pub const HOG_RIDER: Card = Card {
    name: "Hog Rider",
    elixir_cost: 4,
    rarity: Rarity::Rare,
    target_type: TargetType::Buildings,
    damage: 150,
    hit_speed: 1.6,
    range: 0.5,
    ..BLANK
};

pub const WIZARD: Card = Card {
    name: "Wizard",
    elixir_cost: 5,
    rarity: Rarity::Rare,
    target_type: TargetType::Both,
    damage: 130,
    hit_speed: 1.4,
    range: 5.5,
    area_damage: true,
    splash_radius: 1.5,
    ..BLANK
};

pub const CANNON: Card = Card {
    name: "Cannon",
    card_type: CardType::Building,
    elixir_cost: 3,
    damage: 60,
    hit_speed: 0.8,
    range: 5.5,
    ..BLANK
};

pub const INFERNO_TOWER: Card = Card {
    name: "Inferno Tower",
    card_type: CardType::Building,
    elixir_cost: 5,
    rarity: Rarity::Rare,
    target_type: TargetType::Both,
    damage: 50,
    hit_speed: 0.4,
    range: 6.0,
    ..BLANK
};

pub const CARD_POOL: [Card; 10] = [
    KNIGHT,
    ARCHERS,
    GIANT,
    FIREBALL,
    MUSKETEER,
    MINI_PEKKA,
    HOG_RIDER,
    WIZARD,
    CANNON,
    INFERNO_TOWER,
];

/// Look up a predefined card by name, ignoring case.
pub fn find_card(name: &str) -> Option<Card> {
    CARD_POOL
        .into_iter()
        .find(|card| card.name.eq_ignore_ascii_case(name))
}
