use super::card::Card;
use crate::error::AppError;
use std::fmt;

pub const MAX_ELIXIR: f64 = 10.0;
pub const STARTING_ELIXIR: f64 = 5.0;
pub const HAND_SIZE: usize = 4;
pub const DECK_SIZE: usize = 8;

/// A player's deck, current hand, and elixir pool.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    deck: Vec<Card>,
    hand: Vec<Card>,
    elixir: f64,
    next_card_index: usize,
}

impl Player {
    /// The deck must hold exactly eight cards; the first four form the hand.
    pub fn new(deck: Vec<Card>, name: impl Into<String>) -> Result<Self, AppError> {
        if deck.len() != DECK_SIZE {
            return Err(AppError::InvalidInput {
                field: "deck",
                reason: format!("must contain exactly {DECK_SIZE} cards, got {}", deck.len()),
            });
        }
        let hand = deck.iter().take(HAND_SIZE).copied().collect();

        Ok(Self {
            name: name.into(),
            deck,
            hand,
            elixir: STARTING_ELIXIR,
            next_card_index: HAND_SIZE,
        })
    }

    pub fn elixir(&self) -> f64 {
        self.elixir
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn can_play(&self, card: &Card) -> bool {
        self.elixir >= card.elixir() && self.hand.contains(card)
    }

    /// Spend the card's elixir and replace it in hand with the next deck card.
    pub fn play_card(&mut self, card: &Card) -> bool {
        if !self.can_play(card) {
            return false;
        }
        let Some(slot) = self.hand.iter().position(|c| c == card) else {
            return false;
        };
        let Some(next) = self.deck.get(self.next_card_index % DECK_SIZE).copied() else {
            return false;
        };

        self.elixir -= card.elixir();
        if let Some(held) = self.hand.get_mut(slot) {
            *held = next;
        }
        self.next_card_index += 1;
        true
    }

    pub fn add_elixir(&mut self, amount: f64) {
        self.elixir = (self.elixir + amount).min(MAX_ELIXIR);
    }

    /// Cards in hand the current elixir can pay for.
    pub fn playable_cards(&self) -> Vec<Card> {
        self.hand
            .iter()
            .filter(|card| self.elixir >= card.elixir())
            .copied()
            .collect()
    }

    pub fn average_elixir(&self) -> f64 {
        let total: u32 = self.deck.iter().map(|card| card.elixir_cost).sum();
        f64::from(total) / 8.0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hand = self
            .hand
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}: [{hand}] ({:.1} elixir)", self.name, self.elixir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::card::{
        ARCHERS, FIREBALL, GIANT, HOG_RIDER, KNIGHT, MINI_PEKKA, MUSKETEER, WIZARD,
    };

    fn demo_deck() -> Vec<Card> {
        vec![KNIGHT, ARCHERS, GIANT, FIREBALL, MUSKETEER, MINI_PEKKA, HOG_RIDER, WIZARD]
    }

    #[test]
    fn test_deck_must_have_eight_cards() {
        let err = Player::new(vec![KNIGHT; 7], "Short").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { field: "deck", .. }));
    }

    #[test]
    fn test_initial_state() {
        let player = Player::new(demo_deck(), "Player 1").unwrap();
        assert!((player.elixir() - STARTING_ELIXIR).abs() < f64::EPSILON);
        assert_eq!(player.hand(), &[KNIGHT, ARCHERS, GIANT, FIREBALL]);
        assert!((player.average_elixir() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_player_mechanics() {
        let mut player = Player::new(demo_deck(), "Test Player").unwrap();

        player.add_elixir(3.0);
        assert!((player.elixir() - 8.0).abs() < f64::EPSILON);

        assert!(player.play_card(&KNIGHT));
        assert!((player.elixir() - 5.0).abs() < f64::EPSILON);
        assert_eq!(player.hand(), &[MUSKETEER, ARCHERS, GIANT, FIREBALL]);
    }

    #[test]
    fn test_elixir_caps_at_max() {
        let mut player = Player::new(demo_deck(), "P").unwrap();
        player.add_elixir(20.0);
        assert!((player.elixir() - MAX_ELIXIR).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cannot_play_unaffordable_or_absent_card() {
        let mut player = Player::new(demo_deck(), "P").unwrap();
        player.play_card(&FIREBALL);
        // 1 elixir left
        assert!(!player.play_card(&KNIGHT));
        assert!(!player.can_play(&WIZARD));
        assert!(player.playable_cards().is_empty());
    }

    #[test]
    fn test_deck_cycles() {
        let mut player = Player::new(demo_deck(), "P").unwrap();
        for _ in 0..6 {
            player.add_elixir(MAX_ELIXIR);
            let card = player.hand().first().copied().unwrap();
            assert!(player.play_card(&card));
        }
        // Six plays through slot 0: deck[4..8] then deck[0], deck[1]
        assert_eq!(player.hand().first(), Some(&ARCHERS));
    }

    #[test]
    fn test_display() {
        let player = Player::new(demo_deck(), "Player 1").unwrap();
        assert_eq!(
            player.to_string(),
            "Player 1: [Knight (3), Archers (3), Giant (5), Fireball (4)] (5.0 elixir)"
        );
    }
}
