//! Move-suggestion engine for the card game.
//!
//! Works like a chess engine: enumerate every playable card on every
//! deployment tile, score each placement with a handful of heuristics, and
//! rank them.

pub mod board;
pub mod card;
pub mod moves;
pub mod player;

pub use board::{Board, Position, Side, Tower};
pub use card::{find_card, Card, CardType, Rarity, TargetType, CARD_POOL};
pub use moves::Move;
pub use player::Player;

use log::debug;
use serde::Serialize;

/// Number of moves reported by [`Engine::analyze_position`].
pub const ANALYSIS_DEPTH: usize = 5;

pub const NO_MOVES: &str = "No moves available";

/// One ranked move, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveSummary {
    pub card: String,
    pub position: String,
    pub score: f64,
    pub elixir_cost: u32,
}

impl From<&Move> for MoveSummary {
    fn from(mv: &Move) -> Self {
        Self {
            card: mv.card.name.to_string(),
            position: mv.tile(),
            score: (mv.score * 100.0).round() / 100.0,
            elixir_cost: mv.card.elixir_cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionAnalysis {
    pub player: String,
    pub elixir: f64,
    pub playable_cards: usize,
    pub hand: Vec<String>,
    pub best_moves: Vec<MoveSummary>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    board: Board,
}

impl Engine {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Every affordable card in hand on every valid deployment tile of `side`.
    pub fn generate_moves(&self, player: &Player, side: Side) -> Vec<Move> {
        let positions = self.board.deployment_positions(side);
        player
            .playable_cards()
            .into_iter()
            .flat_map(|card| {
                positions
                    .iter()
                    .filter(|position| self.board.is_valid_position(position))
                    .map(move |&position| Move::new(card, position))
            })
            .collect()
    }

    /// Higher is better.
    pub fn evaluate_move(&self, mv: &Move, side: Side, opponent_cards: &[Card]) -> f64 {
        let card = &mv.card;
        let position = &mv.position;

        // Cheaper cards keep tempo
        let tempo = (10.0 - card.elixir()) * 0.5;

        tempo
            + self.positioning_score(card, position, side)
            + card_type_score(card)
            + counter_score(card, opponent_cards)
            + strategy_score(position, side)
    }

    fn positioning_score(&self, card: &Card, position: &Position, side: Side) -> f64 {
        let mut score = 0.0;

        if let Some(tower) = self.board.nearest_tower(position, side.opponent()) {
            let distance = position.distance_to(&tower);
            match card.card_type {
                // Building-targeting troops want to be close
                CardType::Troop if card.target_type == TargetType::Buildings => {
                    score += (20.0 - distance * 0.5).max(0.0);
                }
                CardType::Troop => {}
                // Defenses want depth
                CardType::Building => score += distance * 0.3,
                CardType::Spell => score += 5.0,
            }
        }

        let at_bridge = match side {
            Side::Friendly => position.y >= 14.0,
            Side::Enemy => position.y <= 18.0,
        };
        if at_bridge && card.card_type == CardType::Troop {
            score += 3.0;
        }

        score
    }

    /// Moves ranked by descending score; equal scores keep generation order.
    pub fn find_best_moves(
        &self,
        player: &Player,
        side: Side,
        opponent_cards: &[Card],
        top_n: usize,
    ) -> Vec<Move> {
        let mut moves = self.generate_moves(player, side);
        for mv in &mut moves {
            mv.score = self.evaluate_move(mv, side, opponent_cards);
        }
        debug!("Scored {} candidate moves for {}", moves.len(), player.name);

        moves.sort_by(|a, b| b.score.total_cmp(&a.score));
        moves.truncate(top_n);
        moves
    }

    pub fn analyze_position(
        &self,
        player: &Player,
        side: Side,
        opponent_cards: &[Card],
    ) -> PositionAnalysis {
        let best = self.find_best_moves(player, side, opponent_cards, ANALYSIS_DEPTH);

        PositionAnalysis {
            player: player.name.clone(),
            elixir: player.elixir(),
            playable_cards: player.playable_cards().len(),
            hand: player.hand().iter().map(ToString::to_string).collect(),
            best_moves: best.iter().map(MoveSummary::from).collect(),
            recommendation: best
                .first()
                .map_or_else(|| NO_MOVES.to_string(), ToString::to_string),
        }
    }
}

fn card_type_score(card: &Card) -> f64 {
    let mut score = 0.0;
    if card.damage > 200 {
        score += 3.0;
    }
    if card.area_damage {
        score += 2.5;
    }
    if card.range > 5.0 {
        score += 2.0;
    }
    if card.card_type == CardType::Building {
        score += 4.0;
    }
    score
}

fn counter_score(card: &Card, opponent_cards: &[Card]) -> f64 {
    opponent_cards
        .iter()
        .map(|opponent| {
            let mut score = 0.0;
            // Splash against cheap swarms
            if card.area_damage && opponent.elixir_cost <= 3 {
                score += 3.0;
            }
            // Buildings pull building-targeting troops
            if card.card_type == CardType::Building
                && opponent.target_type == TargetType::Buildings
            {
                score += 4.0;
            }
            // Burst against tanks
            if card.damage > 300 && opponent.elixir_cost >= 5 {
                score += 2.5;
            }
            if card.target_type.hits_air() && opponent.target_type == TargetType::Air {
                score += 2.0;
            }
            score
        })
        .sum()
}

fn strategy_score(position: &Position, side: Side) -> f64 {
    // Side lanes spread the defense
    let lane = if position.x < 7.0 || position.x > 11.0 {
        1.0
    } else {
        0.5
    };

    let aggressive = match side {
        Side::Friendly => position.y > 10.0,
        Side::Enemy => position.y < 22.0,
    };

    if aggressive {
        lane + 2.0
    } else {
        lane
    }
}
