//! Prints the engine's analysis of the demo deck as JSON.

use clasher_lib::engine::card::{
    ARCHERS, FIREBALL, GIANT, HOG_RIDER, KNIGHT, MINI_PEKKA, MUSKETEER, WIZARD,
};
use clasher_lib::engine::{Engine, Player, Side};
use clasher_lib::error::AppError;
use log::{error, info};
use std::io::Write;

fn analyze() -> Result<(), AppError> {
    let deck = vec![KNIGHT, ARCHERS, GIANT, FIREBALL, MUSKETEER, MINI_PEKKA, HOG_RIDER, WIZARD];
    let player = Player::new(deck, "Player 1")?;
    info!("{player}, average elixir {:.1}", player.average_elixir());

    let engine = Engine::default();
    let analysis = engine.analyze_position(&player, Side::Friendly, &[]);
    info!("Recommendation: {}", analysis.recommendation);

    let json = serde_json::to_string_pretty(&analysis)?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{json}")?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if let Err(e) = analyze() {
        error!("Analysis failed: {e}");
        std::process::exit(1);
    }
}
