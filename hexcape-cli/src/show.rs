//! Show command - print a freshly generated board

use anyhow::Result;
use clap::Args;

use hexcape_core::{Game, GameConfig};

use crate::render::{render_board, LEGEND};

#[derive(Args)]
pub struct ShowArgs {
    /// Level to generate
    #[arg(long, default_value = "1")]
    pub level: u32,

    /// Output the board snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs, config: GameConfig) -> Result<()> {
    let game = Game::at_level(config, args.level)?;

    let snapshot = game.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_board(&snapshot, game.config().board_radius));
        println!("{}", LEGEND);
    }
    Ok(())
}
