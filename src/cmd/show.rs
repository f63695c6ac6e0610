//! `orderboard show`: board display.

use std::path::Path;

use anyhow::{Context, Result};

use orderboard::board_config::BoardToml;
use orderboard::ui;

pub fn cmd_show(board_dir: &Path, json: bool) -> Result<()> {
    let toml = BoardToml::load_or_default(board_dir)?;
    let board = toml.build_board()?;
    let view = board.snapshot();

    if json {
        let out = serde_json::to_string_pretty(&view).context("Failed to serialize board")?;
        println!("{}", out);
    } else {
        ui::print_board(&view);
    }
    Ok(())
}
