//! `orderboard play` and `orderboard render`: gesture script replay.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use orderboard::board::{BoardChange, BoardController, BoardView, Script, StepReport, run_script};
use orderboard::board_config::BoardToml;
use orderboard::ui;

#[derive(Serialize)]
struct PlayOutput<'a> {
    steps: &'a [StepReport],
    changes: &'a [BoardChange],
    board: BoardView,
}

fn replay(board_dir: &Path, script_path: &Path) -> Result<(BoardController, Vec<StepReport>)> {
    let toml = BoardToml::load_or_default(board_dir)?;
    let mut board = toml.build_board()?;
    let script = Script::load(script_path)?;
    let reports = run_script(&mut board, &script);
    Ok((board, reports))
}

fn html(board: &BoardController) -> String {
    let doc = board.document();
    doc.to_html(doc.root())
}

pub fn cmd_play(board_dir: &Path, script_path: &Path, json: bool, html_out: bool) -> Result<()> {
    let (mut board, reports) = replay(board_dir, script_path)?;
    let changes = board.take_changes();

    if json {
        let output = PlayOutput {
            steps: &reports,
            changes: &changes,
            board: board.snapshot(),
        };
        let out = serde_json::to_string_pretty(&output).context("Failed to serialize replay")?;
        println!("{}", out);
    } else if html_out {
        println!("{}", html(&board));
    } else {
        println!();
        ui::print_reports(&reports);
        println!();
        ui::print_changes(&changes, false);
        ui::print_board(&board.snapshot());
    }

    let failed = reports.iter().filter(|r| !r.ok()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} script steps failed", failed, reports.len());
    }
    Ok(())
}

pub fn cmd_render(board_dir: &Path, script_path: Option<&Path>) -> Result<()> {
    let board = match script_path {
        Some(path) => {
            let (board, reports) = replay(board_dir, path)?;
            for report in reports.iter().filter(|r| !r.ok()) {
                tracing::warn!(
                    step = report.index + 1,
                    gesture = %report.gesture,
                    error = report.error.as_deref().unwrap_or_default(),
                    "script step failed"
                );
            }
            board
        }
        None => BoardToml::load_or_default(board_dir)?.build_board()?,
    };
    println!("{}", html(&board));
    Ok(())
}
