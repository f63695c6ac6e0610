//! `orderboard config`: configuration view and validation commands.

use anyhow::Result;

use super::super::ConfigCommands;

pub fn cmd_config(board_dir: &std::path::Path, command: Option<ConfigCommands>) -> Result<()> {
    use orderboard::board::Column;
    use orderboard::board_config::{BoardToml, INITIAL_COLUMN_ENV, config_path, get_config_dir};

    let config_dir = get_config_dir(board_dir);
    let config_path = config_path(board_dir);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Order Board Configuration");
            println!("=========================");
            println!();

            let toml = if config_path.exists() {
                println!("Config file: {}", config_path.display());
                BoardToml::load(&config_path)?
            } else {
                println!("No board.toml found at {}", config_path.display());
                println!("Using default configuration.");
                BoardToml::default()
            };
            println!();

            println!("[board]");
            println!("  title = \"{}\"", toml.board.title);
            println!("  initial_column = \"{}\"", toml.board.initial_column);
            println!("  focus_add_on_load = {}", toml.board.focus_add_on_load);
            println!();

            if !toml.columns.labels.is_empty() {
                println!("[columns.labels]");
                for (column, label) in &toml.columns.labels {
                    println!("  {} = \"{}\"", column, label);
                }
                println!();
            }

            println!("Seed orders: {}", toml.orders.len());
            println!();

            println!("Effective values (with env overrides):");
            let settings = toml.settings();
            println!("  initial_column = \"{}\"", settings.initial_column);
            for column in Column::ALL {
                println!("  label.{} = \"{}\"", column, settings.label(column));
            }
            println!();

            if !config_path.exists() {
                println!("Run 'orderboard config init' to create a board.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No board.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = BoardToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("board.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !config_dir.exists() {
                std::fs::create_dir_all(&config_dir)?;
            }

            let toml = BoardToml::default();
            toml.save(&config_path)?;

            println!("Created board.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [board] title, initial_column, focus_add_on_load");
            println!("  - [columns.labels] display names per column");
            println!("  - [[orders]] cards placed on the board at startup");
            println!("  - {} overrides initial_column", INITIAL_COLUMN_ENV);
            println!();
        }
    }

    Ok(())
}
