//! Board configuration read from `.orderboard/board.toml`.
//!
//! # Configuration File Format
//!
//! ```toml
//! [board]
//! title = "Trattoria orders"
//! initial_column = "ordered"
//! focus_add_on_load = true
//!
//! [columns.labels]
//! ready = "Ready to serve"
//!
//! [[orders]]
//! id = "42"
//! title = "Table 5 Pasta"
//! table = "5"
//! column = "preparing"
//! ```
//!
//! The column set is fixed; `[columns.labels]` only renames them for
//! display. `ORDERBOARD_INITIAL_COLUMN` overrides `board.initial_column`.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{BoardController, BoardSettings, Column, Order};

pub const CONFIG_DIR: &str = ".orderboard";
pub const CONFIG_FILE: &str = "board.toml";
pub const INITIAL_COLUMN_ENV: &str = "ORDERBOARD_INITIAL_COLUMN";

/// `[board]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSection {
    /// Heading shown above the columns
    #[serde(default = "default_title")]
    pub title: String,
    /// Column new orders are created in
    #[serde(default = "default_initial_column")]
    pub initial_column: Column,
    /// Focus the "Add Order" button when the board loads
    #[serde(default = "default_focus_add_on_load")]
    pub focus_add_on_load: bool,
}

fn default_title() -> String {
    "Orders".to_string()
}

fn default_initial_column() -> Column {
    Column::Ordered
}

fn default_focus_add_on_load() -> bool {
    true
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            initial_column: default_initial_column(),
            focus_add_on_load: default_focus_add_on_load(),
        }
    }
}

/// `[columns]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnsSection {
    /// Display label per column name
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

/// One `[[orders]]` entry placed on the board at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<Column>,
}

/// Root of `board.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardToml {
    #[serde(default)]
    pub board: BoardSection,
    #[serde(default)]
    pub columns: ColumnsSection,
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
}

impl BoardToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse board.toml")
    }

    /// Load from `<board_dir>/.orderboard/board.toml`, or defaults when the
    /// file does not exist.
    pub fn load_or_default(board_dir: &Path) -> Result<Self> {
        let path = config_path(board_dir);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize board.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Initial column, with the environment variable taking precedence.
    pub fn initial_column(&self) -> Column {
        match std::env::var(INITIAL_COLUMN_ENV) {
            Ok(raw) => match raw.parse() {
                Ok(column) => column,
                Err(message) => {
                    warn!(%message, "ignoring {}", INITIAL_COLUMN_ENV);
                    self.board.initial_column
                }
            },
            Err(_) => self.board.initial_column,
        }
    }

    /// Resolved settings for mounting a board.
    pub fn settings(&self) -> BoardSettings {
        let labels = self
            .columns
            .labels
            .iter()
            .filter_map(|(name, label)| name.parse::<Column>().ok().map(|c| (c, label.clone())))
            .collect();
        BoardSettings {
            title: self.board.title.clone(),
            initial_column: self.initial_column(),
            focus_add_on_load: self.board.focus_add_on_load,
            labels,
        }
    }

    /// Mount a board and place the seed orders on it.
    pub fn build_board(&self) -> Result<BoardController> {
        let settings = self.settings();
        let initial = settings.initial_column;
        let mut board = BoardController::new(settings)?;
        for seed in &self.orders {
            let column = seed.column.unwrap_or(initial);
            let order = match &seed.id {
                Some(id) => Order::with_id(id.clone(), seed.title.clone(), seed.table.clone(), column),
                None => Order::new(seed.title.clone(), seed.table.clone(), column),
            };
            board
                .insert_order(&order)
                .with_context(|| format!("Failed to place seed order \"{}\"", seed.title))?;
        }
        board.on_load()?;
        board.take_changes();
        Ok(board)
    }

    /// Validate configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.board.title.trim().is_empty() {
            warnings.push("board.title is empty".to_string());
        }

        for name in self.columns.labels.keys() {
            if name.parse::<Column>().is_err() {
                warnings.push(format!(
                    "columns.labels: unknown column '{}'. Valid columns: {}",
                    name,
                    Column::ALL.map(|c| c.as_str()).join(", ")
                ));
            }
        }

        let mut seen = HashSet::new();
        for (i, seed) in self.orders.iter().enumerate() {
            if let Some(id) = &seed.id {
                if id.is_empty() {
                    warnings.push(format!("orders[{}]: id is empty", i));
                } else if !seen.insert(id.as_str()) {
                    warnings.push(format!("orders[{}]: duplicate id '{}'", i, id));
                }
            }
            if seed.title.trim().is_empty() {
                warnings.push(format!("orders[{}]: title is empty", i));
            }
        }

        warnings
    }
}

/// `.orderboard` directory under `board_dir`.
pub fn get_config_dir(board_dir: &Path) -> PathBuf {
    board_dir.join(CONFIG_DIR)
}

pub fn config_path(board_dir: &Path) -> PathBuf {
    get_config_dir(board_dir).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BoardError;

    #[test]
    fn test_defaults_when_sections_missing() -> Result<()> {
        let toml = BoardToml::parse("")?;
        assert_eq!(toml.board.title, "Orders");
        assert_eq!(toml.board.initial_column, Column::Ordered);
        assert!(toml.board.focus_add_on_load);
        assert!(toml.orders.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_full_config() -> Result<()> {
        let toml = BoardToml::parse(
            r#"
[board]
title = "Trattoria"
initial_column = "preparing"
focus_add_on_load = false

[columns.labels]
ready = "Ready to serve"

[[orders]]
id = "42"
title = "Table 5 Pasta"
table = "5"
column = "ready"

[[orders]]
title = "Tiramisu"
"#,
        )?;
        assert_eq!(toml.board.title, "Trattoria");
        assert_eq!(toml.board.initial_column, Column::Preparing);
        assert!(!toml.board.focus_add_on_load);
        assert_eq!(toml.orders.len(), 2);
        assert_eq!(toml.orders[0].column, Some(Column::Ready));
        assert_eq!(toml.orders[1].table, "");

        let settings = toml.settings();
        assert_eq!(settings.label(Column::Ready), "Ready to serve");
        assert_eq!(settings.label(Column::Ordered), "Ordered");
        Ok(())
    }

    #[test]
    fn test_invalid_column_is_a_parse_error() {
        let result = BoardToml::parse("[board]\ninitial_column = \"served\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_build_board_places_seed_orders() -> Result<()> {
        let toml = BoardToml::parse(
            r#"
[board]
initial_column = "preparing"

[[orders]]
id = "42"
title = "Table 5 Pasta"
table = "5"
column = "ready"

[[orders]]
title = "Tiramisu"
table = "2"
"#,
        )?;
        let board = toml.build_board()?;
        let view = board.snapshot();
        assert_eq!(view.column_of("42"), Some(Column::Ready));
        let preparing = view.column(Column::Preparing).expect("preparing column");
        assert_eq!(preparing.orders.len(), 1);
        assert_eq!(preparing.orders[0].title, "Tiramisu");
        assert!(board.changes().is_empty());
        Ok(())
    }

    #[test]
    fn test_build_board_rejects_duplicate_seed_ids() -> Result<()> {
        let toml = BoardToml::parse(
            "[[orders]]\nid = \"1\"\ntitle = \"A\"\n\n[[orders]]\nid = \"1\"\ntitle = \"B\"\n",
        )?;
        let err = toml.build_board().err().expect("duplicate ids should fail");
        assert!(err.to_string().contains("seed order"));
        Ok(())
    }

    #[test]
    fn test_build_board_rejects_empty_seed_id() -> Result<()> {
        let toml = BoardToml::parse("[[orders]]\nid = \"\"\ntitle = \"Ghost\"\n")?;
        assert!(toml.validate().iter().any(|w| w.contains("orders[0]: id is empty")));
        let err = toml.build_board().err().expect("empty id should fail");
        assert!(err.to_string().contains("Ghost"));
        assert!(matches!(
            err.downcast_ref::<BoardError>(),
            Some(BoardError::EmptyOrderId)
        ));
        Ok(())
    }

    #[test]
    fn test_validate_reports_problems() -> Result<()> {
        let toml = BoardToml::parse(
            r#"
[board]
title = " "

[columns.labels]
served = "Served"

[[orders]]
id = "1"
title = "A"

[[orders]]
id = "1"
title = ""
"#,
        )?;
        let warnings = toml.validate();
        assert_eq!(warnings.len(), 4, "{warnings:?}");
        assert!(warnings.iter().any(|w| w.contains("board.title")));
        assert!(warnings.iter().any(|w| w.contains("unknown column 'served'")));
        assert!(warnings.iter().any(|w| w.contains("duplicate id '1'")));
        assert!(warnings.iter().any(|w| w.contains("orders[1]: title is empty")));
        Ok(())
    }

    #[test]
    fn test_validate_default_is_clean() {
        assert!(BoardToml::default().validate().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir_all(get_config_dir(dir.path()))?;
        let mut toml = BoardToml::default();
        toml.board.title = "Night shift".to_string();
        toml.orders.push(SeedOrder {
            id: None,
            title: "Soup".to_string(),
            table: "3".to_string(),
            column: Some(Column::Delivered),
        });
        toml.save(&config_path(dir.path()))?;

        let loaded = BoardToml::load_or_default(dir.path())?;
        assert_eq!(loaded.board.title, "Night shift");
        assert_eq!(loaded.orders.len(), 1);
        assert_eq!(loaded.orders[0].column, Some(Column::Delivered));
        assert_eq!(loaded.orders[0].id, None);
        Ok(())
    }

    #[test]
    fn test_load_or_default_without_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let toml = BoardToml::load_or_default(dir.path())?;
        assert_eq!(toml.board.title, "Orders");
        Ok(())
    }
}
