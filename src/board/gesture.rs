//! Gesture scripts: user-level actions lowered to document events.
//!
//! # Script format
//!
//! ```toml
//! [[steps]]
//! action = "add"
//! title = "Table 5 Pasta"
//! table = "5"
//!
//! [[steps]]
//! action = "drag"
//! id = "42"
//! over = ["preparing", "ready"]
//! ```
//!
//! JSON scripts use the same shape (`{"steps": [{"action": "add", ...}]}`).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::controller::BoardController;
use super::events::DomEvent;
use super::models::Column;
use super::render::find_order_element;
use super::state::Overlay;
use crate::errors::BoardError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Gesture {
    OpenHelp,
    CloseHelp,
    OpenAdd,
    CancelAdd,
    Add {
        #[serde(default)]
        title: String,
        #[serde(default)]
        table: String,
    },
    OpenEdit {
        id: String,
    },
    CancelEdit,
    Edit {
        id: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        table: Option<String>,
        #[serde(default)]
        column: Option<Column>,
    },
    Delete {
        id: String,
    },
    /// Drag an order across the listed columns and drop it on the last.
    Drag {
        id: String,
        #[serde(default)]
        over: Vec<Column>,
    },
}

impl Gesture {
    pub fn describe(&self) -> String {
        match self {
            Self::OpenHelp => "open help".to_string(),
            Self::CloseHelp => "close help".to_string(),
            Self::OpenAdd => "open add form".to_string(),
            Self::CancelAdd => "cancel add form".to_string(),
            Self::Add { title, table } => format!("add \"{title}\" for table {table}"),
            Self::OpenEdit { id } => format!("open edit for {id}"),
            Self::CancelEdit => "cancel edit form".to_string(),
            Self::Edit { id, .. } => format!("edit {id}"),
            Self::Delete { id } => format!("delete {id}"),
            Self::Drag { id, over } => {
                let path: Vec<_> = over.iter().map(Column::as_str).collect();
                format!("drag {id} over [{}]", path.join(", "))
            }
        }
    }

    /// The events a user would produce for this gesture on `board` as it
    /// is right now.
    pub fn lower(&self, board: &BoardController) -> Result<Vec<DomEvent>, BoardError> {
        let view = board.view();
        let click = |target| DomEvent::Click { target };
        let input = |target, value: &str| DomEvent::Input {
            target,
            value: value.to_string(),
        };
        let card = |id: &str| {
            find_order_element(board.document(), id).ok_or_else(|| BoardError::OrderNotFound {
                id: id.to_string(),
            })
        };
        // Clicking the card of the order already open in the edit overlay
        // would close it again.
        let open_edit = |id: &str| -> Result<Vec<DomEvent>, BoardError> {
            let card = card(id)?;
            if board.is_overlay_open(Overlay::Edit) && board.active_order() == Some(id) {
                Ok(Vec::new())
            } else {
                Ok(vec![click(card)])
            }
        };

        // Controls inside a hidden overlay cannot be clicked.
        let inside = |overlay: Overlay, target| {
            if board.is_overlay_open(overlay) {
                Ok(vec![click(target)])
            } else {
                Err(BoardError::Script(format!("{overlay} overlay is not open")))
            }
        };

        let events = match self {
            Self::OpenHelp => {
                if board.is_overlay_open(Overlay::Help) {
                    Vec::new()
                } else {
                    vec![click(view.other.help)]
                }
            }
            Self::CloseHelp => inside(Overlay::Help, view.help.close)?,
            Self::OpenAdd => {
                if board.is_overlay_open(Overlay::Add) {
                    Vec::new()
                } else {
                    vec![click(view.other.add)]
                }
            }
            Self::CancelAdd => inside(Overlay::Add, view.add.cancel)?,
            Self::Add { title, table } => {
                let mut events = Vec::new();
                if !board.is_overlay_open(Overlay::Add) {
                    events.push(click(view.other.add));
                }
                events.push(input(view.add.title, title));
                events.push(input(view.add.table, table));
                events.push(DomEvent::Submit { target: view.add.form });
                events
            }
            Self::OpenEdit { id } => open_edit(id)?,
            Self::CancelEdit => inside(Overlay::Edit, view.edit.cancel)?,
            Self::Edit {
                id,
                title,
                table,
                column,
            } => {
                let mut events = open_edit(id)?;
                if let Some(title) = title {
                    events.push(input(view.edit.title, title));
                }
                if let Some(table) = table {
                    events.push(input(view.edit.table, table));
                }
                if let Some(column) = column {
                    events.push(input(view.edit.column, column.as_str()));
                }
                events.push(DomEvent::Submit {
                    target: view.edit.form,
                });
                events
            }
            Self::Delete { id } => {
                let mut events = open_edit(id)?;
                events.push(click(view.edit.delete));
                events
            }
            Self::Drag { id, over } => {
                let card = card(id)?;
                let mut events = vec![DomEvent::DragStart { target: card }];
                events.extend(over.iter().map(|column| DomEvent::DragOver {
                    target: view.column(*column),
                }));
                events.push(DomEvent::DragEnd { target: card });
                events
            }
        };
        Ok(events)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Gesture>,
}

impl Script {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse gesture script as TOML")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse gesture script as JSON")
    }

    /// Load a script, choosing the format by file extension (`.json` or TOML).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub gesture: String,
    pub events: usize,
    pub error: Option<String>,
}

impl StepReport {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Perform one gesture. Stops at the first failing event.
pub fn perform(board: &mut BoardController, gesture: &Gesture) -> Result<usize, BoardError> {
    let events = gesture.lower(board)?;
    for event in &events {
        board.dispatch(event)?;
    }
    Ok(events.len())
}

/// Run every step of `script`. A failing step is reported and the run
/// carries on with the next one.
pub fn run_script(board: &mut BoardController, script: &Script) -> Vec<StepReport> {
    let reports: Vec<StepReport> = script
        .steps
        .iter()
        .enumerate()
        .map(|(index, gesture)| {
            let (events, error) = match perform(board, gesture) {
                Ok(n) => (n, None),
                Err(e) => (0, Some(e.to_string())),
            };
            StepReport {
                index,
                gesture: gesture.describe(),
                events,
                error,
            }
        })
        .collect();
    let failed = reports.iter().filter(|r| !r.ok()).count();
    info!(steps = reports.len(), failed, "script finished");
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::models::Order;
    use crate::board::state::BoardSettings;

    fn board_with(orders: &[(&str, Column)]) -> Result<BoardController> {
        let mut board = BoardController::new(BoardSettings::default())?;
        for (id, column) in orders {
            board.insert_order(&Order::with_id(*id, format!("Order {id}"), "1", *column))?;
        }
        Ok(board)
    }

    #[test]
    fn test_parse_toml_script() -> Result<()> {
        let script = Script::from_toml(
            r#"
[[steps]]
action = "open_help"

[[steps]]
action = "add"
title = "Table 5 Pasta"
table = "5"

[[steps]]
action = "edit"
id = "42"
column = "ready"

[[steps]]
action = "drag"
id = "42"
over = ["preparing", "delivered"]
"#,
        )?;
        assert_eq!(script.steps.len(), 4);
        assert_eq!(script.steps[0], Gesture::OpenHelp);
        assert_eq!(
            script.steps[2],
            Gesture::Edit {
                id: "42".into(),
                title: None,
                table: None,
                column: Some(Column::Ready),
            }
        );
        assert_eq!(
            script.steps[3],
            Gesture::Drag {
                id: "42".into(),
                over: vec![Column::Preparing, Column::Delivered],
            }
        );
        Ok(())
    }

    #[test]
    fn test_parse_json_script() -> Result<()> {
        let script = Script::from_json(r#"{"steps":[{"action":"delete","id":"7"}]}"#)?;
        assert_eq!(script.steps, vec![Gesture::Delete { id: "7".into() }]);
        Ok(())
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(Script::from_toml("[[steps]]\naction = \"juggle\"\n").is_err());
    }

    #[test]
    fn test_load_picks_format_by_extension() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let json = dir.path().join("script.json");
        std::fs::write(&json, r#"{"steps":[{"action":"open_add"}]}"#)?;
        let toml_path = dir.path().join("script.toml");
        std::fs::write(&toml_path, "[[steps]]\naction = \"cancel_add\"\n")?;

        assert_eq!(Script::load(&json)?.steps, vec![Gesture::OpenAdd]);
        assert_eq!(Script::load(&toml_path)?.steps, vec![Gesture::CancelAdd]);
        Ok(())
    }

    #[test]
    fn test_drag_lowers_to_drag_sequence() -> Result<()> {
        let board = board_with(&[("1", Column::Ordered)])?;
        let events = Gesture::Drag {
            id: "1".into(),
            over: vec![Column::Ready],
        }
        .lower(&board)?;
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], DomEvent::DragStart { .. }));
        assert!(matches!(events[1], DomEvent::DragOver { .. }));
        assert!(matches!(events[2], DomEvent::DragEnd { .. }));
        Ok(())
    }

    #[test]
    fn test_lowering_unknown_order_fails() -> Result<()> {
        let board = board_with(&[])?;
        let err = Gesture::Delete { id: "x".into() }.lower(&board).unwrap_err();
        assert!(matches!(err, BoardError::OrderNotFound { .. }));
        Ok(())
    }

    #[test]
    fn test_run_script_reports_failures_and_continues() -> Result<()> {
        let mut board = board_with(&[("42", Column::Ordered)])?;
        let script = Script {
            steps: vec![
                Gesture::Delete { id: "missing".into() },
                Gesture::Edit {
                    id: "42".into(),
                    title: Some("Soup".into()),
                    table: None,
                    column: Some(Column::Ready),
                },
                Gesture::Drag {
                    id: "42".into(),
                    over: vec![Column::Preparing, Column::Delivered],
                },
                Gesture::Add {
                    title: "Table 5 Pasta".into(),
                    table: "5".into(),
                },
            ],
        };
        let reports = run_script(&mut board, &script);
        assert_eq!(reports.len(), 4);
        assert!(!reports[0].ok());
        assert!(reports[1..].iter().all(StepReport::ok));

        let view = board.snapshot();
        assert_eq!(view.column_of("42"), Some(Column::Delivered));
        let ordered = view.column(Column::Ordered).expect("ordered column");
        assert_eq!(ordered.orders.len(), 1);
        assert_eq!(ordered.orders[0].title, "Table 5 Pasta");
        Ok(())
    }

    #[test]
    fn test_drag_without_hover_keeps_column() -> Result<()> {
        let mut board = board_with(&[("1", Column::Preparing)])?;
        perform(
            &mut board,
            &Gesture::Drag {
                id: "1".into(),
                over: vec![],
            },
        )?;
        assert_eq!(board.snapshot().column_of("1"), Some(Column::Preparing));
        Ok(())
    }

    #[test]
    fn test_edit_after_open_edit_keeps_overlay_open() -> Result<()> {
        let mut board = board_with(&[("42", Column::Ordered)])?;
        perform(&mut board, &Gesture::OpenEdit { id: "42".into() })?;
        perform(
            &mut board,
            &Gesture::Edit {
                id: "42".into(),
                title: None,
                table: Some("12".into()),
                column: None,
            },
        )?;
        let view = board.snapshot();
        let ordered = view.column(Column::Ordered).expect("ordered column");
        assert_eq!(ordered.orders[0].table, "12");
        assert_eq!(ordered.orders[0].title, "Order 42");
        Ok(())
    }

    #[test]
    fn test_cancel_on_hidden_overlay_is_a_script_error() -> Result<()> {
        let mut board = board_with(&[])?;
        let err = perform(&mut board, &Gesture::CancelAdd).unwrap_err();
        assert!(matches!(err, BoardError::Script(_)));
        assert!(err.to_string().contains("add overlay is not open"));
        assert!(Gesture::CancelEdit.lower(&board).is_err());
        assert!(Gesture::CloseHelp.lower(&board).is_err());

        perform(&mut board, &Gesture::OpenAdd)?;
        assert_eq!(perform(&mut board, &Gesture::CancelAdd)?, 1);
        assert!(!board.is_overlay_open(Overlay::Add));
        Ok(())
    }

    #[test]
    fn test_open_help_twice_stays_open() -> Result<()> {
        let mut board = board_with(&[])?;
        perform(&mut board, &Gesture::OpenHelp)?;
        perform(&mut board, &Gesture::OpenHelp)?;
        assert!(board.is_overlay_open(Overlay::Help));
        perform(&mut board, &Gesture::CloseHelp)?;
        assert!(!board.is_overlay_open(Overlay::Help));
        Ok(())
    }
}
