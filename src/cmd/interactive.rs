//! `orderboard interactive`: menu-driven board session.
//!
//! Every menu choice is turned into a [`Gesture`] and performed through the
//! same event path a script replay uses.

use std::path::Path;

use anyhow::Result;
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use orderboard::board::{BoardController, Column, Gesture, Order, perform};
use orderboard::board_config::BoardToml;
use orderboard::ui;

const ACTIONS: [&str; 7] = [
    "Show board",
    "Add order",
    "Edit order",
    "Move order",
    "Delete order",
    "Help",
    "Quit",
];

const HELP: &str = "\
Orders move left to right through the columns.
  Add order     create a card in the initial column
  Edit order    change title, table or column of a card
  Move order    drag a card onto another column
  Delete order  remove a card from the board";

fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    let value = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn choose_order(board: &BoardController, prompt: &str) -> Result<Option<Order>> {
    let orders: Vec<Order> = board
        .snapshot()
        .columns
        .into_iter()
        .flat_map(|c| c.orders)
        .collect();
    if orders.is_empty() {
        println!("{}", style("The board has no orders.").dim());
        return Ok(None);
    }
    let items: Vec<String> = orders
        .iter()
        .map(|o| format!("{} (table {}) [{}]", o.title, o.table, o.column))
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(orders.into_iter().nth(selection))
}

fn choose_column(board: &BoardController, prompt: &str, current: Column) -> Result<Column> {
    let items: Vec<String> = Column::ALL
        .iter()
        .map(|&c| board.settings().label(c))
        .collect();
    let default = Column::ALL.iter().position(|&c| c == current).unwrap_or(0);
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;
    Ok(Column::ALL.get(selection).copied().unwrap_or(current))
}

fn next_gesture(board: &BoardController, action: usize) -> Result<Option<Gesture>> {
    let gesture = match action {
        1 => Some(Gesture::Add {
            title: prompt_text("Title", "")?,
            table: prompt_text("Table", "")?,
        }),
        2 => match choose_order(board, "Order to edit")? {
            Some(order) => Some(Gesture::Edit {
                title: Some(prompt_text("Title", &order.title)?),
                table: Some(prompt_text("Table", &order.table)?),
                column: Some(choose_column(board, "Column", order.column)?),
                id: order.id,
            }),
            None => None,
        },
        3 => match choose_order(board, "Order to move")? {
            Some(order) => Some(Gesture::Drag {
                over: vec![choose_column(board, "Drop on", order.column)?],
                id: order.id,
            }),
            None => None,
        },
        4 => choose_order(board, "Order to delete")?.map(|order| Gesture::Delete { id: order.id }),
        _ => None,
    };
    Ok(gesture)
}

pub fn cmd_interactive(board_dir: &Path) -> Result<()> {
    let toml = BoardToml::load_or_default(board_dir)?;
    let mut board = toml.build_board()?;
    ui::print_board(&board.snapshot());

    loop {
        let action = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What next?")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match action {
            0 => ui::print_board(&board.snapshot()),
            5 => {
                perform(&mut board, &Gesture::OpenHelp)?;
                println!();
                println!("{}", HELP);
                println!();
                perform(&mut board, &Gesture::CloseHelp)?;
            }
            6 => break,
            _ => {
                let Some(gesture) = next_gesture(&board, action)? else {
                    continue;
                };
                match perform(&mut board, &gesture) {
                    Ok(_) => {
                        ui::print_changes(&board.take_changes(), false);
                        ui::print_board(&board.snapshot());
                    }
                    Err(e) => {
                        tracing::warn!(gesture = %gesture.describe(), error = %e, "gesture failed");
                        println!("{} {}", ui::icons::CROSS, style(e).red());
                    }
                }
            }
        }
    }

    Ok(())
}
