//! Terminal rendering of a board snapshot.
//!
//! Columns are laid out side by side when the terminal is wide enough,
//! otherwise stacked one below the other.

use console::{Alignment, pad_str, style};

use crate::board::{BoardChange, BoardView, ColumnView, StepReport};

use super::icons::{
    ADDED, BOARD, CARD, CHECK, CROSS, DELETED, DRAG, EDITED, MOVED, OVERLAY, SPARKLE, TABLE,
};

const MIN_COLUMN_WIDTH: usize = 18;
const SEPARATOR: &str = " │ ";
const FALLBACK_WIDTH: usize = 100;

/// Current terminal width, or a fixed fallback when stdout is not a terminal.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

fn column_lines(column: &ColumnView, width: usize) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} {}",
            style(&column.label).bold().cyan(),
            style(format!("({})", column.orders.len())).dim()
        ),
        "─".repeat(width),
    ];
    if column.orders.is_empty() {
        lines.push(style("(empty)").dim().to_string());
    }
    for order in &column.orders {
        let wrapped = textwrap::wrap(&order.title, width.saturating_sub(4).max(1));
        for (i, line) in wrapped.iter().enumerate() {
            let lead = if i == 0 { CARD.to_string() } else { "  ".to_string() };
            lines.push(format!("{}{}", lead, style(line).bold()));
        }
        lines.push(format!(
            "  {}{}",
            TABLE,
            style(format!("Table: {}", order.table)).dim()
        ));
        lines.push(style(format!("  #{}", short_id(&order.id))).dim().to_string());
    }
    lines
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Render the board into lines sized for `width` columns of terminal.
pub fn render_board(view: &BoardView, width: usize) -> String {
    let mut out = format!("{}{}\n\n", BOARD, style(&view.title).bold().underlined());
    let count = view.columns.len().max(1);
    let separators = SEPARATOR.chars().count() * (count - 1);
    let column_width = width.saturating_sub(separators) / count;

    if column_width >= MIN_COLUMN_WIDTH {
        let rendered: Vec<Vec<String>> = view
            .columns
            .iter()
            .map(|c| column_lines(c, column_width))
            .collect();
        let height = rendered.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..height {
            let cells: Vec<String> = rendered
                .iter()
                .map(|lines| {
                    let cell = lines.get(row).map(String::as_str).unwrap_or("");
                    pad_str(cell, column_width, Alignment::Left, Some("…")).into_owned()
                })
                .collect();
            out.push_str(cells.join(SEPARATOR).trim_end());
            out.push('\n');
        }
    } else {
        let column_width = width.max(MIN_COLUMN_WIDTH);
        for column in &view.columns {
            for line in column_lines(column, column_width) {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
    }
    out
}

pub fn print_board(view: &BoardView) {
    println!();
    print!("{}", render_board(view, terminal_width()));
    println!();
}

fn change_icon(change: &BoardChange) -> String {
    match change {
        BoardChange::OrderCreated { .. } => ADDED.to_string(),
        BoardChange::OrderUpdated { .. } => EDITED.to_string(),
        BoardChange::OrderMoved { .. } => MOVED.to_string(),
        BoardChange::OrderDeleted { .. } => DELETED.to_string(),
        BoardChange::OverlayOpened { .. } | BoardChange::OverlayClosed { .. } => {
            OVERLAY.to_string()
        }
        BoardChange::DragStarted { .. }
        | BoardChange::DropTargetChanged { .. }
        | BoardChange::DragEnded { .. } => DRAG.to_string(),
    }
}

/// Print the change journal. Overlay and drag bookkeeping is only shown
/// when `all` is set.
pub fn print_changes(changes: &[BoardChange], all: bool) {
    let shown: Vec<&BoardChange> = changes
        .iter()
        .filter(|c| all || c.touches_orders())
        .collect();
    if shown.is_empty() {
        println!("{}", style("No changes.").dim());
        return;
    }
    println!("{}", style("Changes").bold());
    for change in shown {
        let line = change.summary();
        if change.touches_orders() {
            println!("  {}{}", change_icon(change), line);
        } else {
            println!("  {}{}", change_icon(change), style(line).dim());
        }
    }
}

/// Print per-step results of a script run.
pub fn print_reports(reports: &[StepReport]) {
    for report in reports {
        match &report.error {
            None => println!(
                "  {}{} {}",
                CHECK,
                style(format!("[{}]", report.index + 1)).dim(),
                report.gesture
            ),
            Some(error) => println!(
                "  {}{} {} {}",
                CROSS,
                style(format!("[{}]", report.index + 1)).dim(),
                report.gesture,
                style(error).red()
            ),
        }
    }
    let failed = reports.iter().filter(|r| !r.ok()).count();
    if failed == 0 {
        println!("{}{} steps completed", SPARKLE, reports.len());
    } else {
        println!(
            "{}{} of {} steps failed",
            CROSS,
            style(failed).red().bold(),
            reports.len()
        );
    }
}
