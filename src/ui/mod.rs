pub mod board_view;
pub mod icons;

pub use board_view::{print_board, print_changes, print_reports, render_board};
