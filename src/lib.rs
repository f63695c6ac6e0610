pub mod board;
pub mod board_config;
pub mod errors;
pub mod ui;

pub use board::{BoardController, Column, Gesture, Order, Script};
pub use errors::BoardError;
