//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module          | Commands handled                                   |
//! |-----------------|-----------------------------------------------------|
//! | `show`          | `Show`                                             |
//! | `play`          | `Play`, `Render`                                   |
//! | `interactive`   | `Interactive`                                      |
//! | `config`        | `Config`                                           |

pub mod config;
pub mod interactive;
pub mod play;
pub mod show;

pub use config::cmd_config;
pub use interactive::cmd_interactive;
pub use play::{cmd_play, cmd_render};
pub use show::cmd_show;
