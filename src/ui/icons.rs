//! Shared UI icons and emojis.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");

// Board indicators
pub static BOARD: Emoji<'_, '_> = Emoji("📋 ", "");
pub static CARD: Emoji<'_, '_> = Emoji("🧾 ", "-");
pub static TABLE: Emoji<'_, '_> = Emoji("🍽️  ", "@");

// Change journal indicators
pub static ADDED: Emoji<'_, '_> = Emoji("➕ ", "+");
pub static EDITED: Emoji<'_, '_> = Emoji("📝 ", "~");
pub static MOVED: Emoji<'_, '_> = Emoji("➡️  ", ">");
pub static DELETED: Emoji<'_, '_> = Emoji("🗑️  ", "x");
pub static OVERLAY: Emoji<'_, '_> = Emoji("🪟 ", "#");
pub static DRAG: Emoji<'_, '_> = Emoji("✋ ", "^");
