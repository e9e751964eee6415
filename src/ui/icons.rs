//! Console glyphs with plain-text fallbacks.

use console::Emoji;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
pub static UNCHANGED: Emoji<'_, '_> = Emoji("💤 ", "[=] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN] ");
pub static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static FILE_NEW: Emoji<'_, '_> = Emoji("📄 ", "+ ");
