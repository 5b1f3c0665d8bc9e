//! Default value functions used as `#[serde(default = "crate::defaults::...")]`
//! attributes on config fields.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

// ── Search ─────────────────────────────────────────────────────────────────

/// How long the "not found" message stays visible.
pub fn not_found_message_timeout_ms() -> u64 {
    2000
}

/// Characters per tooltip line before a hard break.
pub fn tooltip_max_width() -> usize {
    120
}

pub fn highlight_foreground() -> String {
    "red".to_string()
}

pub fn highlight_background() -> String {
    "yellow".to_string()
}
