//! Velocité palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const LEAF_GREEN: Color = Color::Rgb(46, 204, 113); // #2ecc71
pub const DEEP_TEAL: Color = Color::Rgb(22, 160, 133); // #16a085
pub const SUNSET_ORANGE: Color = Color::Rgb(243, 156, 18); // #f39c12
pub const CORAL_RED: Color = Color::Rgb(231, 76, 60); // #e74c3c
pub const SKY_BLUE: Color = Color::Rgb(93, 173, 226); // #5dade2

// ── Extended Palette ──────────────────────────────────────────────────

pub const CHALK: Color = Color::Rgb(214, 219, 223); // #d6dbdf
pub const SLATE: Color = Color::Rgb(97, 106, 107); // #616a6b
pub const INK: Color = Color::Rgb(23, 32, 42); // #17202a

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(LEAF_GREEN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(DEEP_TEAL)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

/// Primary price figure on a plan card.
pub fn price_style() -> Style {
    Style::default().fg(CHALK).add_modifier(Modifier::BOLD)
}

/// Struck-through reference rate next to a discounted price.
pub fn strike_style() -> Style {
    Style::default()
        .fg(SLATE)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// The "Économisez …" savings badge.
pub fn savings_style() -> Style {
    Style::default()
        .fg(SUNSET_ORANGE)
        .add_modifier(Modifier::BOLD)
}

/// "Populaire" badge.
pub fn badge_popular() -> Style {
    Style::default().fg(SKY_BLUE).add_modifier(Modifier::BOLD)
}

/// "Promo" badge -- always wins visually over the popular badge.
pub fn badge_promoted() -> Style {
    Style::default()
        .fg(SUNSET_ORANGE)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

/// Normal body text.
pub fn body() -> Style {
    Style::default().fg(CHALK)
}

/// De-emphasized text (hints, separators, empty states).
pub fn muted() -> Style {
    Style::default().fg(SLATE)
}

/// Inline validation errors.
pub fn error_text() -> Style {
    Style::default().fg(CORAL_RED)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(LEAF_GREEN).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(CHALK)
}

/// Key hint text (e.g., "q quitter  ? aide").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(LEAF_GREEN).add_modifier(Modifier::BOLD)
}
