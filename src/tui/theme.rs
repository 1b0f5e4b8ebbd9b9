//! Shared colors for the messenger look.

use ratatui::style::Color;

/// Accent used for focused borders, outgoing bubbles and the active tab
pub const ACCENT: Color = Color::Rgb(0x33, 0x90, 0xec);
/// Incoming bubble border
pub const INCOMING: Color = Color::Gray;
/// Presence dot for online contacts
pub const ONLINE: Color = Color::Green;
/// Secondary text (previews, timestamps, placeholders)
pub const MUTED: Color = Color::DarkGray;
/// Background of the highlighted contact row
pub const HIGHLIGHT_BG: Color = Color::Rgb(0x2b, 0x52, 0x78);
/// Login errors
pub const ERROR: Color = Color::Red;
