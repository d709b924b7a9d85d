//! Color theme constants.

use ratatui::style::Color;

/// Border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for the focused input and the title
pub const COLOR_ACCENT: Color = Color::White;

/// Field captions
pub const COLOR_CAPTION: Color = Color::Gray;

/// Dim text for hints and placeholders
pub const COLOR_DIM: Color = Color::DarkGray;

/// Positive state (streaming, notice)
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Error notice
pub const COLOR_ERROR: Color = Color::Red;
