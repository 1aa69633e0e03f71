//! Color theme constants for the MediCare UI
//!
//! A dark palette with the clinic blue as accent.

use ratatui::style::Color;

// ============================================================================
// Base Colors
// ============================================================================

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for focus, selection and headings
pub const COLOR_ACCENT: Color = Color::Rgb(37, 99, 235); // blue #2563eb

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Secondary text (subtitles, labels)
pub const COLOR_MUTED: Color = Color::Gray;

/// Background of the selected row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(23, 37, 84);

// ============================================================================
// Status Colors
// ============================================================================

/// Errors and failed states
pub const COLOR_ERROR: Color = Color::Red;

/// Confirmed appointments and success messages
pub const COLOR_SUCCESS: Color = Color::Rgb(22, 163, 74); // green #16a34a

/// Slots already taken
pub const COLOR_BOOKED: Color = Color::Rgb(120, 120, 120);

/// Star rating color
pub const COLOR_STAR: Color = Color::Rgb(250, 204, 21); // amber #facc15

// ============================================================================
// Dialog Colors
// ============================================================================

/// Background color for alert dialogs
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);
