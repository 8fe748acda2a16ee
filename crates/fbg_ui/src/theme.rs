//! Theme configuration for FreeBASIC Compiler GUI.
//!
//! Colors, spacing and font sizes shared by the views.

use iced::Color;

use fbg_core::session::StatusTone;

/// Application colors.
pub mod colors {
    use super::Color;

    /// Card/panel background
    pub const CARD: Color = Color::from_rgb(0.14, 0.14, 0.14);

    /// Log pane background
    pub const LOG_BG: Color = Color::from_rgb(0.10, 0.10, 0.10);

    /// Border color
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.25);

    /// Text secondary
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.53, 0.53, 0.53);

    /// A path has been chosen
    pub const PATH_SET: Color = Color::from_rgb(0.35, 0.75, 0.40);

    /// Nothing chosen yet
    pub const PATH_UNSET: Color = Color::from_rgb(0.85, 0.35, 0.35);
}

/// Status line colors.
pub mod status {
    use super::{Color, StatusTone};

    pub fn for_tone(tone: StatusTone) -> Color {
        match tone {
            StatusTone::Info => Color::from_rgb(0.40, 0.60, 0.95),
            StatusTone::Progress => Color::from_rgb(0.95, 0.60, 0.20),
            StatusTone::Success => Color::from_rgb(0.35, 0.75, 0.40),
            StatusTone::Warning => Color::from_rgb(0.95, 0.60, 0.20),
            StatusTone::Error => Color::from_rgb(0.90, 0.30, 0.30),
        }
    }
}

/// Spacing constants.
pub mod spacing {
    /// Extra small spacing (4px)
    pub const XS: u16 = 4;
    /// Small spacing (8px)
    pub const SM: u16 = 8;
    /// Medium spacing (12px)
    pub const MD: u16 = 12;
    /// Large spacing (16px)
    pub const LG: u16 = 16;
    /// Extra large spacing (24px)
    pub const XL: u16 = 24;
}

/// Font sizes.
pub mod font {
    /// Small font size
    pub const SM: u16 = 11;
    /// Normal font size
    pub const NORMAL: u16 = 13;
    /// Large font size
    pub const LG: u16 = 16;
}
