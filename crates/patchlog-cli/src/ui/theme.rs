//! UI Theme - colors and column widths shared by all commands

use crossterm::style::Color;

/// Default theme for patchlog output
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for different UI elements
    pub colors: ColorScheme,
    /// Column layout constants
    pub layout: Layout,
}

/// Color scheme for UI elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Patch ids and identity names (primary content)
    pub primary: Color,
    /// Versions
    pub version: Color,
    /// Labels, timestamps and other secondary info
    pub secondary: Color,
    /// Cumulative patches
    pub cumulative: Color,
    /// Add-on elements
    pub add_on: Color,
    /// Warning states
    pub warning: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            version: Color::White,
            secondary: Color::DarkGrey,
            cumulative: Color::Green,
            add_on: Color::Magenta,
            warning: Color::Yellow,
        }
    }
}

/// Column widths
#[derive(Debug, Clone)]
pub struct Layout {
    /// Width of key labels in key/value blocks
    pub label_width: usize,
    /// Width of the patch id / identity name column
    pub id_width: usize,
    /// Width of the type / version column
    pub type_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            label_width: 12,
            id_width: 28,
            type_width: 12,
        }
    }
}
