//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
    pub key: TableColor,
    pub string: TableColor,
    pub number: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
            key: TableColor::Cyan,
            string: TableColor::Green,
            number: TableColor::Yellow,
        }
    }
}

impl ColorTheme {
    /// Get color based on running/total node counts
    pub fn get_node_color(&self, running: u32, total: u32) -> TableColor {
        if total == 0 {
            self.muted
        } else if running == total {
            self.success
        } else if running > 0 {
            self.warning
        } else {
            self.error
        }
    }
}

/// Convert comfy_table::Color to colored::Color string representation
pub fn table_color_to_colored_str(color: TableColor) -> &'static str {
    match color {
        TableColor::Green => "green",
        TableColor::Yellow => "yellow",
        TableColor::Red => "red",
        TableColor::Cyan => "cyan",
        TableColor::DarkGrey => "bright black",
        _ => "white",
    }
}
