//! Page and figure theme colors.

use serde::{Deserialize, Serialize};

/// Colors shared by the page and every figure.
///
/// Constructed once from configuration at startup and passed by reference to
/// whatever needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Background of the entire page.
    #[serde(default = "default_background_color")]
    pub background_color: String,

    /// Divider bars between page rows.
    #[serde(default = "default_divider_color")]
    pub divider_color: String,

    /// Text color for the page and figure fonts.
    #[serde(default = "default_text_color")]
    pub text_color: String,

    /// Background inside the plot area.
    #[serde(default = "default_plot_background")]
    pub plot_background: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            divider_color: default_divider_color(),
            text_color: default_text_color(),
            plot_background: default_plot_background(),
        }
    }
}

fn default_background_color() -> String {
    "#00415e".to_string()
}

fn default_divider_color() -> String {
    "#f29400".to_string()
}

fn default_text_color() -> String {
    "white".to_string()
}

fn default_plot_background() -> String {
    "#d3e4ed".to_string()
}
