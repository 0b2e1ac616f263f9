//! Layout settings

use super::Config;
use crate::ui::Size;
use serde::{Deserialize, Serialize};

/// Settings for an [`ElementTree`](crate::ui::ElementTree)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial display size, the root container of parentless elements
    pub display_size: Size,

    /// Whether new elements snap to whole pixels
    pub default_pixel_aligned: bool,

    /// `env_logger` filter directives, e.g. `ui_layout=debug`
    pub log_filter: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            display_size: Size::new(800.0, 600.0),
            default_pixel_aligned: true,
            log_filter: "info".to_string(),
        }
    }
}

impl Config for UiConfig {}
