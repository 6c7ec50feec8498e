//! Table configuration.
//!
//! [`TableViewConfig`] carries the mode flags and selection colors of a
//! table. It can be built in code with the `with_*` setters or loaded from
//! TOML:
//!
//! ```
//! use tableview::TableViewConfig;
//!
//! let config = TableViewConfig::from_toml_str(r##"
//!     sortable = false
//!     selected_color = "#3366FF"
//! "##).unwrap();
//!
//! assert!(config.selectable);
//! assert!(!config.sortable);
//! ```

use serde::{Deserialize, Serialize};
use tableview_core::logging::targets;

use crate::color::Color;
use crate::error::Result;
use crate::model::SelectionColors;

/// Mode flags and colors of a table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableViewConfig {
    /// Headers and cells participate in selection.
    pub selectable: bool,
    /// Column headers show sort indicators.
    pub sortable: bool,
    /// Keep the holders' own backgrounds instead of painting selection colors.
    pub ignore_selection_colors: bool,
    /// Paint shadowed headers with `shadow_color`.
    pub shadow_enabled: bool,
    pub selected_color: Color,
    pub unselected_color: Color,
    pub shadow_color: Color,
}

impl Default for TableViewConfig {
    fn default() -> Self {
        let colors = SelectionColors::default();
        Self {
            selectable: true,
            sortable: true,
            ignore_selection_colors: false,
            shadow_enabled: true,
            selected_color: colors.selected,
            unselected_color: colors.unselected,
            shadow_color: colors.shadow,
        }
    }
}

impl TableViewConfig {
    /// Parses a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded table configuration");
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// The selection colors as one value.
    pub fn selection_colors(&self) -> SelectionColors {
        SelectionColors {
            selected: self.selected_color,
            unselected: self.unselected_color,
            shadow: self.shadow_color,
        }
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_ignore_selection_colors(mut self, ignore: bool) -> Self {
        self.ignore_selection_colors = ignore;
        self
    }

    pub fn with_shadow_enabled(mut self, enabled: bool) -> Self {
        self.shadow_enabled = enabled;
        self
    }

    /// Sets all three selection colors.
    pub fn with_selection_colors(mut self, colors: SelectionColors) -> Self {
        self.selected_color = colors.selected;
        self.unselected_color = colors.unselected;
        self.shadow_color = colors.shadow;
        self
    }
}
