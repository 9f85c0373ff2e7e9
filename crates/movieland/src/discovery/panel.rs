use serde::Serialize;

/// Space between the top of the screen and the movie table, in points.
pub const TABLE_TOP_OFFSET: f64 = 40.0;
pub const COMPACT_PANEL_HEIGHT: f64 = 180.0;
pub const FULL_PANEL_HEIGHT: f64 = 380.0;

/// How far the search and genre panel is pulled open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPanelExtent {
    #[default]
    Collapsed,
    /// Search field and genre chips.
    Compact,
    /// Compact plus the user settings panel.
    Full,
}

impl FilterPanelExtent {
    /// Distance the movie table is pushed down.
    pub const fn table_offset(self) -> f64 {
        match self {
            Self::Collapsed => 0.0,
            Self::Compact => COMPACT_PANEL_HEIGHT + TABLE_TOP_OFFSET,
            Self::Full => FULL_PANEL_HEIGHT + TABLE_TOP_OFFSET,
        }
    }

    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Collapsed)
    }

    /// Extent reached by a pull gesture that went past the threshold:
    /// a closed panel opens to compact, an open one to full.
    pub const fn pulled(self) -> Self {
        match self {
            Self::Collapsed => Self::Compact,
            Self::Compact | Self::Full => Self::Full,
        }
    }
}
