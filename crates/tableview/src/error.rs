//! Error types for tableview.

/// Result type alias for tableview operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised by the table binding layer.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table is selectable but a header item does not expose a selection
    /// state. This is a wiring mistake in the dataset, not a transient state.
    #[error("item at position {position} must implement SelectableModel to be selectable")]
    NotSelectable { position: usize },

    /// A sort state was dispatched to a live holder that cannot render a sort
    /// indicator.
    #[error("column header holder at position {position} cannot display a sort indicator")]
    NotSortable { position: usize },

    /// An item-list mutation addressed a position outside the list.
    #[error("position {position} is out of range for {len} items")]
    PositionOutOfRange { position: usize, len: usize },

    /// Malformed table configuration.
    #[error("invalid table configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize table configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A color string could not be parsed.
    #[error("invalid color '{0}'")]
    InvalidColor(String),
}

impl TableError {
    /// Whether the error is a fatal wiring mistake rather than a bad argument.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::NotSelectable { .. } | Self::NotSortable { .. })
    }
}
