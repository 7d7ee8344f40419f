//! Column definitions for table state.

use serde::{Deserialize, Serialize};

/// Opaque column identifier, unique within one table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which edge, if any, a column is frozen to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
    #[default]
    None,
}

impl std::str::FromStr for PinSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(PinSide::Left),
            "right" | "r" => Ok(PinSide::Right),
            "none" | "" => Ok(PinSide::None),
            other => Err(format!("unknown pin side: {other}")),
        }
    }
}

/// Column configuration.
///
/// # Examples
///
/// ```
/// use weft::table::{ColumnDef, PinSide};
///
/// let columns = vec![
///     ColumnDef::new("select", "").pinned(PinSide::Left),
///     ColumnDef::new("name", "Name"),
///     ColumnDef::new("actions", "").pinned(PinSide::Right),
/// ];
/// assert_eq!(columns[0].pin, PinSide::Left);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub id: ColumnId,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub pin: PinSide,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl ColumnDef {
    pub fn new(id: impl Into<ColumnId>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            pin: PinSide::None,
            visible: true,
        }
    }

    /// Pin the column to an edge.
    pub fn pinned(mut self, side: PinSide) -> Self {
        self.pin = side;
        self
    }

    /// Start the column hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
