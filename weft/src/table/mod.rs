//! Table utilities: the row/column model, pinned-column geometry, scroll
//! shadows and keyboard navigation.

mod column;
mod markup;
mod navigation;
mod pinning;
mod selection;
mod shadow;
mod state;

pub use column::{ColumnDef, ColumnId, PinSide};
pub use markup::{COLUMN_ATTR, ROW_ATTR, ROW_INDEX_ATTR, TableMarkup};
pub use navigation::{EventResult, FOCUSED_ATTR, KeyboardNavigation};
pub use pinning::{ColumnOffset, PINNED_ATTR, PinOffsets, PinnedColumns, compute_offsets};
pub use selection::{Selection, SelectionMode};
pub use shadow::ScrollShadow;
pub use state::{TableEvent, TableId, TableState};
