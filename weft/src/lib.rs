pub mod chart;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod table;

pub use error::{Result, WeftError};

pub mod prelude {
    pub use crate::chart::{Chart, ChartEngine, Config, merge};
    pub use crate::clipboard::{Clipboard, ClipboardCopy, MemoryClipboard};
    pub use crate::config::{CopyOptions, NavigationOptions, WeftConfig};
    pub use crate::error::{Result, WeftError};
    pub use crate::table::{
        ColumnDef, ColumnId, ColumnOffset, EventResult, KeyboardNavigation, PinSide,
        PinnedColumns, ScrollShadow, SelectionMode, TableEvent, TableMarkup, TableState,
    };

    pub use weft_dom::{Document, Key, KeyEvent, Modifiers};
}
