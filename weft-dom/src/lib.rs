pub mod document;
pub mod element;
pub mod event;
pub mod observe;
pub mod scroll;

pub use document::{Document, Mutation, ScrollBehavior, ScrollBlock};
pub use element::{Element, Tag, contains, find_element, find_element_mut};
pub use event::{DomEvent, Key, KeyEvent, Modifiers, ParseKeyError};
pub use observe::{Observers, Subscription};
pub use scroll::ScrollMetrics;
