use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::scroll::ScrollMetrics;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Element kind, enough to tell table structure apart from form controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Box,
    Table,
    Head,
    Body,
    Row,
    HeaderCell,
    Cell,
    Input,
    TextArea,
    Select,
    Button,
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,

    // Geometry
    /// Rendered outer width (content + padding + border), in pixels.
    pub width: f32,
    pub scroll: ScrollMetrics,

    // Markup
    pub attributes: HashMap<String, String>,
    /// Inline style properties, e.g. `left -> "50px"`.
    pub style: HashMap<String, String>,
    pub content_editable: bool,

    pub children: Vec<Element>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: Tag::Box,
            width: 0.0,
            scroll: ScrollMetrics::default(),
            attributes: HashMap::new(),
            style: HashMap::new(),
            content_editable: false,
            children: Vec::new(),
        }
    }
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        let prefix = match tag {
            Tag::Box => "box",
            Tag::Table => "table",
            Tag::Head => "thead",
            Tag::Body => "tbody",
            Tag::Row => "tr",
            Tag::HeaderCell => "th",
            Tag::Cell => "td",
            Tag::Input => "input",
            Tag::TextArea => "textarea",
            Tag::Select => "select",
            Tag::Button => "button",
        };
        Self {
            id: generate_id(prefix),
            tag,
            ..Default::default()
        }
    }

    pub fn box_() -> Self {
        Self::new(Tag::Box)
    }

    pub fn table() -> Self {
        Self::new(Tag::Table)
    }

    pub fn head() -> Self {
        Self::new(Tag::Head)
    }

    pub fn body() -> Self {
        Self::new(Tag::Body)
    }

    pub fn row() -> Self {
        Self::new(Tag::Row)
    }

    pub fn header_cell() -> Self {
        Self::new(Tag::HeaderCell)
    }

    pub fn cell() -> Self {
        Self::new(Tag::Cell)
    }

    pub fn input() -> Self {
        Self::new(Tag::Input)
    }

    pub fn button() -> Self {
        Self::new(Tag::Button)
    }

    // Builder methods

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn content_editable(mut self, editable: bool) -> Self {
        self.content_editable = editable;
        self
    }

    pub fn scroll(mut self, metrics: ScrollMetrics) -> Self {
        self.scroll = metrics;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    // Accessors

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    pub fn set_style_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.style.insert(name.into(), value.into());
    }

    pub fn remove_style_property(&mut self, name: &str) -> Option<String> {
        self.style.remove(name)
    }

    /// Whether keystrokes on this element belong to text editing.
    pub fn is_text_input(&self) -> bool {
        matches!(self.tag, Tag::Input | Tag::TextArea | Tag::Select) || self.content_editable
    }

    /// Depth-first visit of this element and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Depth-first mutable visit of this element and all descendants.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    /// Collect references to every descendant (including self) matching `pred`.
    pub fn query_all<'a>(&'a self, pred: impl Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&mut |el| {
            if pred(el) {
                found.push(el);
            }
        });
        found
    }
}

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_element(child, id))
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }
    root.children
        .iter_mut()
        .find_map(|child| find_element_mut(child, id))
}

/// True if `descendant_id` is `ancestor_id` or lives somewhere under it.
pub fn contains(root: &Element, ancestor_id: &str, descendant_id: &str) -> bool {
    find_element(root, ancestor_id)
        .is_some_and(|ancestor| find_element(ancestor, descendant_id).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        Element::box_().id("root").child(
            Element::table()
                .id("table")
                .child(Element::row().id("r0").child(Element::input().id("search")))
                .child(Element::row().id("r1")),
        )
    }

    #[test]
    fn test_find_element_nested() {
        let root = tree();
        assert_eq!(find_element(&root, "search").map(|e| e.tag), Some(Tag::Input));
        assert!(find_element(&root, "missing").is_none());
    }

    #[test]
    fn test_contains() {
        let root = tree();
        assert!(contains(&root, "table", "search"));
        assert!(contains(&root, "table", "table"));
        assert!(!contains(&root, "r1", "search"));
        assert!(!contains(&root, "missing", "search"));
    }

    #[test]
    fn test_is_text_input() {
        assert!(Element::input().is_text_input());
        assert!(Element::new(Tag::TextArea).is_text_input());
        assert!(Element::box_().content_editable(true).is_text_input());
        assert!(!Element::button().is_text_input());
        assert!(!Element::cell().is_text_input());
    }

    #[test]
    fn test_query_all_in_document_order() {
        let root = tree();
        let rows: Vec<&str> = root
            .query_all(|e| e.tag == Tag::Row)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(rows, vec!["r0", "r1"]);
    }
}
