use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use weft::table::{
    ColumnDef, ColumnId, PINNED_ATTR, PinSide, PinnedColumns, ScrollShadow, TableMarkup,
    TableState,
};
use weft_dom::Document;

struct Fixture {
    table: TableState,
    markup: TableMarkup,
    doc: Document,
    engine: PinnedColumns,
}

fn widths() -> HashMap<&'static str, f32> {
    HashMap::from([
        ("select", 50.0),
        ("id", 80.0),
        ("name", 30.0),
        ("email", 200.0),
        ("status", 40.0),
        ("actions", 60.0),
    ])
}

fn fixture() -> Fixture {
    let table = TableState::with_rows(
        vec![
            ColumnDef::new("select", "").pinned(PinSide::Left),
            ColumnDef::new("id", "ID").pinned(PinSide::Left),
            ColumnDef::new("name", "Name").pinned(PinSide::Left),
            ColumnDef::new("email", "Email"),
            ColumnDef::new("status", "Status").pinned(PinSide::Right),
            ColumnDef::new("actions", "").pinned(PinSide::Right),
        ],
        (0..3).map(|i| format!("r{i}")).collect(),
    );
    let markup = TableMarkup::for_table(&table);
    let w = widths();
    let doc = Document::with_root(markup.render(&table, 300.0, |id| w[id.as_str()]));
    let engine = PinnedColumns::new(doc.clone(), table.clone(), &markup);
    Fixture {
        table,
        markup,
        doc,
        engine,
    }
}

fn style(doc: &Document, id: &str, prop: &str) -> Option<String> {
    doc.read_element(id, |el| el.style_property(prop).map(str::to_string))
        .flatten()
}

fn px(f: &Fixture, column: &str) -> Option<f32> {
    f.engine.offset(&ColumnId::from(column)).map(|o| o.px)
}

// ============================================================================
// Offsets
// ============================================================================

#[test]
fn test_left_pinned_offsets() {
    let f = fixture();
    f.engine.recompute_offsets();

    assert_eq!(px(&f, "select"), Some(0.0));
    assert_eq!(px(&f, "id"), Some(50.0));
    assert_eq!(px(&f, "name"), Some(130.0));
    assert_eq!(px(&f, "email"), None);
}

#[test]
fn test_right_pinned_offsets() {
    let f = fixture();
    f.engine.recompute_offsets();

    assert_eq!(px(&f, "actions"), Some(0.0));
    assert_eq!(px(&f, "status"), Some(60.0));
}

#[test]
fn test_offsets_written_to_header_and_body_cells() {
    let f = fixture();
    f.engine.recompute_offsets();

    let name = ColumnId::from("name");
    assert_eq!(
        style(&f.doc, &f.markup.header_cell_id(&name), "left").as_deref(),
        Some("130px")
    );
    for row in f.table.page_row_ids() {
        let cell = f.markup.cell_id(&row, &name);
        assert_eq!(style(&f.doc, &cell, "left").as_deref(), Some("130px"));
        assert_eq!(
            f.doc
                .read_element(&cell, |el| el.attribute(PINNED_ATTR).map(str::to_string))
                .flatten()
                .as_deref(),
            Some("left")
        );
    }

    let status = ColumnId::from("status");
    assert_eq!(
        style(&f.doc, &f.markup.cell_id("r2", &status), "right").as_deref(),
        Some("60px")
    );
    let email = ColumnId::from("email");
    assert_eq!(style(&f.doc, &f.markup.cell_id("r0", &email), "left"), None);
}

#[test]
fn test_recompute_is_idempotent() {
    let f = fixture();
    f.engine.recompute_offsets();
    let first = f.engine.offsets();
    f.engine.recompute_offsets();
    assert_eq!(f.engine.offsets(), first);
}

#[test]
fn test_unmounted_document_is_noop() {
    let table = TableState::new(vec![ColumnDef::new("a", "A").pinned(PinSide::Left)]);
    let markup = TableMarkup::for_table(&table);
    let engine = PinnedColumns::new(Document::new(), table, &markup);

    engine.attach();
    engine.recompute_offsets();

    assert!(engine.offsets().is_empty());
}

#[test]
fn test_column_without_header_cell_is_skipped() {
    let f = fixture();
    let header = f.markup.header_cell_id(&ColumnId::from("id"));
    f.doc.update(|root| {
        root.walk_mut(&mut |el| el.children.retain(|c| c.id != header));
    });

    f.engine.recompute_offsets();

    assert_eq!(px(&f, "id"), None);
    assert_eq!(px(&f, "select"), Some(0.0));
    assert_eq!(px(&f, "name"), Some(50.0));
}

// ============================================================================
// Reactive Recompute
// ============================================================================

#[test]
fn test_cell_resize_triggers_recompute() {
    let f = fixture();
    f.engine.attach();

    f.doc
        .resize(&f.markup.header_cell_id(&ColumnId::from("select")), 70.0);

    assert_eq!(px(&f, "id"), Some(70.0));
    assert_eq!(px(&f, "name"), Some(150.0));
}

#[test]
fn test_unpinning_clears_styles() {
    let f = fixture();
    f.engine.attach();

    f.table.set_pin(&ColumnId::from("id"), PinSide::None);

    assert_eq!(px(&f, "id"), None);
    assert_eq!(px(&f, "name"), Some(50.0));
    assert_eq!(
        style(&f.doc, &f.markup.header_cell_id(&ColumnId::from("id")), "left"),
        None
    );
}

#[test]
fn test_hidden_column_removed_from_accumulation() {
    let f = fixture();
    f.engine.attach();

    f.table.set_visible(&ColumnId::from("select"), false);

    assert_eq!(px(&f, "select"), None);
    assert_eq!(px(&f, "id"), Some(0.0));
    assert_eq!(px(&f, "name"), Some(80.0));
}

#[test]
fn test_rerendered_rows_get_offsets_after_row_change() {
    let f = fixture();
    f.engine.attach();

    f.table
        .set_rows(vec!["r0".to_string(), "r7".to_string(), "r8".to_string()]);
    let w = widths();
    f.doc
        .mount(f.markup.render(&f.table, 300.0, |id| w[id.as_str()]));

    let cell = f.markup.cell_id("r8", &ColumnId::from("id"));
    assert_eq!(style(&f.doc, &cell, "left").as_deref(), Some("50px"));
}

#[test]
fn test_new_page_cells_styled_after_host_rerender() {
    let table = TableState::with_rows(
        vec![
            ColumnDef::new("a", "A").pinned(PinSide::Left),
            ColumnDef::new("b", "B").pinned(PinSide::Left),
            ColumnDef::new("c", "C"),
        ],
        (0..6).map(|i| format!("r{i}")).collect(),
    )
    .with_page_size(3);
    let markup = TableMarkup::for_table(&table);
    let doc = Document::with_root(markup.render(&table, 120.0, |_| 50.0));
    let engine = PinnedColumns::new(doc.clone(), table.clone(), &markup);
    engine.attach();

    table.next_page();
    doc.mount(markup.render(&table, 120.0, |_| 50.0));

    let cell = markup.cell_id("r3", &ColumnId::from("b"));
    assert_eq!(style(&doc, &cell, "left").as_deref(), Some("50px"));
    assert!(engine.has_right_scroll());
}

#[test]
fn test_attach_twice_does_not_duplicate_observers() {
    let f = fixture();
    let baseline = f.doc.observer_count();

    f.engine.attach();
    f.engine.attach();

    assert_eq!(f.doc.observer_count(), baseline + 1);
    f.engine.detach();
    assert_eq!(f.doc.observer_count(), baseline);
    assert!(!f.engine.is_attached());
}

#[test]
fn test_dropping_engine_detaches() {
    let f = fixture();
    let doc = f.doc.clone();
    f.engine.attach();
    assert_eq!(doc.observer_count(), 1);

    drop(f);
    assert_eq!(doc.observer_count(), 0);
}

// ============================================================================
// Scroll Shadow
// ============================================================================

#[test]
fn test_shadow_tracks_viewport_scroll() {
    let f = fixture();
    f.engine.attach();
    // content 460 wide in a 300 viewport
    assert!(!f.engine.is_scrolled());
    assert!(f.engine.has_right_scroll());

    f.doc.scroll_to(&f.markup.viewport_id, 80.0);
    assert!(f.engine.is_scrolled());
    assert!(f.engine.has_right_scroll());

    f.doc.scroll_to(&f.markup.viewport_id, 160.0);
    assert!(f.engine.is_scrolled());
    assert!(!f.engine.has_right_scroll());
}

#[test]
fn test_shadow_change_notifies() {
    let f = fixture();
    f.engine.attach();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    let _sub = f
        .engine
        .on_shadow_change(move |shadow| s.lock().unwrap().push(*shadow));

    f.doc.scroll_to(&f.markup.viewport_id, 10.0);
    f.doc.scroll_to(&f.markup.viewport_id, 20.0);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![ScrollShadow {
            is_scrolled: true,
            has_right_scroll: true
        }]
    );
}
