//! Subcommand implementations.
//!
//! Each command builds its output as a string so it can be checked without
//! a terminal.

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use weft::chart::{Config, merge, parse_config};
use weft::config::WeftConfig;
use weft::table::{
    ColumnDef, ColumnId, KeyboardNavigation, PinSide, PinnedColumns, SelectionMode, TableMarkup,
    TableState,
};
use weft_dom::{Document, Key, KeyEvent, Modifiers};

use crate::error::{CliError, Result};

/// Viewport width used for headless table rendering.
const VIEWPORT_WIDTH: f32 = 800.0;
const ROW_WIDTH: f32 = 120.0;

// ============================================================================
// merge
// ============================================================================

fn read_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_config(&text)?)
}

/// Merge the override file over the base file and pretty-print the result.
pub fn merge_files(base: &Path, patch: &Path) -> Result<String> {
    let base = read_config(base)?;
    let patch = read_config(patch)?;
    let merged = merge(&base, &patch);
    log::debug!("[merge] {} keys merged", merged.len());
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(merged))?)
}

// ============================================================================
// pin
// ============================================================================

/// A `--column id:side:width` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub id: ColumnId,
    pub side: PinSide,
    pub width: f32,
}

impl FromStr for ColumnSpec {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || CliError::InvalidColumn(s.to_string());
        let mut parts = s.splitn(3, ':');
        let (Some(id), Some(side), Some(width)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if id.is_empty() {
            return Err(invalid());
        }
        let side = side.parse::<PinSide>().map_err(|_| invalid())?;
        let width = width.parse::<f32>().map_err(|_| invalid())?;
        if !width.is_finite() || width < 0.0 {
            return Err(invalid());
        }
        Ok(Self {
            id: ColumnId::from(id),
            side,
            width,
        })
    }
}

/// Render a one-row table with the given columns and report pinned offsets.
pub fn pin(columns: &[ColumnSpec]) -> String {
    let table = TableState::with_rows(
        columns
            .iter()
            .map(|c| ColumnDef::new(c.id.as_str(), c.id.as_str()).pinned(c.side))
            .collect(),
        vec!["row".to_string()],
    );
    let markup = TableMarkup::for_table(&table);
    let width_of = |id: &ColumnId| {
        columns
            .iter()
            .find(|c| &c.id == id)
            .map_or(0.0, |c| c.width)
    };
    let doc = Document::with_root(markup.render(&table, VIEWPORT_WIDTH, width_of));

    let engine = PinnedColumns::new(doc, table, &markup);
    engine.recompute_offsets();

    let mut out = String::new();
    for column in columns {
        match engine.offset(&column.id) {
            Some(offset) => {
                let property = offset.style_property().unwrap_or("-");
                let _ = writeln!(out, "{}\t{}: {}px", column.id, property, offset.px);
            }
            None => {
                let _ = writeln!(out, "{}\tunpinned", column.id);
            }
        }
    }
    out
}

// ============================================================================
// navigate
// ============================================================================

/// A key press such as `Down`, `ctrl+PageDown` or `space`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl FromStr for KeySpec {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut modifiers = Modifiers::new();
        let mut parts: Vec<&str> = s.split('+').collect();
        // A trailing "+" is the plus key itself.
        let name = match parts.pop() {
            Some("") if s.ends_with('+') => "+",
            Some(name) => name,
            None => s,
        };
        for part in parts.iter().filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "meta" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                _ => return Err(CliError::InvalidKey(s.to_string())),
            }
        }
        let key = name
            .parse::<Key>()
            .map_err(|_| CliError::InvalidKey(s.to_string()))?;
        Ok(Self { key, modifiers })
    }
}

/// Options for [`navigate`].
#[derive(Debug, Clone, Default)]
pub struct NavigateArgs {
    pub rows: usize,
    pub page_size: Option<usize>,
    pub select: bool,
    pub keys: Vec<KeySpec>,
}

/// Replay keys over a headless table and report the resulting state.
pub fn navigate(args: &NavigateArgs, config: &WeftConfig) -> String {
    let mut options = config.navigation;
    if args.select {
        options.selection_enabled = true;
    }
    let page_size = args.page_size.or(config.page_size);

    let mut table = TableState::with_rows(
        vec![ColumnDef::new("row", "Row")],
        (0..args.rows).map(|i| format!("row-{i}")).collect(),
    );
    if options.selection_enabled {
        table = table.with_selection_mode(SelectionMode::Multiple);
    }
    if let Some(size) = page_size {
        table = table.with_page_size(size);
    }

    let markup = TableMarkup::for_table(&table);
    let render = |table: &TableState| markup.render(table, VIEWPORT_WIDTH, |_| ROW_WIDTH);
    let doc = Document::with_root(render(&table));

    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let (activated, changed, escaped) = (
        Arc::clone(&events),
        Arc::clone(&events),
        Arc::clone(&events),
    );
    let nav = KeyboardNavigation::new(doc.clone(), table.clone(), markup.table_id.clone())
        .with_options(options)
        .on_row_activate(move |index, id| {
            if let Ok(mut log) = activated.lock() {
                log.push(format!("activate {index} {id}"));
            }
        })
        .on_selection_change(move |ids| {
            if let Ok(mut log) = changed.lock() {
                log.push(format!("selection [{}]", ids.join(", ")));
            }
        })
        .on_escape(move || {
            if let Ok(mut log) = escaped.lock() {
                log.push("escape".to_string());
            }
        });
    nav.attach();
    nav.focus_table();

    let mut out = String::new();
    for spec in &args.keys {
        let page_before = table.page_index();
        doc.key_down(KeyEvent::new(spec.key).with_modifiers(spec.modifiers));
        if table.page_index() != page_before {
            doc.mount(render(&table));
        }
        let _ = writeln!(
            out,
            "{:<12} focus={:<8} page={}/{} selected={}",
            format!("{:?}", spec.key),
            format!("{:?}", nav.focused_row_index()),
            table.page_index() + 1,
            table.page_count(),
            table.selected_ids().len()
        );
    }

    let _ = writeln!(out, "selected: [{}]", table.selected_ids().join(", "));
    if let Ok(log) = events.lock() {
        for line in log.iter() {
            let _ = writeln!(out, "event: {line}");
        }
    }
    out
}
