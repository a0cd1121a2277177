//! WASM bindings for count-based Venn diagram layout.
//!
//! This crate exposes the venn-core layout pipeline to JavaScript hosts.

use log::{error, info};
use serde_json::{Map, Value};
use venn_core::{
    events, layout::layout, ContingencyTable, DiagramId, Frame, LayoutError, MultipleVenn, MultipleVennOptions, Venn,
    VennLayout, VennOptions,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;
use web_sys::console;

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsValue> {
    let level: Option<String> = serde_wasm_bindgen::from_value(level)?;
    let level = venn_core::parse_log_level(level.as_deref()).map_err(to_js)?;
    log::set_max_level(level);
    Ok(())
}

fn to_js(e: LayoutError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_value(layout: &VennLayout) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(layout)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize layout: {}", e)))
}

/// Lays out circles for an explicit contingency table.
///
/// # Arguments
/// * `table` - Either a square matrix or upper-triangular rows of counts: `table[i][i]` is the
///   size of set `i`, `table[i][j]` the size of the overlap of sets `i` and `j`.
///
/// # Returns
/// A [`VennLayout`] with one circle per set and one count label per set and per pair.
#[wasm_bindgen]
pub fn make_layout(table: JsValue) -> Result<JsValue, JsValue> {
    let rows: Vec<Vec<usize>> = serde_wasm_bindgen::from_value(table)?;
    let table = ContingencyTable::from_rows(rows).map_err(to_js)?;
    console::time_with_label("venn layout");
    let result = layout(&table);
    console::time_end_with_label("venn layout");
    to_value(&result.map_err(to_js)?)
}

/// Lays out a selectable-set Venn diagram from data rows.
///
/// # Arguments
/// * `rows` - Array of objects, one per data row.
/// * `options` - [`VennOptions`]; `category` and `count` name the columns to use. Sets start out
///   holding the first distinct categories, one each.
#[wasm_bindgen]
pub fn make_venn(rows: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let rows: Vec<Map<String, Value>> = serde_wasm_bindgen::from_value(rows)?;
    let options: VennOptions = serde_wasm_bindgen::from_value(options)?;
    let mut frame = Frame::from_rows(&rows);
    let (notifier, _scheduler) = events::channel();
    let venn = Venn::new(DiagramId(0), options, &mut frame, notifier).map_err(to_js)?;
    to_value(venn.layout())
}

/// Lays out a Venn diagram with one circle per distinct category.
#[wasm_bindgen]
pub fn make_multiple_venn(rows: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let rows: Vec<Map<String, Value>> = serde_wasm_bindgen::from_value(rows)?;
    let options: MultipleVennOptions = serde_wasm_bindgen::from_value(options)?;
    let frame = Frame::from_rows(&rows);
    let venn = MultipleVenn::new(DiagramId(0), options, &frame).map_err(to_js)?;
    to_value(venn.layout())
}
