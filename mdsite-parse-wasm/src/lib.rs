//! WASM bindings for `mdsite-parse`.
//!
//! Exposes the Markdown converter to JavaScript via wasm-bindgen.
//! Conversion failures are thrown as JS `Error`s carrying the converter's
//! message.

use wasm_bindgen::prelude::*;

fn js_error(err: mdsite_parse::ConvertError) -> JsError {
    JsError::new(&err.to_string())
}

/// Convert a Markdown document and return its HTML fragment (a single `div`).
#[wasm_bindgen]
pub fn render_html(input: &str) -> Result<String, JsError> {
    mdsite_parse::markdown_to_html(input).map_err(js_error)
}

/// Return the document title: the first `# ` heading line.
#[wasm_bindgen]
pub fn extract_title(input: &str) -> Result<String, JsError> {
    mdsite_parse::extract_title(input).map_err(js_error)
}

/// Split inline text into spans.
///
/// Returns an array of `{ text, kind, target? }` objects.
#[wasm_bindgen]
pub fn inline_spans(text: &str) -> Result<JsValue, JsError> {
    let spans = mdsite_parse::text_to_spans(text).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&spans).map_err(|e| JsError::new(&e.to_string()))
}

/// Classify a single block and return the type name
/// (`paragraph`, `heading`, `code`, `quote`, `unordered_list`, `ordered_list`).
#[wasm_bindgen]
pub fn classify_block(block: &str) -> String {
    mdsite_parse::classify(block).name().to_string()
}

/// Convert a Markdown document and return the HTML node tree as JSON.
///
/// Each node is `{ node: "leaf" | "parent", tag, value | children, attrs? }`.
#[wasm_bindgen]
pub fn document_tree(input: &str) -> Result<String, JsError> {
    let root = mdsite_parse::document_to_node(input).map_err(js_error)?;
    serde_json::to_string(&root).map_err(|e| JsError::new(&e.to_string()))
}
