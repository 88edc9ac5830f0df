//! JSON-LD block extraction and FAQPage schema detection.
//!
//! Pages embed linked data as `<script type="application/ld+json">` blocks.
//! Each block parses independently; malformed blocks are skipped, never
//! fatal. A page is "detected" iff at least one object node — after full
//! recursive flattening of nested arrays — carries `"@type": "FAQPage"`.

use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

/// The `@type` discriminator marking an FAQ schema document.
pub const FAQ_PAGE_TYPE: &str = "FAQPage";

/// Extract all JSON-LD blocks from raw page markup.
///
/// Blocks that fail to parse are dropped; one bad block never invalidates
/// the rest of the page.
pub fn extract_blocks(html: &str) -> Vec<Value> {
    let doc = Html::parse_document(html);
    let script_sel = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

    let mut blocks = Vec::new();
    for el in doc.select(&script_sel) {
        let raw = el.text().collect::<String>();
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => blocks.push(value),
            Err(e) => debug!(error = %e, "skipping malformed JSON-LD block"),
        }
    }
    blocks
}

/// Recursively flatten nested arrays, collecting every object-shaped node.
pub fn flatten_nodes(value: &Value) -> Vec<&Map<String, Value>> {
    let mut nodes = Vec::new();
    collect_nodes(value, &mut nodes);
    nodes
}

fn collect_nodes<'a>(value: &'a Value, out: &mut Vec<&'a Map<String, Value>>) {
    match value {
        Value::Object(map) => out.push(map),
        Value::Array(items) => {
            for item in items {
                collect_nodes(item, out);
            }
        }
        _ => {}
    }
}

/// Whether an object node carries the FAQPage type discriminator.
pub fn is_faq_node(node: &Map<String, Value>) -> bool {
    node.get("@type").and_then(Value::as_str) == Some(FAQ_PAGE_TYPE)
}

/// Whether any document in the list contains an FAQPage node.
pub fn detect(documents: &[Value]) -> bool {
    documents
        .iter()
        .flat_map(flatten_nodes)
        .any(|node| is_faq_node(node))
}
