use serde_json::Value;
use tracing::debug;

/// Extract the plain text of a note.
///
/// `note` is either a string holding a rich-text document
/// (`{"document":{"nodes":[...]}}`, possibly after some non-JSON prefix)
/// or an already-parsed node list. Leaf texts are joined with newlines in
/// depth-first order. Returns `None` when there is no text or the payload
/// can't be read.
pub fn decode_note(note: &Value) -> Option<String> {
    match note {
        Value::String(raw) => decode_note_str(raw),
        Value::Array(nodes) => text_from_nodes(nodes),
        _ => None,
    }
}

/// Decode an encoded document string. The JSON starts at the first `{`.
pub fn decode_note_str(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let doc: Value = match serde_json::from_str(&raw[start..]) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(error = %e, "note payload is not a readable document");
            return None;
        }
    };
    let nodes = doc.get("document")?.get("nodes")?.as_array()?;
    text_from_nodes(nodes)
}

fn text_from_nodes(nodes: &[Value]) -> Option<String> {
    let parts: Vec<String> = nodes.iter().filter_map(text_from_node).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn text_from_node(node: &Value) -> Option<String> {
    if node.get("object").and_then(Value::as_str) == Some("leaf")
        && let Some(text) = node.get("text").and_then(Value::as_str)
        && !text.is_empty()
    {
        return Some(text.to_string());
    }
    // `leaves` wins over `nodes` when both are present
    let children = present(node, "leaves").or_else(|| present(node, "nodes"))?;
    decode_note(children)
}

fn present<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|v| !v.is_null())
}
