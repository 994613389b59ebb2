use serde::Serialize;

use crate::model::query::Query;
use crate::model::record::{LabelMap, Record, RecordKind};
use crate::ops::pipeline::Digest;
use crate::ops::tree::pre_order;
use crate::parse::decode_note;
use crate::parse::hyperlink::to_plain;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct DigestJson<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    pub title: &'a str,
    pub items: &'a [Record],
    #[serde(skip_serializing_if = "LabelMap::is_empty")]
    pub labels: &'a LabelMap,
}

pub fn digest_to_json<'a>(query: &'a Query, digest: &'a Digest) -> DigestJson<'a> {
    DigestJson {
        title: &query.title,
        items: &digest.items,
        labels: &digest.labels,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format the whole digest as an indented tree. `ansi` enables colored
/// titles for records with a `#rrggbb` color when the query asks for it.
pub fn format_digest(query: &Query, digest: &Digest, ansi: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if !query.title.is_empty() {
        lines.push(query.title.clone());
    }
    if digest.items.is_empty() {
        lines.push("No items".to_string());
        return lines;
    }

    let colored = ansi && query.color_title;
    for (depth, node) in pre_order(&digest.items) {
        let indent = "  ".repeat(depth);
        lines.push(format!(
            "{}{}",
            indent,
            format_item_line(node, query, &digest.labels, colored)
        ));

        if query.show_note
            && let Some(note) = node.note.as_ref().and_then(decode_note)
        {
            for note_line in note.lines() {
                lines.push(format!("{}    {}", indent, note_line));
            }
        }
    }
    lines
}

/// Format a single record as a one-line summary
pub fn format_item_line(node: &Record, query: &Query, labels: &LabelMap, colored: bool) -> String {
    let mut line = String::new();
    if node.kind == RecordKind::Task {
        line.push_str(if node.done { "[x] " } else { "[ ] " });
    }
    if let Some(decoration) = node.kind.decoration() {
        line.push_str(decoration);
        line.push(' ');
    }

    let title = to_plain(&node.title);
    match node.color.as_deref().and_then(hex_rgb).filter(|_| colored) {
        Some((r, g, b)) => line.push_str(&format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, title)),
        None => line.push_str(&title),
    }

    if query.show_label {
        for label in node.label_ids.iter().filter_map(|id| labels.get(id)) {
            line.push_str(&format!(" #{}", label.title));
        }
    }
    line
}

fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
