//! YAML front-matter extraction.
//!
//! Source documents may carry a `---` delimited YAML preamble
//! holding metadata (title, tags, and so on). This module splits
//! that preamble from the body and converts it into a JSON object
//! that travels with every embedding record of the document.
//!
//! The extractor is total: a document with no preamble, an
//! unterminated fence, or YAML that fails to parse is treated as
//! having no front matter, and the full input is returned as the
//! body.

use serde_json::{Map, Value};

const FENCE: &str = "---";

/// Split a raw document into (metadata, body).
///
/// The preamble must start on the very first line. Metadata is
/// returned as a JSON object; non-mapping YAML (a bare scalar or
/// list) is discarded.
pub fn extract(raw: &str) -> (Map<String, Value>, &str) {
    let Some(rest) = strip_fence_line(raw) else {
        return (Map::new(), raw);
    };

    let Some((header, body)) = split_at_closing_fence(rest) else {
        return (Map::new(), raw);
    };

    match serde_yaml::from_str::<serde_yaml::Value>(header) {
        Ok(yaml) => match serde_json::to_value(yaml) {
            Ok(Value::Object(map)) => (map, body),
            _ => (Map::new(), body),
        },
        Err(_) => (Map::new(), raw),
    }
}

/// Strip the opening `---` line, tolerating a trailing `\r`.
fn strip_fence_line(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix(FENCE)?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n')
}

/// Find the closing fence on its own line and split around it.
fn split_at_closing_fence(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
