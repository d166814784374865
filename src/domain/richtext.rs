//! Rich-text block document handling.
//!
//! Question and answer bodies arrive as serialized block documents
//! (`{"blocks": [{"type": ..., "data": {"text": ...}}, ...]}`). They are
//! stored verbatim; only the AI analysis needs a plain-text projection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct BlockDocument {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(default)]
    data: BlockData,
}

#[derive(Debug, Default, Deserialize)]
struct BlockData {
    #[serde(default)]
    text: Option<String>,
}

/// Extract plain text from a serialized rich-text block document.
///
/// Block texts are joined with spaces and inline HTML markup is stripped.
///
/// # Errors
/// Returns a validation error if the payload is not a JSON block document.
pub fn plain_text(document: &str) -> AppResult<String> {
    let parsed: BlockDocument = serde_json::from_str(document)
        .map_err(|_| AppError::validation("Description must be a rich-text block document"))?;

    let joined = parsed
        .blocks
        .iter()
        .filter_map(|block| block.data.text.as_deref())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(HTML_TAG.replace_all(&joined, "").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_block_texts() {
        let doc = r#"{"time":1,"blocks":[
            {"type":"paragraph","data":{"text":"Hello"}},
            {"type":"paragraph","data":{"text":"world"}}
        ],"version":"2.28.0"}"#;

        assert_eq!(plain_text(doc).unwrap(), "Hello world");
    }

    #[test]
    fn strips_html_markup() {
        let doc = r#"{"blocks":[{"type":"paragraph","data":{"text":"use <b>tokio</b> &amp; <code>axum</code>"}}]}"#;

        assert_eq!(plain_text(doc).unwrap(), "use tokio &amp; axum");
    }

    #[test]
    fn skips_blocks_without_text() {
        let doc = r#"{"blocks":[
            {"type":"image","data":{"url":"x.png"}},
            {"type":"paragraph","data":{"text":"caption"}}
        ]}"#;

        assert_eq!(plain_text(doc).unwrap(), "caption");
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(plain_text(r#"{"blocks":[]}"#).unwrap(), "");
        assert_eq!(plain_text(r#"{}"#).unwrap(), "");
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(plain_text("just a sentence").is_err());
    }
}
