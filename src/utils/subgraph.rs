use std::sync::LazyLock;

use regex::Regex;

use crate::error::GraphDexError;

static URL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/subgraphs/id/([^/?\s]+)").expect("static pattern"));

// Subgraph IDs are base58-style alphanumeric strings of 30+ characters.
static BARE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{30,}$").expect("static pattern"));

/// Extracts a subgraph ID from a full gateway URL or a bare ID.
pub(crate) fn extract_subgraph_id(input: &str) -> Result<String, GraphDexError> {
    let v = input.trim();

    if v.starts_with("http") {
        return URL_ID_RE
            .captures(v)
            .map(|c| c[1].to_string())
            .ok_or_else(|| {
                GraphDexError::InvalidArgument(format!(
                    "Could not extract subgraph ID from URL: {v}\nExpected format: https://gateway.thegraph.com/api/.../subgraphs/id/<SUBGRAPH_ID>"
                ))
            });
    }

    if BARE_ID_RE.is_match(v) {
        return Ok(v.to_string());
    }

    Err(GraphDexError::InvalidArgument(format!(
        "Invalid subgraph ID format: {v}\nExpected either a full gateway URL or an alphanumeric subgraph ID"
    )))
}
