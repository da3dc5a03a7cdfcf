//! `graphdex schema`: introspect the query fields a subgraph exposes.

use std::path::PathBuf;

use clap::Args;
use serde_json::{Value, json};

use crate::catalog::queries::QUERY_FIELDS;
use crate::client::GraphClient;
use crate::error::GraphDexError;
use crate::utils::subgraph::extract_subgraph_id;

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Subgraph ID or full gateway URL
    pub subgraph: String,

    /// Save the raw introspection response to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// The Graph API key (falls back to GRAPH_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

fn field_names(data: &Value) -> Vec<String> {
    let mut names: Vec<String> = data
        .pointer("/__schema/queryType/fields")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| f.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    names.sort_unstable();
    names
}

pub async fn run(args: SchemaArgs) -> Result<String, GraphDexError> {
    let subgraph_id = extract_subgraph_id(&args.subgraph)?;
    let client = GraphClient::new(&subgraph_id, &subgraph_id, args.api_key.as_deref())?;

    let data = client.execute(QUERY_FIELDS, json!({})).await?;
    let data = Value::Object(data);

    if let Some(path) = &args.output {
        crate::render::json::write_value(&data, path).await?;
    }

    let names = field_names(&data);
    if names.is_empty() {
        return Ok(format!(
            "Subgraph {subgraph_id} returned no introspectable query fields"
        ));
    }

    let mut out = format!("Query fields on subgraph {subgraph_id}:\n");
    for name in names {
        out.push_str("  ");
        out.push_str(&name);
        out.push('\n');
    }
    Ok(out)
}
