//! `graphdex dex`: pools, swaps, and tokens from DEX subgraphs.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde_json::{Map, Value};
use tracing::info;

use crate::catalog::queries::{DexQuery, dex_query};
use crate::catalog::{DexSchema, DexSubgraph, find_dex};
use crate::client::{DEFAULT_PAGE_SIZE, GraphClient};
use crate::error::GraphDexError;
use crate::render::json::write_records;
use crate::transform::pool::format_pool;
use crate::transform::swap::format_swap;
use crate::utils::date::parse_timestamp;

// Far-future timestamp used as the upper bound when --end-time is absent;
// the swap queries always bind $endTime.
const END_OF_TIME: i64 = 9_999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DexQueryType {
    Pools,
    Swaps,
    Tokens,
}

impl DexQueryType {
    fn as_str(self) -> &'static str {
        match self {
            DexQueryType::Pools => "pools",
            DexQueryType::Swaps => "swaps",
            DexQueryType::Tokens => "tokens",
        }
    }
}

#[derive(Debug, Args)]
pub struct DexArgs {
    /// Catalog key of the subgraph to query (see `graphdex list`)
    #[arg(long, default_value = "uniswap_v3_ethereum")]
    pub subgraph: String,

    /// What to download
    #[arg(long, value_enum, default_value_t = DexQueryType::Swaps)]
    pub query_type: DexQueryType,

    /// Maximum number of records to fetch
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Restrict swaps to one pool (pair) address
    #[arg(long)]
    pub pool_id: Option<String>,

    /// Minimum swap value in USD
    #[arg(long, default_value_t = 0.0)]
    pub min_amount_usd: f64,

    /// Earliest swap time (Unix timestamp, YYYY-MM-DD, or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_timestamp)]
    pub start_time: Option<i64>,

    /// Latest swap time (same formats as --start-time)
    #[arg(long, value_parser = parse_timestamp)]
    pub end_time: Option<i64>,

    /// Sort field for pools and tokens
    #[arg(long, default_value = "volumeUSD")]
    pub order_by: String,

    /// Sort direction for pools and tokens
    #[arg(long, default_value = "desc")]
    pub order_direction: String,

    /// Output file (defaults to data/<subgraph>/<query_type>/data.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// The Graph API key (falls back to GRAPH_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

fn swap_variables(args: &DexArgs, schema: DexSchema) -> (DexQuery, Map<String, Value>) {
    let mut vars = Map::new();
    vars.insert(
        "minAmountUSD".to_string(),
        Value::String(args.min_amount_usd.to_string()),
    );
    vars.insert(
        "startTime".to_string(),
        Value::String(args.start_time.unwrap_or(0).to_string()),
    );
    vars.insert(
        "endTime".to_string(),
        Value::String(args.end_time.unwrap_or(END_OF_TIME).to_string()),
    );

    match &args.pool_id {
        Some(pool_id) => {
            let key = match schema {
                DexSchema::V3 => "poolId",
                DexSchema::V2 => "pairId",
            };
            vars.insert(key.to_string(), Value::String(pool_id.clone()));
            (DexQuery::Swaps, vars)
        }
        None => (DexQuery::SwapsAll, vars),
    }
}

fn order_variables(args: &DexArgs) -> Map<String, Value> {
    let mut vars = Map::new();
    vars.insert(
        "orderBy".to_string(),
        Value::String(args.order_by.clone()),
    );
    vars.insert(
        "orderDirection".to_string(),
        Value::String(args.order_direction.clone()),
    );
    vars
}

fn default_output(config: &DexSubgraph, query_type: DexQueryType) -> PathBuf {
    ["data", config.key, query_type.as_str(), "data.json"]
        .iter()
        .collect()
}

pub async fn run(args: DexArgs) -> Result<String, GraphDexError> {
    let config = find_dex(&args.subgraph).ok_or_else(|| {
        GraphDexError::InvalidArgument(format!(
            "Unknown DEX subgraph '{}'. Run `graphdex list` for the available keys.",
            args.subgraph
        ))
    })?;

    let client = GraphClient::new(config.key, config.subgraph_id, args.api_key.as_deref())?;

    info!(
        subgraph = config.key,
        query_type = args.query_type.as_str(),
        limit = args.limit,
        "Downloading DEX data"
    );

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(config, args.query_type));

    let count = match args.query_type {
        DexQueryType::Pools => {
            let template = dex_query(config.schema, DexQuery::Pools);
            let raw = client
                .fetch_paginated(
                    &template,
                    order_variables(&args),
                    Some(args.limit),
                    DEFAULT_PAGE_SIZE,
                )
                .await;
            let records: Vec<_> = raw.iter().map(|r| format_pool(r, config.schema)).collect();
            write_records(&records, &path).await?;
            records.len()
        }
        DexQueryType::Swaps => {
            let (kind, vars) = swap_variables(&args, config.schema);
            let template = dex_query(config.schema, kind);
            let raw = client
                .fetch_paginated(&template, vars, Some(args.limit), DEFAULT_PAGE_SIZE)
                .await;
            let records: Vec<_> = raw.iter().map(|r| format_swap(r, config.schema)).collect();
            write_records(&records, &path).await?;
            records.len()
        }
        DexQueryType::Tokens => {
            // Token entities are saved as returned by the subgraph.
            let template = dex_query(config.schema, DexQuery::Tokens);
            let records = client
                .fetch_paginated(
                    &template,
                    order_variables(&args),
                    Some(args.limit),
                    DEFAULT_PAGE_SIZE,
                )
                .await;
            write_records(&records, &path).await?;
            records.len()
        }
    };

    Ok(format!(
        "Saved {count} {} record(s) from {} to {}",
        args.query_type.as_str(),
        config.name,
        path.display()
    ))
}
