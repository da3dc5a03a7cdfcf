//! `graphdex aave`: liquidation calls and reserves from AAVE subgraphs.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde_json::{Map, Value};
use tracing::info;

use crate::catalog::queries::{AaveQuery, aave_query};
use crate::catalog::{AaveSubgraph, find_aave};
use crate::client::{DEFAULT_PAGE_SIZE, GraphClient};
use crate::error::GraphDexError;
use crate::render::json::write_records;
use crate::transform::aave::{format_liquidation, format_reserve};
use crate::utils::date::parse_timestamp;

const END_OF_TIME: i64 = 9_999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AaveQueryType {
    Liquidations,
    Reserves,
}

impl AaveQueryType {
    fn as_str(self) -> &'static str {
        match self {
            AaveQueryType::Liquidations => "liquidations",
            AaveQueryType::Reserves => "reserves",
        }
    }
}

#[derive(Debug, Args)]
pub struct AaveArgs {
    /// Catalog key of the subgraph to query (see `graphdex list`)
    #[arg(long, default_value = "aave_v3_ethereum")]
    pub subgraph: String,

    /// What to download
    #[arg(long, value_enum, default_value_t = AaveQueryType::Liquidations)]
    pub query_type: AaveQueryType,

    /// Maximum number of records to fetch
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Restrict liquidations to one user address
    #[arg(long)]
    pub user: Option<String>,

    /// Earliest event time (Unix timestamp, YYYY-MM-DD, or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_timestamp)]
    pub start_time: Option<i64>,

    /// Latest event time (same formats as --start-time)
    #[arg(long, value_parser = parse_timestamp)]
    pub end_time: Option<i64>,

    /// Output file (defaults to <output-dir>/aave/<subgraph>/<query_type>/data.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Base directory for the default output layout
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// The Graph API key (falls back to GRAPH_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

fn liquidation_variables(args: &AaveArgs) -> (AaveQuery, Map<String, Value>) {
    let mut vars = Map::new();
    vars.insert(
        "startTime".to_string(),
        Value::String(args.start_time.unwrap_or(0).to_string()),
    );
    vars.insert(
        "endTime".to_string(),
        Value::String(args.end_time.unwrap_or(END_OF_TIME).to_string()),
    );

    match &args.user {
        Some(user) => {
            // Subgraph entity ids are lowercase hex addresses.
            vars.insert("user".to_string(), Value::String(user.to_lowercase()));
            (AaveQuery::Liquidations, vars)
        }
        None => (AaveQuery::LiquidationsAll, vars),
    }
}

fn default_output(args: &AaveArgs, config: &AaveSubgraph) -> PathBuf {
    args.output_dir
        .join("aave")
        .join(config.key)
        .join(args.query_type.as_str())
        .join("data.json")
}

pub async fn run(args: AaveArgs) -> Result<String, GraphDexError> {
    let config = find_aave(&args.subgraph).ok_or_else(|| {
        GraphDexError::InvalidArgument(format!(
            "Unknown AAVE subgraph '{}'. Run `graphdex list` for the available keys.",
            args.subgraph
        ))
    })?;

    let client = GraphClient::new(config.key, config.subgraph_id, args.api_key.as_deref())?;

    info!(
        subgraph = config.key,
        query_type = args.query_type.as_str(),
        limit = args.limit,
        "Downloading AAVE data"
    );

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args, config));

    let count = match args.query_type {
        AaveQueryType::Liquidations => {
            let (kind, vars) = liquidation_variables(&args);
            let template = aave_query(kind);
            let raw = client
                .fetch_paginated(&template, vars, Some(args.limit), DEFAULT_PAGE_SIZE)
                .await;
            let records: Vec<_> = raw.iter().map(format_liquidation).collect();
            write_records(&records, &path).await?;
            records.len()
        }
        AaveQueryType::Reserves => {
            let template = aave_query(AaveQuery::Reserves);
            let raw = client
                .fetch_paginated(&template, Map::new(), Some(args.limit), DEFAULT_PAGE_SIZE)
                .await;
            let records: Vec<_> = raw.iter().map(format_reserve).collect();
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

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AaveArgs {
        AaveArgs {
            subgraph: "aave_v3_ethereum".to_string(),
            query_type: AaveQueryType::Liquidations,
            limit: 100,
            user: None,
            start_time: None,
            end_time: None,
            output: None,
            output_dir: PathBuf::from("data"),
            api_key: None,
        }
    }

    #[test]
    fn user_filter_switches_query_and_lowercases_the_address() {
        let mut a = args();
        a.user = Some("0xDeAdBeEf".to_string());

        let (kind, vars) = liquidation_variables(&a);
        assert_eq!(kind, AaveQuery::Liquidations);
        assert_eq!(vars["user"], "0xdeadbeef");
    }

    #[test]
    fn no_user_filter_uses_the_unfiltered_query() {
        let (kind, vars) = liquidation_variables(&args());
        assert_eq!(kind, AaveQuery::LiquidationsAll);
        assert!(!vars.contains_key("user"));
        assert_eq!(vars["startTime"], "0");
        assert_eq!(vars["endTime"], "9999999999");
    }

    #[test]
    fn default_output_respects_the_base_directory() {
        let mut a = args();
        a.output_dir = PathBuf::from("/tmp/exports");
        let config = find_aave("aave_v3_ethereum").unwrap();
        assert_eq!(
            default_output(&a, config),
            PathBuf::from("/tmp/exports/aave/aave_v3_ethereum/liquidations/data.json")
        );
    }

    #[tokio::test]
    async fn unknown_subgraph_key_is_an_argument_error() {
        let mut a = args();
        a.subgraph = "aave_v9_moonbase".to_string();
        let err = run(a).await.expect_err("unknown key");
        assert!(matches!(err, GraphDexError::InvalidArgument(_)));
    }
}
