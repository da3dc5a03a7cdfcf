//! Command-line surface: argument parsing and per-command dispatch.

pub mod aave;
pub mod dex;
pub mod schema;

use clap::{Parser, Subcommand};

use crate::catalog::{AAVE_SUBGRAPHS, DEX_SUBGRAPHS, DexSchema};

#[derive(Debug, Parser)]
#[command(
    name = "graphdex",
    version,
    about = "Download DEX and AAVE data from The Graph subgraphs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download pools, swaps, or tokens from a DEX subgraph
    Dex(dex::DexArgs),
    /// Download liquidations or reserves from an AAVE subgraph
    Aave(aave::AaveArgs),
    /// List the built-in subgraph catalog
    List,
    /// Introspect the query fields a subgraph exposes
    Schema(schema::SchemaArgs),
}

pub async fn run(cli: Cli) -> anyhow::Result<String> {
    match cli.command {
        Commands::Dex(args) => Ok(dex::run(args).await?),
        Commands::Aave(args) => Ok(aave::run(args).await?),
        Commands::List => Ok(render_catalog()),
        Commands::Schema(args) => Ok(schema::run(args).await?),
    }
}

/// Renders the built-in catalog. Purely local; no network access.
fn render_catalog() -> String {
    let mut out = String::new();

    out.push_str("DEX subgraphs:\n");
    for s in DEX_SUBGRAPHS {
        let schema = match s.schema {
            DexSchema::V2 => "v2",
            DexSchema::V3 => "v3",
        };
        out.push_str(&format!(
            "  {:<32} {:<28} schema={}  id={}\n",
            s.key, s.name, schema, s.subgraph_id
        ));
    }

    out.push_str("\nAAVE subgraphs:\n");
    for s in AAVE_SUBGRAPHS {
        out.push_str(&format!(
            "  {:<32} {:<28} {} on {}  id={}\n",
            s.key, s.name, s.version, s.network, s.subgraph_id
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn catalog_listing_covers_every_entry() {
        let listing = render_catalog();
        for s in DEX_SUBGRAPHS {
            assert!(listing.contains(s.key), "missing {}", s.key);
        }
        for s in AAVE_SUBGRAPHS {
            assert!(listing.contains(s.key), "missing {}", s.key);
        }
    }

    #[test]
    fn dex_defaults_parse() {
        let cli = Cli::try_parse_from(["graphdex", "dex"]).expect("defaults");
        match cli.command {
            Commands::Dex(args) => {
                assert_eq!(args.subgraph, "uniswap_v3_ethereum");
                assert_eq!(args.query_type, dex::DexQueryType::Swaps);
                assert_eq!(args.limit, 100);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn aave_accepts_time_bounds_in_multiple_formats() {
        let cli = Cli::try_parse_from([
            "graphdex",
            "aave",
            "--start-time",
            "2024-01-01",
            "--end-time",
            "1706745600",
        ])
        .expect("time bounds");
        match cli.command {
            Commands::Aave(args) => {
                assert_eq!(args.start_time, Some(1_704_067_200));
                assert_eq!(args.end_time, Some(1_706_745_600));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn malformed_time_bound_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["graphdex", "dex", "--start-time", "soon"]).is_err());
    }
}
