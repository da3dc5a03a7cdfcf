use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::DexSchema;
use crate::transform::{big_decimal, pair_label};

// Fixed 0.3% fee on V2-style pairs; V3 pools carry a per-pool fee tier.
const V2_FEE_FRACTION: f64 = 0.003;
const V3_FEE_TIER_SCALE: f64 = 10_000.0;

#[derive(Debug, Clone, Serialize)]
pub struct TokenMeta {
    pub address: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<String>,
}

/// Flattened pool record. V2 pairs report reserves; V3 pools report TVL
/// directly. `tvl_usd` is populated for both (V2 from `reserveUSD`).
#[derive(Debug, Clone, Serialize)]
pub struct FormattedPool {
    pub id: Option<String>,
    pub pair: String,
    pub token0: TokenMeta,
    pub token1: TokenMeta,
    pub fee_tier: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve0: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve1: Option<f64>,
    pub token0_price: f64,
    pub token1_price: f64,
    pub volume_usd: f64,
    pub tvl_usd: f64,
    pub tx_count: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawToken {
    id: Option<String>,
    symbol: Option<String>,
    name: Option<String>,
    decimals: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPoolV3 {
    id: Option<String>,
    token0: Option<RawToken>,
    token1: Option<RawToken>,
    #[serde(rename = "feeTier")]
    fee_tier: Option<String>,
    #[serde(rename = "token0Price")]
    token0_price: Option<String>,
    #[serde(rename = "token1Price")]
    token1_price: Option<String>,
    #[serde(rename = "volumeUSD")]
    volume_usd: Option<String>,
    #[serde(rename = "totalValueLockedUSD")]
    total_value_locked_usd: Option<String>,
    #[serde(rename = "txCount")]
    tx_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPairV2 {
    id: Option<String>,
    token0: Option<RawToken>,
    token1: Option<RawToken>,
    reserve0: Option<String>,
    reserve1: Option<String>,
    #[serde(rename = "reserveUSD")]
    reserve_usd: Option<String>,
    #[serde(rename = "token0Price")]
    token0_price: Option<String>,
    #[serde(rename = "token1Price")]
    token1_price: Option<String>,
    #[serde(rename = "volumeUSD")]
    volume_usd: Option<String>,
    #[serde(rename = "txCount")]
    tx_count: Option<String>,
}

fn token_meta(token: Option<RawToken>) -> TokenMeta {
    let token = token.unwrap_or_default();
    TokenMeta {
        address: token.id,
        symbol: token.symbol,
        name: token.name,
        decimals: token.decimals,
    }
}

pub fn format_pool(raw: &Value, schema: DexSchema) -> FormattedPool {
    match schema {
        DexSchema::V3 => format_v3(raw),
        DexSchema::V2 => format_v2(raw),
    }
}

fn format_v3(raw: &Value) -> FormattedPool {
    let pool: RawPoolV3 = serde_json::from_value(raw.clone()).unwrap_or_default();
    let pair = pair_label(
        pool.token0.as_ref().and_then(|t| t.symbol.as_deref()),
        pool.token1.as_ref().and_then(|t| t.symbol.as_deref()),
    );
    let fee_tier = pool
        .fee_tier
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
        / V3_FEE_TIER_SCALE;

    FormattedPool {
        id: pool.id,
        pair,
        token0: token_meta(pool.token0),
        token1: token_meta(pool.token1),
        fee_tier,
        reserve0: None,
        reserve1: None,
        token0_price: big_decimal(pool.token0_price.as_deref()),
        token1_price: big_decimal(pool.token1_price.as_deref()),
        volume_usd: big_decimal(pool.volume_usd.as_deref()),
        tvl_usd: big_decimal(pool.total_value_locked_usd.as_deref()),
        tx_count: pool
            .tx_count
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0),
    }
}

fn format_v2(raw: &Value) -> FormattedPool {
    let pair_record: RawPairV2 = serde_json::from_value(raw.clone()).unwrap_or_default();
    let pair = pair_label(
        pair_record.token0.as_ref().and_then(|t| t.symbol.as_deref()),
        pair_record.token1.as_ref().and_then(|t| t.symbol.as_deref()),
    );

    FormattedPool {
        id: pair_record.id,
        pair,
        token0: token_meta(pair_record.token0),
        token1: token_meta(pair_record.token1),
        fee_tier: V2_FEE_FRACTION,
        reserve0: Some(big_decimal(pair_record.reserve0.as_deref())),
        reserve1: Some(big_decimal(pair_record.reserve1.as_deref())),
        token0_price: big_decimal(pair_record.token0_price.as_deref()),
        token1_price: big_decimal(pair_record.token1_price.as_deref()),
        volume_usd: big_decimal(pair_record.volume_usd.as_deref()),
        tvl_usd: big_decimal(pair_record.reserve_usd.as_deref()),
        tx_count: pair_record
            .tx_count
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0),
    }
}
