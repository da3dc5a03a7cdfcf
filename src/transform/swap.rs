use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::DexSchema;
use crate::transform::{big_decimal, pair_label, rfc3339, unix_timestamp};

/// Flattened swap record. V2 subgraphs report separate in/out legs, kept as
/// optional fields alongside the net amounts computed from them.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedSwap {
    pub id: Option<String>,
    pub tx_hash: Option<String>,
    pub block_number: Option<String>,
    pub timestamp: i64,
    pub datetime: Option<String>,
    pub pool_id: Option<String>,
    pub pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount0_in: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount0_out: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount1_in: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount1_out: Option<f64>,
    pub amount0: f64,
    pub amount1: f64,
    pub amount_usd: f64,
    pub sender: Option<String>,
    pub recipient: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTransaction {
    id: Option<String>,
    #[serde(rename = "blockNumber")]
    block_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTokenRef {
    symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPoolRef {
    id: Option<String>,
    token0: Option<RawTokenRef>,
    token1: Option<RawTokenRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSwapV3 {
    id: Option<String>,
    transaction: Option<RawTransaction>,
    timestamp: Option<String>,
    pool: Option<RawPoolRef>,
    sender: Option<String>,
    recipient: Option<String>,
    amount0: Option<String>,
    amount1: Option<String>,
    #[serde(rename = "amountUSD")]
    amount_usd: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSwapV2 {
    id: Option<String>,
    transaction: Option<RawTransaction>,
    timestamp: Option<String>,
    pair: Option<RawPoolRef>,
    sender: Option<String>,
    to: Option<String>,
    #[serde(rename = "amount0In")]
    amount0_in: Option<String>,
    #[serde(rename = "amount1In")]
    amount1_in: Option<String>,
    #[serde(rename = "amount0Out")]
    amount0_out: Option<String>,
    #[serde(rename = "amount1Out")]
    amount1_out: Option<String>,
    #[serde(rename = "amountUSD")]
    amount_usd: Option<String>,
}

pub fn format_swap(raw: &Value, schema: DexSchema) -> FormattedSwap {
    match schema {
        DexSchema::V3 => format_v3(raw),
        DexSchema::V2 => format_v2(raw),
    }
}

fn pool_fields(pool: Option<&RawPoolRef>) -> (Option<String>, String) {
    let id = pool.and_then(|p| p.id.clone());
    let pair = pair_label(
        pool.and_then(|p| p.token0.as_ref()).and_then(|t| t.symbol.as_deref()),
        pool.and_then(|p| p.token1.as_ref()).and_then(|t| t.symbol.as_deref()),
    );
    (id, pair)
}

fn format_v3(raw: &Value) -> FormattedSwap {
    let swap: RawSwapV3 = serde_json::from_value(raw.clone()).unwrap_or_default();
    let timestamp = unix_timestamp(swap.timestamp.as_deref());
    let (pool_id, pair) = pool_fields(swap.pool.as_ref());

    FormattedSwap {
        id: swap.id,
        tx_hash: swap.transaction.as_ref().and_then(|t| t.id.clone()),
        block_number: swap.transaction.as_ref().and_then(|t| t.block_number.clone()),
        timestamp,
        datetime: rfc3339(timestamp),
        pool_id,
        pair,
        amount0_in: None,
        amount0_out: None,
        amount1_in: None,
        amount1_out: None,
        amount0: big_decimal(swap.amount0.as_deref()),
        amount1: big_decimal(swap.amount1.as_deref()),
        amount_usd: big_decimal(swap.amount_usd.as_deref()),
        sender: swap.sender,
        recipient: swap.recipient,
    }
}

fn format_v2(raw: &Value) -> FormattedSwap {
    let swap: RawSwapV2 = serde_json::from_value(raw.clone()).unwrap_or_default();
    let timestamp = unix_timestamp(swap.timestamp.as_deref());
    let (pool_id, pair) = pool_fields(swap.pair.as_ref());

    let amount0_in = big_decimal(swap.amount0_in.as_deref());
    let amount0_out = big_decimal(swap.amount0_out.as_deref());
    let amount1_in = big_decimal(swap.amount1_in.as_deref());
    let amount1_out = big_decimal(swap.amount1_out.as_deref());

    FormattedSwap {
        id: swap.id,
        tx_hash: swap.transaction.as_ref().and_then(|t| t.id.clone()),
        block_number: swap.transaction.as_ref().and_then(|t| t.block_number.clone()),
        timestamp,
        datetime: rfc3339(timestamp),
        pool_id,
        pair,
        amount0_in: Some(amount0_in),
        amount0_out: Some(amount0_out),
        amount1_in: Some(amount1_in),
        amount1_out: Some(amount1_out),
        // Net amounts keep V2 records comparable with V3 signed amounts.
        amount0: amount0_in - amount0_out,
        amount1: amount1_in - amount1_out,
        amount_usd: big_decimal(swap.amount_usd.as_deref()),
        sender: swap.sender,
        recipient: swap.to,
    }
}
