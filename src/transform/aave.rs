use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transform::{big_int, rfc3339, ser_big_int, unix_timestamp};

/// Flattened AAVE liquidation event.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedLiquidation {
    pub id: Option<String>,
    pub timestamp: i64,
    pub datetime: Option<String>,
    pub user: Option<String>,
    pub reserve_id: Option<String>,
    pub reserve_underlying_asset: Option<String>,
    pub collateral_asset: Option<String>,
    pub debt_asset: Option<String>,
    #[serde(serialize_with = "ser_big_int")]
    pub debt_to_cover: i128,
    #[serde(serialize_with = "ser_big_int")]
    pub liquidated_collateral_amount: i128,
    #[serde(serialize_with = "ser_big_int")]
    pub profit: i128,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattedReserve {
    pub id: Option<String>,
    pub underlying_asset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUserRef {
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReserveRef {
    id: Option<String>,
    #[serde(rename = "underlyingAsset")]
    underlying_asset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLiquidation {
    id: Option<String>,
    timestamp: Option<String>,
    user: Option<RawUserRef>,
    reserve: Option<RawReserveRef>,
    #[serde(rename = "collateralAsset")]
    collateral_asset: Option<String>,
    #[serde(rename = "debtAsset")]
    debt_asset: Option<String>,
    #[serde(rename = "debtToCover")]
    debt_to_cover: Option<String>,
    #[serde(rename = "liquidatedCollateralAmount")]
    liquidated_collateral_amount: Option<String>,
    profit: Option<String>,
}

pub fn format_liquidation(raw: &Value) -> FormattedLiquidation {
    let liq: RawLiquidation = serde_json::from_value(raw.clone()).unwrap_or_default();
    let timestamp = unix_timestamp(liq.timestamp.as_deref());

    FormattedLiquidation {
        id: liq.id,
        timestamp,
        datetime: rfc3339(timestamp),
        user: liq.user.and_then(|u| u.id),
        reserve_id: liq.reserve.as_ref().and_then(|r| r.id.clone()),
        reserve_underlying_asset: liq.reserve.and_then(|r| r.underlying_asset),
        collateral_asset: liq.collateral_asset,
        debt_asset: liq.debt_asset,
        debt_to_cover: big_int(liq.debt_to_cover.as_deref()),
        liquidated_collateral_amount: big_int(liq.liquidated_collateral_amount.as_deref()),
        profit: big_int(liq.profit.as_deref()),
    }
}

pub fn format_reserve(raw: &Value) -> FormattedReserve {
    let reserve: RawReserveRef = serde_json::from_value(raw.clone()).unwrap_or_default();
    FormattedReserve {
        id: reserve.id,
        underlying_asset: reserve.underlying_asset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_user_and_reserve_references() {
        let raw = json!({
            "id": "0xliq-1",
            "timestamp": "1704067200",
            "user": {"id": "0xborrower"},
            "reserve": {"id": "0xreserve", "underlyingAsset": "0xdai"},
            "collateralAsset": "0xweth",
            "debtAsset": "0xdai",
            "debtToCover": "12000000000000000000000",
            "liquidatedCollateralAmount": "4100000000000000000",
            "profit": "205000000000000000"
        });

        let liq = format_liquidation(&raw);
        assert_eq!(liq.user.as_deref(), Some("0xborrower"));
        assert_eq!(liq.reserve_id.as_deref(), Some("0xreserve"));
        assert_eq!(liq.reserve_underlying_asset.as_deref(), Some("0xdai"));
        assert_eq!(liq.debt_to_cover, 12_000_000_000_000_000_000_000_i128);
        assert_eq!(liq.liquidated_collateral_amount, 4_100_000_000_000_000_000_i128);
        assert_eq!(liq.profit, 205_000_000_000_000_000_i128);
        assert_eq!(liq.datetime.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn big_int_amounts_serialize_as_decimal_strings() {
        let liq = format_liquidation(&json!({
            "id": "x",
            "timestamp": "1",
            "debtToCover": "340282366920938463463374607431768211"
        }));

        let rendered = serde_json::to_value(&liq).unwrap();
        assert_eq!(
            rendered["debt_to_cover"],
            "340282366920938463463374607431768211"
        );
    }

    #[test]
    fn formats_reserve_record() {
        let reserve = format_reserve(&json!({
            "id": "0xreserve",
            "underlyingAsset": "0xusdc"
        }));
        assert_eq!(reserve.id.as_deref(), Some("0xreserve"));
        assert_eq!(reserve.underlying_asset.as_deref(), Some("0xusdc"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let liq = format_liquidation(&json!({}));
        assert!(liq.id.is_none());
        assert_eq!(liq.debt_to_cover, 0);
        assert!(liq.datetime.is_none());
    }
}
