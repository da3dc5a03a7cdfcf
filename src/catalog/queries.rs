//! GraphQL query templates, keyed by schema variant and query kind.

use super::DexSchema;

/// A GraphQL query plus the response key holding its result array.
#[derive(Debug, Clone, Copy)]
pub struct QueryTemplate {
    pub text: &'static str,
    pub entity: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexQuery {
    Pools,
    Swaps,
    SwapsAll,
    Tokens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AaveQuery {
    Liquidations,
    LiquidationsAll,
    Reserves,
}

const POOLS_V3: &str = r#"
query GetPools($first: Int!, $skip: Int!, $orderBy: String!, $orderDirection: String!) {
    pools(
        first: $first
        skip: $skip
        orderBy: $orderBy
        orderDirection: $orderDirection
    ) {
        id
        token0 {
            id
            symbol
            name
            decimals
        }
        token1 {
            id
            symbol
            name
            decimals
        }
        feeTier
        liquidity
        sqrtPrice
        token0Price
        token1Price
        volumeUSD
        txCount
        totalValueLockedUSD
        createdAtTimestamp
    }
}
"#;

const SWAPS_V3: &str = r#"
query GetSwaps($first: Int!, $skip: Int!, $poolId: String, $minAmountUSD: String!, $startTime: BigInt, $endTime: BigInt) {
    swaps(
        first: $first
        skip: $skip
        where: {
            pool_: { id: $poolId }
            amountUSD_gte: $minAmountUSD
            timestamp_gte: $startTime
            timestamp_lte: $endTime
        }
        orderBy: timestamp
        orderDirection: desc
    ) {
        id
        transaction {
            id
            blockNumber
            timestamp
            gasUsed
            gasPrice
        }
        timestamp
        pool {
            id
            token0 {
                symbol
            }
            token1 {
                symbol
            }
        }
        sender
        recipient
        origin
        amount0
        amount1
        amountUSD
        sqrtPriceX96
        tick
        logIndex
    }
}
"#;

const SWAPS_ALL_V3: &str = r#"
query GetSwapsAll($first: Int!, $skip: Int!, $minAmountUSD: String!, $startTime: BigInt, $endTime: BigInt) {
    swaps(
        first: $first
        skip: $skip
        where: {
            amountUSD_gte: $minAmountUSD
            timestamp_gte: $startTime
            timestamp_lte: $endTime
        }
        orderBy: timestamp
        orderDirection: desc
    ) {
        id
        transaction {
            id
            blockNumber
            timestamp
        }
        timestamp
        pool {
            id
            token0 {
                symbol
            }
            token1 {
                symbol
            }
        }
        sender
        recipient
        amount0
        amount1
        amountUSD
    }
}
"#;

const TOKENS_V3: &str = r#"
query GetTokens($first: Int!, $skip: Int!, $orderBy: String!, $orderDirection: String!) {
    tokens(
        first: $first
        skip: $skip
        orderBy: $orderBy
        orderDirection: $orderDirection
    ) {
        id
        symbol
        name
        decimals
        totalSupply
        volume
        volumeUSD
        untrackedVolumeUSD
        feesUSD
        txCount
        poolCount
        totalValueLocked
        totalValueLockedUSD
        derivedETH
    }
}
"#;

const POOLS_V2: &str = r#"
query GetPairs($first: Int!, $skip: Int!, $orderBy: String!, $orderDirection: String!) {
    pairs(
        first: $first
        skip: $skip
        orderBy: $orderBy
        orderDirection: $orderDirection
    ) {
        id
        token0 {
            id
            symbol
            name
            decimals
        }
        token1 {
            id
            symbol
            name
            decimals
        }
        reserve0
        reserve1
        reserveUSD
        token0Price
        token1Price
        volumeUSD
        txCount
        createdAtTimestamp
    }
}
"#;

const SWAPS_V2: &str = r#"
query GetSwaps($first: Int!, $skip: Int!, $pairId: String, $minAmountUSD: String!, $startTime: BigInt, $endTime: BigInt) {
    swaps(
        first: $first
        skip: $skip
        where: {
            pair_: { id: $pairId }
            amountUSD_gte: $minAmountUSD
            timestamp_gte: $startTime
            timestamp_lte: $endTime
        }
        orderBy: timestamp
        orderDirection: desc
    ) {
        id
        transaction {
            id
            blockNumber
            timestamp
        }
        timestamp
        pair {
            id
            token0 {
                symbol
            }
            token1 {
                symbol
            }
        }
        sender
        to
        amount0In
        amount1In
        amount0Out
        amount1Out
        amountUSD
        logIndex
    }
}
"#;

const SWAPS_ALL_V2: &str = r#"
query GetSwapsAll($first: Int!, $skip: Int!, $minAmountUSD: String!, $startTime: BigInt, $endTime: BigInt) {
    swaps(
        first: $first
        skip: $skip
        where: {
            amountUSD_gte: $minAmountUSD
            timestamp_gte: $startTime
            timestamp_lte: $endTime
        }
        orderBy: timestamp
        orderDirection: desc
    ) {
        id
        transaction {
            id
            blockNumber
            timestamp
        }
        timestamp
        pair {
            id
            token0 {
                symbol
            }
            token1 {
                symbol
            }
        }
        sender
        to
        amount0In
        amount1In
        amount0Out
        amount1Out
        amountUSD
    }
}
"#;

const TOKENS_V2: &str = r#"
query GetTokens($first: Int!, $skip: Int!, $orderBy: String!, $orderDirection: String!) {
    tokens(
        first: $first
        skip: $skip
        orderBy: $orderBy
        orderDirection: $orderDirection
    ) {
        id
        symbol
        name
        decimals
        tradeVolume
        tradeVolumeUSD
        untrackedVolumeUSD
        txCount
        totalLiquidity
        derivedETH
    }
}
"#;

const LIQUIDATIONS: &str = r#"
query GetLiquidations($first: Int!, $skip: Int!, $user: String, $startTime: BigInt, $endTime: BigInt) {
    liquidations(
        first: $first
        skip: $skip
        where: {
            user_: { id: $user }
            timestamp_gte: $startTime
            timestamp_lte: $endTime
        }
        orderBy: timestamp
        orderDirection: desc
    ) {
        id
        timestamp
        user {
            id
        }
        reserve {
            id
            underlyingAsset
        }
        collateralAsset
        debtAsset
        debtToCover
        liquidatedCollateralAmount
        profit
    }
}
"#;

const LIQUIDATIONS_ALL: &str = r#"
query GetLiquidationsAll($first: Int!, $skip: Int!, $startTime: BigInt, $endTime: BigInt) {
    liquidations(
        first: $first
        skip: $skip
        where: {
            timestamp_gte: $startTime
            timestamp_lte: $endTime
        }
        orderBy: timestamp
        orderDirection: desc
    ) {
        id
        timestamp
        user {
            id
        }
        reserve {
            id
            underlyingAsset
        }
        collateralAsset
        debtAsset
        debtToCover
        liquidatedCollateralAmount
        profit
    }
}
"#;

const RESERVES: &str = r#"
query GetReserves($first: Int!, $skip: Int!) {
    reserves(
        first: $first
        skip: $skip
    ) {
        id
        underlyingAsset
    }
}
"#;

/// Introspection query listing the fields available on the root Query type.
pub const QUERY_FIELDS: &str = "{ __schema { queryType { fields { name } } } }";

pub fn dex_query(schema: DexSchema, kind: DexQuery) -> QueryTemplate {
    match (schema, kind) {
        (DexSchema::V3, DexQuery::Pools) => QueryTemplate {
            text: POOLS_V3,
            entity: "pools",
        },
        (DexSchema::V3, DexQuery::Swaps) => QueryTemplate {
            text: SWAPS_V3,
            entity: "swaps",
        },
        (DexSchema::V3, DexQuery::SwapsAll) => QueryTemplate {
            text: SWAPS_ALL_V3,
            entity: "swaps",
        },
        (DexSchema::V3, DexQuery::Tokens) => QueryTemplate {
            text: TOKENS_V3,
            entity: "tokens",
        },
        (DexSchema::V2, DexQuery::Pools) => QueryTemplate {
            text: POOLS_V2,
            entity: "pairs",
        },
        (DexSchema::V2, DexQuery::Swaps) => QueryTemplate {
            text: SWAPS_V2,
            entity: "swaps",
        },
        (DexSchema::V2, DexQuery::SwapsAll) => QueryTemplate {
            text: SWAPS_ALL_V2,
            entity: "swaps",
        },
        (DexSchema::V2, DexQuery::Tokens) => QueryTemplate {
            text: TOKENS_V2,
            entity: "tokens",
        },
    }
}

pub fn aave_query(kind: AaveQuery) -> QueryTemplate {
    match kind {
        AaveQuery::Liquidations => QueryTemplate {
            text: LIQUIDATIONS,
            entity: "liquidations",
        },
        AaveQuery::LiquidationsAll => QueryTemplate {
            text: LIQUIDATIONS_ALL,
            entity: "liquidations",
        },
        AaveQuery::Reserves => QueryTemplate {
            text: RESERVES,
            entity: "reserves",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v3_pools_query_targets_pools_entity() {
        let template = dex_query(DexSchema::V3, DexQuery::Pools);
        assert_eq!(template.entity, "pools");
        assert!(template.text.contains("pools("));
        assert!(template.text.contains("feeTier"));
    }

    #[test]
    fn v2_pools_query_targets_pairs_entity() {
        let template = dex_query(DexSchema::V2, DexQuery::Pools);
        assert_eq!(template.entity, "pairs");
        assert!(template.text.contains("pairs("));
        assert!(template.text.contains("reserveUSD"));
    }

    #[test]
    fn v2_swaps_query_uses_in_out_legs() {
        let template = dex_query(DexSchema::V2, DexQuery::Swaps);
        assert_eq!(template.entity, "swaps");
        assert!(template.text.contains("amount0In"));
        assert!(template.text.contains("pair_: { id: $pairId }"));
    }

    #[test]
    fn v3_swaps_query_filters_by_pool() {
        let template = dex_query(DexSchema::V3, DexQuery::Swaps);
        assert!(template.text.contains("pool_: { id: $poolId }"));
        assert!(template.text.contains("amountUSD_gte"));
    }

    #[test]
    fn aave_queries_target_expected_entities() {
        assert_eq!(aave_query(AaveQuery::Liquidations).entity, "liquidations");
        assert_eq!(
            aave_query(AaveQuery::LiquidationsAll).entity,
            "liquidations"
        );
        assert_eq!(aave_query(AaveQuery::Reserves).entity, "reserves");
        assert!(
            aave_query(AaveQuery::Liquidations)
                .text
                .contains("user_: { id: $user }")
        );
    }
}
