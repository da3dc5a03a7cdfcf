//! Static subgraph endpoint catalogs for The Graph decentralized network.

pub(crate) mod queries;

/// Which query schema a DEX subgraph exposes.
///
/// V3-style subgraphs (Uniswap V3 and forks) index `pools` with signed swap
/// amounts; V2-style subgraphs index `pairs` with separate in/out swap legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexSchema {
    V2,
    V3,
}

#[derive(Debug, Clone, Copy)]
pub struct DexSubgraph {
    pub key: &'static str,
    pub name: &'static str,
    pub subgraph_id: &'static str,
    pub description: &'static str,
    pub schema: DexSchema,
}

#[derive(Debug, Clone, Copy)]
pub struct AaveSubgraph {
    pub key: &'static str,
    pub name: &'static str,
    pub subgraph_id: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub network: &'static str,
}

pub const GRAPH_GATEWAY_BASE: &str = "https://gateway.thegraph.com/api";

/// Builds the concrete query URL for a subgraph by substituting the API key
/// into the gateway template.
pub fn gateway_url(api_key: &str, subgraph_id: &str) -> String {
    format!("{GRAPH_GATEWAY_BASE}/{api_key}/subgraphs/id/{subgraph_id}")
}

pub static DEX_SUBGRAPHS: &[DexSubgraph] = &[
    DexSubgraph {
        key: "uniswap_v3_ethereum",
        name: "Uniswap V3 Ethereum",
        subgraph_id: "5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV",
        description: "Uniswap V3 protocol on Ethereum mainnet",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "uniswap_v3_arbitrum",
        name: "Uniswap V3 Arbitrum",
        subgraph_id: "FbCGRftH4a3yZugY7TnbYgPJVEv2LvMT6oF1fxPe9aJM",
        description: "Uniswap V3 protocol on Arbitrum One",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "uniswap_v3_polygon",
        name: "Uniswap V3 Polygon",
        subgraph_id: "3hCPRGf4z88VC5rsBKU5AA9FBBq5nF3jbKJG7VZCbhjm",
        description: "Uniswap V3 protocol on Polygon",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "uniswap_v3_base",
        name: "Uniswap V3 Base",
        subgraph_id: "43Hwfi3dJSoGpyas9VwNoDAv55yjgGrPpNSmbQZArzMG",
        description: "Uniswap V3 protocol on Base",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "uniswap_v3_optimism",
        name: "Uniswap V3 Optimism",
        subgraph_id: "Cghf4LfVqPiFw6fp6Y5X5Ubc8UpmUhSfJL82zwiBFLaj",
        description: "Uniswap V3 protocol on Optimism",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "uniswap_v3_celo",
        name: "Uniswap V3 Celo",
        subgraph_id: "ESdrTJ3twMwWVoQ1hUE2u7PugEHX3QkenudD6aXCkDQ4",
        description: "Uniswap V3 protocol on Celo",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "uniswap_v3_avalanche",
        name: "Uniswap V3 Avalanche",
        subgraph_id: "GVH9h9KZ9CqheUEL93qMbq7QwgoBu32QXQDPR6bev4Eo",
        description: "Uniswap V3 protocol on Avalanche",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "uniswap_v3_bsc",
        name: "Uniswap V3 BSC",
        subgraph_id: "F85MNzUGYqgSHSHRGgeVMNsdnW1KtZSVgFULumXRZTw2",
        description: "Uniswap V3 protocol on BNB Smart Chain",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "pancakeswap_v3_bsc",
        name: "PancakeSwap V3 BSC",
        subgraph_id: "Hv1GncLY5docZoGtXjo4kwbTvxm3MAhVZqBZE4sUT9eZ",
        description: "PancakeSwap V3 on BNB Smart Chain",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "pancakeswap_v3_ethereum",
        name: "PancakeSwap V3 Ethereum",
        subgraph_id: "CJYGNhb7RvnhfBDjqpRnD3oxgyhibzc7fkAMa38YV3oS",
        description: "PancakeSwap V3 on Ethereum mainnet",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "pancakeswap_v3_arbitrum",
        name: "PancakeSwap V3 Arbitrum",
        subgraph_id: "251MHFNN1rwjErXD2efWMpNS73SANZN8Ua192zw6iXve",
        description: "PancakeSwap V3 on Arbitrum One",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "pancakeswap_v3_polygon_zkevm",
        name: "PancakeSwap V3 Polygon zkEVM",
        subgraph_id: "7HroSeAFxfJtYqpbgcfAnNSgkzzcZXZi6c75qLPheKzQ",
        description: "PancakeSwap V3 on Polygon zkEVM",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "pancakeswap_v3_zksync",
        name: "PancakeSwap V3 zkSync",
        subgraph_id: "3dKr3tYxTuwiRLkU9vPj3MvZeUmeuGgWURbFC72ZBpYY",
        description: "PancakeSwap V3 on zkSync Era",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "pancakeswap_v3_linea",
        name: "PancakeSwap V3 Linea",
        subgraph_id: "6gCTVX98K3A9Hf9zjvgEKwjz7rtD4C1V173RYEdbeMFX",
        description: "PancakeSwap V3 on Linea",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "pancakeswap_v3_base",
        name: "PancakeSwap V3 Base",
        subgraph_id: "BHWNsedAHtmTCzXxCCDfhPmm6iN9rxUhoRHdHKyujic3",
        description: "PancakeSwap V3 on Base",
        schema: DexSchema::V3,
    },
    DexSubgraph {
        key: "pancakeswap_v2_ethereum",
        name: "PancakeSwap V2 Ethereum",
        subgraph_id: "9opY17WnEPD4REcC43yHycQthSeUMQE26wyoeMjZTLEx",
        description: "PancakeSwap V2 on Ethereum mainnet",
        schema: DexSchema::V2,
    },
    DexSubgraph {
        key: "pancakeswap_v2_arbitrum",
        name: "PancakeSwap V2 Arbitrum",
        subgraph_id: "EsL7geTRcA3LaLLM9EcMFzYbUgnvf8RixoEEGErrodB3",
        description: "PancakeSwap V2 on Arbitrum One",
        schema: DexSchema::V2,
    },
    DexSubgraph {
        key: "pancakeswap_v2_polygon_zkevm",
        name: "PancakeSwap V2 Polygon zkEVM",
        subgraph_id: "37WmH5kBu6QQytRpMwLJMGPRbXvHgpuZsWqswW4Finc2",
        description: "PancakeSwap V2 on Polygon zkEVM",
        schema: DexSchema::V2,
    },
    DexSubgraph {
        key: "pancakeswap_v2_zksync",
        name: "PancakeSwap V2 zkSync",
        subgraph_id: "6dU6WwEz22YacyzbTbSa3CECCmaD8G7oQ8aw6MYd5VKU",
        description: "PancakeSwap V2 on zkSync Era",
        schema: DexSchema::V2,
    },
    DexSubgraph {
        key: "pancakeswap_v2_linea",
        name: "PancakeSwap V2 Linea",
        subgraph_id: "Eti2Z5zVEdARnuUzjCbv4qcimTLysAizsqH3s6cBfPjB",
        description: "PancakeSwap V2 on Linea",
        schema: DexSchema::V2,
    },
    DexSubgraph {
        key: "pancakeswap_v2_base",
        name: "PancakeSwap V2 Base",
        subgraph_id: "2NjL7L4CmQaGJSacM43ofmH6ARf6gJoBeBaJtz9eWAQ9",
        description: "PancakeSwap V2 on Base",
        schema: DexSchema::V2,
    },
];

pub static AAVE_SUBGRAPHS: &[AaveSubgraph] = &[AaveSubgraph {
    key: "aave_v3_ethereum",
    name: "AAVE V3 Ethereum",
    subgraph_id: "9JLB7VbhJaGRtiFVvA6b4vDDwsfWF5rbY8Gd3zAUW1T7",
    description: "AAVE V3 protocol on Ethereum mainnet - liquidations, reserves, users",
    version: "v3",
    network: "ethereum",
}];

pub fn find_dex(key: &str) -> Option<&'static DexSubgraph> {
    DEX_SUBGRAPHS.iter().find(|s| s.key == key)
}

pub fn find_aave(key: &str) -> Option<&'static AaveSubgraph> {
    AAVE_SUBGRAPHS.iter().find(|s| s.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_url_substitutes_key_and_id() {
        let url = gateway_url("my-key", "5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV");
        assert_eq!(
            url,
            "https://gateway.thegraph.com/api/my-key/subgraphs/id/5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV"
        );
    }

    #[test]
    fn find_dex_resolves_known_keys() {
        let uni = find_dex("uniswap_v3_ethereum").expect("uniswap v3 ethereum");
        assert_eq!(uni.schema, DexSchema::V3);

        let cake = find_dex("pancakeswap_v2_base").expect("pancakeswap v2 base");
        assert_eq!(cake.schema, DexSchema::V2);

        assert!(find_dex("sushiswap_v9_moonbase").is_none());
    }

    #[test]
    fn find_aave_resolves_default_key() {
        let aave = find_aave("aave_v3_ethereum").expect("aave v3 ethereum");
        assert_eq!(aave.version, "v3");
        assert_eq!(aave.network, "ethereum");
    }

    #[test]
    fn catalog_keys_are_unique() {
        let mut keys: Vec<&str> = DEX_SUBGRAPHS.iter().map(|s| s.key).collect();
        keys.extend(AAVE_SUBGRAPHS.iter().map(|s| s.key));
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }
}
