use cosmwasm_std::Decimal;
use itertools::Itertools;
use migration_periphery::asset_pair::AssetPair;

use crate::error::ContractError;
use crate::orientation::is_valid_denom;

/// Quote asset shared by every migrated pair.
pub const QUOTE_ASSET: &str = "uosmo";
/// Chain id on which [`MAINNET_ASSET_PAIRS`] are migrated.
pub const MAINNET_CHAIN_ID: &str = "osmosis-1";

/// Spread factor of the created concentrated pools, in permille.
const DEFAULT_SPREAD_FACTOR_PERMILLE: u64 = 2;

/// (base asset, linked balancer pool, superfluid)
const MAINNET_ASSET_PAIRS: &[(&str, u64, bool)] = &[
    // ATOM
    (
        "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2",
        1,
        true,
    ),
    // AKT
    (
        "ibc/1480B8FD20AD5FCAE81EA87584D269547DD4D436843C1D20F15E00EB64743EF4",
        3,
        true,
    ),
    // USDC.axl
    (
        "ibc/D189335C6E4A68B513C10AB227BF1C1D38C746766278BA3EEB4FB14124F1D858",
        678,
        true,
    ),
    // WETH.axl
    (
        "ibc/EA1D43981D5C9A1C4AAEA9C23BB1D4FA126BA9BC7020A25E0AE4AA841EA25DC5",
        704,
        true,
    ),
    // WBTC.axl
    (
        "ibc/D1542AA8762DB13087D8364F3EA6509FD6F009A34F00426AF9E4F9FA85CBBF1F",
        712,
        true,
    ),
];

/// Used on every chain other than mainnet, the pools are expected to be the first ones created.
const TEST_ASSET_PAIRS: &[(&str, u64, bool)] = &[
    (
        "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2",
        1,
        true,
    ),
    (
        "ibc/1480B8FD20AD5FCAE81EA87584D269547DD4D436843C1D20F15E00EB64743EF4",
        2,
        false,
    ),
    (
        "ibc/D189335C6E4A68B513C10AB227BF1C1D38C746766278BA3EEB4FB14124F1D858",
        3,
        true,
    ),
];

fn to_asset_pairs(entries: &[(&str, u64, bool)]) -> Vec<AssetPair> {
    entries
        .iter()
        .map(|&(base_asset, linked_classic_pool, superfluid)| {
            AssetPair::new(
                base_asset,
                linked_classic_pool,
                superfluid,
                Decimal::permille(DEFAULT_SPREAD_FACTOR_PERMILLE),
            )
        })
        .collect()
}

/// Validated list of the pairs to migrate, ordered by the linked balancer pool id.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetPairRegistry {
    pairs: Vec<AssetPair>,
}

impl AssetPairRegistry {
    pub fn new(pairs: Vec<AssetPair>) -> Result<Self, ContractError> {
        for pair in &pairs {
            validate_pair(pair)?;
        }

        let pairs = pairs
            .into_iter()
            .sorted_by_key(|pair| pair.linked_classic_pool)
            .collect_vec();

        if let Some((_, duplicate)) = pairs
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.linked_classic_pool == b.linked_classic_pool)
        {
            return Err(ContractError::InvalidAssetPair {
                pool_id: duplicate.linked_classic_pool,
                reason: "balancer pool is listed more than once".to_string(),
            });
        }

        Ok(AssetPairRegistry { pairs })
    }

    /// Returns the hand-curated pairs for the given chain.
    pub fn for_chain(chain_id: &str) -> Result<Self, ContractError> {
        if chain_id == MAINNET_CHAIN_ID {
            Self::new(to_asset_pairs(MAINNET_ASSET_PAIRS))
        } else {
            Self::new(to_asset_pairs(TEST_ASSET_PAIRS))
        }
    }

    pub fn quote_asset(&self) -> &str {
        QUOTE_ASSET
    }

    pub fn pairs(&self) -> &[AssetPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn validate_pair(pair: &AssetPair) -> Result<(), ContractError> {
    let invalid = |reason: &str| ContractError::InvalidAssetPair {
        pool_id: pair.linked_classic_pool,
        reason: reason.to_string(),
    };

    if pair.linked_classic_pool == 0 {
        return Err(invalid("pool ids start at 1"));
    }
    if !is_valid_denom(&pair.base_asset) {
        return Err(invalid("malformed base asset denom"));
    }
    if pair.base_asset == QUOTE_ASSET {
        return Err(invalid("base asset equals the quote asset"));
    }
    if pair.spread_factor >= Decimal::one() {
        return Err(invalid("spread factor must be lower than 1"));
    }

    Ok(())
}
