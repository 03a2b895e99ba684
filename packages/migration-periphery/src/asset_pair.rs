use cosmwasm_schema::cw_serde;
use cosmwasm_std::Decimal;

/// Describes a single balancer pool scheduled to get a concentrated liquidity twin.
#[cw_serde]
pub struct AssetPair {
    /// The non-quote asset of the pair
    pub base_asset: String,
    /// Id of the existing balancer pool trading `base_asset` against the quote asset
    pub linked_classic_pool: u64,
    /// Whether the liquidity share of the new pool is registered as a superfluid asset
    pub superfluid: bool,
    /// Spread factor of the new concentrated pool
    pub spread_factor: Decimal,
}

impl AssetPair {
    pub fn new(
        base_asset: impl Into<String>,
        linked_classic_pool: u64,
        superfluid: bool,
        spread_factor: Decimal,
    ) -> Self {
        AssetPair {
            base_asset: base_asset.into(),
            linked_classic_pool,
            superfluid,
            spread_factor,
        }
    }
}
