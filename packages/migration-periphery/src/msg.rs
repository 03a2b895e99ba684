use crate::asset_pair::AssetPair;
use crate::pool::{BalancerToConcentratedLink, Pool, SuperfluidAsset};
use crate::twap::TwapRecord;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Decimal, Decimal256, Uint128};

/// Tick spacing of the created concentrated pools when none is configured.
pub const DEFAULT_TICK_SPACING: u64 = 100;
/// One unit of the quote asset in its micro denomination.
pub const DEFAULT_FUNDING_NOTIONAL: u128 = 1_000_000;

/// Decides which asset of a pair occupies the first slot of a concentrated pool.
#[cw_serde]
pub enum OrderingRule {
    /// Denoms are sorted byte-wise
    Lexicographic {},
    /// The quote denom always goes to the second slot
    QuoteLast { quote_denom: String },
    /// The quote denom always goes to the first slot
    QuoteFirst { quote_denom: String },
}

impl Default for OrderingRule {
    fn default() -> Self {
        OrderingRule::Lexicographic {}
    }
}

#[cw_serde]
pub struct Config {
    /// Address that instantiated the migration
    pub owner: Addr,
    /// Name of the upgrade plan this migration belongs to
    pub upgrade_name: String,
    /// The only block height the migration may run at
    pub upgrade_height: u64,
    /// Token order of the created concentrated pools
    pub ordering: OrderingRule,
    /// Order the TWAP records of existing concentrated pools are rewritten to
    pub twap_ordering: OrderingRule,
    /// Tick spacing assigned to every created concentrated pool
    pub tick_spacing: u64,
    /// Amount of quote asset used to size the funding of each new pool
    pub funding_notional: Uint128,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum MigrationState {
    Pending,
    Applied,
}

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiator
    pub owner: Option<String>,
    pub upgrade_name: String,
    pub upgrade_height: u64,
    pub ordering: Option<OrderingRule>,
    /// Defaults to the quote asset in the first slot
    pub twap_ordering: Option<OrderingRule>,
    pub tick_spacing: Option<u64>,
    pub funding_notional: Option<Uint128>,
    /// Chain state the migration operates on. Left empty when the host writes pools, community
    /// pool balances and TWAP records into the contract stores itself.
    pub genesis: Option<GenesisState>,
}

/// Pools, balances and TWAP history present before the upgrade.
#[cw_serde]
#[derive(Default)]
pub struct GenesisState {
    /// Created in order, the first one receives pool id 1
    pub pools: Vec<GenesisPool>,
    pub community_pool: Vec<Coin>,
    /// Every record must belong to one of `pools`
    pub twap_records: Vec<TwapRecord>,
}

#[cw_serde]
pub enum GenesisPool {
    Balancer {
        assets: Vec<Coin>,
        swap_fee: Decimal,
    },
    Concentrated {
        token0: String,
        token1: String,
        /// Price of token0 quoted in token1
        initial_price: Decimal256,
        tick_spacing: u64,
        spread_factor: Decimal,
        token0_amount: Uint128,
        token1_amount: Uint128,
    },
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Reschedules the pending upgrade. Only the owner may call it.
    UpdateUpgradePlan {
        upgrade_name: Option<String>,
        upgrade_height: Option<u64>,
    },
}

/// Messages only the chain itself can send.
#[cw_serde]
pub enum SudoMsg {
    /// Sent by the upgrade scheduler once the plan height is reached
    ApplyUpgrade { name: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(MigrationState)]
    MigrationStatus {},
    /// Asset pairs the migration processes on the current chain, in processing order
    #[returns(Vec<AssetPair>)]
    AssetPairs {},
    #[returns(MigrationInfoResponse)]
    MigrationInfo {},
    #[returns(Pool)]
    Pool { pool_id: u64 },
    #[returns(Vec<TwapRecord>)]
    MostRecentTwaps { pool_id: u64 },
    #[returns(Vec<TwapRecord>)]
    HistoricalTwaps { pool_id: u64 },
    #[returns(Vec<TwapRecord>)]
    HistoricalTwapsByTime {},
    #[returns(Uint128)]
    CommunityPoolBalance { denom: String },
    #[returns(Option<SuperfluidAsset>)]
    SuperfluidAsset { denom: String },
}

#[cw_serde]
pub struct MigrationInfoResponse {
    pub balancer_to_concentrated_pool_links: Vec<BalancerToConcentratedLink>,
}

/// We currently take no arguments for migrations.
#[cw_serde]
pub struct MigrateMsg {}
