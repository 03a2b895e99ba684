use cosmwasm_std::Uint128;
use cw_storage_plus::{Index, IndexList, IndexedMap, Item, Map, MultiIndex};
use migration_periphery::msg::{Config, MigrationState};
use migration_periphery::pool::{BalancerToConcentratedLink, Pool, SuperfluidAsset};
use migration_periphery::twap::TwapRecord;

pub const CONFIG: Item<Config> = Item::new("config");
pub const MIGRATION_STATUS: Item<MigrationState> = Item::new("migration_status");

/// All pools of the chain, both balancer and concentrated, keyed by pool id.
pub const POOLS: Map<u64, Pool> = Map::new("pools");
/// Id the next created pool receives. Pool ids start at 1.
pub const NEXT_POOL_ID: Item<u64> = Item::new("next_pool_id");

/// Community pool balances, the first key is a denom.
pub const COMMUNITY_POOL: Map<&str, Uint128> = Map::new("community_pool");

/// Links are kept in the order they were created in.
pub const MIGRATION_LINKS: Item<Vec<BalancerToConcentratedLink>> = Item::new("migration_links");

/// The first key is the denom of a superfluid asset.
pub const SUPERFLUID_ASSETS: Map<&str, SuperfluidAsset> = Map::new("superfluid_assets");

/// Latest TWAP record of every pool.
pub const MOST_RECENT_TWAPS: Map<u64, TwapRecord> = Map::new("twap_most_recent");

pub struct TwapIndexes<'a> {
    /// (time in nanoseconds, pool id)
    pub by_time: MultiIndex<'a, (u64, u64), TwapRecord, (u64, u64)>,
}

impl<'a> IndexList<TwapRecord> for TwapIndexes<'a> {
    fn get_indexes(&'_ self) -> Box<dyn Iterator<Item = &'_ dyn Index<TwapRecord>> + '_> {
        let v: Vec<&dyn Index<TwapRecord>> = vec![&self.by_time];
        Box::new(v.into_iter())
    }
}

/// Every TWAP record ever stored. The primary key is (pool id, time in nanoseconds), so a
/// prefix over the pool id yields the history of one pool while the `by_time` index yields
/// the history of all pools ordered by time.
pub fn historical_twaps<'a>() -> IndexedMap<'a, (u64, u64), TwapRecord, TwapIndexes<'a>> {
    let indexes = TwapIndexes {
        by_time: MultiIndex::new(
            |_, record| (record.time.nanos(), record.pool_id),
            "twap_history",
            "twap_history__time",
        ),
    };
    IndexedMap::new("twap_history", indexes)
}
