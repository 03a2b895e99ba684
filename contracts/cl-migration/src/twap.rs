use cosmwasm_std::{Api, Order, StdResult, Storage};
use migration_periphery::msg::OrderingRule;
use migration_periphery::pool::Pool;
use migration_periphery::twap::TwapRecord;

use crate::error::ContractError;
use crate::orientation::needs_flip;
use crate::pools::get_all_pools;
use crate::state::{historical_twaps, MOST_RECENT_TWAPS};

/// Stores a new observation. This is the only place records enter storage: the historical
/// map (and with it the time index) always gets the record, the most recent entry of the pool
/// is replaced unless it is newer than the record.
pub fn store_new_record(storage: &mut dyn Storage, record: &TwapRecord) -> StdResult<()> {
    put_historical(storage, record)?;

    let is_most_recent = match MOST_RECENT_TWAPS.may_load(storage, record.pool_id)? {
        Some(existing) => existing.time <= record.time,
        None => true,
    };
    if is_most_recent {
        put_most_recent(storage, record)?;
    }

    Ok(())
}

pub fn put_most_recent(storage: &mut dyn Storage, record: &TwapRecord) -> StdResult<()> {
    MOST_RECENT_TWAPS.save(storage, record.pool_id, record)
}

/// Writes a record to the per pool history and, through the index, to the time ordered one.
pub fn put_historical(storage: &mut dyn Storage, record: &TwapRecord) -> StdResult<()> {
    historical_twaps().save(
        storage,
        (record.pool_id, record.time.nanos()),
        record,
    )
}

pub fn get_most_recent_records(storage: &dyn Storage, pool_id: u64) -> StdResult<Vec<TwapRecord>> {
    Ok(MOST_RECENT_TWAPS
        .may_load(storage, pool_id)?
        .into_iter()
        .collect())
}

/// Returns the history of a pool, oldest first.
pub fn get_historical_records_by_pool(
    storage: &dyn Storage,
    pool_id: u64,
) -> StdResult<Vec<TwapRecord>> {
    historical_twaps()
        .prefix(pool_id)
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, record)| record))
        .collect()
}

/// Returns the history of all pools ordered by time, then by pool id.
pub fn get_historical_records_by_time(storage: &dyn Storage) -> StdResult<Vec<TwapRecord>> {
    historical_twaps()
        .idx
        .by_time
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, record)| record))
        .collect()
}

/// Swaps the two assets of a record along with their spot prices.
///
/// Accumulators are running sums and are carried over untouched, so flipping a record twice
/// gives back the original record.
pub fn flip_record(record: &TwapRecord) -> TwapRecord {
    TwapRecord {
        asset0_denom: record.asset1_denom.clone(),
        asset1_denom: record.asset0_denom.clone(),
        p0_last_spot_price: record.p1_last_spot_price,
        p1_last_spot_price: record.p0_last_spot_price,
        ..record.clone()
    }
}

/// Flips every record of `pool_id`. Returns the number of rewritten historical records.
pub fn reorient(storage: &mut dyn Storage, pool_id: u64) -> Result<usize, ContractError> {
    let most_recent = get_most_recent_records(storage, pool_id)?;
    if most_recent.is_empty() {
        return Err(ContractError::TwapRecordsNotFound {
            pool_id,
            index: "most recent".to_string(),
        });
    }
    let historical = get_historical_records_by_pool(storage, pool_id)?;
    if historical.is_empty() {
        return Err(ContractError::TwapRecordsNotFound {
            pool_id,
            index: "historical".to_string(),
        });
    }

    for record in &most_recent {
        put_most_recent(storage, &flip_record(record))?;
    }
    for record in &historical {
        put_historical(storage, &flip_record(record))?;
    }

    Ok(historical.len())
}

/// Returns the concentrated pools whose stored TWAP orientation differs from the canonical one.
/// Pools without any record yet are skipped, pools of other types are never selected.
pub fn pools_to_reorient(
    storage: &dyn Storage,
    rule: &OrderingRule,
) -> Result<Vec<u64>, ContractError> {
    let mut affected = vec![];

    for pool in get_all_pools(storage)? {
        let cl_pool = match pool {
            Pool::Concentrated(cl_pool) => cl_pool,
            Pool::Balancer(_) => continue,
        };

        for record in get_most_recent_records(storage, cl_pool.id)? {
            let same_assets = (record.asset0_denom == cl_pool.token0
                && record.asset1_denom == cl_pool.token1)
                || (record.asset0_denom == cl_pool.token1
                    && record.asset1_denom == cl_pool.token0);
            if !same_assets {
                return Err(ContractError::InvalidOrientation {
                    asset0: record.asset0_denom,
                    asset1: record.asset1_denom,
                });
            }

            if needs_flip(rule, &record.asset0_denom, &record.asset1_denom)? {
                affected.push(cl_pool.id);
            }
        }
    }

    Ok(affected)
}

/// Selects the affected pools first and then reorients each of them exactly once.
pub fn reorient_affected_pools(
    storage: &mut dyn Storage,
    api: &dyn Api,
    rule: &OrderingRule,
) -> Result<Vec<u64>, ContractError> {
    let affected = pools_to_reorient(storage, rule)?;

    for pool_id in &affected {
        let rewritten = reorient(storage, *pool_id)?;
        api.debug(&format!(
            "WASMDEBUG: flipped {} TWAP records of pool {}",
            rewritten, pool_id
        ));
    }

    Ok(affected)
}
