use cosmwasm_std::{Decimal, Storage};
use migration_periphery::msg::{GenesisPool, GenesisState};
use migration_periphery::pool::Pool;
use migration_periphery::twap::TwapRecord;

use crate::error::ContractError;
use crate::pools::{create_balancer_pool, create_concentrated_pool, get_pool, ConcentratedPoolSpec};
use crate::treasury::fund;
use crate::twap::store_new_record;

/// Writes the pre-upgrade chain state: pools in the given order, then community pool balances,
/// then TWAP records through the regular write path.
pub fn load_genesis(storage: &mut dyn Storage, genesis: GenesisState) -> Result<(), ContractError> {
    for pool in genesis.pools {
        match pool {
            GenesisPool::Balancer { assets, swap_fee } => {
                create_balancer_pool(storage, assets, swap_fee)?;
            }
            GenesisPool::Concentrated {
                token0,
                token1,
                initial_price,
                tick_spacing,
                spread_factor,
                token0_amount,
                token1_amount,
            } => {
                create_concentrated_pool(
                    storage,
                    ConcentratedPoolSpec {
                        token0,
                        token1,
                        initial_price,
                        tick_spacing,
                        spread_factor,
                        token0_amount,
                        token1_amount,
                    },
                )?;
            }
        }
    }

    for coin in &genesis.community_pool {
        fund(storage, coin)?;
    }

    for record in &genesis.twap_records {
        validate_record(storage, record)?;
        store_new_record(storage, record)?;
    }

    Ok(())
}

fn validate_record(storage: &dyn Storage, record: &TwapRecord) -> Result<(), ContractError> {
    let pool = get_pool(storage, record.pool_id)?;
    let holds = |denom: &str| match &pool {
        Pool::Balancer(pool) => pool.has_denom(denom),
        Pool::Concentrated(pool) => pool.token0 == denom || pool.token1 == denom,
    };

    if record.asset0_denom == record.asset1_denom
        || !holds(&record.asset0_denom)
        || !holds(&record.asset1_denom)
    {
        return Err(ContractError::InvalidOrientation {
            asset0: record.asset0_denom.clone(),
            asset1: record.asset1_denom.clone(),
        });
    }

    // p1 = 1 / p0 exactly
    if Decimal::one().checked_div(record.p0_last_spot_price).ok()
        != Some(record.p1_last_spot_price)
    {
        return Err(ContractError::InvalidTwapRecord {
            pool_id: record.pool_id,
            time: record.time.nanos(),
        });
    }

    Ok(())
}
