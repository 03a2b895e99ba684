use cosmwasm_std::{Coin, Decimal, Decimal256, Order, StdResult, Storage, Uint128};
use migration_periphery::pool::{BalancerPool, ConcentratedPool, Pool};

use crate::error::ContractError;
use crate::state::{NEXT_POOL_ID, POOLS};

/// Parameters of a concentrated pool to create.
#[derive(Clone, Debug, PartialEq)]
pub struct ConcentratedPoolSpec {
    pub token0: String,
    pub token1: String,
    /// Price of token0 quoted in token1
    pub initial_price: Decimal256,
    pub tick_spacing: u64,
    pub spread_factor: Decimal,
    pub token0_amount: Uint128,
    pub token1_amount: Uint128,
}

pub fn next_pool_id(storage: &dyn Storage) -> StdResult<u64> {
    Ok(NEXT_POOL_ID.may_load(storage)?.unwrap_or(1))
}

fn allocate_pool_id(storage: &mut dyn Storage) -> StdResult<u64> {
    let pool_id = next_pool_id(storage)?;
    NEXT_POOL_ID.save(storage, &(pool_id + 1))?;
    Ok(pool_id)
}

pub fn get_pool(storage: &dyn Storage, pool_id: u64) -> Result<Pool, ContractError> {
    POOLS
        .may_load(storage, pool_id)?
        .ok_or(ContractError::PoolNotFound { pool_id })
}

pub fn get_balancer_pool(
    storage: &dyn Storage,
    pool_id: u64,
) -> Result<BalancerPool, ContractError> {
    match get_pool(storage, pool_id)? {
        Pool::Balancer(pool) => Ok(pool),
        Pool::Concentrated(_) => Err(ContractError::NotLegacyPool { pool_id }),
    }
}

/// Returns all pools ordered by id.
pub fn get_all_pools(storage: &dyn Storage) -> StdResult<Vec<Pool>> {
    POOLS
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, pool)| pool))
        .collect()
}

pub fn create_balancer_pool(
    storage: &mut dyn Storage,
    assets: Vec<Coin>,
    swap_fee: Decimal,
) -> Result<u64, ContractError> {
    if assets.len() != 2 || assets[0].denom == assets[1].denom {
        return Err(ContractError::PoolCreationFailed {
            reason: "balancer pools hold exactly two distinct assets".to_string(),
        });
    }
    if assets.iter().any(|coin| coin.amount.is_zero()) {
        return Err(ContractError::PoolCreationFailed {
            reason: "balancer pool reserves must be positive".to_string(),
        });
    }

    let pool_id = allocate_pool_id(storage)?;
    let pool = BalancerPool {
        id: pool_id,
        assets,
        swap_fee,
    };
    POOLS.save(storage, pool_id, &Pool::Balancer(pool))?;

    Ok(pool_id)
}

/// Creates a full range concentrated pool holding the given reserves.
pub fn create_concentrated_pool(
    storage: &mut dyn Storage,
    spec: ConcentratedPoolSpec,
) -> Result<ConcentratedPool, ContractError> {
    let failed = |reason: &str| ContractError::PoolCreationFailed {
        reason: reason.to_string(),
    };

    if spec.token0 == spec.token1 {
        return Err(failed("tokens must differ"));
    }
    if spec.tick_spacing == 0 {
        return Err(failed("tick spacing must be positive"));
    }
    if spec.initial_price.is_zero() {
        return Err(failed("initial price must be positive"));
    }
    if spec.token0_amount.is_zero() || spec.token1_amount.is_zero() {
        return Err(failed("both reserves must be funded"));
    }

    let sqrt_price = spec.initial_price.sqrt();
    let liquidity = full_range_liquidity(spec.token0_amount, spec.token1_amount, sqrt_price)
        .map_err(|e| failed(&e))?;

    let pool_id = allocate_pool_id(storage)?;
    let pool = ConcentratedPool {
        id: pool_id,
        token0: spec.token0,
        token1: spec.token1,
        current_sqrt_price: sqrt_price,
        tick_spacing: spec.tick_spacing,
        spread_factor: spec.spread_factor,
        liquidity,
        token0_amount: spec.token0_amount,
        token1_amount: spec.token1_amount,
    };
    POOLS.save(storage, pool_id, &Pool::Concentrated(pool.clone()))?;

    Ok(pool)
}

/// L = min(amount0 * sqrtP, amount1 / sqrtP)
fn full_range_liquidity(
    amount0: Uint128,
    amount1: Uint128,
    sqrt_price: Decimal256,
) -> Result<Decimal256, String> {
    let amount0 = Decimal256::checked_from_ratio(amount0, 1u128).map_err(|e| e.to_string())?;
    let amount1 = Decimal256::checked_from_ratio(amount1, 1u128).map_err(|e| e.to_string())?;

    let from_token0 = amount0.checked_mul(sqrt_price).map_err(|e| e.to_string())?;
    let from_token1 = amount1.checked_div(sqrt_price).map_err(|e| e.to_string())?;

    Ok(from_token0.min(from_token1))
}

/// Returns the price of `base_denom` quoted in `quote_denom` in a balancer pool.
pub fn get_spot_price(
    storage: &dyn Storage,
    pool_id: u64,
    base_denom: &str,
    quote_denom: &str,
) -> Result<Decimal, ContractError> {
    let pool = get_balancer_pool(storage, pool_id)?;
    Ok(pool.spot_price(base_denom, quote_denom)?)
}

/// Simulates a swap without any spread factor and without touching the pool reserves.
pub fn simulate_swap(
    storage: &dyn Storage,
    pool_id: u64,
    coin_in: &Coin,
    denom_out: &str,
) -> Result<Coin, ContractError> {
    let pool = get_balancer_pool(storage, pool_id)?;
    Ok(pool.calc_out_amt_given_in(coin_in, denom_out, Decimal::zero())?)
}
