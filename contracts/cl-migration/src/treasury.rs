use cosmwasm_std::{Coin, Order, StdResult, Storage, Uint128};

use crate::error::ContractError;
use crate::state::COMMUNITY_POOL;

pub fn get_balance(storage: &dyn Storage, denom: &str) -> StdResult<Uint128> {
    Ok(COMMUNITY_POOL.may_load(storage, denom)?.unwrap_or_default())
}

pub fn get_all_balances(storage: &dyn Storage) -> StdResult<Vec<Coin>> {
    COMMUNITY_POOL
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(denom, amount)| Coin { denom, amount }))
        .collect()
}

pub fn fund(storage: &mut dyn Storage, coin: &Coin) -> Result<(), ContractError> {
    COMMUNITY_POOL.update(storage, &coin.denom, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(coin.amount)?)
    })?;
    Ok(())
}

/// Takes `coin` out of the community pool.
pub fn withdraw(storage: &mut dyn Storage, coin: &Coin) -> Result<Coin, ContractError> {
    let available = get_balance(storage, &coin.denom)?;
    if available < coin.amount {
        return Err(ContractError::InsufficientTreasuryBalance {
            denom: coin.denom.clone(),
            requested: coin.amount,
            available,
        });
    }

    let remaining = available - coin.amount;
    if remaining.is_zero() {
        COMMUNITY_POOL.remove(storage, &coin.denom);
    } else {
        COMMUNITY_POOL.save(storage, &coin.denom, &remaining)?;
    }

    Ok(coin.clone())
}
