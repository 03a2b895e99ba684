use cosmwasm_std::{StdResult, Storage};
use migration_periphery::pool::BalancerToConcentratedLink;

use crate::error::ContractError;
use crate::state::MIGRATION_LINKS;

pub fn get_all_links(storage: &dyn Storage) -> StdResult<Vec<BalancerToConcentratedLink>> {
    Ok(MIGRATION_LINKS.may_load(storage)?.unwrap_or_default())
}

/// Appends a link. Each pool can be part of a single link only.
pub fn put_link(
    storage: &mut dyn Storage,
    balancer_pool_id: u64,
    cl_pool_id: u64,
) -> Result<BalancerToConcentratedLink, ContractError> {
    let mut links = get_all_links(storage)?;
    if links
        .iter()
        .any(|l| l.balancer_pool_id == balancer_pool_id || l.cl_pool_id == cl_pool_id)
    {
        return Err(ContractError::LinkAlreadyExists {
            balancer_pool_id,
            cl_pool_id,
        });
    }

    let link = BalancerToConcentratedLink {
        balancer_pool_id,
        cl_pool_id,
    };
    links.push(link.clone());
    MIGRATION_LINKS.save(storage, &links)?;

    Ok(link)
}
