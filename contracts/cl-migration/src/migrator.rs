use cosmwasm_std::{Api, Coin, Decimal, Decimal256, Storage, Uint128};
use migration_periphery::asset_pair::AssetPair;
use migration_periphery::msg::OrderingRule;
use migration_periphery::pool::ConcentratedPool;

use crate::error::ContractError;
use crate::links::put_link;
use crate::orientation::canonical_pair;
use crate::pools::{
    create_concentrated_pool, get_balancer_pool, get_spot_price, simulate_swap,
    ConcentratedPoolSpec,
};
use crate::superfluid::register_concentrated_share;
use crate::treasury::withdraw;

/// Result of migrating a single asset pair.
#[derive(Clone, Debug, PartialEq)]
pub struct MigratedPair {
    pub balancer_pool_id: u64,
    pub cl_pool: ConcentratedPool,
    /// Price of the base asset quoted in the quote asset in the balancer pool
    pub balancer_spot_price: Decimal,
    /// Coins taken out of the community pool to seed the new pool
    pub base_used: Coin,
    pub quote_used: Coin,
    /// Registered superfluid denom, if any
    pub superfluid_denom: Option<String>,
}

impl MigratedPair {
    /// The balancer spot price expressed in the orientation of the concentrated pool.
    pub fn expected_cl_price(&self) -> Result<Decimal256, ContractError> {
        let spot_price = Decimal256::from(self.balancer_spot_price);
        if self.cl_pool.token0 == self.base_used.denom {
            Ok(spot_price)
        } else {
            invert(spot_price)
        }
    }
}

fn invert(price: Decimal256) -> Result<Decimal256, ContractError> {
    Decimal256::one()
        .checked_div(price)
        .map_err(|e| ContractError::PoolCreationFailed {
            reason: e.to_string(),
        })
}

/// Creates, funds and links the concentrated pool of one asset pair.
pub struct PoolMigrator<'a> {
    api: &'a dyn Api,
    quote_denom: &'a str,
    ordering: &'a OrderingRule,
    tick_spacing: u64,
    funding_notional: Uint128,
}

impl<'a> PoolMigrator<'a> {
    pub fn new(
        api: &'a dyn Api,
        quote_denom: &'a str,
        ordering: &'a OrderingRule,
        tick_spacing: u64,
        funding_notional: Uint128,
    ) -> Self {
        PoolMigrator {
            api,
            quote_denom,
            ordering,
            tick_spacing,
            funding_notional,
        }
    }

    pub fn migrate(
        &self,
        storage: &mut dyn Storage,
        pair: &AssetPair,
    ) -> Result<MigratedPair, ContractError> {
        let balancer_pool_id = pair.linked_classic_pool;

        // The balancer pool must exist and trade exactly the pair
        let balancer_pool = get_balancer_pool(storage, balancer_pool_id)?;
        for denom in [pair.base_asset.as_str(), self.quote_denom] {
            if !balancer_pool.has_denom(denom) {
                return Err(ContractError::InvalidAssetPair {
                    pool_id: balancer_pool_id,
                    reason: format!("pool does not hold {}", denom),
                });
            }
        }

        // Size the funding after a swap of the notional quote amount
        let quote_in = Coin {
            denom: self.quote_denom.to_string(),
            amount: self.funding_notional,
        };
        let base_out = simulate_swap(storage, balancer_pool_id, &quote_in, &pair.base_asset)?;
        if base_out.amount.is_zero() || quote_in.amount.is_zero() {
            return Err(ContractError::PoolCreationFailed {
                reason: format!("zero funding for balancer pool {}", balancer_pool_id),
            });
        }

        let base_used = withdraw(storage, &base_out)?;
        let quote_used = withdraw(storage, &quote_in)?;
        self.api.debug(&format!(
            "WASMDEBUG: withdrew {} and {} from the community pool for pool {}",
            base_used, quote_used, balancer_pool_id
        ));

        let balancer_spot_price =
            get_spot_price(storage, balancer_pool_id, &pair.base_asset, self.quote_denom)?;

        let (token0, token1) = canonical_pair(self.ordering, &pair.base_asset, self.quote_denom)?;
        let (initial_price, token0_amount, token1_amount) = if token0 == pair.base_asset {
            (
                Decimal256::from(balancer_spot_price),
                base_used.amount,
                quote_used.amount,
            )
        } else {
            (
                invert(Decimal256::from(balancer_spot_price))?,
                quote_used.amount,
                base_used.amount,
            )
        };

        let cl_pool = create_concentrated_pool(
            storage,
            ConcentratedPoolSpec {
                token0: token0.to_string(),
                token1: token1.to_string(),
                initial_price,
                tick_spacing: self.tick_spacing,
                spread_factor: pair.spread_factor,
                token0_amount,
                token1_amount,
            },
        )?;
        self.api.debug(&format!(
            "WASMDEBUG: created concentrated pool {} ({}, {}) for balancer pool {}",
            cl_pool.id, cl_pool.token0, cl_pool.token1, balancer_pool_id
        ));

        put_link(storage, balancer_pool_id, cl_pool.id)?;

        let superfluid_denom = if pair.superfluid {
            Some(register_concentrated_share(storage, &cl_pool.share_denom())?.denom)
        } else {
            None
        };

        Ok(MigratedPair {
            balancer_pool_id,
            cl_pool,
            balancer_spot_price,
            base_used,
            quote_used,
            superfluid_denom,
        })
    }
}
