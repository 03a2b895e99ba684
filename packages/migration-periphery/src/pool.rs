use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Decimal, Decimal256, StdError, StdResult, Uint128};

/// Returns the denom under which liquidity shares of a concentrated pool are locked.
pub fn concentrated_share_denom(pool_id: u64) -> String {
    format!("cl/pool/{}", pool_id)
}

#[cw_serde]
pub enum Pool {
    Balancer(BalancerPool),
    Concentrated(ConcentratedPool),
}

impl Pool {
    pub fn id(&self) -> u64 {
        match self {
            Pool::Balancer(pool) => pool.id,
            Pool::Concentrated(pool) => pool.id,
        }
    }
}

/// An equally weighted constant product pool.
#[cw_serde]
pub struct BalancerPool {
    pub id: u64,
    /// Pool reserves, one coin per asset
    pub assets: Vec<Coin>,
    pub swap_fee: Decimal,
}

impl BalancerPool {
    pub fn reserve(&self, denom: &str) -> StdResult<Uint128> {
        self.assets
            .iter()
            .find(|coin| coin.denom == denom)
            .map(|coin| coin.amount)
            .ok_or_else(|| {
                StdError::generic_err(format!("denom {} not found in pool {}", denom, self.id))
            })
    }

    pub fn has_denom(&self, denom: &str) -> bool {
        self.assets.iter().any(|coin| coin.denom == denom)
    }

    /// Returns the price of `base_denom` quoted in `quote_denom`.
    pub fn spot_price(&self, base_denom: &str, quote_denom: &str) -> StdResult<Decimal> {
        let base = self.reserve(base_denom)?;
        let quote = self.reserve(quote_denom)?;

        Decimal::checked_from_ratio(quote, base).map_err(|e| {
            StdError::generic_err(format!("cannot compute spot price of pool {}: {}", self.id, e))
        })
    }

    /// Simulates a swap of `coin_in` into `denom_out` using the constant product formula.
    pub fn calc_out_amt_given_in(
        &self,
        coin_in: &Coin,
        denom_out: &str,
        spread_factor: Decimal,
    ) -> StdResult<Coin> {
        if coin_in.denom == denom_out {
            return Err(StdError::generic_err("cannot swap a denom into itself"));
        }
        let reserve_in = self.reserve(&coin_in.denom)?;
        let reserve_out = self.reserve(denom_out)?;

        let fee_complement = Decimal::one().checked_sub(spread_factor)?;
        let amount_in_after_fee = coin_in
            .amount
            .checked_multiply_ratio(fee_complement.atomics(), Decimal::one().atomics())
            .map_err(|e| StdError::generic_err(e.to_string()))?;

        let amount_out = reserve_out
            .checked_multiply_ratio(
                amount_in_after_fee,
                reserve_in.checked_add(amount_in_after_fee)?,
            )
            .map_err(|e| StdError::generic_err(e.to_string()))?;

        Ok(Coin {
            denom: denom_out.to_string(),
            amount: amount_out,
        })
    }
}

/// A full range concentrated liquidity pool. Its price is `token1` per `token0`.
#[cw_serde]
pub struct ConcentratedPool {
    pub id: u64,
    pub token0: String,
    pub token1: String,
    pub current_sqrt_price: Decimal256,
    pub tick_spacing: u64,
    pub spread_factor: Decimal,
    pub liquidity: Decimal256,
    pub token0_amount: Uint128,
    pub token1_amount: Uint128,
}

impl ConcentratedPool {
    pub fn current_price(&self) -> StdResult<Decimal256> {
        Ok(self.current_sqrt_price.checked_mul(self.current_sqrt_price)?)
    }

    pub fn share_denom(&self) -> String {
        concentrated_share_denom(self.id)
    }
}

/// Links a balancer pool to the concentrated pool its liquidity is expected to migrate to.
#[cw_serde]
pub struct BalancerToConcentratedLink {
    pub balancer_pool_id: u64,
    pub cl_pool_id: u64,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum SuperfluidAssetType {
    /// Locked liquidity shares of a concentrated pool
    ConcentratedShare,
}

#[cw_serde]
pub struct SuperfluidAsset {
    pub denom: String,
    pub asset_type: SuperfluidAssetType,
}
