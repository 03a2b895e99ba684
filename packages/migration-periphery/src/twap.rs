use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal, StdError, StdResult, Timestamp};

/// A price observation of a two asset pool at a given time.
///
/// `p1_last_spot_price` is always the inverse of `p0_last_spot_price`.
#[cw_serde]
pub struct TwapRecord {
    pub pool_id: u64,
    pub time: Timestamp,
    pub asset0_denom: String,
    pub asset1_denom: String,
    /// Price of asset0 quoted in asset1
    pub p0_last_spot_price: Decimal,
    /// Price of asset1 quoted in asset0
    pub p1_last_spot_price: Decimal,
    pub p0_arithmetic_twap_accumulator: Decimal,
    pub p1_arithmetic_twap_accumulator: Decimal,
    pub geometric_twap_accumulator: Decimal,
}

impl TwapRecord {
    /// Builds a record, deriving the asset1 spot price from the asset0 one.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool_id: u64,
        time: Timestamp,
        asset0_denom: impl Into<String>,
        asset1_denom: impl Into<String>,
        p0_last_spot_price: Decimal,
        p0_arithmetic_twap_accumulator: Decimal,
        p1_arithmetic_twap_accumulator: Decimal,
        geometric_twap_accumulator: Decimal,
    ) -> StdResult<Self> {
        let p1_last_spot_price = Decimal::one()
            .checked_div(p0_last_spot_price)
            .map_err(|e| StdError::generic_err(format!("invalid spot price: {}", e)))?;

        Ok(TwapRecord {
            pool_id,
            time,
            asset0_denom: asset0_denom.into(),
            asset1_denom: asset1_denom.into(),
            p0_last_spot_price,
            p1_last_spot_price,
            p0_arithmetic_twap_accumulator,
            p1_arithmetic_twap_accumulator,
            geometric_twap_accumulator,
        })
    }
}
