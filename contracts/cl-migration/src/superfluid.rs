use cosmwasm_std::{StdResult, Storage};
use migration_periphery::pool::{SuperfluidAsset, SuperfluidAssetType};

use crate::error::ContractError;
use crate::state::SUPERFLUID_ASSETS;

pub fn get_asset(storage: &dyn Storage, denom: &str) -> StdResult<Option<SuperfluidAsset>> {
    SUPERFLUID_ASSETS.may_load(storage, denom)
}

/// Registers the liquidity share denom of a concentrated pool as a superfluid asset.
pub fn register_concentrated_share(
    storage: &mut dyn Storage,
    denom: &str,
) -> Result<SuperfluidAsset, ContractError> {
    if SUPERFLUID_ASSETS.has(storage, denom) {
        return Err(ContractError::SuperfluidAssetAlreadyRegistered {
            denom: denom.to_string(),
        });
    }

    let asset = SuperfluidAsset {
        denom: denom.to_string(),
        asset_type: SuperfluidAssetType::ConcentratedShare,
    };
    SUPERFLUID_ASSETS.save(storage, denom, &asset)?;

    Ok(asset)
}
