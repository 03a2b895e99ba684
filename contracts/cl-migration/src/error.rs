use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

/// This enum describes migration errors. Every one of them aborts the whole migration.
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Pool {pool_id} not found")]
    PoolNotFound { pool_id: u64 },

    #[error("Pool {pool_id} is not a balancer pool")]
    NotLegacyPool { pool_id: u64 },

    #[error("No TWAP records found for pool {pool_id} in the {index} index")]
    TwapRecordsNotFound { pool_id: u64, index: String },

    #[error("Insufficient community pool balance of {denom}: requested {requested}, available {available}")]
    InsufficientTreasuryBalance {
        denom: String,
        requested: Uint128,
        available: Uint128,
    },

    #[error("TWAP record of pool {pool_id} at {time} has inconsistent spot prices")]
    InvalidTwapRecord { pool_id: u64, time: u64 },

    #[error("Invalid orientation for denom pair ({asset0}, {asset1})")]
    InvalidOrientation { asset0: String, asset1: String },

    #[error("Failed to create concentrated pool: {reason}")]
    PoolCreationFailed { reason: String },

    #[error("Invalid asset pair for pool {pool_id}: {reason}")]
    InvalidAssetPair { pool_id: u64, reason: String },

    #[error("Balancer pool {balancer_pool_id} or concentrated pool {cl_pool_id} is already linked")]
    LinkAlreadyExists {
        balancer_pool_id: u64,
        cl_pool_id: u64,
    },

    #[error("Superfluid asset {denom} is already registered")]
    SuperfluidAssetAlreadyRegistered { denom: String },

    #[error("Upgrade {got} does not match the scheduled upgrade {expected}")]
    WrongUpgradeName { expected: String, got: String },

    #[error("Upgrade is scheduled at height {expected}, current height is {got}")]
    WrongUpgradeHeight { expected: u64, got: u64 },

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Migration has already been applied")]
    AlreadyApplied {},

    #[error("Migration invariant violated: {reason}")]
    MigrationInvariant { reason: String },

    #[error("Contract can't be migrated!")]
    MigrationError {},
}

impl From<OverflowError> for ContractError {
    fn from(o: OverflowError) -> Self {
        StdError::from(o).into()
    }
}
