pub mod contract;
pub mod error;
pub mod genesis;
pub mod links;
pub mod migrator;
pub mod orientation;
pub mod pools;
pub mod registry;
pub mod state;
pub mod superfluid;
pub mod transaction;
pub mod treasury;
pub mod twap;

#[cfg(test)]
mod testing;
