pub mod asset_pair;
pub mod msg;
pub mod pool;
pub mod twap;
