#![no_std]

mod errors;
mod pool;
mod storage;
mod types;

pub use errors::Error;
pub use pool::{PremiumPool, PremiumPoolClient};
pub use types::{
    Deposit, Dispute, DisputeState, PoolConfig, PoolStats, Premium, SaleVerification,
};
