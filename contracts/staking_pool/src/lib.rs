#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod allowance;
mod contract;
mod controller;
mod events;
mod interface;
mod ledger;
mod metadata;
mod msg;
mod storage;

pub use crate::contract::{LiquidStaking, LiquidStakingClient};
pub use crate::interface::LiquidStakingTrait;
pub use crate::msg::PoolStateResponse;
pub use crate::storage::{Config, Operation, UnlockMigration, UnlockRequest, UnlockStatus};
