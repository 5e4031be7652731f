//! Big number types

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use soroban_sdk::Env;
use uint::construct_uint;

use crate::error::{ErrorCode, LiquidResult};

construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

impl U256 {
    /// Convert to u128, failing if the value does not fit.
    pub fn try_to_u128(self, env: &Env) -> LiquidResult<u128> {
        if self > U256::from(u128::MAX) {
            soroban_sdk::log!(env, "U256 does not fit into u128");
            return Err(ErrorCode::CastingFailure);
        }
        Ok(self.as_u128())
    }
}
