use soroban_sdk::{log, Env};

use crate::error::{ErrorCode, LiquidResult};

pub trait Cast: Sized {
    /// Perform a casting operation with error handling.
    #[track_caller]
    #[inline(always)]
    fn cast<T: TryFrom<Self>>(self, env: &Env) -> LiquidResult<T> {
        match self.try_into() {
            Ok(result) => Ok(result),
            Err(_) => {
                log!(env, "Casting error thrown at line", line!());
                Err(ErrorCode::CastingFailure)
            }
        }
    }
}

impl Cast for u128 {}
impl Cast for i128 {}
