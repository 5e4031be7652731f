use soroban_sdk::Env;

use crate::{
    error::{ErrorCode, LiquidResult},
    validate,
};

use super::{bn::U256, casting::Cast, safe_math::SafeMath};

/// `value * numerator / denominator`, rounded toward zero.
///
/// All operands must be non-negative. The product is widened to 256 bits when
/// it does not fit in an `i128`, so only a quotient above `i128::MAX` fails.
pub fn get_proportion(
    env: &Env,
    value: i128,
    numerator: i128,
    denominator: i128
) -> LiquidResult<i128> {
    validate!(
        env,
        value >= 0 && numerator >= 0 && denominator > 0,
        ErrorCode::MathError,
        "proportion operands out of range",
        value,
        numerator,
        denominator
    )?;

    if numerator == denominator {
        return Ok(value);
    }

    if let Some(product) = value.checked_mul(numerator) {
        return product.safe_div(denominator, env);
    }

    let product = U256::from(value.cast::<u128>(env)?) * U256::from(numerator.cast::<u128>(env)?);
    let denominator = U256::from(denominator.cast::<u128>(env)?);
    (product / denominator).try_to_u128(env)?.cast::<i128>(env)
}
