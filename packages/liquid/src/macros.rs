#[macro_export]
macro_rules! math_error {
    ($env:expr) => {{
        || {
            let error_code = $crate::error::ErrorCode::MathError;
            soroban_sdk::log!($env, "Math error thrown at line", line!());
            error_code
        }
    }};
}

#[macro_export]
macro_rules! validate {
    ($env:expr, $assert:expr, $err:expr) => {
        {
            if ($assert) {
                Ok(())
            } else {
                let error_code: $crate::error::ErrorCode = $err;
                soroban_sdk::log!($env, "Error thrown at line", error_code as u32, line!());
                Err(error_code)
            }
        }
    };
    (
        $env:expr,
        $assert:expr,
        $err:expr,
        $($arg:tt)+
    ) => {
        {
            if ($assert) {
                Ok(())
            } else {
                let error_code: $crate::error::ErrorCode = $err;
                soroban_sdk::log!($env, "Error thrown at line", error_code as u32, line!());
                soroban_sdk::log!($env, $($arg)+);
                Err(error_code)
            }
        }
    };
}

#[macro_export]
macro_rules! safe_increment {
    ($env:expr, $struct:expr, $value:expr) => {{
        $struct = $struct.checked_add($value).ok_or_else($crate::math_error!($env))?
    }};
}

#[macro_export]
macro_rules! safe_decrement {
    ($env:expr, $struct:expr, $value:expr) => {{
        $struct = $struct.checked_sub($value).ok_or_else($crate::math_error!($env))?
    }};
}

// Validate if int values are strictly positive
#[macro_export]
macro_rules! validate_positive_amounts {
    ($env:expr, $($arg:expr),+) => {
        {
            let mut result: $crate::error::LiquidResult = Ok(());
            $(
                if result.is_ok() && $arg <= 0 {
                    soroban_sdk::log!($env, "value cannot be less than or equal zero", $arg);
                    result = Err($crate::error::ErrorCode::InvalidAmount);
                }
            )+
            result
        }
    };
}

// Validate all bps to be between the range 0..=10_000
#[macro_export]
macro_rules! validate_bps {
    ($env:expr, $($value:expr),+) => {
        {
            let mut result: $crate::error::LiquidResult = Ok(());
            $(
                if result.is_ok() && $value > $crate::constants::MAX_BPS {
                    soroban_sdk::log!($env, "bps value out of range", $value);
                    result = Err($crate::error::ErrorCode::InvalidConfig);
                }
            )+
            result
        }
    };
}
