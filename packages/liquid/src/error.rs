use soroban_sdk::contracterror;

pub type LiquidResult<T = ()> = Result<T, ErrorCode>;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 4,
    OperationPaused = 5,
    // Ledger
    InvalidAmount = 10,
    DepositTooSmall = 11,
    InsufficientShares = 12,
    InsufficientPool = 13,
    InsufficientAllowance = 14,
    // Unbonding queue
    InsufficientPrincipal = 20,
    InsufficientLiquidity = 21,
    InvalidState = 22,
    UnlockNotFound = 23,
    // External staking network
    ExternalProtocolError = 30,
    // Math
    MathError = 40,
    CastingFailure = 41,
}
