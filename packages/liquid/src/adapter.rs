use soroban_sdk::{contractclient, Env};

/// Capability interface every staking network integration implements.
///
/// The pool contract is written once against this client; each network ships
/// its own adapter contract. Every call may fail (panic or contract error) and
/// the pool treats any failure as transient.
#[contractclient(name = "StakingAdapterClient")]
pub trait StakingAdapter {
    /// Stakes `amount` of the underlying asset. The pool transfers the funds
    /// to the adapter before calling.
    fn stake(env: Env, amount: i128);

    /// Begins unbonding `amount` and returns a handle identifying the
    /// external unbonding operation.
    fn unstake(env: Env, amount: i128) -> u64;

    /// Completes the unbonding identified by `handle`, transfers the settled
    /// underlying to the caller and returns the settled amount. The amount can
    /// be lower than requested when the network slashed the stake.
    fn withdraw(env: Env, handle: u64) -> i128;

    /// Claims rewards accrued since the previous call. Consuming: a reward is
    /// reported exactly once. Networks that do not compound transfer the
    /// reward to the caller.
    fn pending_rewards(env: Env) -> i128;
}
