use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolStateResponse {
    pub total_pooled_value: i128,
    pub total_shares: i128,
    pub current_principal: i128,
    pub total_unbonding: i128,
    pub liquid_reserve: i128,
    pub last_rebase_at: u64,
    pub accrued_rewards: i128,
    /// Queue entries not yet settled, cancelled ones included until pruned
    pub pending_unlocks: u64,
}
