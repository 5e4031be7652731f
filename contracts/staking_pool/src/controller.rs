pub mod adapter;
pub mod reserve;
pub mod rewards;
pub mod unlock;
