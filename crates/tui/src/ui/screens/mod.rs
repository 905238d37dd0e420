pub mod transactions;
pub mod user_prompt;
