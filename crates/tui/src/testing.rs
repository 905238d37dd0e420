use std::collections::HashMap;

use api_types::{
    UserId,
    transaction::{Transaction, iso_date},
};
use view::TransactionSource;

/// Source answering from a fixed map; fetches are ignored.
#[derive(Default)]
pub struct FixedSource(pub HashMap<UserId, Vec<Transaction>>);

impl TransactionSource for FixedSource {
    fn fetch(&self, _user: UserId) {}

    fn observe(&self, user: UserId) -> Option<Vec<Transaction>> {
        self.0.get(&user).cloned()
    }
}

/// `n` transactions one day apart, ids `1..=n`, oldest first.
pub fn transactions(n: i64) -> Vec<Transaction> {
    let start = iso_date::parse("2024-01-01").unwrap();
    (1..=n)
        .map(|id| Transaction {
            id,
            occurred_at: start + chrono::Duration::days(id - 1),
            description: format!("Merchant {id}"),
            account_id: format!("acc-{}", id % 3),
            amount: id as f64 * 1.25,
            label: None,
        })
        .collect()
}

pub fn source_with(user: UserId, rows: Vec<Transaction>) -> FixedSource {
    FixedSource(HashMap::from([(user, rows)]))
}
