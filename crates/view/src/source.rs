use std::{fmt::Display, future::Future};

use api_types::{
    UserId,
    transaction::{Transaction, TransactionId},
};

/// Keyed access to a user's transactions, owned by the composition root.
pub trait TransactionSource {
    /// Starts (or continues) retrieval for `user`. Results are announced
    /// asynchronously and read back through [`TransactionSource::observe`].
    fn fetch(&self, user: UserId);

    /// `None` while nothing was delivered, `Some(vec![])` once the service
    /// answered with no transactions.
    fn observe(&self, user: UserId) -> Option<Vec<Transaction>>;
}

/// The remote point update for a transaction's label.
pub trait LabelService {
    type Error: Display;

    fn set_label(
        &self,
        transaction_id: TransactionId,
        label: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
