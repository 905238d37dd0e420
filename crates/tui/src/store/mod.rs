use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use api_types::{UserId, transaction::Transaction};
use tokio::sync::mpsc::UnboundedSender;
use view::{Message, TransactionSource};

use crate::client::Client;

/// Transactions keyed by user, filled by background fetches.
///
/// A completed fetch announces itself with [`Message::DataChanged`]. Failed
/// fetches leave the entry untouched, so a user that never loaded stays
/// absent.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    client: Client,
    by_user: Arc<RwLock<HashMap<UserId, Vec<Transaction>>>>,
    in_flight: Arc<Mutex<HashSet<UserId>>>,
    events: UnboundedSender<Message>,
}

impl TransactionStore {
    pub fn new(client: Client, events: UnboundedSender<Message>) -> Self {
        Self {
            client,
            by_user: Arc::default(),
            in_flight: Arc::default(),
            events,
        }
    }

    async fn load(self, user: UserId) {
        let result = self.client.user_transactions(user).await;
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user);

        match result {
            Ok(rows) => {
                tracing::info!(user, rows = rows.len(), "transactions loaded");
                self.insert(user, rows);
                if self.events.send(Message::DataChanged(user)).is_err() {
                    tracing::debug!(user, "view is gone, dropping data notification");
                }
            }
            Err(err) => {
                tracing::error!(user, "failed to load transactions: {err}");
            }
        }
    }

    fn insert(&self, user: UserId, rows: Vec<Transaction>) {
        self.by_user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user, rows);
    }
}

impl TransactionSource for TransactionStore {
    fn fetch(&self, user: UserId) {
        let fresh = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user);
        if !fresh {
            tracing::debug!(user, "fetch already in flight");
            return;
        }

        tracing::debug!(user, "fetching transactions");
        tokio::spawn(self.clone().load(user));
    }

    fn observe(&self, user: UserId) -> Option<Vec<Transaction>> {
        self.by_user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user)
            .cloned()
    }
}
