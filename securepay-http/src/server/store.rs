//! In-memory list of accepted payments.

use std::sync::Arc;

use securepay::proto::TransactionRecord;
use tokio::sync::RwLock;

/// Append-only transaction list shared by the request handlers.
///
/// Clones share the same list. Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    records: Arc<RwLock<Vec<TransactionRecord>>>,
}

impl TransactionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub async fn push(&self, record: TransactionRecord) {
        self.records.write().await.push(record);
    }

    /// Returns every record in insertion order.
    pub async fn all(&self) -> Vec<TransactionRecord> {
        self.records.read().await.clone()
    }

    /// Finds a record by transaction id.
    pub async fn find(&self, transaction_id: &str) -> Option<TransactionRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.transaction_id == transaction_id)
            .cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no payment has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
