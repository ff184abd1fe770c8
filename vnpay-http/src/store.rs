//! Idempotency store abstraction and in-memory implementation.
//!
//! The processor retries an IPN until it is acknowledged, and retries for
//! the same reference can arrive concurrently. The store provides the one
//! atomic primitive the IPN handler depends on: *claim this reference for
//! processing*. A reference is claimed exactly once; every later delivery
//! sees either the in-flight claim or the recorded terminal state with the
//! acknowledgment to replay.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};

use crate::ack::IpnAck;

/// Coarse lifecycle tag for a payment attempt, as exposed by the status
/// query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// A delivery is being processed; no terminal state yet.
    Pending,
    /// The processor reported a successful payment.
    Paid,
    /// The processor reported a failed or cancelled payment.
    Failed,
}

/// Result of attempting to claim a transaction reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// The reference was unclaimed; the caller now owns its processing and
    /// must either [`complete`](TransactionStore::complete) or
    /// [`release`](TransactionStore::release) it.
    Acquired,
    /// A concurrent delivery holds the claim.
    InFlight,
    /// The reference reached a terminal state earlier; replay this
    /// acknowledgment without re-applying any effect.
    Completed(IpnAck),
}

/// Failure talking to the underlying persistence.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store could not serve the request.
    #[error("idempotency store unavailable: {0}")]
    Unavailable(String),
}

/// Atomic claim-and-record persistence for IPN processing.
///
/// Implementations must make [`claim`](Self::claim) atomic per reference:
/// two concurrent claims for the same reference must not both return
/// [`Claim::Acquired`]. Backing this with a database means a unique
/// constraint or compare-and-set, not a read-then-write.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Claims `txn_ref` for processing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the persistence layer is unavailable; the
    /// handler converts that into a retryable acknowledgment.
    async fn claim(&self, txn_ref: &str) -> Result<Claim, StoreError>;

    /// Records the terminal state and the acknowledgment to replay for
    /// later deliveries of `txn_ref`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record could not be written.
    async fn complete(
        &self,
        txn_ref: &str,
        status: PaymentStatus,
        ack: IpnAck,
    ) -> Result<(), StoreError>;

    /// Releases a claim whose business effect failed, so the processor's
    /// retry can claim the reference again. A no-op once the reference is
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the persistence layer is unavailable.
    async fn release(&self, txn_ref: &str) -> Result<(), StoreError>;

    /// Looks up the lifecycle tag for `txn_ref`, if any delivery has been
    /// seen for it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the persistence layer is unavailable.
    async fn status(&self, txn_ref: &str) -> Result<Option<PaymentStatus>, StoreError>;
}

#[derive(Debug, Clone)]
enum TxnEntry {
    InFlight,
    Done { status: PaymentStatus, ack: IpnAck },
}

/// Single-process in-memory [`TransactionStore`].
///
/// Claims are atomic through the map's entry API. State lives only in this
/// process: running several replicas behind one IPN URL needs a shared
/// transactional store instead, because nothing here coordinates across
/// processes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, TxnEntry>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn claim(&self, txn_ref: &str) -> Result<Claim, StoreError> {
        match self.entries.entry(txn_ref.to_owned()) {
            Entry::Occupied(entry) => match entry.get() {
                TxnEntry::InFlight => Ok(Claim::InFlight),
                TxnEntry::Done { ack, .. } => Ok(Claim::Completed(ack.clone())),
            },
            Entry::Vacant(entry) => {
                entry.insert(TxnEntry::InFlight);
                Ok(Claim::Acquired)
            }
        }
    }

    async fn complete(
        &self,
        txn_ref: &str,
        status: PaymentStatus,
        ack: IpnAck,
    ) -> Result<(), StoreError> {
        self.entries
            .insert(txn_ref.to_owned(), TxnEntry::Done { status, ack });
        Ok(())
    }

    async fn release(&self, txn_ref: &str) -> Result<(), StoreError> {
        // Only an in-flight claim may be released; a terminal record stays.
        self.entries
            .remove_if(txn_ref, |_, entry| matches!(entry, TxnEntry::InFlight));
        Ok(())
    }

    async fn status(&self, txn_ref: &str) -> Result<Option<PaymentStatus>, StoreError> {
        Ok(self.entries.get(txn_ref).map(|entry| match entry.value() {
            TxnEntry::InFlight => PaymentStatus::Pending,
            TxnEntry::Done { status, .. } => *status,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_claim_is_acquired() {
        let store = MemoryStore::new();
        assert_eq!(store.claim("ORDER_1").await.unwrap(), Claim::Acquired);
    }

    #[tokio::test]
    async fn test_second_claim_sees_in_flight() {
        let store = MemoryStore::new();
        store.claim("ORDER_1").await.unwrap();
        assert_eq!(store.claim("ORDER_1").await.unwrap(), Claim::InFlight);
    }

    #[tokio::test]
    async fn test_completed_claim_replays_the_ack() {
        let store = MemoryStore::new();
        store.claim("ORDER_1").await.unwrap();
        store
            .complete("ORDER_1", PaymentStatus::Paid, IpnAck::ok())
            .await
            .unwrap();

        assert_eq!(
            store.claim("ORDER_1").await.unwrap(),
            Claim::Completed(IpnAck::ok())
        );
        assert_eq!(
            store.status("ORDER_1").await.unwrap(),
            Some(PaymentStatus::Paid)
        );
    }

    #[tokio::test]
    async fn test_release_reopens_only_in_flight_claims() {
        let store = MemoryStore::new();
        store.claim("ORDER_1").await.unwrap();
        store.release("ORDER_1").await.unwrap();
        assert_eq!(store.claim("ORDER_1").await.unwrap(), Claim::Acquired);

        store
            .complete("ORDER_1", PaymentStatus::Failed, IpnAck::ok())
            .await
            .unwrap();
        store.release("ORDER_1").await.unwrap();
        assert!(matches!(
            store.claim("ORDER_1").await.unwrap(),
            Claim::Completed(_)
        ));
    }

    #[tokio::test]
    async fn test_unknown_reference_has_no_status() {
        let store = MemoryStore::new();
        assert_eq!(store.status("ORDER_MISSING").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_claims_acquire_exactly_once() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.claim("ORDER_RACE").await },
            ));
        }

        let mut acquired = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() == Claim::Acquired {
                acquired += 1;
            }
        }
        assert_eq!(acquired, 1);
    }
}
