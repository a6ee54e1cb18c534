//! Offer lifecycle: creation and the one-shot PENDING -> ACCEPTED | REJECTED
//! transition.
//!
//! Every operation validates synchronously and only then hands back the
//! future that talks to the store, so a rejected request never reaches the
//! dispatcher.  Status changes are conditional writes: they apply only while
//! the stored offer is still PENDING, which makes two racing transitions
//! resolve to exactly one winner.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use placement_shared::constants::{CANDIDATES_COLLECTION, OFFERS_COLLECTION, RECRUITERS_COLLECTION};
use placement_shared::validation::check_salary;
use placement_shared::{Offer, OfferStatus, UserId, ValidationError};
use placement_store::{add_record, require_record, to_fields, DocumentStore, Precondition, Query, StoreError};

use crate::error::{ClientError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusChange {
    status: OfferStatus,
    timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct OfferLifecycle {
    store: Arc<dyn DocumentStore>,
}

impl OfferLifecycle {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a PENDING offer from `recruiter_id` to `candidate_id`.
    pub fn create(
        &self,
        candidate_id: &UserId,
        recruiter_id: &UserId,
        estimated_salary: f64,
    ) -> Result<impl Future<Output = Result<Offer>> + Send + 'static> {
        if candidate_id.is_empty() {
            return Err(ValidationError::NoCandidateSelected.into());
        }
        if recruiter_id.is_empty() {
            return Err(ValidationError::NotLoggedIn.into());
        }
        let estimated_salary = check_salary(estimated_salary)?;

        Ok(insert_offer(
            Arc::clone(&self.store),
            candidate_id.clone(),
            recruiter_id.clone(),
            estimated_salary,
        ))
    }

    pub fn accept(
        &self,
        offer: &Offer,
    ) -> Result<impl Future<Output = Result<Offer>> + Send + 'static> {
        self.transition(offer, OfferStatus::Accepted)
    }

    pub fn reject(
        &self,
        offer: &Offer,
    ) -> Result<impl Future<Output = Result<Offer>> + Send + 'static> {
        self.transition(offer, OfferStatus::Rejected)
    }

    /// Move `offer` to `target`.
    ///
    /// `offer` is the caller's snapshot.  A snapshot that is already terminal
    /// is refused here without contacting the store; a snapshot that went
    /// stale in the store is refused by the conditional write, reporting the
    /// persisted status.  The returned offer carries the new status and
    /// timestamp.
    pub fn transition(
        &self,
        offer: &Offer,
        target: OfferStatus,
    ) -> Result<impl Future<Output = Result<Offer>> + Send + 'static> {
        if offer.id.is_empty() {
            return Err(ValidationError::MissingOfferId.into());
        }
        if !offer.status.can_transition_to(target) {
            return Err(ClientError::InvalidTransition {
                from: offer.status,
                to: target,
            });
        }

        Ok(write_status(Arc::clone(&self.store), offer.clone(), target))
    }
}

/// Offers addressed to a candidate.
pub fn offers_for_candidate(candidate_id: &UserId) -> Query {
    Query::collection(OFFERS_COLLECTION).where_eq("candidateId", candidate_id.as_str())
}

/// Offers sent by a recruiter.
pub fn offers_from_recruiter(recruiter_id: &UserId) -> Query {
    Query::collection(OFFERS_COLLECTION).where_eq("recruiterId", recruiter_id.as_str())
}

async fn insert_offer(
    store: Arc<dyn DocumentStore>,
    candidate_id: UserId,
    recruiter_id: UserId,
    estimated_salary: f64,
) -> Result<Offer> {
    ensure_exists(store.as_ref(), CANDIDATES_COLLECTION, candidate_id.as_str()).await?;
    ensure_exists(store.as_ref(), RECRUITERS_COLLECTION, recruiter_id.as_str()).await?;

    let offer = Offer::pending(candidate_id, recruiter_id, estimated_salary);
    let offer = add_record(store.as_ref(), offer).await?;
    tracing::info!(
        offer = %offer.id,
        candidate = %offer.candidate_id,
        recruiter = %offer.recruiter_id,
        "offer created"
    );
    Ok(offer)
}

async fn write_status(
    store: Arc<dyn DocumentStore>,
    mut offer: Offer,
    target: OfferStatus,
) -> Result<Offer> {
    let change = StatusChange {
        status: target,
        timestamp: Utc::now(),
    };
    let pending = Precondition::field_equals("status", OfferStatus::Pending.as_str());
    let write = store
        .update_if(
            OFFERS_COLLECTION,
            offer.id.as_str(),
            &pending,
            to_fields(&change)?,
        )
        .await;

    match write {
        Ok(()) => {
            offer.status = change.status;
            offer.timestamp = change.timestamp;
            tracing::info!(offer = %offer.id, status = %offer.status, "offer status changed");
            Ok(offer)
        }
        Err(StoreError::PreconditionFailed { .. }) => {
            let persisted: Offer = require_record(store.as_ref(), offer.id.as_str()).await?;
            tracing::warn!(
                offer = %offer.id,
                persisted = %persisted.status,
                requested = %target,
                "offer changed concurrently"
            );
            Err(ClientError::InvalidTransition {
                from: persisted.status,
                to: target,
            })
        }
        Err(e) => Err(e.into()),
    }
}

async fn ensure_exists(store: &dyn DocumentStore, collection: &str, id: &str) -> Result<()> {
    match store.get(collection, id).await? {
        Some(_) => Ok(()),
        None => Err(ClientError::not_found(collection, id)),
    }
}

#[cfg(test)]
mod tests {
    use placement_shared::{Candidate, Recruiter};
    use placement_store::{get_record, query_records, set_record, MemoryStore};

    use super::*;

    async fn seeded() -> (Arc<MemoryStore>, OfferLifecycle) {
        let store = Arc::new(MemoryStore::new());
        set_record(store.as_ref(), &Candidate::blank("c1".into()))
            .await
            .unwrap();
        set_record(
            store.as_ref(),
            &Recruiter {
                id: "r1".into(),
                name: "Ravi".into(),
                email: "ravi@acme.test".into(),
                company_name: Some("Acme".into()),
            },
        )
        .await
        .unwrap();
        let lifecycle = OfferLifecycle::new(store.clone());
        (store, lifecycle)
    }

    #[tokio::test]
    async fn test_create_is_pending_and_stamped() {
        let (store, offers) = seeded().await;
        let before = Utc::now();

        let offer = offers
            .create(&"c1".into(), &"r1".into(), 50_000.0)
            .unwrap()
            .await
            .unwrap();

        assert!(!offer.id.is_empty());
        assert_eq!(offer.status, OfferStatus::Pending);
        assert!(offer.timestamp >= before);

        let stored: Offer = require_record(store.as_ref(), offer.id.as_str()).await.unwrap();
        assert_eq!(stored, offer);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_salary_without_store() {
        let (store, offers) = seeded().await;
        let before = store.op_count();

        for salary in [0.0, -10.0, f64::NAN] {
            let err = offers.create(&"c1".into(), &"r1".into(), salary).err();
            assert!(matches!(
                err,
                Some(ClientError::Validation(ValidationError::SalaryNotPositive))
            ));
        }
        assert_eq!(store.op_count(), before);
    }

    #[tokio::test]
    async fn test_create_for_unknown_candidate_is_not_found() {
        let (store, offers) = seeded().await;
        let err = offers
            .create(&"ghost".into(), &"r1".into(), 1000.0)
            .unwrap()
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound { ref id, .. } if id == "ghost"));
        assert!(store.is_empty(OFFERS_COLLECTION));
    }

    #[tokio::test]
    async fn test_terminal_offer_refused_without_store() {
        let (store, offers) = seeded().await;
        let offer = offers
            .create(&"c1".into(), &"r1".into(), 50_000.0)
            .unwrap()
            .await
            .unwrap();
        let accepted = offers.accept(&offer).unwrap().await.unwrap();
        assert_eq!(accepted.status, OfferStatus::Accepted);

        let before = store.op_count();
        let err = offers.reject(&accepted).err();
        assert!(matches!(
            err,
            Some(ClientError::InvalidTransition {
                from: OfferStatus::Accepted,
                to: OfferStatus::Rejected
            })
        ));
        assert_eq!(store.op_count(), before);

        let stored: Offer = require_record(store.as_ref(), offer.id.as_str()).await.unwrap();
        assert_eq!(stored.status, OfferStatus::Accepted);
    }

    #[tokio::test]
    async fn test_stale_snapshot_loses_to_earlier_transition() {
        let (store, offers) = seeded().await;
        let offer = offers
            .create(&"c1".into(), &"r1".into(), 42_000.0)
            .unwrap()
            .await
            .unwrap();

        // Two views of the same PENDING offer; the first one wins.
        offers.accept(&offer).unwrap().await.unwrap();
        let err = offers.reject(&offer).unwrap().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::InvalidTransition {
                from: OfferStatus::Accepted,
                to: OfferStatus::Rejected
            }
        ));

        let stored: Offer = get_record(store.as_ref(), offer.id.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, OfferStatus::Accepted);
    }

    #[tokio::test]
    async fn test_transition_of_deleted_offer_is_not_found() {
        let (_store, offers) = seeded().await;
        let mut ghost = Offer::pending("c1".into(), "r1".into(), 10.0);
        ghost.id = "gone".into();

        let err = offers.accept(&ghost).unwrap().await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_offer_id() {
        let (_store, offers) = seeded().await;
        let unsaved = Offer::pending("c1".into(), "r1".into(), 10.0);
        assert!(matches!(
            offers.accept(&unsaved).err(),
            Some(ClientError::Validation(ValidationError::MissingOfferId))
        ));
    }

    #[tokio::test]
    async fn test_queries_by_party() {
        let (store, offers) = seeded().await;
        offers
            .create(&"c1".into(), &"r1".into(), 1.0)
            .unwrap()
            .await
            .unwrap();

        let mine: Vec<Offer> = query_records(store.as_ref(), &offers_for_candidate(&"c1".into()))
            .await
            .unwrap();
        let sent: Vec<Offer> = query_records(store.as_ref(), &offers_from_recruiter(&"r1".into()))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(sent, mine);
    }
}
