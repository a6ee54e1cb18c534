//! Domain records persisted as documents in the remote store.
//!
//! Field names follow the store's camelCase schema.  Document ids are not part
//! of the stored body for `User` and `Offer`; the store assigns them and they
//! are attached after a read through [`Record::set_id`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CANDIDATES_COLLECTION, MAX_MARKS, MIN_MARKS, OFFERS_COLLECTION, RECRUITERS_COLLECTION,
    USERS_COLLECTION,
};
use crate::types::{OfferId, Role, UserId};

/// A document type bound to one store collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A login account.  Immutable after registration except for `password_hash`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip)]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl Record for User {
    const COLLECTION: &'static str = USERS_COLLECTION;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn set_id(&mut self, id: String) {
        self.id = UserId(id);
    }
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// Candidate profile, keyed by the owning user's id.
///
/// Saved with a full overwrite, so every field here is the whole record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(rename = "userId", default)]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub marks: f64,
    #[serde(default)]
    pub qualification: Option<String>,
    /// Base64-encoded CV document.
    #[serde(default)]
    pub cv_url: Option<String>,
}

impl Candidate {
    /// Empty profile for a user who has never saved one.
    pub fn blank(id: UserId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn has_cv(&self) -> bool {
        self.cv_url
            .as_deref()
            .is_some_and(|cv| !cv.trim().is_empty())
    }
}

impl Record for Candidate {
    const COLLECTION: &'static str = CANDIDATES_COLLECTION;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn set_id(&mut self, id: String) {
        self.id = UserId(id);
    }
}

pub fn marks_in_range(marks: f64) -> bool {
    (MIN_MARKS..=MAX_MARKS).contains(&marks)
}

// ---------------------------------------------------------------------------
// Recruiter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recruiter {
    #[serde(rename = "userId", default)]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl Record for Recruiter {
    const COLLECTION: &'static str = RECRUITERS_COLLECTION;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn set_id(&mut self, id: String) {
        self.id = UserId(id);
    }
}

// ---------------------------------------------------------------------------
// Offer
// ---------------------------------------------------------------------------

/// Lifecycle state of an offer.  `Pending` is the only state an offer is
/// created in and the only state it may leave.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// One-shot: only `Pending -> Accepted` and `Pending -> Rejected`.
    pub fn can_transition_to(&self, target: OfferStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(skip)]
    pub id: OfferId,
    pub candidate_id: UserId,
    pub recruiter_id: UserId,
    pub status: OfferStatus,
    pub estimated_salary: f64,
    /// Set on creation and on every status change.
    pub timestamp: DateTime<Utc>,
}

impl Offer {
    /// A fresh offer, always `Pending` and stamped now.  Not yet persisted,
    /// so the id is empty until the store assigns one.
    pub fn pending(candidate_id: UserId, recruiter_id: UserId, estimated_salary: f64) -> Self {
        Self {
            id: OfferId::default(),
            candidate_id,
            recruiter_id,
            status: OfferStatus::Pending,
            estimated_salary,
            timestamp: Utc::now(),
        }
    }
}

impl Record for Offer {
    const COLLECTION: &'static str = OFFERS_COLLECTION;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn set_id(&mut self, id: String) {
        self.id = OfferId(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_can_transition() {
        assert!(OfferStatus::Pending.can_transition_to(OfferStatus::Accepted));
        assert!(OfferStatus::Pending.can_transition_to(OfferStatus::Rejected));
        assert!(!OfferStatus::Pending.can_transition_to(OfferStatus::Pending));
        assert!(!OfferStatus::Accepted.can_transition_to(OfferStatus::Rejected));
        assert!(!OfferStatus::Rejected.can_transition_to(OfferStatus::Accepted));
        assert!(!OfferStatus::Accepted.can_transition_to(OfferStatus::Accepted));
    }

    #[test]
    fn test_new_offer_is_pending_and_stamped() {
        let before = Utc::now();
        let offer = Offer::pending("c1".into(), "r1".into(), 50_000.0);
        assert_eq!(offer.status, OfferStatus::Pending);
        assert!(offer.timestamp >= before);
        assert!(offer.id.is_empty());
    }

    #[test]
    fn test_offer_document_shape() {
        let offer = Offer::pending("c1".into(), "r1".into(), 1200.0);
        let value = serde_json::to_value(&offer).unwrap();
        assert_eq!(value["candidateId"], "c1");
        assert_eq!(value["recruiterId"], "r1");
        assert_eq!(value["status"], "PENDING");
        assert_eq!(value["estimatedSalary"], 1200.0);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_candidate_decodes_sparse_document() {
        // Registration writes the candidate record without marks or qualification.
        let json = serde_json::json!({
            "userId": "u1",
            "name": "Asha",
            "email": "asha@example.com",
            "cvUrl": null
        });
        let candidate: Candidate = serde_json::from_value(json).unwrap();
        assert_eq!(candidate.id, UserId::from("u1"));
        assert_eq!(candidate.marks, 0.0);
        assert!(candidate.qualification.is_none());
        assert!(!candidate.has_cv());
    }

    #[test]
    fn test_marks_bounds_inclusive() {
        assert!(marks_in_range(0.0));
        assert!(marks_in_range(100.0));
        assert!(!marks_in_range(-0.5));
        assert!(!marks_in_range(100.01));
        assert!(!marks_in_range(f64::NAN));
    }
}
