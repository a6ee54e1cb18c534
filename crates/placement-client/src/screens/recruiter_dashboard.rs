//! Recruiter landing screen: candidate browser, hiring, sent offers.

use std::sync::Arc;

use futures::future::join_all;

use placement_shared::constants::CANDIDATES_COLLECTION;
use placement_shared::crypto::decode_cv;
use placement_shared::validation::parse_salary;
use placement_shared::{Candidate, Offer, UserId, ValidationError};
use placement_store::{get_record, query_records, DocumentStore, Query};

use super::{OfferRow, ERROR_TITLE, SUCCESS_TITLE};
use crate::dispatch::DispatchHandle;
use crate::error::{ClientError, Result};
use crate::filter::CandidateFilter;
use crate::observable::{Observable, ObservableList};
use crate::offers::{offers_from_recruiter, OfferLifecycle};
use crate::screen::{ScreenContext, ScreenId, ScreenParams};

pub const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";
pub const NAME_LOAD_FAILED: &str = "Error Loading Name";

#[derive(Clone)]
pub struct RecruiterDashboard {
    ctx: ScreenContext,
    offers: OfferLifecycle,
    recruiter_id: UserId,
    candidates: ObservableList<Candidate>,
    filtered: ObservableList<Candidate>,
    filter: Observable<CandidateFilter>,
    selected: Observable<Option<Candidate>>,
    sent: ObservableList<OfferRow>,
}

impl RecruiterDashboard {
    pub fn new(ctx: ScreenContext, offers: OfferLifecycle, recruiter_id: UserId) -> Self {
        Self {
            ctx,
            offers,
            recruiter_id,
            candidates: ObservableList::new(),
            filtered: ObservableList::new(),
            filter: Observable::default(),
            selected: Observable::new(None),
            sent: ObservableList::new(),
        }
    }

    pub fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    pub fn recruiter_id(&self) -> &UserId {
        &self.recruiter_id
    }

    /// Every candidate, in store order.
    pub fn candidates(&self) -> &ObservableList<Candidate> {
        &self.candidates
    }

    /// The candidates passing the current filter.
    pub fn filtered(&self) -> &ObservableList<Candidate> {
        &self.filtered
    }

    pub fn selected(&self) -> Option<Candidate> {
        self.selected.get()
    }

    pub fn sent_offers(&self) -> &ObservableList<OfferRow> {
        &self.sent
    }

    /// Load both lists.  Without a recruiter id there is nothing to show.
    pub fn initialize(&self) {
        if self.recruiter_id.is_empty() {
            self.ctx
                .report(ERROR_TITLE, &ClientError::from(ValidationError::NotLoggedIn));
            return;
        }
        self.load_candidates();
        self.load_offers();
    }

    pub fn load_candidates(&self) -> DispatchHandle {
        let screen = self.clone();
        self.ctx.run(
            "load candidates",
            fetch_candidates(self.ctx.store()),
            move |outcome| match outcome {
                Ok(all) => {
                    screen.candidates.set_all(all);
                    screen.refilter();
                }
                Err(e) => screen
                    .ctx
                    .error(ERROR_TITLE, &format!("Error loading candidates: {e}")),
            },
        )
    }

    pub fn load_offers(&self) -> DispatchHandle {
        let (sent, ctx) = (self.sent.clone(), self.ctx.clone());
        self.ctx.run(
            "load sent offers",
            fetch_rows(self.ctx.store(), self.recruiter_id.clone()),
            move |outcome| match outcome {
                Ok(rows) => sent.set_all(rows),
                Err(e) => ctx.error(ERROR_TITLE, &format!("Error loading offers: {e}")),
            },
        )
    }

    /// Apply new filter inputs as typed in the form.
    pub fn set_filter(&self, min_marks: &str, qualification: &str) {
        self.filter
            .set(CandidateFilter::from_inputs(min_marks, qualification));
        self.refilter();
    }

    pub fn filter(&self) -> CandidateFilter {
        self.filter.get()
    }

    fn refilter(&self) {
        let filter = self.filter.get();
        let visible = self.candidates.with(|all| filter.apply(all));
        tracing::debug!(visible = visible.len(), total = self.candidates.len(), "candidates filtered");
        // A selection the new view hides is dropped; a visible one is refreshed.
        let selected = self
            .selected
            .get()
            .and_then(|s| visible.iter().find(|c| c.id == s.id).cloned());
        self.selected.set(selected);
        self.filtered.set_all(visible);
    }

    /// Select a visible candidate.  `false` if no such candidate is shown.
    pub fn select(&self, candidate_id: &UserId) -> bool {
        let found = self.filtered.find(|c| &c.id == candidate_id);
        let hit = found.is_some();
        self.selected.set(found);
        hit
    }

    /// Send an offer to the selected candidate.
    pub fn hire(&self, salary: &str) -> Option<DispatchHandle> {
        let prepared = self
            .selected
            .get()
            .ok_or(ClientError::from(ValidationError::NoCandidateSelected))
            .and_then(|candidate| {
                let salary = parse_salary(salary)?;
                let work = self.offers.create(&candidate.id, &self.recruiter_id, salary)?;
                Ok((candidate, salary, work))
            });
        let (candidate, salary, work) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.ctx.report(ERROR_TITLE, &e);
                return None;
            }
        };

        let screen = self.clone();
        Some(self.ctx.run("send offer", work, move |outcome| match outcome {
            Ok(_) => {
                screen.ctx.info(
                    SUCCESS_TITLE,
                    &format!(
                        "Hiring request sent for {} with salary: {salary}",
                        candidate.name
                    ),
                );
                screen.load_offers();
            }
            Err(e) => screen
                .ctx
                .error(ERROR_TITLE, &format!("Error sending hire request: {e}")),
        }))
    }

    /// Decoded CV bytes of a listed candidate.
    pub fn candidate_cv(&self, candidate_id: &UserId) -> Result<Vec<u8>> {
        let outcome = self
            .candidates
            .find(|c| &c.id == candidate_id)
            .ok_or_else(|| ClientError::not_found(CANDIDATES_COLLECTION, candidate_id.as_str()))
            .and_then(|candidate| match candidate.cv_url.as_deref() {
                Some(cv) if candidate.has_cv() => Ok(decode_cv(cv)?),
                _ => Err(ValidationError::NoCv(candidate.name.clone()).into()),
            });

        if let Err(e) = &outcome {
            self.ctx.report(ERROR_TITLE, e);
        }
        outcome
    }

    pub fn logout(&self) {
        self.ctx.navigate(ScreenId::Login, ScreenParams::none());
    }
}

async fn fetch_candidates(store: Arc<dyn DocumentStore>) -> Result<Vec<Candidate>> {
    Ok(query_records(store.as_ref(), &Query::collection(CANDIDATES_COLLECTION)).await?)
}

async fn fetch_rows(store: Arc<dyn DocumentStore>, recruiter_id: UserId) -> Result<Vec<OfferRow>> {
    let offers: Vec<Offer> =
        query_records(store.as_ref(), &offers_from_recruiter(&recruiter_id)).await?;
    let labels = join_all(
        offers
            .iter()
            .map(|offer| candidate_label(store.as_ref(), &offer.candidate_id)),
    )
    .await;

    Ok(offers
        .into_iter()
        .zip(labels)
        .map(|(offer, counterpart)| OfferRow { offer, counterpart })
        .collect())
}

async fn candidate_label(store: &dyn DocumentStore, candidate_id: &UserId) -> String {
    match get_record::<Candidate>(store, candidate_id.as_str()).await {
        Ok(candidate) => candidate
            .map(|c| c.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string()),
        Err(e) => {
            tracing::warn!(candidate = %candidate_id, error = %e, "could not load candidate name");
            NAME_LOAD_FAILED.to_string()
        }
    }
}
