//! Candidate landing screen: welcome line and received offers.

use std::sync::Arc;

use futures::future::join_all;

use placement_shared::{Offer, OfferStatus, Recruiter, User, UserId};
use placement_store::{get_record, query_records, DocumentStore};

use super::{OfferRow, ERROR_TITLE, SUCCESS_TITLE};
use crate::dispatch::DispatchHandle;
use crate::error::Result;
use crate::observable::{Observable, ObservableList};
use crate::offers::{offers_for_candidate, OfferLifecycle};
use crate::screen::{ScreenContext, ScreenId, ScreenParams};

pub const WELCOME_FALLBACK: &str = "Welcome, Candidate";
pub const NO_COMPANY_SPECIFIED: &str = "No Company Specified";
pub const NO_COMPANY_NAME: &str = "No Company Name";
pub const COMPANY_LOAD_FAILED: &str = "Error Loading Company";

#[derive(Clone)]
pub struct CandidateDashboard {
    ctx: ScreenContext,
    offers: OfferLifecycle,
    user_id: UserId,
    welcome: Observable<String>,
    rows: ObservableList<OfferRow>,
}

impl CandidateDashboard {
    pub fn new(ctx: ScreenContext, offers: OfferLifecycle, user_id: UserId) -> Self {
        Self {
            ctx,
            offers,
            user_id,
            welcome: Observable::new(WELCOME_FALLBACK.to_string()),
            rows: ObservableList::new(),
        }
    }

    pub fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn welcome(&self) -> &Observable<String> {
        &self.welcome
    }

    pub fn offers(&self) -> &ObservableList<OfferRow> {
        &self.rows
    }

    pub fn initialize(&self) {
        self.load_name();
        self.load_offers();
    }

    /// A failed lookup keeps the generic greeting.
    pub fn load_name(&self) -> DispatchHandle {
        let welcome = self.welcome.clone();
        self.ctx.run(
            "load candidate name",
            fetch_name(self.ctx.store(), self.user_id.clone()),
            move |outcome| match outcome {
                Ok(Some(name)) if !name.trim().is_empty() => welcome.set(format!("Welcome, {name}")),
                Ok(_) => welcome.set(WELCOME_FALLBACK.to_string()),
                Err(e) => {
                    tracing::warn!(error = %e, "could not load candidate name");
                    welcome.set(WELCOME_FALLBACK.to_string());
                }
            },
        )
    }

    pub fn load_offers(&self) -> DispatchHandle {
        let (rows, ctx) = (self.rows.clone(), self.ctx.clone());
        self.ctx.run(
            "load received offers",
            fetch_rows(self.ctx.store(), self.user_id.clone()),
            move |outcome| match outcome {
                Ok(loaded) => rows.set_all(loaded),
                Err(e) => ctx.error(ERROR_TITLE, &format!("Failed to load offers: {e}")),
            },
        )
    }

    pub fn accept(&self, offer: &Offer) -> Option<DispatchHandle> {
        self.respond(offer, OfferStatus::Accepted)
    }

    pub fn reject(&self, offer: &Offer) -> Option<DispatchHandle> {
        self.respond(offer, OfferStatus::Rejected)
    }

    fn respond(&self, offer: &Offer, target: OfferStatus) -> Option<DispatchHandle> {
        let work = match self.offers.transition(offer, target) {
            Ok(work) => work,
            Err(e) => {
                self.ctx.report(ERROR_TITLE, &e);
                return None;
            }
        };

        let screen = self.clone();
        Some(self.ctx.run("respond to offer", work, move |outcome| match outcome {
            Ok(updated) => {
                let verb = updated.status.as_str().to_lowercase();
                screen
                    .ctx
                    .info(SUCCESS_TITLE, &format!("Offer {verb} successfully."));
                screen.load_offers();
            }
            Err(e) => screen
                .ctx
                .error(ERROR_TITLE, &format!("Failed to update offer status: {e}")),
        }))
    }

    pub fn edit_profile(&self) {
        self.ctx.navigate(
            ScreenId::CandidateProfile,
            ScreenParams::for_user(self.user_id.clone()),
        );
    }

    pub fn logout(&self) {
        self.ctx.navigate(ScreenId::Login, ScreenParams::none());
    }
}

async fn fetch_name(store: Arc<dyn DocumentStore>, user_id: UserId) -> Result<Option<String>> {
    let user: Option<User> = get_record(store.as_ref(), user_id.as_str()).await?;
    Ok(user.map(|u| u.name))
}

async fn fetch_rows(store: Arc<dyn DocumentStore>, user_id: UserId) -> Result<Vec<OfferRow>> {
    let offers: Vec<Offer> = query_records(store.as_ref(), &offers_for_candidate(&user_id)).await?;
    let labels = join_all(
        offers
            .iter()
            .map(|offer| company_label(store.as_ref(), &offer.recruiter_id)),
    )
    .await;

    Ok(offers
        .into_iter()
        .zip(labels)
        .map(|(offer, counterpart)| OfferRow { offer, counterpart })
        .collect())
}

async fn company_label(store: &dyn DocumentStore, recruiter_id: &UserId) -> String {
    if recruiter_id.is_empty() {
        return NO_COMPANY_SPECIFIED.to_string();
    }
    match get_record::<Recruiter>(store, recruiter_id.as_str()).await {
        Ok(recruiter) => recruiter
            .and_then(|r| r.company_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| NO_COMPANY_NAME.to_string()),
        Err(e) => {
            tracing::warn!(recruiter = %recruiter_id, error = %e, "could not load company");
            COMPANY_LOAD_FAILED.to_string()
        }
    }
}
