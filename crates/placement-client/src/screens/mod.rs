//! One synchronizer per screen.
//!
//! A screen owns its observable state and a [`ScreenContext`]; every store
//! access goes through [`ScreenContext::run`], so results land on the
//! presentation thread with the busy indicator already hidden.
//!
//! [`ScreenContext`]: crate::screen::ScreenContext
//! [`ScreenContext::run`]: crate::screen::ScreenContext::run

pub mod candidate_dashboard;
pub mod login;
pub mod profile;
pub mod recruiter_dashboard;
pub mod sign_up;

pub use candidate_dashboard::CandidateDashboard;
pub use login::LoginScreen;
pub use profile::{ProfileForm, ProfileScreen};
pub use recruiter_dashboard::RecruiterDashboard;
pub use sign_up::SignUpScreen;

use placement_shared::Offer;

/// An offer together with the display label of the other party.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRow {
    pub offer: Offer,
    pub counterpart: String,
}

pub(crate) const ERROR_TITLE: &str = "Error";
pub(crate) const SUCCESS_TITLE: &str = "Success";
