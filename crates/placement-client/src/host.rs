//! Owns the visible screen and swaps it on navigation.
//!
//! Every swap advances the [`ScreenSlot`], so completions still in flight
//! for the previous screen find their token stale and leave its state alone.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use placement_shared::{Role, UserId};

use crate::screen::{Navigator, ScreenId, ScreenParams, ScreenSlot};
use crate::screens::{
    CandidateDashboard, LoginScreen, ProfileScreen, RecruiterDashboard, SignUpScreen,
};
use crate::state::AppState;

/// The landing screen of a signed-in user, chosen by role.
#[derive(Clone)]
pub enum Dashboard {
    Candidate(CandidateDashboard),
    Recruiter(RecruiterDashboard),
}

impl Dashboard {
    pub fn id(&self) -> ScreenId {
        match self {
            Self::Candidate(_) => ScreenId::CandidateDashboard,
            Self::Recruiter(_) => ScreenId::RecruiterDashboard,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Candidate(_) => Role::Candidate,
            Self::Recruiter(_) => Role::Recruiter,
        }
    }

    pub fn initialize(&self) {
        match self {
            Self::Candidate(screen) => screen.initialize(),
            Self::Recruiter(screen) => screen.initialize(),
        }
    }
}

#[derive(Clone)]
pub enum Screen {
    Login(LoginScreen),
    SignUp(SignUpScreen),
    Dashboard(Dashboard),
    Profile(ProfileScreen),
}

impl Screen {
    pub fn id(&self) -> ScreenId {
        match self {
            Self::Login(_) => ScreenId::Login,
            Self::SignUp(_) => ScreenId::SignUp,
            Self::Dashboard(dashboard) => dashboard.id(),
            Self::Profile(_) => ScreenId::CandidateProfile,
        }
    }

    fn initialize(&self) {
        match self {
            Self::Dashboard(dashboard) => dashboard.initialize(),
            Self::Profile(screen) => screen.initialize(),
            Self::Login(_) | Self::SignUp(_) => {}
        }
    }
}

pub struct ScreenHost {
    state: AppState,
    slot: ScreenSlot,
    current: RefCell<Option<Screen>>,
    navigator: Rc<HostNavigator>,
}

impl ScreenHost {
    pub fn new(state: AppState) -> Rc<Self> {
        Rc::new_cyclic(|host| Self {
            state,
            slot: ScreenSlot::new(),
            current: RefCell::new(None),
            navigator: Rc::new(HostNavigator(host.clone())),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Replace the visible screen and start its initial loads.
    pub fn show(&self, id: ScreenId, params: ScreenParams) {
        let token = self.slot.advance();
        let ctx = self.state.screen_context(token, self.navigator.clone());
        let user_id = params.user_id.unwrap_or_default();

        let screen = match id {
            ScreenId::Login => Screen::Login(LoginScreen::new(ctx, self.state.auth())),
            ScreenId::SignUp => Screen::SignUp(SignUpScreen::new(ctx, self.state.auth())),
            ScreenId::CandidateDashboard => Screen::Dashboard(Dashboard::Candidate(
                CandidateDashboard::new(ctx, self.state.offers(), user_id),
            )),
            ScreenId::RecruiterDashboard => Screen::Dashboard(Dashboard::Recruiter(
                RecruiterDashboard::new(ctx, self.state.offers(), user_id),
            )),
            ScreenId::CandidateProfile => Screen::Profile(ProfileScreen::new(ctx, user_id)),
        };

        tracing::info!(screen = %id, generation = self.slot.current(), "showing screen");
        let previous = self.current.replace(Some(screen.clone()));
        drop(previous);
        screen.initialize();
    }

    /// Open the dashboard matching `role`.
    pub fn show_dashboard(&self, role: Role, user_id: UserId) {
        self.show(ScreenId::dashboard_for(role), ScreenParams::for_user(user_id));
    }

    pub fn current(&self) -> Option<Screen> {
        self.current.borrow().clone()
    }

    pub fn current_id(&self) -> Option<ScreenId> {
        self.current.borrow().as_ref().map(Screen::id)
    }
}

impl Navigator for ScreenHost {
    fn show_screen(&self, screen: ScreenId, params: ScreenParams) {
        self.show(screen, params);
    }
}

/// Navigator handed to screens.  Holds the host weakly so screens never keep
/// it alive.
pub struct HostNavigator(Weak<ScreenHost>);

impl Navigator for HostNavigator {
    fn show_screen(&self, screen: ScreenId, params: ScreenParams) {
        match self.0.upgrade() {
            Some(host) => host.show(screen, params),
            None => tracing::debug!(%screen, "host gone, ignoring navigation"),
        }
    }
}
