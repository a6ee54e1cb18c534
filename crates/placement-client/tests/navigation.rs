mod common;

use std::rc::Rc;

use placement_client_lib::config::{ClientConfig, StoreKind};
use placement_client_lib::events::AlertLevel;
use placement_client_lib::host::{Dashboard, Screen, ScreenHost};
use placement_client_lib::screen::{ScreenId, ScreenParams};
use placement_client_lib::screens::{LoginScreen, SignUpScreen};
use placement_client_lib::testing::RecordingNotifier;
use placement_client_lib::App;
use placement_shared::constants::{RECRUITERS_COLLECTION, USERS_COLLECTION};
use placement_shared::validation::SignUpForm;
use placement_shared::Role;
use tokio::task::LocalSet;

use common::Harness;

fn recruiter_form(email: &str) -> SignUpForm {
    SignUpForm {
        name: "Ravi".into(),
        email: email.into(),
        password: "secret-pass".into(),
        confirm_password: "secret-pass".into(),
        role: "recruiter".into(),
        company_name: "Acme".into(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn duplicate_sign_up_creates_nothing() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::new();
            let screen = SignUpScreen::new(h.context(), h.state.auth());

            screen.sign_up(&recruiter_form("ravi@acme.test")).unwrap();
            h.settle().await;
            assert_eq!(
                h.navigator.last(),
                Some((ScreenId::Login, ScreenParams::none()))
            );
            let writes = h.store.write_count();

            screen.sign_up(&recruiter_form("ravi@acme.test")).unwrap();
            h.settle().await;

            let last = h.notifier.last().unwrap();
            assert_eq!(last.level, AlertLevel::Error);
            assert_eq!(last.message, "Registration failed. Email may already be in use.");
            assert_eq!(h.store.write_count(), writes);
            assert_eq!(h.store.len(USERS_COLLECTION), 1);
            assert_eq!(h.store.len(RECRUITERS_COLLECTION), 1);
        })
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sign_up_validation_messages() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::new();
            let screen = SignUpScreen::new(h.context(), h.state.auth());

            let mismatch = SignUpForm {
                confirm_password: "other".into(),
                ..recruiter_form("a@b.c")
            };
            assert!(screen.sign_up(&mismatch).is_none());
            assert_eq!(h.notifier.last().unwrap().message, "Passwords do not match");

            let no_company = SignUpForm {
                company_name: "  ".into(),
                ..recruiter_form("a@b.c")
            };
            assert!(screen.sign_up(&no_company).is_none());
            assert_eq!(
                h.notifier.last().unwrap().message,
                "Company name is required for recruiters"
            );
            assert_eq!(h.store.op_count(), 0);
        })
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn login_routes_to_role_dashboard() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::new();
            let r1 = h.register("Ravi", "ravi@acme.test", Role::Recruiter).await;
            let login = LoginScreen::new(h.context(), h.state.auth());

            login.login("ravi@acme.test", "wrong").unwrap();
            h.settle().await;
            assert_eq!(h.notifier.last().unwrap().message, "Invalid credentials");

            login.login(" ravi@acme.test ", "secret-pass").unwrap();
            h.settle().await;
            assert_eq!(
                h.navigator.last(),
                Some((ScreenId::RecruiterDashboard, ScreenParams::for_user(r1)))
            );

            assert!(login.login("", "x").is_none());
            assert_eq!(
                h.notifier.last().unwrap().message,
                "Please enter both email and password."
            );
        })
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn host_swaps_screens_on_navigation() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::new();
            let c1 = h.register("Chitra", "chitra@example.com", Role::Candidate).await;
            let host = ScreenHost::new(h.state.clone());

            host.show(ScreenId::Login, ScreenParams::none());
            let Some(Screen::Login(login)) = host.current() else {
                panic!("expected login screen");
            };
            login.login("chitra@example.com", "secret-pass").unwrap();
            h.settle().await;

            assert_eq!(host.current_id(), Some(ScreenId::CandidateDashboard));
            let Some(Screen::Dashboard(Dashboard::Candidate(dashboard))) = host.current() else {
                panic!("expected candidate dashboard");
            };
            assert_eq!(dashboard.user_id(), &c1);
            assert_eq!(dashboard.welcome().get(), "Welcome, Chitra");

            // The old login context went stale with the swap.
            assert!(!login.context().is_current());

            host.show_dashboard(Role::Recruiter, "r-unknown".into());
            h.settle().await;
            assert_eq!(host.current_id(), Some(ScreenId::RecruiterDashboard));
        })
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn recruiter_dashboard_without_id_reports_error() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::new();
            let host = ScreenHost::new(h.state.clone());
            host.show(ScreenId::RecruiterDashboard, ScreenParams::none());
            h.settle().await;

            let errors = h.notifier.errors();
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors[0].message,
                "Session is missing a user id. Please log in again."
            );
            assert_eq!(h.store.op_count(), 0);
        })
        .await;
}

#[test]
fn app_runs_against_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig {
        store: StoreKind::Sqlite,
        db_path: Some(dir.path().join("placement.db")),
        ..ClientConfig::default()
    };
    let notifier = Rc::new(RecordingNotifier::new());

    let app = App::open(config).unwrap();
    let landed = app.run(notifier.clone(), |host| async move {
        let Some(Screen::Login(login)) = host.current() else {
            panic!("app should start on login");
        };
        login.open_sign_up();
        let Some(Screen::SignUp(sign_up)) = host.current() else {
            panic!("expected sign-up screen");
        };
        sign_up.sign_up(&recruiter_form("ravi@acme.test")).unwrap();
        host.state().dispatcher().settle().await;
        assert_eq!(host.current_id(), Some(ScreenId::Login));

        let Some(Screen::Login(login)) = host.current() else {
            panic!("expected login after sign-up");
        };
        login.login("ravi@acme.test", "secret-pass").unwrap();
        host.state().dispatcher().settle().await;
        host.current_id()
    });

    assert_eq!(landed, Some(ScreenId::RecruiterDashboard));
    assert!(notifier.errors().is_empty(), "{:?}", notifier.errors());
}
