//! Account registration screen.

use placement_shared::validation::{validate_sign_up, Registration, SignUpForm};
use placement_shared::UserId;

use super::{ERROR_TITLE, SUCCESS_TITLE};
use crate::auth::AuthService;
use crate::dispatch::DispatchHandle;
use crate::error::{ClientError, Result};
use crate::screen::{ScreenContext, ScreenId, ScreenParams};

#[derive(Clone)]
pub struct SignUpScreen {
    ctx: ScreenContext,
    auth: AuthService,
}

impl SignUpScreen {
    pub fn new(ctx: ScreenContext, auth: AuthService) -> Self {
        Self { ctx, auth }
    }

    pub fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    /// Register the account and return to the login screen.
    pub fn sign_up(&self, form: &SignUpForm) -> Option<DispatchHandle> {
        let registration = match validate_sign_up(form) {
            Ok(registration) => registration,
            Err(e) => {
                self.ctx.report(ERROR_TITLE, &ClientError::from(e));
                return None;
            }
        };

        let ctx = self.ctx.clone();
        Some(self.ctx.run(
            "register",
            register(self.auth.clone(), registration),
            move |outcome| match outcome {
                Ok(Some(_)) => {
                    ctx.info(SUCCESS_TITLE, "Registration successful! Please log in.");
                    ctx.navigate(ScreenId::Login, ScreenParams::none());
                }
                Ok(None) => ctx.error(
                    ERROR_TITLE,
                    "Registration failed. Email may already be in use.",
                ),
                Err(e) => ctx.report(ERROR_TITLE, &e),
            },
        ))
    }

    pub fn back_to_login(&self) {
        self.ctx.navigate(ScreenId::Login, ScreenParams::none());
    }
}

async fn register(auth: AuthService, registration: Registration) -> Result<Option<UserId>> {
    auth.register(&registration).await
}
