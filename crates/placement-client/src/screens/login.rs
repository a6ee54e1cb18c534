//! Login and password-reset screen.

use placement_shared::validation::{validate_login, validate_reset, Credentials, PasswordReset};
use placement_shared::{Role, UserId};

use super::{ERROR_TITLE, SUCCESS_TITLE};
use crate::auth::AuthService;
use crate::dispatch::DispatchHandle;
use crate::error::{ClientError, Result};
use crate::screen::{ScreenContext, ScreenId, ScreenParams};

#[derive(Clone)]
pub struct LoginScreen {
    ctx: ScreenContext,
    auth: AuthService,
}

impl LoginScreen {
    pub fn new(ctx: ScreenContext, auth: AuthService) -> Self {
        Self { ctx, auth }
    }

    pub fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    /// Authenticate and open the dashboard for the account's role.
    pub fn login(&self, email: &str, password: &str) -> Option<DispatchHandle> {
        let credentials = match validate_login(email, password) {
            Ok(credentials) => credentials,
            Err(e) => {
                self.ctx.report(ERROR_TITLE, &ClientError::from(e));
                return None;
            }
        };

        let ctx = self.ctx.clone();
        Some(self.ctx.run(
            "login",
            sign_in(self.auth.clone(), credentials),
            move |outcome| match outcome {
                Ok(Some((user_id, Some(role)))) => {
                    ctx.navigate(ScreenId::dashboard_for(role), ScreenParams::for_user(user_id));
                }
                Ok(Some((user_id, None))) => {
                    tracing::warn!(user = %user_id, "account has no role");
                    ctx.error(ERROR_TITLE, "Could not determine user role.");
                }
                Ok(None) => ctx.error(ERROR_TITLE, "Invalid credentials"),
                Err(e) => ctx.report(ERROR_TITLE, &e),
            },
        ))
    }

    pub fn reset_password(
        &self,
        email: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Option<DispatchHandle> {
        let reset = match validate_reset(email, new_password, confirm_password) {
            Ok(reset) => reset,
            Err(e) => {
                self.ctx.report(ERROR_TITLE, &ClientError::from(e));
                return None;
            }
        };

        let ctx = self.ctx.clone();
        Some(self.ctx.run(
            "reset password",
            reset_password(self.auth.clone(), reset),
            move |outcome| match outcome {
                Ok(true) => ctx.info(SUCCESS_TITLE, "Password has been successfully reset"),
                Ok(false) => ctx.error(ERROR_TITLE, "Failed to reset password. Email not found."),
                Err(e) => ctx.error(ERROR_TITLE, &format!("Error resetting password: {e}")),
            },
        ))
    }

    pub fn open_sign_up(&self) {
        self.ctx.navigate(ScreenId::SignUp, ScreenParams::none());
    }
}

async fn sign_in(
    auth: AuthService,
    credentials: Credentials,
) -> Result<Option<(UserId, Option<Role>)>> {
    let Some(user_id) = auth
        .authenticate(&credentials.email, &credentials.password)
        .await?
    else {
        return Ok(None);
    };
    let role = auth.role_of(&user_id).await?;
    Ok(Some((user_id, role)))
}

async fn reset_password(auth: AuthService, reset: PasswordReset) -> Result<bool> {
    auth.reset_password(&reset.email, &reset.new_password).await
}
