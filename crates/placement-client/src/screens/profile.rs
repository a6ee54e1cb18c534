//! Candidate profile editor.

use std::sync::Arc;

use serde_json::json;

use placement_shared::constants::{CANDIDATES_COLLECTION, QUALIFICATIONS};
use placement_shared::crypto::encode_cv;
use placement_shared::validation::parse_marks;
use placement_shared::{Candidate, UserId, ValidationError};
use placement_store::{get_record, set_record, DocumentStore, Fields, StoreError};

use super::{ERROR_TITLE, SUCCESS_TITLE};
use crate::dispatch::DispatchHandle;
use crate::error::{ClientError, Result};
use crate::observable::Observable;
use crate::screen::{ScreenContext, ScreenId, ScreenParams};

/// Editable fields as shown in the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub marks: String,
    pub qualification: Option<String>,
}

impl From<&Candidate> for ProfileForm {
    fn from(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            marks: candidate.marks.to_string(),
            qualification: candidate.qualification.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ProfileScreen {
    ctx: ScreenContext,
    user_id: UserId,
    /// Last persisted state of the record.
    profile: Observable<Candidate>,
    form: Observable<ProfileForm>,
}

impl ProfileScreen {
    pub fn new(ctx: ScreenContext, user_id: UserId) -> Self {
        Self {
            ctx,
            profile: Observable::new(Candidate::blank(user_id.clone())),
            user_id,
            form: Observable::default(),
        }
    }

    pub fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    pub fn profile(&self) -> &Observable<Candidate> {
        &self.profile
    }

    pub fn form(&self) -> &Observable<ProfileForm> {
        &self.form
    }

    /// Choices for the qualification selector.
    pub fn qualifications() -> &'static [&'static str] {
        QUALIFICATIONS
    }

    pub fn initialize(&self) {
        self.load();
    }

    /// Fill the form from the stored record.  A user without one starts
    /// from a blank record that is only written on the first save.
    pub fn load(&self) -> DispatchHandle {
        let screen = self.clone();
        self.ctx.run(
            "load profile",
            fetch_profile(self.ctx.store(), self.user_id.clone()),
            move |outcome| match outcome {
                Ok(Some(candidate)) => {
                    screen.form.set(ProfileForm::from(&candidate));
                    screen.profile.set(candidate);
                }
                Ok(None) => {
                    tracing::debug!(user = %screen.user_id, "no profile yet");
                    screen.profile.set(Candidate::blank(screen.user_id.clone()));
                }
                Err(e) => screen
                    .ctx
                    .error(ERROR_TITLE, &format!("Failed to load profile: {e}")),
            },
        )
    }

    /// Validate and overwrite the whole record, then go back to the
    /// dashboard.  The CV is taken from the stored record at write time,
    /// so a save before `load` has finished cannot drop it.
    pub fn save(&self, form: ProfileForm) -> Option<DispatchHandle> {
        let marks = match parse_marks(&form.marks) {
            Ok(marks) => marks,
            Err(e) => {
                self.ctx.report(ERROR_TITLE, &ClientError::from(e));
                return None;
            }
        };

        let record = Candidate {
            id: self.user_id.clone(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            marks,
            qualification: form.qualification.clone(),
            cv_url: self.profile.get().cv_url,
        };

        let screen = self.clone();
        Some(self.ctx.run(
            "save profile",
            store_profile(self.ctx.store(), record),
            move |outcome| match outcome {
                Ok(saved) => {
                    screen.form.set(ProfileForm::from(&saved));
                    screen.profile.set(saved);
                    screen.ctx.info(SUCCESS_TITLE, "Profile saved successfully!");
                    screen.ctx.navigate(
                        ScreenId::CandidateDashboard,
                        ScreenParams::for_user(screen.user_id.clone()),
                    );
                }
                Err(e) => screen
                    .ctx
                    .error(ERROR_TITLE, &format!("Error saving profile: {e}")),
            },
        ))
    }

    /// Store `bytes` as the candidate's CV.
    pub fn attach_cv(&self, bytes: &[u8]) -> Option<DispatchHandle> {
        if bytes.is_empty() {
            self.ctx
                .report(ERROR_TITLE, &ClientError::from(ValidationError::EmptyCv));
            return None;
        }
        let encoded = encode_cv(bytes);

        let screen = self.clone();
        Some(self.ctx.run(
            "upload cv",
            store_cv(self.ctx.store(), self.user_id.clone(), encoded.clone()),
            move |outcome| match outcome {
                Ok(()) => {
                    let mut profile = screen.profile.get();
                    profile.cv_url = Some(encoded);
                    screen.profile.set(profile);
                    screen.ctx.info(SUCCESS_TITLE, "CV uploaded successfully!");
                }
                Err(e) => screen
                    .ctx
                    .error(ERROR_TITLE, &format!("Error uploading CV: {e}")),
            },
        ))
    }

    pub fn back_to_dashboard(&self) {
        self.ctx.navigate(
            ScreenId::CandidateDashboard,
            ScreenParams::for_user(self.user_id.clone()),
        );
    }

    pub fn logout(&self) {
        self.ctx.navigate(ScreenId::Login, ScreenParams::none());
    }
}

async fn fetch_profile(store: Arc<dyn DocumentStore>, user_id: UserId) -> Result<Option<Candidate>> {
    Ok(get_record(store.as_ref(), user_id.as_str()).await?)
}

async fn store_profile(store: Arc<dyn DocumentStore>, mut candidate: Candidate) -> Result<Candidate> {
    if let Some(existing) = get_record::<Candidate>(store.as_ref(), candidate.id.as_str()).await? {
        if existing.cv_url.is_some() {
            candidate.cv_url = existing.cv_url;
        }
    }
    set_record(store.as_ref(), &candidate).await?;
    tracing::info!(user = %candidate.id, "profile saved");
    Ok(candidate)
}

async fn store_cv(store: Arc<dyn DocumentStore>, user_id: UserId, encoded: String) -> Result<()> {
    let patch = Fields::from_iter([("cvUrl".to_string(), json!(encoded))]);
    match store
        .update(CANDIDATES_COLLECTION, user_id.as_str(), patch)
        .await
    {
        Ok(()) => {}
        // No profile yet: start one holding just the CV.
        Err(StoreError::NotFound { .. }) => {
            let candidate = Candidate {
                cv_url: Some(encoded),
                ..Candidate::blank(user_id.clone())
            };
            set_record(store.as_ref(), &candidate).await?;
        }
        Err(e) => return Err(e.into()),
    }
    tracing::info!(user = %user_id, "cv stored");
    Ok(())
}
