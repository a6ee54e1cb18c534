//! Account management on top of the `users` collection.

use std::sync::Arc;

use serde_json::json;

use placement_shared::constants::USERS_COLLECTION;
use placement_shared::crypto::{hash_password, verify_password};
use placement_shared::validation::Registration;
use placement_shared::{Candidate, Recruiter, Role, User, UserId};
use placement_store::{add_record, get_record, query_records, set_record, DocumentStore, Fields, Query};

use crate::error::Result;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn DocumentStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The id of the account matching `email` and `password`, if any.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<UserId>> {
        let user = self
            .users_with_email(email)
            .await?
            .into_iter()
            .find(|u| verify_password(password, &u.password_hash));

        match user {
            Some(user) => {
                tracing::info!(user = %user.id, "login succeeded");
                Ok(Some(user.id))
            }
            None => {
                tracing::info!(email, "login rejected");
                Ok(None)
            }
        }
    }

    /// Create the account and its role record.
    ///
    /// Returns `None` without writing anything when the email is taken.
    pub async fn register(&self, registration: &Registration) -> Result<Option<UserId>> {
        if !self.users_with_email(&registration.email).await?.is_empty() {
            tracing::warn!(email = %registration.email, "email already registered");
            return Ok(None);
        }

        let user = add_record(
            self.store.as_ref(),
            User {
                id: UserId::default(),
                name: registration.name.clone(),
                email: registration.email.clone(),
                password_hash: hash_password(&registration.password),
                role: registration.role,
            },
        )
        .await?;

        match registration.role {
            Role::Candidate => {
                let candidate = Candidate {
                    name: user.name.clone(),
                    email: user.email.clone(),
                    ..Candidate::blank(user.id.clone())
                };
                set_record(self.store.as_ref(), &candidate).await?;
            }
            Role::Recruiter => {
                let recruiter = Recruiter {
                    id: user.id.clone(),
                    name: user.name.clone(),
                    email: user.email.clone(),
                    company_name: registration.company_name.clone(),
                };
                set_record(self.store.as_ref(), &recruiter).await?;
            }
        }

        tracing::info!(user = %user.id, role = %user.role, "account registered");
        Ok(Some(user.id))
    }

    /// Replace the password of every account under `email`.  `false` when
    /// there is none.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<bool> {
        let users = self.users_with_email(email).await?;
        if users.is_empty() {
            tracing::info!(email, "password reset for unknown email");
            return Ok(false);
        }

        let hash = hash_password(new_password);
        for user in &users {
            let patch = Fields::from_iter([("passwordHash".to_string(), json!(hash))]);
            self.store
                .update(USERS_COLLECTION, user.id.as_str(), patch)
                .await?;
        }
        tracing::info!(email, "password reset");
        Ok(true)
    }

    pub async fn role_of(&self, user_id: &UserId) -> Result<Option<Role>> {
        let user: Option<User> = get_record(self.store.as_ref(), user_id.as_str()).await?;
        Ok(user.map(|u| u.role))
    }

    async fn users_with_email(&self, email: &str) -> Result<Vec<User>> {
        let query = Query::collection(USERS_COLLECTION).where_eq("email", email);
        Ok(query_records(self.store.as_ref(), &query).await?)
    }
}
