use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{AuthOperations, ServiceConfig};
use crate::auth::jwt::TokenIssuer;
use crate::auth::password::{hash_password, verify_password};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::{with_transaction, Store, UserRepository};
use crate::domain::user::{Email, Role, User};

/// User registration and token issuance
pub struct AuthService<S: Store> {
    store: Arc<S>,
    tokens: Arc<TokenIssuer>,
    config: ServiceConfig,
}

impl<S: Store> AuthService<S> {
    pub fn new(store: Arc<S>, tokens: Arc<TokenIssuer>, config: ServiceConfig) -> Self {
        Self {
            store,
            tokens,
            config,
        }
    }

    fn issue(&self, role: Role) -> DomainResult<String> {
        self.tokens.issue(role).map_err(DomainError::Credential)
    }
}

#[async_trait]
impl<S: Store> AuthOperations for AuthService<S> {
    #[tracing::instrument(skip(self, password))]
    async fn register(&self, email: &str, password: &str, role: &str) -> DomainResult<User> {
        let role: Role = role.parse()?;
        let email = Email::new(email).map_err(DomainError::IncorrectEmail)?;

        let cost = self.config.bcrypt_cost;
        let password = password.to_string();
        // bcrypt is CPU-bound
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Credential(e.to_string()))?
            .map_err(DomainError::Credential)?;

        let user = User {
            id: Uuid::new_v4(),
            email,
            role,
            password_hash,
        };

        let user = with_transaction(self.store.as_ref(), self.config.transaction_timeout, |tx| {
            Box::pin(async move {
                tx.create_user(&user).await?;
                Ok(user)
            })
        })
        .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> DomainResult<String> {
        let email = Email::new(email).map_err(DomainError::IncorrectEmail)?;

        let user = with_transaction(self.store.as_ref(), self.config.transaction_timeout, |tx| {
            Box::pin(async move { tx.find_user_by_email(&email).await })
        })
        .await?
        .ok_or(DomainError::UserNotFound)?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DomainError::Credential(e.to_string()))?
            .map_err(DomainError::Credential)?;

        if !matches {
            return Err(DomainError::WrongPassword);
        }

        self.issue(user.role)
    }

    #[tracing::instrument(skip(self))]
    async fn dummy_login(&self, role: Role) -> DomainResult<String> {
        self.issue(role)
    }
}
