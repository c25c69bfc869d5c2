use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Duration;
use serde_json::Value;

use crate::accounts::domain::{Registration, User, UserId};
use crate::accounts::password::{CredentialHasher, HashError};
use crate::accounts::repository::UserRepository;
use crate::accounts::service::AccountService;
use crate::accounts::session::SessionTokens;
use crate::storage::StoreError;

pub(super) fn sessions() -> Arc<SessionTokens> {
    Arc::new(SessionTokens::new("accounts-test-secret", Duration::hours(24)))
}

pub(super) fn registration() -> Registration {
    Registration {
        email: "Camille@Example.org".to_string(),
        username: "camille".to_string(),
        password: "sobriete-2024".to_string(),
    }
}

pub(super) fn build_service() -> (
    AccountService<MemoryUsers, PlainHasher>,
    Arc<MemoryUsers>,
) {
    let users = Arc::new(MemoryUsers::default());
    let service = AccountService::new(users.clone(), Arc::new(PlainHasher), sessions());
    (service, users)
}

/// Reversible digest that keeps tests fast; never used outside tests.
#[derive(Default, Clone, Copy)]
pub(super) struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, secret: &str) -> Result<String, HashError> {
        Ok(format!("plain:{secret}"))
    }

    fn verify(&self, secret: &str, digest: &str) -> bool {
        digest.strip_prefix("plain:") == Some(secret)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryUsers {
    pub(super) records: Arc<Mutex<HashMap<UserId, User>>>,
}

impl UserRepository for MemoryUsers {
    fn create(&self, user: User) -> Result<User, StoreError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        if guard.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict);
        }
        guard.insert(user.id, user.clone());
        Ok(user)
    }

    fn find(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        Ok(guard.values().find(|user| user.email == email).cloned())
    }

    fn update_profile(&self, id: &UserId, username: &str, email: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        if guard
            .values()
            .any(|user| user.email == email && user.id != *id)
        {
            return Err(StoreError::Conflict);
        }
        let user = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        user.username = username.to_string();
        user.email = email.to_string();
        Ok(())
    }

    fn update_password_hash(&self, id: &UserId, password_hash: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        let user = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}

pub(super) struct UnavailableUsers;

impl UserRepository for UnavailableUsers {
    fn create(&self, _user: User) -> Result<User, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find(&self, _id: &UserId) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update_profile(&self, _id: &UserId, _username: &str, _email: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update_password_hash(&self, _id: &UserId, _password_hash: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
