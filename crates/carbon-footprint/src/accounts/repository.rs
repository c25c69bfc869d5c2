use super::domain::{User, UserId};
use crate::storage::StoreError;

/// Storage abstraction for accounts so the service can be exercised in isolation.
pub trait UserRepository: Send + Sync {
    /// Inserts a new user; a duplicate email is `StoreError::Conflict`.
    fn create(&self, user: User) -> Result<User, StoreError>;
    fn find(&self, id: &UserId) -> Result<Option<User>, StoreError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    fn update_profile(&self, id: &UserId, username: &str, email: &str) -> Result<(), StoreError>;
    fn update_password_hash(&self, id: &UserId, password_hash: &str) -> Result<(), StoreError>;
}
