use super::domain::{NewResult, ResultId, ResultRecord};
use crate::accounts::UserId;
use crate::storage::StoreError;

/// Storage abstraction for monthly results keyed by `(user, category, period)`.
pub trait ResultRepository: Send + Sync {
    /// Inserts or overwrites the row for the result's natural key in one step.
    ///
    /// On overwrite the existing row keeps its id; the returned id is the one stored.
    fn upsert(&self, result: NewResult) -> Result<ResultId, StoreError>;

    /// Every result owned by `user_id`, most recent period first, then category ascending.
    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ResultRecord>, StoreError>;
}
