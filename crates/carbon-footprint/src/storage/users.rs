use rusqlite::{params, OptionalExtension, Row};

use super::{malformed, SqliteStore, StoreError};
use crate::accounts::{User, UserId, UserRepository};

const USER_COLUMNS: &str = "id, email, username, password_hash";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let raw_id: String = row.get(0)?;
    let id = UserId::parse(&raw_id).ok_or_else(|| malformed(0, "user id", &raw_id))?;

    Ok(User {
        id,
        email: row.get(1)?,
        username: row.get(2)?,
        password_hash: row.get(3)?,
    })
}

impl UserRepository for SqliteStore {
    fn create(&self, user: User) -> Result<User, StoreError> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO users (id, email, username, password_hash) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id.to_string(),
                user.email,
                user.username,
                user.password_hash
            ],
        )?;
        Ok(user)
    }

    fn find(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let conn = self.connection()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id.to_string()],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.connection()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                params![email],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn update_profile(&self, id: &UserId, username: &str, email: &str) -> Result<(), StoreError> {
        let conn = self.connection()?;
        let changed = conn.execute(
            "UPDATE users SET username = ?2, email = ?3 WHERE id = ?1",
            params![id.to_string(), username, email],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn update_password_hash(&self, id: &UserId, password_hash: &str) -> Result<(), StoreError> {
        let conn = self.connection()?;
        let changed = conn.execute(
            "UPDATE users SET password_hash = ?2 WHERE id = ?1",
            params![id.to_string(), password_hash],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
