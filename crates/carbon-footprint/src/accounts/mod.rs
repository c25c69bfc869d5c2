//! Account registration, login, and session tokens.
//!
//! Stored results are scoped to the user id carried by a session token; everything else about
//! an account stays inside this module.

pub mod domain;
mod extract;
pub mod password;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    Credentials, PasswordChange, ProfileUpdate, Registration, Session, User, UserId, UserView,
};
pub use extract::AuthenticatedUser;
pub use password::{Argon2Hasher, CredentialHasher, HashError};
pub use repository::UserRepository;
pub use router::{account_router, AccountState};
pub use service::{AccountError, AccountService};
pub use session::{bearer_token, AuthError, SessionTokens};
