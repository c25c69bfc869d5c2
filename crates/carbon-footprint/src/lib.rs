//! Carbon footprint estimation: the emission-factor engine, per-period result storage, and
//! the account layer that scopes stored results to a user.

pub mod accounts;
pub mod calculator;
pub mod config;
pub mod error;
pub mod extract;
pub mod results;
pub mod storage;
pub mod telemetry;
