//! Monthly results: one stored value per user, category, and calendar month.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    NewResult, Period, ResultId, ResultRecord, ResultSubmission, ResultView, SavedResult,
    ValidationError,
};
pub use repository::ResultRepository;
pub use router::{results_router, ResultsState};
pub use service::{ResultService, ResultServiceError};
