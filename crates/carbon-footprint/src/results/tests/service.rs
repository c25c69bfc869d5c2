use std::sync::Arc;

use chrono::{TimeZone, Utc};

use super::common::{build_service, submission, UnavailableResults};
use crate::accounts::UserId;
use crate::calculator::Category;
use crate::results::domain::ValidationError;
use crate::results::service::{ResultService, ResultServiceError};
use crate::storage::StoreError;

#[test]
fn resubmission_overwrites_value_and_keeps_id() {
    let (service, _) = build_service();
    let user = UserId::new();
    let january = Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2024, 2, 2, 18, 0, 0).unwrap();

    let first = service
        .save_at(&user, submission("Food", 10.0, "2024-01"), january)
        .expect("first save");
    let second = service
        .save_at(&user, submission("Food", 12.5, "2024-01"), later)
        .expect("overwrite");

    assert_eq!(first.id, second.id);
    assert_eq!(second.status, "saved");

    let rows = service.list(&user).expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, 12.5);
    assert_eq!(rows[0].created_at, later);
}

#[test]
fn legacy_category_names_share_the_canonical_row() {
    let (service, _) = build_service();
    let user = UserId::new();

    let canonical = service
        .save(&user, submission("Food", 4.0, "2024-03"))
        .expect("save");
    let legacy = service
        .save(&user, submission("Alimentation", 5.0, "2024-03"))
        .expect("save legacy");

    assert_eq!(canonical.id, legacy.id);
    let rows = service.list(&user).expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, Category::Food);
}

#[test]
fn list_is_sorted_even_when_storage_is_not() {
    let (service, _) = build_service();
    let user = UserId::new();
    for (category, period) in [
        ("Digital", "2023-11"),
        ("Transports", "2024-02"),
        ("Clothing", "2024-02"),
        ("Food", "2024-01"),
    ] {
        service
            .save(&user, submission(category, 1.0, period))
            .expect("save");
    }

    let listed: Vec<String> = service
        .list(&user)
        .expect("list")
        .iter()
        .map(|record| format!("{} {}", record.period, record.category))
        .collect();
    assert_eq!(
        listed,
        vec![
            "2024-02 Clothing",
            "2024-02 Transports",
            "2024-01 Food",
            "2023-11 Digital",
        ]
    );
}

#[test]
fn results_are_scoped_to_their_owner() {
    let (service, _) = build_service();
    let owner = UserId::new();
    service
        .save(&owner, submission("Food", 1.0, "2024-01"))
        .expect("save");

    assert!(service.list(&UserId::new()).expect("list").is_empty());
    assert_eq!(service.list(&owner).expect("list").len(), 1);
}

#[test]
fn malformed_submissions_are_rejected_before_storage() {
    let (service, repository) = build_service();
    let user = UserId::new();

    let err = service
        .save(&user, submission("Food", 1.0, "2024-13"))
        .expect_err("month out of range");
    assert!(matches!(
        err,
        ResultServiceError::Validation(ValidationError::Period(_))
    ));

    let err = service
        .save(&user, submission("Leisure", 1.0, "2024-01"))
        .expect_err("unknown category");
    assert!(matches!(
        err,
        ResultServiceError::Validation(ValidationError::Category(ref name)) if name == "Leisure"
    ));

    let err = service
        .save(&user, submission("Food", f64::NAN, "2024-01"))
        .expect_err("non-finite value");
    assert!(matches!(
        err,
        ResultServiceError::Validation(ValidationError::Value)
    ));

    assert!(repository.rows.lock().expect("rows").is_empty());
}

#[test]
fn storage_outages_surface_as_store_errors() {
    let service = ResultService::new(Arc::new(UnavailableResults));
    let user = UserId::new();

    assert!(matches!(
        service.save(&user, submission("Food", 1.0, "2024-01")),
        Err(ResultServiceError::Store(StoreError::Unavailable(_)))
    ));
    assert!(matches!(
        service.list(&user),
        Err(ResultServiceError::Store(StoreError::Unavailable(_)))
    ));
}
