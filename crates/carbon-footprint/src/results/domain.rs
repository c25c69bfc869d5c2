use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::accounts::UserId;
use crate::calculator::{Category, InputBag};

/// Calendar year-month; part of a result's natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Parses strict `YYYY-MM` (four-digit year, two-digit month).
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::Period(raw.to_string());
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;

        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Identifier wrapper for stored results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(pub Uuid);

impl ResultId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for ResultId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Caller-supplied result awaiting validation. The period travels as `month` on the wire;
/// `period` is accepted as well.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSubmission {
    pub category: String,
    pub value: f64,
    #[serde(default)]
    pub inputs: InputBag,
    #[serde(rename = "month", alias = "period")]
    pub period: String,
}

/// Validated result ready for the upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub id: ResultId,
    pub user_id: UserId,
    pub category: Category,
    pub value: f64,
    pub inputs: InputBag,
    pub period: Period,
    pub created_at: DateTime<Utc>,
}

/// Persisted result row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub id: ResultId,
    pub user_id: UserId,
    pub category: Category,
    pub value: f64,
    pub inputs: InputBag,
    pub period: Period,
    pub created_at: DateTime<Utc>,
}

impl ResultRecord {
    /// Listing order: most recent period first, then category name ascending.
    pub fn listing_order(a: &ResultRecord, b: &ResultRecord) -> Ordering {
        b.period
            .cmp(&a.period)
            .then_with(|| a.category.name().cmp(b.category.name()))
    }

    pub fn view(&self) -> ResultView {
        ResultView {
            id: self.id,
            category: self.category,
            value: self.value,
            inputs: self.inputs.clone(),
            period: self.period,
            created_at: self.created_at,
        }
    }
}

/// Result as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub id: ResultId,
    pub category: Category,
    pub value: f64,
    pub inputs: InputBag,
    pub period: Period,
    pub created_at: DateTime<Utc>,
}

/// Acknowledgement returned by a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedResult {
    pub id: ResultId,
    pub status: &'static str,
}

/// Rejected submission fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("period '{0}' is not a YYYY-MM calendar month")]
    Period(String),
    #[error("unknown category '{0}'")]
    Category(String),
    #[error("value must be a finite number")]
    Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_strict_year_month() {
        let period = Period::parse("2024-01").expect("valid period");
        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 1);
        assert_eq!(period.to_string(), "2024-01");
    }

    #[test]
    fn period_rejects_malformed_values() {
        for raw in [
            "", "2024", "2024-1", "2024-13", "2024-00", "24-01", "2024/01", "2024-01-15", "abcd-ef",
            "+024-01",
        ] {
            assert_eq!(
                Period::parse(raw),
                Err(ValidationError::Period(raw.to_string())),
                "{raw} accepted"
            );
        }
    }

    #[test]
    fn periods_order_chronologically() {
        let earlier = Period::parse("2023-12").expect("valid");
        let later = Period::parse("2024-01").expect("valid");
        assert!(earlier < later);
        assert!(Period::parse("2024-02").expect("valid") > later);
    }

    #[test]
    fn period_serializes_as_text() {
        let period = Period::parse("2024-03").expect("valid");
        assert_eq!(serde_json::to_string(&period).expect("serialize"), "\"2024-03\"");
        let parsed: Period = serde_json::from_str("\"2024-03\"").expect("deserialize");
        assert_eq!(parsed, period);
        assert!(serde_json::from_str::<Period>("\"March\"").is_err());
    }

    #[test]
    fn submission_reads_month_and_period_field_names() {
        let submission: ResultSubmission = serde_json::from_str(
            r#"{"category":"Food","value":12.5,"inputs":{"redMeatKg":1},"month":"2024-02"}"#,
        )
        .expect("month payload parses");
        assert_eq!(submission.period, "2024-02");
        assert_eq!(submission.inputs.float("redMeatKg"), Some(1.0));

        let submission: ResultSubmission = serde_json::from_str(
            r#"{"category":"Food","value":12.5,"inputs":null,"period":"2024-03"}"#,
        )
        .expect("period payload parses");
        assert_eq!(submission.period, "2024-03");
        assert!(submission.inputs.is_empty());
    }

    #[test]
    fn missing_period_is_reported_under_its_wire_name() {
        let err = serde_json::from_str::<ResultSubmission>(r#"{"category":"Food","value":1.0}"#)
            .expect_err("period required");
        assert!(err.to_string().contains("`month`"), "{err}");
    }
}
