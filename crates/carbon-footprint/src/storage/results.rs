use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use serde_json::Value;

use super::{conversion_error, malformed, SqliteStore, StoreError};
use crate::accounts::UserId;
use crate::calculator::{Category, InputBag};
use crate::results::{NewResult, Period, ResultId, ResultRecord, ResultRepository};

const UPSERT: &str = "
INSERT INTO results (id, user_id, category, value, inputs, period, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT (user_id, category, period) DO UPDATE SET
    value = excluded.value,
    inputs = excluded.inputs,
    created_at = excluded.created_at
RETURNING id
";

const LIST_FOR_USER: &str = "
SELECT id, user_id, category, value, inputs, period, created_at
FROM results
WHERE user_id = ?1
ORDER BY period DESC, category ASC
";

fn result_id(index: usize, raw: &str) -> rusqlite::Result<ResultId> {
    ResultId::parse(raw).ok_or_else(|| malformed(index, "result id", raw))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ResultRecord> {
    let raw_id: String = row.get(0)?;
    let raw_user: String = row.get(1)?;
    let raw_category: String = row.get(2)?;
    let raw_inputs: Value = row.get(4)?;
    let raw_period: String = row.get(5)?;
    let created_at: DateTime<Utc> = row.get(6)?;

    let id = result_id(0, &raw_id)?;
    let user_id = UserId::parse(&raw_user).ok_or_else(|| malformed(1, "user id", &raw_user))?;
    let category = Category::parse(&raw_category)
        .ok_or_else(|| malformed(2, "category", &raw_category))?;
    let inputs = InputBag::try_from(raw_inputs)
        .map_err(|other| malformed(4, "inputs", other.to_string()))?;
    let period = Period::parse(&raw_period).map_err(|err| conversion_error(5, err))?;

    Ok(ResultRecord {
        id,
        user_id,
        category,
        value: row.get(3)?,
        inputs,
        period,
        created_at,
    })
}

impl ResultRepository for SqliteStore {
    fn upsert(&self, result: NewResult) -> Result<ResultId, StoreError> {
        let conn = self.connection()?;
        let stored: String = conn.query_row(
            UPSERT,
            params![
                result.id.to_string(),
                result.user_id.to_string(),
                result.category.name(),
                result.value,
                result.inputs.into_value(),
                result.period.to_string(),
                result.created_at,
            ],
            |row| row.get(0),
        )?;
        Ok(result_id(0, &stored)?)
    }

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ResultRecord>, StoreError> {
        let conn = self.connection()?;
        let mut statement = conn.prepare(LIST_FOR_USER)?;
        let records = statement
            .query_map(params![user_id.to_string()], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
