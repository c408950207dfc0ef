//! Access to the namespaced key/value record store.
//!
//! Every persisted entity lives under a per-user key:
//! `user:<id>:basic`, `user:<id>:profile`, `user:<id>:survey:<date>`,
//! `user:<id>:camera:<date>`, `user:<id>:completion:<date>`,
//! `user:<id>:report:<weekEnd>`. Prefix scans return records in
//! insertion order of first writes; an overwrite keeps the original
//! position.

use std::future::Future;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub mod postgres;

#[cfg(test)]
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to encode record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

pub trait RecordStore: Clone + Send + Sync + 'static {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    fn set(&self, key: &str, value: Value) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn get_by_prefix(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<Value>, StoreError>> + Send;
}

/// Serialize and write a typed record.
pub async fn set_record<S, T>(store: &S, key: &str, record: &T) -> Result<(), StoreError>
where
    S: RecordStore,
    T: Serialize,
{
    let value = serde_json::to_value(record)?;
    store.set(key, value).await
}

/// Read and deserialize a typed record. A stored value that no longer
/// matches the expected shape is logged and treated as absent.
pub async fn record_at<S, T>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: RecordStore,
    T: DeserializeOwned,
{
    let Some(value) = store.get(key).await? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Skipping corrupt record");
            Ok(None)
        }
    }
}

/// Scan a prefix and deserialize each record, skipping corrupt rows.
pub async fn records_with_prefix<S, T>(store: &S, prefix: &str) -> Result<Vec<T>, StoreError>
where
    S: RecordStore,
    T: DeserializeOwned,
{
    let values = store.get_by_prefix(prefix).await?;
    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(prefix, error = %e, "Skipping corrupt record"),
        }
    }
    Ok(records)
}

pub fn basic_info_key(user_id: Uuid) -> String {
    format!("user:{user_id}:basic")
}

pub fn profile_key(user_id: Uuid) -> String {
    format!("user:{user_id}:profile")
}

pub fn survey_key(user_id: Uuid, date: NaiveDate) -> String {
    format!("user:{user_id}:survey:{date}")
}

pub fn survey_prefix(user_id: Uuid) -> String {
    format!("user:{user_id}:survey:")
}

pub fn camera_key(user_id: Uuid, date: NaiveDate) -> String {
    format!("user:{user_id}:camera:{date}")
}

pub fn camera_prefix(user_id: Uuid) -> String {
    format!("user:{user_id}:camera:")
}

pub fn completion_key(user_id: Uuid, date: NaiveDate) -> String {
    format!("user:{user_id}:completion:{date}")
}

pub fn report_key(user_id: Uuid, week_end: NaiveDate) -> String {
    format!("user:{user_id}:report:{week_end}")
}
