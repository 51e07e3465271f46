use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One XP transaction as returned by the platform.
///
/// `amount` and `path` are optional on the wire; consumers treat a missing amount as zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub path: Option<String>,
}

impl TransactionRecord {
    pub fn new(amount: i64, created_at: DateTime<Utc>, path: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            created_at,
            path: Some(path.into()),
        }
    }

    pub fn amount_or_zero(&self) -> i64 {
        self.amount.unwrap_or_default()
    }
}
