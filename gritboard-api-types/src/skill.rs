use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw skill transaction, `kind` still carries the `skill_` style prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillTransaction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A skill category with its level on a 0-100 scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub category: String,
    pub level: f64,
}

impl SkillEntry {
    pub fn new(category: impl Into<String>, level: f64) -> Self {
        Self {
            category: category.into(),
            level,
        }
    }
}
