use std::collections::HashMap;

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed test as submitted by the client. The score is computed by the
/// caller; this backend only stores it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TestResult {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub score: u32,
    pub total: u32,
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub completed_at: DateTime<Utc>,
}

impl TestResult {
    pub fn new(user_id: &str, category: &str, score: u32, total: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category: category.to_string(),
            score,
            total,
            answers: HashMap::new(),
            summary: None,
            completed_at: Utc::now(),
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) * 100.0 / f64::from(self.total)
    }
}
