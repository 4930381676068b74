use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_LANG: &str = "en";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub lang: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, email: &str, password_hash: String) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            display_name: username.to_string(),
            email: email.to_string(),
            password_hash,
            lang: DEFAULT_LANG.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        if let Some(name) = display_name.filter(|n| !n.trim().is_empty()) {
            self.display_name = name;
        }
        self
    }

    pub fn with_lang(mut self, lang: Option<String>) -> Self {
        if let Some(lang) = lang.filter(|l| !l.trim().is_empty()) {
            self.lang = lang;
        }
        self
    }
}
