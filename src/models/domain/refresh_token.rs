use bson::serde_helpers::{chrono_datetime_as_bson_datetime, chrono_datetime_as_bson_datetime_optional};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Server-side record of an issued refresh token.
///
/// The raw token never reaches storage; records are keyed by its SHA-256
/// fingerprint. A record is active until it expires or is revoked.
/// Timestamps are stored as BSON dates so range filters and sorts compare
/// instants, not strings.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RefreshToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub token_hash: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "chrono_datetime_as_bson_datetime_optional")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn issue(user_id: &str, raw_token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            token_hash: token_fingerprint(raw_token),
            expires_at,
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && self.expires_at > now
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Keeps the first revocation time.
    pub fn revoke(&mut self, at: DateTime<Utc>) {
        self.revoked_at.get_or_insert(at);
    }
}

/// Lowercase hex SHA-256 of a raw token.
pub fn token_fingerprint(raw_token: &str) -> String {
    format!("{:x}", Sha256::digest(raw_token.as_bytes()))
}
