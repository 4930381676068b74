use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde_json::Value;

use crate::models::chat::{ChatContext, ContextUser};

pub const DEFAULT_PAGE: &str = "Home";

const SUPPORTED_LOCALES: [(&str, &str); 2] = [("en", "en"), ("zh-TW", "zh-TW")];
const DEFAULT_LOCALE: &str = "en";

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The signed-in user as the frontend knows it.
#[derive(Debug, Clone, Default)]
pub struct SessionUser {
    pub id: String,
    pub username: Option<String>,
    pub name: Option<String>,
}

/// Builds the context sent with every chat message.
///
/// Anonymous callers get a context whose user only carries `lang`.
pub fn build_context(
    user: Option<&SessionUser>,
    current_page: Option<&str>,
    test_state: Option<Value>,
    latest_result_summary: Option<Value>,
    locale: &str,
) -> ChatContext {
    let lang = resolve_locale(locale).to_string();

    let user = match user {
        Some(user) => ContextUser {
            id: Some(user.id.clone()),
            name: non_empty(user.username.as_deref()).or_else(|| non_empty(user.name.as_deref())),
            lang: Some(lang),
            auth: Some(true),
        },
        None => ContextUser {
            lang: Some(lang),
            ..Default::default()
        },
    };

    ChatContext {
        session_id: next_session_id(),
        user,
        current_page: non_empty(current_page).unwrap_or_else(|| DEFAULT_PAGE.to_string()),
        test_state,
        latest_result_summary,
    }
}

fn resolve_locale(locale: &str) -> &'static str {
    SUPPORTED_LOCALES
        .iter()
        .find(|(key, _)| *key == locale)
        .map(|(_, lang)| *lang)
        .unwrap_or(DEFAULT_LOCALE)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// The counter keeps ids distinct within the same millisecond.
fn next_session_id() -> String {
    let seq = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("session-{}-{}", Utc::now().timestamp_millis(), seq)
}
