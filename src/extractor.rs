//! Locates the server-rendered `__NEXT_DATA__` payload inside a profile page.

use crate::errors::AppError;
use crate::models::RawState;
use once_cell::sync::Lazy;
use regex::Regex;

/// Text the upstream site renders in place of a missing profile.
pub const NOT_FOUND_MARKER: &str = "Profile does not exist";

static NEXT_DATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__" type="application/json">(.*?)</script>"#)
        .expect("embedded state pattern is valid")
});

/// Parses the embedded page state out of raw markup.
///
/// Either the whole payload parses into an object or an error is returned;
/// there is no partial result.
pub fn extract(markup: &str, username: &str) -> Result<RawState, AppError> {
    if markup.contains(NOT_FOUND_MARKER) {
        tracing::warn!("Profile '{}' does not exist upstream", username);
        return Err(AppError::NotFound(username.to_string()));
    }

    let payload = NEXT_DATA
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            tracing::error!("No embedded state found in profile page for '{}'", username);
            AppError::Parse(format!(
                "Could not find Next.js data in the profile page for '{}'",
                username
            ))
        })?;

    let state: RawState = serde_json::from_str(payload).map_err(|e| {
        tracing::error!("Error parsing embedded state for '{}': {}", username, e);
        AppError::from(e)
    })?;

    if !state.is_object() {
        return Err(AppError::Parse(format!(
            "embedded state for '{}' is not a JSON object",
            username
        )));
    }

    Ok(state)
}
