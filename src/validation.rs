use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,50}$").expect("username pattern is valid"));

/// Validate a profile username
///
/// Accepts 3 to 50 ASCII letters, digits, underscores or hyphens.
pub fn validate_username(username: Option<&str>) -> bool {
    let Some(username) = username else {
        tracing::warn!("Empty username provided");
        return false;
    };

    if !USERNAME.is_match(username) {
        tracing::warn!("Username format invalid: {:?}", username);
        return false;
    }

    true
}
