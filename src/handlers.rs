use crate::config::Config;
use crate::errors::AppError;
use crate::models::*;
use crate::profile::ProfileService;
use crate::rate_limiter::RateLimiter;
use crate::validation::validate_username;
use axum::{
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Fetch-extract-assemble pipeline.
    pub profiles: ProfileService,
    /// Per-client admission control for pipeline endpoints.
    pub limiter: RateLimiter,
}

/// Health check endpoint.
///
/// Returns the service status and version. Not rate limited.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "gfg-stats-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Identifies the caller for rate limiting: the last `X-Forwarded-For` hop
/// (the one appended by the fronting proxy), then the socket peer, then
/// `"unknown"`. Earlier hops are client-supplied and ignored.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Validates the username then consults the rate limiter, in that order.
///
/// Returns the username the pipeline should run for.
fn admit(
    state: &AppState,
    headers: &HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    params: UsernameQuery,
) -> Result<String, AppError> {
    if !validate_username(params.username.as_deref()) {
        return Err(AppError::BadRequest("Invalid username parameter".to_string()));
    }
    let username = params.username.unwrap_or_default();

    let client = client_key(headers, peer.map(|ConnectInfo(addr)| addr));
    if !state.limiter.admit(&client) {
        return Err(AppError::RateLimited);
    }

    Ok(username)
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<CompleteProfile>, AppError> {
    let username = admit(&state, &headers, peer, params)?;
    tracing::info!("GET /api/profile - username: {}", username);

    let profile = state
        .profiles
        .complete_profile(&username)
        .await
        .inspect_err(|e| tracing::error!("Error scraping profile for {}: {}", username, e))?;
    Ok(Json(profile))
}

/// GET /api/basic-info
pub async fn get_basic_info(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<UserInfo>, AppError> {
    let username = admit(&state, &headers, peer, params)?;
    tracing::info!("GET /api/basic-info - username: {}", username);

    let info = state
        .profiles
        .basic_info(&username)
        .await
        .inspect_err(|e| tracing::error!("Error scraping basic info for {}: {}", username, e))?;
    Ok(Json(info))
}

/// GET /api/coding-stats
pub async fn get_coding_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<CodingStats>, AppError> {
    let username = admit(&state, &headers, peer, params)?;
    tracing::info!("GET /api/coding-stats - username: {}", username);

    let stats = state
        .profiles
        .coding_stats(&username)
        .await
        .inspect_err(|e| tracing::error!("Error scraping coding stats for {}: {}", username, e))?;
    Ok(Json(stats))
}

/// GET /api/submission-data
pub async fn get_submission_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<SubmissionData>, AppError> {
    let username = admit(&state, &headers, peer, params)?;
    tracing::info!("GET /api/submission-data - username: {}", username);

    let data = state
        .profiles
        .submission_data(&username)
        .await
        .inspect_err(|e| {
            tracing::error!("Error scraping submission data for {}: {}", username, e)
        })?;
    Ok(Json(data))
}

/// GET /api/difficulty-stats
///
/// Counts only; problem lists are part of the complete profile.
pub async fn get_difficulty_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<DifficultyStats>, AppError> {
    let username = admit(&state, &headers, peer, params)?;
    tracing::info!("GET /api/difficulty-stats - username: {}", username);

    let stats = state
        .profiles
        .difficulty_stats(&username)
        .await
        .inspect_err(|e| {
            tracing::error!("Error scraping difficulty stats for {}: {}", username, e)
        })?;
    Ok(Json(stats))
}

/// GET /api/institution-languages
pub async fn get_institution_languages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<InstitutionLanguages>, AppError> {
    let username = admit(&state, &headers, peer, params)?;
    tracing::info!("GET /api/institution-languages - username: {}", username);

    let data = state
        .profiles
        .institution_languages(&username)
        .await
        .inspect_err(|e| {
            tracing::error!(
                "Error scraping institution and languages for {}: {}",
                username,
                e
            )
        })?;
    Ok(Json(data))
}

/// GET /api/streak
pub async fn get_streak(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<StreakData>, AppError> {
    let username = admit(&state, &headers, peer, params)?;
    tracing::info!("GET /api/streak - username: {}", username);

    let data = state
        .profiles
        .streak(&username)
        .await
        .inspect_err(|e| tracing::error!("Error scraping streak for {}: {}", username, e))?;
    Ok(Json(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_key_uses_last_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("10.9.0.1, 203.0.113.7"),
        );
        let peer: SocketAddr = "10.0.0.1:5555".parse().unwrap();
        assert_eq!(client_key(&headers, Some(peer)), "203.0.113.7");
    }

    #[test]
    fn test_client_key_single_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" 203.0.113.8 "));
        assert_eq!(client_key(&headers, None), "203.0.113.8");
    }

    #[test]
    fn test_client_key_blank_forwarded_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.2.3.4, "));
        let peer: SocketAddr = "192.0.2.9:80".parse().unwrap();
        assert_eq!(client_key(&headers, Some(peer)), "192.0.2.9");
    }

    #[test]
    fn test_client_key_falls_back_to_peer() {
        let peer: SocketAddr = "192.0.2.1:443".parse().unwrap();
        assert_eq!(client_key(&HeaderMap::new(), Some(peer)), "192.0.2.1");
        assert_eq!(client_key(&HeaderMap::new(), None), "unknown");
    }
}
