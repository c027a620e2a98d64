use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub profile_base_url: String,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
    pub dnt: String,
    pub fetch_timeout_secs: u64,
    pub rate_limit_window_secs: u64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_sweep_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            profile_base_url: "https://www.geeksforgeeks.org/user".to_string(),
            user_agent: "Default User-Agent".to_string(),
            accept: "*/*".to_string(),
            accept_language: "en-US".to_string(),
            referer: "https://www.geeksforgeeks.org/".to_string(),
            dnt: "1".to_string(),
            fetch_timeout_secs: 10,
            rate_limit_window_secs: 60,
            rate_limit_max_requests: 10,
            rate_limit_sweep_secs: 300,
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn positive<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr + PartialOrd + Default + ToString,
{
    let raw = var_or(name, &default.to_string());
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a number, got '{}'", name, raw))?;
    if value <= T::default() {
        anyhow::bail!("{} must be greater than zero", name);
    }
    Ok(value)
}

fn parse_port(raw: &str) -> anyhow::Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => anyhow::bail!("PORT must be a valid number between 1-65535"),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            port: parse_port(&var_or("PORT", &defaults.port.to_string()))?,
            profile_base_url: Some(var_or("PROFILE_BASE_URL", &defaults.profile_base_url))
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
                .ok_or_else(|| {
                    anyhow::anyhow!("PROFILE_BASE_URL must start with http:// or https://")
                })?,
            user_agent: var_or("USER_AGENT", &defaults.user_agent),
            accept: var_or("ACCEPT", &defaults.accept),
            accept_language: var_or("ACCEPT_LANGUAGE", &defaults.accept_language),
            referer: var_or("REFERER", &defaults.referer),
            dnt: var_or("DNT", &defaults.dnt),
            fetch_timeout_secs: positive("FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?,
            rate_limit_window_secs: positive(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            )?,
            rate_limit_max_requests: positive(
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            )?,
            rate_limit_sweep_secs: positive(
                "RATE_LIMIT_SWEEP_SECS",
                defaults.rate_limit_sweep_secs,
            )?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Profile base URL: {}", config.profile_base_url);
        tracing::debug!(
            "Rate limit: {} requests per {}s",
            config.rate_limit_max_requests,
            config.rate_limit_window_secs
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_range() {
        assert_eq!(parse_port("5000").unwrap(), 5000);
        assert_eq!(parse_port(" 65535 ").unwrap(), 65535);
        assert!(parse_port("0").is_err());
        assert!(parse_port("65536").is_err());
        assert!(parse_port("http").is_err());
    }
}
