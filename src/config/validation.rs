use crate::config::types::{
    Config, LimitsConfig, OutputConfig, SearchConfig, SourceConfig, UserAgentConfig,
};
use crate::search::PatternMatcher;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_limits_config(&config.limits)?;
    validate_source_config(&config.source)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates search parameters, including that the pattern compiles
pub(crate) fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.search_term.trim().is_empty() {
        return Err(ConfigError::Validation(
            "search_term cannot be empty".to_string(),
        ));
    }

    if config.regex_pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "regex_pattern cannot be empty".to_string(),
        ));
    }

    PatternMatcher::new(&config.regex_pattern)?;

    if config.max_results < 1 {
        return Err(ConfigError::Validation(format!(
            "max_results must be >= 1, got {}",
            config.max_results
        )));
    }

    Ok(())
}

/// Validates work bounds
fn validate_limits_config(config: &LimitsConfig) -> Result<(), ConfigError> {
    if config.page_ceiling < 1 || config.page_ceiling > 50 {
        return Err(ConfigError::Validation(format!(
            "page_ceiling must be between 1 and 50, got {}",
            config.page_ceiling
        )));
    }

    if config.thread_limit > 50 {
        return Err(ConfigError::Validation(format!(
            "thread_limit must be <= 50, got {}",
            config.thread_limit
        )));
    }

    if config.comment_limit < 1 || config.comment_limit > 500 {
        return Err(ConfigError::Validation(format!(
            "comment_limit must be between 1 and 500, got {}",
            config.comment_limit
        )));
    }

    if config.fetch_timeout < 100 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout must be >= 100ms, got {}ms",
            config.fetch_timeout
        )));
    }

    if let Some(run_timeout) = config.run_timeout {
        if run_timeout < config.fetch_timeout {
            return Err(ConfigError::Validation(format!(
                "run_timeout ({}ms) must not be shorter than fetch_timeout ({}ms)",
                run_timeout, config.fetch_timeout
            )));
        }
    }

    Ok(())
}

/// Validates source endpoints
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("api_url", &config.api_url)?;
    validate_http_url("item_url", &config.item_url)?;
    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if matches!(config.json_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "json_path cannot be empty".to_string(),
        ));
    }

    if matches!(config.summary_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
