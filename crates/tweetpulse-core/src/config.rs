use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, which is useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
///
/// The bearer token stays optional here: the one-off scoring path never talks
/// to the search API, so its absence only becomes an error when a collection
/// run is requested, before any network call is made.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{other}\""),
            }),
        }
    };

    let twitter_bearer_token = lookup("TWITTER_BEARER_TOKEN").ok();
    let model_url = or_default("TWEETPULSE_MODEL_URL", "http://127.0.0.1:8080");
    let default_query = or_default("TWEETPULSE_QUERY", r#""analyse de sentiment" #IA"#);
    let default_max_results = parse_u32("TWEETPULSE_MAX_RESULTS", "100")?;
    let output_path = PathBuf::from(or_default(
        "TWEETPULSE_OUTPUT_PATH",
        "data/processed/posts_scored.csv",
    ));
    let fetch_max_attempts = parse_u32("TWEETPULSE_FETCH_MAX_ATTEMPTS", "3")?;
    let rate_limit_backoff_secs = parse_u64("TWEETPULSE_RATE_LIMIT_BACKOFF_SECS", "900")?;
    let transient_backoff_secs = parse_u64("TWEETPULSE_TRANSIENT_BACKOFF_SECS", "10")?;
    let min_token_len = parse_usize("TWEETPULSE_MIN_TOKEN_LEN", "3")?;
    let keep_hashtag_words = parse_bool("TWEETPULSE_KEEP_HASHTAG_WORDS", "true")?;
    let scoring_batch_size = parse_usize("TWEETPULSE_SCORING_BATCH_SIZE", "32")?;
    let request_timeout_secs = parse_u64("TWEETPULSE_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("TWEETPULSE_LOG_LEVEL", "info");

    Ok(AppConfig {
        twitter_bearer_token,
        model_url,
        default_query,
        default_max_results,
        output_path,
        fetch_max_attempts,
        rate_limit_backoff_secs,
        transient_backoff_secs,
        min_token_len,
        keep_hashtag_words,
        scoring_batch_size,
        request_timeout_secs,
        log_level,
    })
}
