use crate::app_config::{AppConfig, Environment};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SCRAPEPLAN_ENV", "development"))?;
    let log_level = or_default("SCRAPEPLAN_LOG_LEVEL", "info");
    let database_url = optional("DATABASE_URL");

    let db_max_connections = parse_u32("SCRAPEPLAN_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SCRAPEPLAN_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SCRAPEPLAN_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "SCRAPEPLAN_DB_MIN_CONNECTIONS",
            format!("{db_min_connections} exceeds SCRAPEPLAN_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }

    let llm_api_key = optional("SCRAPEPLAN_LLM_API_KEY").or_else(|| optional("OPENAI_API_KEY"));
    let llm_base_url = or_default("SCRAPEPLAN_LLM_BASE_URL", "https://api.openai.com/v1");
    let llm_model = or_default("SCRAPEPLAN_LLM_MODEL", "gpt-4o-mini");
    let llm_max_tokens = parse_u32("SCRAPEPLAN_LLM_MAX_TOKENS", "500")?;
    let llm_temperature = parse_temperature(&or_default("SCRAPEPLAN_LLM_TEMPERATURE", "0.7"))?;
    let llm_timeout_secs = parse_u64("SCRAPEPLAN_LLM_TIMEOUT_SECS", "30")?;
    let llm_max_retries = parse_u32("SCRAPEPLAN_LLM_MAX_RETRIES", "1")?;

    let keyword_count = parse_usize("SCRAPEPLAN_KEYWORD_COUNT", "30")?;
    if keyword_count == 0 {
        return Err(invalid(
            "SCRAPEPLAN_KEYWORD_COUNT",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        llm_api_key,
        llm_base_url,
        llm_model,
        llm_max_tokens,
        llm_temperature,
        llm_timeout_secs,
        llm_max_retries,
        keyword_count,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SCRAPEPLAN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Sampling temperature must sit in `[0.0, 2.0]`.
fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "SCRAPEPLAN_LLM_TEMPERATURE".to_string(),
        reason,
    };
    let value = raw.parse::<f32>().map_err(|e| invalid(e.to_string()))?;
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid(format!("{value} is outside [0.0, 2.0]")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
