use super::{types::Config, AuthMethod, ConfigError};

/// Validate configuration.
///
/// Builder credentials are not checked here; dispatch reports them as
/// missing when it is actually used.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.auth.method == AuthMethod::ApiKey
        && config.auth.api_key.as_deref().map_or(true, str::is_empty)
    {
        return Err(ConfigError::ValidationError(
            "auth.api_key must be set when auth.method = \"api_key\"".to_string(),
        ));
    }

    if config.builder.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "builder.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
