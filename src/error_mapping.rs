use fairweather_core::{AppError, ConfigError, ReqwestErrorExt};
use fairweather_scoring::{ObservationError, UvLookupError};

/// Conversion of scoring-crate errors into the application error type
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}

impl IntoAppError for ObservationError {
    fn into_app_error(self) -> AppError {
        AppError::Observation(self.user_message())
    }
}

impl IntoAppError for UvLookupError {
    fn into_app_error(self) -> AppError {
        match self {
            UvLookupError::Network(e) => AppError::Network(e.into_network_error()),
            other => AppError::Other(anyhow::Error::new(other)),
        }
    }
}

/// Keeps a typed `ConfigError` from config loading; anything else (e.g. an
/// unwritable default config directory) is reported as invalid configuration.
pub fn config_load_error(err: anyhow::Error) -> AppError {
    match err.downcast::<ConfigError>() {
        Ok(config_err) => AppError::Config(config_err),
        Err(other) => AppError::Config(ConfigError::Invalid(format!("{:#}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairweather_core::Config;

    #[test]
    fn test_observation_error_maps_to_observation() {
        let err = ObservationError::MissingCondition.into_app_error();
        assert!(matches!(err, AppError::Observation(_)));
        assert!(err.user_message().contains("malformed"));
    }

    #[test]
    fn test_uv_status_maps_to_other() {
        let err = UvLookupError::Status(502).into_app_error();
        assert!(matches!(err, AppError::Other(_)));
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_missing_config_file_reports_not_found() {
        let path = std::env::temp_dir().join("fairweather-no-such-dir").join("config.toml");
        let err = Config::load_validated(Some(path.as_path())).map(|_| ()).map_err(config_load_error);

        let err = err.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::NotFound(_))));
        assert_eq!(
            err.user_message(),
            "Configuration not found. Check the --config path."
        );
    }

    #[test]
    fn test_untyped_config_failure_is_invalid() {
        let err = config_load_error(anyhow::anyhow!("Failed to create config directory"));
        assert!(matches!(
            err,
            AppError::Config(ConfigError::Invalid(ref m)) if m.contains("config directory")
        ));
    }
}
