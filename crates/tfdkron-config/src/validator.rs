//! Configuration validation.

use crate::schema::Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_provider(config, &mut result);
        Self::validate_logging(config, &mut result);
        result
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        let host = config.provider.host.trim();
        if host.is_empty() {
            result.add_error(ValidationError::new("provider.host", "Host cannot be empty"));
        } else {
            match url::Url::parse(host) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                    if url.query().is_some() {
                        result.add_warning(ValidationWarning::new(
                            "provider.host",
                            "Query string on the host is ignored",
                        ));
                    }
                }
                Ok(url) => result.add_error(ValidationError::new(
                    "provider.host",
                    format!("Unsupported scheme '{}', expected http or https", url.scheme()),
                )),
                Err(e) => result.add_error(ValidationError::new(
                    "provider.host",
                    format!("Invalid URL: {}", e),
                )),
            }
        }

        if config.provider.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "provider.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if config.provider.timeout_seconds > 300 {
            result.add_warning(ValidationWarning::new(
                "provider.timeout_seconds",
                "timeout_seconds is very high (>300)",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', expected one of {}",
                    config.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
