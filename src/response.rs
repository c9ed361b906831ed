use crate::config::SharedConfig;

/// Outcome category of a configuration operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigResult {
    /// Completed as requested
    OK,
    /// Failed; no configuration is usable from this response
    Error,
    /// Completed with restrictions (trial key, unlicensed symbologies skipped, ...)
    Warning,
}

/// One-shot result envelope for configuration creation and bulk updates
#[derive(Debug, Clone)]
pub struct ConfigResponse {
    result: ConfigResult,
    message: String,
    config: Option<SharedConfig>,
}

impl ConfigResponse {
    /// Build a response from its parts
    pub fn new(result: ConfigResult, message: impl Into<String>, config: Option<SharedConfig>) -> Self {
        Self {
            result,
            message: message.into(),
            config,
        }
    }

    pub(crate) fn ok(config: Option<SharedConfig>) -> Self {
        Self::new(ConfigResult::OK, "", config)
    }

    pub(crate) fn warning(message: impl Into<String>, config: Option<SharedConfig>) -> Self {
        Self::new(ConfigResult::Warning, message, config)
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::new(ConfigResult::Error, message, None)
    }

    /// Outcome category
    pub fn result(&self) -> ConfigResult {
        self.result
    }

    /// Human readable detail, empty on plain success
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Produced configuration, if any
    pub fn config(&self) -> Option<&SharedConfig> {
        self.config.as_ref()
    }

    /// Take the produced configuration
    pub fn into_config(self) -> Option<SharedConfig> {
        self.config
    }

    /// True for [`ConfigResult::OK`]
    pub fn is_ok(&self) -> bool {
        self.result == ConfigResult::OK
    }

    /// True for [`ConfigResult::Error`]
    pub fn is_error(&self) -> bool {
        self.result == ConfigResult::Error
    }
}
