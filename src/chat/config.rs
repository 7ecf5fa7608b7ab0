//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::chat::commands::parse_f32_in_range;
use crate::error::{Error, Result};
use crate::prompts::SYSTEM_PROMPT;
use crate::types::{GenerationConfig, Model};

/// Default sampling temperature; low, to keep explanations consistent.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Largest temperature the API accepts.
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Command-line arguments for the ace-explainer tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gemini-2.5-flash)", "MODEL")]
    pub model: Option<String>,

    /// Replacement for the built-in system prompt.
    #[arrrg(optional, "Replace the built-in system prompt", "PROMPT")]
    pub system: Option<String>,

    /// Sampling temperature, parsed and range-checked on conversion.
    #[arrrg(optional, "Sampling temperature 0.0-2.0 (default: 0.3)", "TEMP")]
    pub temperature: Option<String>,

    /// API base URL override.
    #[arrrg(optional, "API base URL (default: $GEMINI_BASE_URL or the public endpoint)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Directory exported reports are written to.
    #[arrrg(optional, "Directory for exported reports (default: .)", "DIR")]
    pub export_dir: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// System instruction sent with every request.
    pub system_prompt: String,

    /// Sampling temperature; `None` defers to the model default.
    pub temperature: Option<f32>,

    /// Base URL override for the API.
    pub base_url: Option<String>,

    /// Request timeout.
    pub timeout: Duration,

    /// Directory exported reports are written to.
    pub export_dir: PathBuf,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gemini-2.5-flash
    /// - System prompt: the built-in ACE explainer prompt
    /// - Temperature: 0.3
    /// - Timeout: 60 seconds
    /// - Export directory: current directory
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            export_dir: PathBuf::from("."),
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the export directory.
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// The sampling parameters sent with each request.
    pub fn generation_config(&self) -> GenerationConfig {
        let config = GenerationConfig::new();
        match self.temperature {
            Some(temperature) => config.with_temperature(temperature),
            None => config,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    fn try_from(args: ChatArgs) -> Result<Self> {
        let mut config = ChatConfig::new();
        if let Some(model) = args.model {
            config.model = model.parse().unwrap_or_else(|never| match never {});
        }
        if let Some(system) = args.system {
            config.system_prompt = system;
        }
        if let Some(temperature) = args.temperature {
            config.temperature = Some(parse_temperature(&temperature)?);
        }
        if let Some(timeout) = args.timeout {
            if timeout == 0 {
                return Err(Error::configuration("--timeout must be at least 1 second"));
            }
            config.timeout = Duration::from_secs(timeout);
        }
        if let Some(dir) = args.export_dir {
            config.export_dir = PathBuf::from(dir);
        }
        config.base_url = args.base_url;
        config.use_color = !args.no_color;
        Ok(config)
    }
}

/// Parses a temperature in `0.0..=2.0`.
pub fn parse_temperature(value: &str) -> Result<f32> {
    parse_f32_in_range(value, 0.0, MAX_TEMPERATURE)
        .map_err(|err| Error::configuration(format!("temperature {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::Gemini25Flash));
        assert_eq!(config.system_prompt, SYSTEM_PROMPT);
        assert_eq!(config.temperature, Some(0.3));
        assert!(config.base_url.is_none());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::try_from(ChatArgs::default()).unwrap();
        assert_eq!(config.model, Model::Known(KnownModel::Gemini25Flash));
        assert_eq!(config.temperature, Some(DEFAULT_TEMPERATURE));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("gemini-2.5-pro".to_string()),
            system: Some("Be brief.".to_string()),
            temperature: Some("0.7".to_string()),
            base_url: Some("http://localhost:9000/v1beta".to_string()),
            timeout: Some(5),
            export_dir: Some("reports".to_string()),
            no_color: true,
        };
        let config = ChatConfig::try_from(args).unwrap();
        assert_eq!(config.model, Model::Known(KnownModel::Gemini25Pro));
        assert_eq!(config.system_prompt, "Be brief.");
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(
            config.base_url.as_deref(),
            Some("http://localhost:9000/v1beta")
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.export_dir, PathBuf::from("reports"));
        assert!(!config.use_color);
    }

    #[test]
    fn bad_arguments_are_configuration_errors() {
        let args = ChatArgs {
            temperature: Some("hot".to_string()),
            ..ChatArgs::default()
        };
        assert!(ChatConfig::try_from(args).unwrap_err().is_configuration());

        let args = ChatArgs {
            timeout: Some(0),
            ..ChatArgs::default()
        };
        assert!(ChatConfig::try_from(args).unwrap_err().is_configuration());
    }

    #[test]
    fn temperature_range() {
        assert_eq!(parse_temperature("0").unwrap(), 0.0);
        assert_eq!(parse_temperature(" 2.0 ").unwrap(), 2.0);
        assert!(parse_temperature("2.5").is_err());
        assert!(parse_temperature("-0.1").is_err());
        assert!(parse_temperature("NaN").is_err());
    }

    #[test]
    fn generation_config_follows_temperature() {
        let config = ChatConfig::new();
        assert_eq!(config.generation_config().temperature, Some(0.3));
        let config = config.with_temperature(None);
        assert!(config.generation_config().is_empty());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::Known(KnownModel::Gemini20Flash))
            .with_system_prompt("Test prompt".to_string())
            .with_temperature(Some(1.0))
            .with_base_url(Some("http://localhost/".to_string()))
            .with_timeout(Duration::from_secs(10))
            .with_export_dir(PathBuf::from("/tmp"))
            .without_color();
        assert_eq!(config.model, Model::Known(KnownModel::Gemini20Flash));
        assert_eq!(config.system_prompt, "Test prompt");
        assert_eq!(config.temperature, Some(1.0));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost/"));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.export_dir, PathBuf::from("/tmp"));
        assert!(!config.use_color);
    }
}
