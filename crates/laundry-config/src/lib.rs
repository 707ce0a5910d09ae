//! Configuration module for the laundry tracker.
//!
//! Provides the structures and loading utilities for tracker configuration.
//! Configuration lives in TOML files, supports `${ENV_VAR}` (with optional
//! `${ENV_VAR:-default}`) resolution, and is validated on load so that a
//! misconfigured tracker fails at startup rather than mid-action.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the laundry tracker.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for the remote order store client.
	pub store: StoreConfig,
	/// Configuration for the notification dispatcher.
	pub notify: NotifyConfig,
	/// Configuration for the order intake flow.
	#[serde(default)]
	pub intake: IntakeConfig,
}

/// Configuration for the remote order store client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of store implementation names to their configurations.
	/// Each implementation has its own format stored as raw TOML values.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the notification dispatcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifyConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of notification implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the order intake flow.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntakeConfig {
	/// Country-code prefix prepended to phone numbers entered without one.
	/// Defaults to "+91".
	#[serde(default = "default_country_prefix")]
	pub country_prefix: String,
	/// Optional JSON file of contact candidates for the intake picker.
	#[serde(default)]
	pub contacts_file: Option<String>,
}

impl Default for IntakeConfig {
	fn default() -> Self {
		Self {
			country_prefix: default_country_prefix(),
			contacts_file: None,
		}
	}
}

/// Returns the default country-code prefix applied at intake.
fn default_country_prefix() -> String {
	"+91".to_string()
}

/// Resolves `${VAR}` and `${VAR:-default}` references against the process
/// environment. A reference without a default to a missing variable is a
/// validation error.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	// Limit input size to keep the regex pass bounded
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).ok_or_else(|| {
			ConfigError::Parse("Environment variable capture missing".to_string())
		})?;
		let var_name = cap
			.get(1)
			.ok_or_else(|| ConfigError::Parse("Environment variable name missing".to_string()))?
			.as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				}
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file with environment variable
	/// resolution and validation.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Validates the configuration to ensure all required fields are
	/// properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.store.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one store implementation must be configured".into(),
			));
		}
		if self.store.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Store primary implementation cannot be empty".into(),
			));
		}
		if !self.store.implementations.contains_key(&self.store.primary) {
			return Err(ConfigError::Validation(format!(
				"Primary store '{}' not found in implementations",
				self.store.primary
			)));
		}

		if self.notify.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one notify implementation must be configured".into(),
			));
		}
		if self.notify.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Notify primary implementation cannot be empty".into(),
			));
		}
		if !self
			.notify
			.implementations
			.contains_key(&self.notify.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary notifier '{}' not found in implementations",
				self.notify.primary
			)));
		}

		if self.intake.country_prefix.is_empty() {
			return Err(ConfigError::Validation(
				"Intake country_prefix cannot be empty".into(),
			));
		}

		Ok(())
	}
}

/// Implementation of FromStr for Config to enable parsing from string.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const SAMPLE: &str = r#"
		[store]
		primary = "http"

		[store.implementations.http]
		url = "https://store.example"

		[notify]
		primary = "log"

		[notify.implementations.log]

		[intake]
		country_prefix = "+91"
	"#;

	#[test]
	fn parses_sample_config() {
		let config: Config = SAMPLE.parse().unwrap();
		assert_eq!(config.store.primary, "http");
		assert!(config.store.implementations.contains_key("http"));
		assert_eq!(config.notify.primary, "log");
		assert_eq!(config.intake.country_prefix, "+91");
		assert!(config.intake.contacts_file.is_none());
	}

	#[test]
	fn intake_section_is_optional_with_default_prefix() {
		let without_intake = r#"
			[store]
			primary = "memory"

			[store.implementations.memory]

			[notify]
			primary = "log"

			[notify.implementations.log]
		"#;
		let config: Config = without_intake.parse().unwrap();
		assert_eq!(config.intake.country_prefix, "+91");
	}

	#[test]
	fn rejects_unknown_primary() {
		let bad = SAMPLE.replace("primary = \"http\"", "primary = \"redis\"");
		let err = bad.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn resolves_env_vars_with_defaults() {
		std::env::set_var("LAUNDRY_TEST_URL", "https://store.example");
		let input = "url = \"${LAUNDRY_TEST_URL}\"\nprefix = \"${LAUNDRY_TEST_MISSING:-+91}\"";
		let resolved = resolve_env_vars(input).unwrap();
		assert!(resolved.contains("https://store.example"));
		assert!(resolved.contains("+91"));
	}

	#[test]
	fn missing_env_var_without_default_fails() {
		let input = "url = \"${LAUNDRY_TEST_DEFINITELY_UNSET}\"";
		assert!(matches!(
			resolve_env_vars(input),
			Err(ConfigError::Validation(_))
		));
	}

	#[tokio::test]
	async fn loads_config_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(SAMPLE.as_bytes()).unwrap();
		let config = Config::from_file(file.path().to_str().unwrap())
			.await
			.unwrap();
		assert_eq!(config.store.primary, "http");
	}
}
