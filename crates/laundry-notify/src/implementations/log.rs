//! Logging notification backend.
//!
//! Records the message through tracing instead of opening a composer. Used
//! in headless environments and tests, where popping a messaging app is
//! either impossible or unwanted.

use crate::{NotifyError, NotifyFactory, NotifyInterface, NotifyRegistry};
use async_trait::async_trait;
use laundry_types::{ConfigSchema, ImplementationRegistry, Schema, ValidationError};

/// Notification backend that only logs.
pub struct LogNotifier;

#[async_trait]
impl NotifyInterface for LogNotifier {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LogNotifierSchema)
	}

	async fn send(&self, phone: &str, message: &str) -> Result<(), NotifyError> {
		tracing::info!(phone = %phone, message = %message, "Notification");
		Ok(())
	}
}

/// Configuration schema for LogNotifier.
pub struct LogNotifierSchema;

impl ConfigSchema for LogNotifierSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// The log notifier has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Registry for the logging notification implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "log";
	type Factory = NotifyFactory;

	fn factory() -> Self::Factory {
		create_notifier
	}
}

impl NotifyRegistry for Registry {}

/// Factory function to create a logging notifier from configuration.
///
/// Configuration parameters:
/// - None required for the log notifier
pub fn create_notifier(_config: &toml::Value) -> Result<Box<dyn NotifyInterface>, NotifyError> {
	Ok(Box::new(LogNotifier))
}
