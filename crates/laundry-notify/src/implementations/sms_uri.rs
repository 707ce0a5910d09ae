//! SMS-URI notification backend.
//!
//! Composes a platform messaging URI (`sms:<phone>?body=<url-encoded text>`)
//! and asks a configurable opener command to hand it to the system's
//! composer. The spawn result is the only failure signal; whether the user
//! actually sends the message is unknowable and deliberately not tracked.

use crate::{NotifyError, NotifyFactory, NotifyInterface, NotifyRegistry};
use async_trait::async_trait;
use laundry_types::{ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, ValidationError};
use tokio::process::Command;

/// Default command used to open the composed URI.
const DEFAULT_OPENER: &str = "xdg-open";

/// Notification backend that opens an `sms:` URI through a platform command.
pub struct SmsUriNotifier {
	/// Command invoked with the composed URI as its single argument.
	opener: String,
}

impl SmsUriNotifier {
	/// Creates a new SmsUriNotifier using the given opener command.
	pub fn new(opener: impl Into<String>) -> Self {
		Self {
			opener: opener.into(),
		}
	}
}

/// Composes the messaging URI for a phone/message pair.
pub fn compose_sms_uri(phone: &str, message: &str) -> String {
	format!("sms:{}?body={}", phone, urlencoding::encode(message))
}

#[async_trait]
impl NotifyInterface for SmsUriNotifier {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(SmsUriSchema)
	}

	async fn send(&self, phone: &str, message: &str) -> Result<(), NotifyError> {
		let uri = compose_sms_uri(phone, message);

		// Fire and forget: the composer is handed the URI and left alone.
		// Waiting on it would block on the user closing their messaging app.
		let spawned = Command::new(&self.opener).arg(&uri).spawn();
		match spawned {
			Ok(_child) => {
				tracing::debug!(opener = %self.opener, "Opened messaging composer");
				Ok(())
			}
			Err(e) => Err(NotifyError::Dispatch(format!(
				"failed to run {}: {}",
				self.opener, e
			))),
		}
	}
}

/// Configuration schema for SmsUriNotifier.
pub struct SmsUriSchema;

impl ConfigSchema for SmsUriSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(vec![], vec![Field::new("opener", FieldType::String)]);
		schema.validate(config)
	}
}

/// Registry for the SMS-URI notification implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "sms";
	type Factory = NotifyFactory;

	fn factory() -> Self::Factory {
		create_notifier
	}
}

impl NotifyRegistry for Registry {}

/// Factory function to create an SMS-URI notifier from configuration.
///
/// Configuration parameters:
/// - `opener`: Command that receives the composed URI (default: "xdg-open")
pub fn create_notifier(config: &toml::Value) -> Result<Box<dyn NotifyInterface>, NotifyError> {
	SmsUriSchema
		.validate(config)
		.map_err(|e| NotifyError::Configuration(e.to_string()))?;

	let opener = config
		.get("opener")
		.and_then(|v| v.as_str())
		.unwrap_or(DEFAULT_OPENER);

	Ok(Box::new(SmsUriNotifier::new(opener)))
}
