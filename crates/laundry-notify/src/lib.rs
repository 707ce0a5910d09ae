//! Customer notification module for the laundry tracker.
//!
//! Handles the best-effort text message sent after a successful stage
//! transition. Message text is a fixed template keyed by the stage the order
//! just reached; delivery is never confirmed and never retried. A failure
//! here must never affect an already-committed transition: callers observe
//! the result and at most log it.

use async_trait::async_trait;
use laundry_types::{ConfigSchema, ImplementationRegistry, Order, OrderStage};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod log;
	pub mod sms_uri;
}

/// Errors that can occur during notification dispatch.
#[derive(Debug, Error)]
pub enum NotifyError {
	/// The platform composer could not be invoked.
	#[error("Dispatch error: {0}")]
	Dispatch(String),
	/// The stage has no notification template.
	#[error("No message template for stage: {0}")]
	NoTemplate(OrderStage),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the interface for notification backends.
///
/// A backend hands a message off to whatever composes it; it does not wait
/// for, or report, delivery.
#[async_trait]
pub trait NotifyInterface: Send + Sync {
	/// Returns the configuration schema for this notification implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Hands `message` off for delivery to `phone`.
	async fn send(&self, phone: &str, message: &str) -> Result<(), NotifyError>;
}

/// Type alias for notification factory functions.
pub type NotifyFactory = fn(&toml::Value) -> Result<Box<dyn NotifyInterface>, NotifyError>;

/// Registry trait for notification implementations.
pub trait NotifyRegistry: ImplementationRegistry<Factory = NotifyFactory> {}

/// Get all registered notification implementations.
pub fn get_all_implementations() -> Vec<(&'static str, NotifyFactory)> {
	use implementations::{log, sms_uri};

	vec![
		(sms_uri::Registry::NAME, sms_uri::Registry::factory()),
		(log::Registry::NAME, log::Registry::factory()),
	]
}

/// Returns the fixed message template for an order reaching `stage`.
///
/// Only the two customer-visible stages have templates; a transition into
/// any other stage sends nothing.
pub fn message_for(stage: OrderStage) -> Option<&'static str> {
	match stage {
		OrderStage::ReadyForDelivery => Some("Your clothes are ready for delivery."),
		OrderStage::Delivered => Some("Your clothes have been delivered."),
		_ => None,
	}
}

/// Service that dispatches stage-transition notifications through a backend.
pub struct NotificationService {
	/// The underlying notification backend implementation.
	backend: Box<dyn NotifyInterface>,
}

impl NotificationService {
	/// Creates a new NotificationService with the specified backend.
	pub fn new(backend: Box<dyn NotifyInterface>) -> Self {
		Self { backend }
	}

	/// Notifies the order's customer that it reached `stage`.
	///
	/// Uses the phone value on `order` exactly as the caller last saw it.
	pub async fn notify_transition(
		&self,
		order: &Order,
		stage: OrderStage,
	) -> Result<(), NotifyError> {
		let message = message_for(stage).ok_or(NotifyError::NoTemplate(stage))?;
		tracing::debug!(order_id = %order.id, stage = %stage, "Dispatching notification");
		self.backend.send(&order.phone, message).await
	}
}
