//! Remote order store client for the laundry tracker.
//!
//! This crate translates the tracker's operations into the order store's
//! HTTP/JSON contract and surfaces every network or application-level
//! failure as a single error with an attached reason. The store is the sole
//! source of truth for an order's stage; nothing here caches or mutates
//! stage locally.

use async_trait::async_trait;
use laundry_types::{
	Ack, AddOrderRequest, ConfigSchema, ImplementationRegistry, Order, OrderStage, StatusSnapshot,
	TransitionRequest,
};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
	pub mod memory;
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
	/// The request could not be sent or no response was received.
	#[error("Network error: {0}")]
	Network(String),
	/// The store answered with `success: false`; carries its reason string.
	#[error("Store rejected the request: {0}")]
	Rejected(String),
	/// A response arrived but could not be decoded.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
	/// The requested stage has no endpoint in the store contract.
	#[error("No store endpoint for stage: {0}")]
	UnsupportedStage(OrderStage),
}

/// Trait defining the low-level interface to the remote order store.
///
/// One method per endpoint of the store contract. Implementations must
/// collapse transport failures into [`StoreError::Network`] and explicit
/// `success: false` payloads into [`StoreError::Rejected`]; they never panic
/// past this boundary.
#[async_trait]
pub trait StoreInterface: Send + Sync {
	/// Returns the configuration schema for this store implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Creates a new order (`POST /addContact`).
	async fn add_order(&self, request: &AddOrderRequest) -> Result<(), StoreError>;

	/// Lists orders currently in work (`GET /contacts/inWork`).
	async fn list_in_work(&self) -> Result<Vec<Order>, StoreError>;

	/// Lists orders ready for delivery (`GET /contacts/readyForDelivery`).
	async fn list_ready_for_delivery(&self) -> Result<Vec<Order>, StoreError>;

	/// Advances an order to ReadyForDelivery (`POST /markReady`).
	async fn mark_ready(&self, request: &TransitionRequest) -> Result<(), StoreError>;

	/// Advances an order to Delivered (`POST /markDelivered`).
	async fn mark_delivered(&self, request: &TransitionRequest) -> Result<(), StoreError>;

	/// Fetches the aggregate view over every stage (`GET /status`).
	async fn status(&self) -> Result<StatusSnapshot, StoreError>;
}

/// Type alias for store factory functions.
pub type StoreFactory = fn(&toml::Value) -> Result<Box<dyn StoreInterface>, StoreError>;

/// Registry trait for store implementations.
pub trait StoreRegistry: ImplementationRegistry<Factory = StoreFactory> {}

/// Get all registered store implementations.
///
/// Returns a vector of (name, factory) tuples used by the builder to wire up
/// whatever the configuration names.
pub fn get_all_implementations() -> Vec<(&'static str, StoreFactory)> {
	use implementations::{http, memory};

	vec![
		(http::Registry::NAME, http::Registry::factory()),
		(memory::Registry::NAME, memory::Registry::factory()),
	]
}

/// High-level store service used by the lifecycle coordinator.
///
/// Wraps a backend and adds the stage-indexed entry points the screens use:
/// a query per action stage and a transition dispatch keyed by the target
/// stage. Anything outside the two action stages is rejected locally, so the
/// client never asks the store for an out-of-order transition.
pub struct StoreService {
	/// The underlying store backend implementation.
	backend: Box<dyn StoreInterface>,
}

impl StoreService {
	/// Creates a new StoreService with the specified backend.
	pub fn new(backend: Box<dyn StoreInterface>) -> Self {
		Self { backend }
	}

	/// Creates a new order from an already-normalized (name, phone) pair.
	pub async fn add_order(&self, request: &AddOrderRequest) -> Result<(), StoreError> {
		self.backend.add_order(request).await
	}

	/// Lists all orders currently in the given stage.
	///
	/// Only the two action stages have query endpoints; any other stage is a
	/// local error and never reaches the network.
	pub async fn list(&self, stage: OrderStage) -> Result<Vec<Order>, StoreError> {
		match stage {
			OrderStage::InWork => self.backend.list_in_work().await,
			OrderStage::ReadyForDelivery => self.backend.list_ready_for_delivery().await,
			other => Err(StoreError::UnsupportedStage(other)),
		}
	}

	/// Requests the transition of `order` into `to`.
	///
	/// The request carries the order's id, name and phone exactly as last
	/// known to the client. Success means the store committed the new stage;
	/// on any error the transition is treated as not having happened.
	pub async fn advance(&self, order: &Order, to: OrderStage) -> Result<(), StoreError> {
		let request = TransitionRequest::from(order);
		let result = match to {
			OrderStage::ReadyForDelivery => self.backend.mark_ready(&request).await,
			OrderStage::Delivered => self.backend.mark_delivered(&request).await,
			other => Err(StoreError::UnsupportedStage(other)),
		};
		match &result {
			Ok(()) => {
				tracing::debug!(order_id = %order.id, stage = %to, "Transition committed");
			}
			Err(e) => {
				tracing::debug!(order_id = %order.id, stage = %to, error = %e, "Transition failed");
			}
		}
		result
	}

	/// Fetches the aggregate status snapshot.
	pub async fn status(&self) -> Result<StatusSnapshot, StoreError> {
		self.backend.status().await
	}
}

/// Converts an acknowledgement payload into a store result.
///
/// Shared by implementations: a `success: false` payload becomes a
/// [`StoreError::Rejected`] carrying whatever reason the store supplied.
pub(crate) fn ack_to_result(ack: Ack) -> Result<(), StoreError> {
	if ack.success {
		Ok(())
	} else {
		Err(StoreError::Rejected(
			ack.error
				.unwrap_or_else(|| "no reason supplied".to_string()),
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use implementations::memory::MemoryStore;

	// The memory backend never produces UnsupportedStage, so seeing it here
	// proves the dispatch was rejected before any backend call.
	#[tokio::test]
	async fn list_rejects_non_action_stages_locally() {
		let service = StoreService::new(Box::new(MemoryStore::new()));
		for stage in [OrderStage::New, OrderStage::Delivered] {
			let err = service.list(stage).await.unwrap_err();
			assert!(matches!(err, StoreError::UnsupportedStage(s) if s == stage));
		}
	}

	#[tokio::test]
	async fn advance_rejects_non_transition_targets_locally() {
		let service = StoreService::new(Box::new(MemoryStore::new()));
		let order = Order {
			id: "1".to_string(),
			name: "A".to_string(),
			phone: "+910000000001".to_string(),
		};
		for to in [OrderStage::New, OrderStage::InWork] {
			let err = service.advance(&order, to).await.unwrap_err();
			assert!(matches!(err, StoreError::UnsupportedStage(s) if s == to));
		}
	}

	#[test]
	fn failure_ack_without_reason_gets_placeholder() {
		let err = ack_to_result(Ack {
			success: false,
			error: None,
		})
		.unwrap_err();
		assert!(matches!(err, StoreError::Rejected(reason) if reason == "no reason supplied"));
	}
}
