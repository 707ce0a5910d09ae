//! In-memory implementation of the order store.
//!
//! A store double for tests and local development. Unlike the HTTP client it
//! also plays the store's side of the contract: ids are assigned here and
//! the monotonic stage order is enforced on every transition, so coordinator
//! tests exercise real rejection paths. Delivered orders are retained
//! indefinitely and surface through the status history.

use crate::{StoreError, StoreFactory, StoreInterface, StoreRegistry};
use async_trait::async_trait;
use laundry_types::{
	AddOrderRequest, ConfigSchema, ImplementationRegistry, Order, OrderStage, Schema,
	StatusSnapshot, TransitionRequest, ValidationError,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// An order record together with its current stage.
#[derive(Debug, Clone)]
struct StoredOrder {
	order: Order,
	stage: OrderStage,
}

/// In-memory order store.
pub struct MemoryStore {
	/// All orders ever accepted, in insertion order.
	orders: Arc<RwLock<Vec<StoredOrder>>>,
	/// Source of store-assigned ids.
	next_id: AtomicU64,
}

impl MemoryStore {
	/// Creates a new, empty MemoryStore.
	pub fn new() -> Self {
		Self {
			orders: Arc::new(RwLock::new(Vec::new())),
			next_id: AtomicU64::new(1),
		}
	}

	/// Lists the orders currently sitting in `stage`.
	async fn list_stage(&self, stage: OrderStage) -> Vec<Order> {
		let orders = self.orders.read().await;
		orders
			.iter()
			.filter(|stored| stored.stage == stage)
			.map(|stored| stored.order.clone())
			.collect()
	}

	/// Applies a transition if it is the single legal successor of the
	/// order's current stage.
	async fn transition(&self, request: &TransitionRequest, to: OrderStage) -> Result<(), StoreError> {
		let mut orders = self.orders.write().await;
		let stored = orders
			.iter_mut()
			.find(|stored| stored.order.id == request.id)
			.ok_or_else(|| StoreError::Rejected(format!("unknown order id {}", request.id)))?;

		if stored.stage.next() != Some(to) {
			return Err(StoreError::Rejected(format!(
				"order {} is {}, cannot move to {}",
				request.id, stored.stage, to
			)));
		}

		stored.stage = to;
		Ok(())
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StoreInterface for MemoryStore {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryStoreSchema)
	}

	async fn add_order(&self, request: &AddOrderRequest) -> Result<(), StoreError> {
		if request.name.trim().is_empty() {
			return Err(StoreError::Rejected("name cannot be empty".to_string()));
		}
		if request.phone.trim().is_empty() {
			return Err(StoreError::Rejected("phone cannot be empty".to_string()));
		}

		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let mut orders = self.orders.write().await;
		// The store accepts an order straight into InWork; New is the
		// intake-side stage before submission.
		orders.push(StoredOrder {
			order: Order {
				id: id.to_string(),
				name: request.name.clone(),
				phone: request.phone.clone(),
			},
			stage: OrderStage::InWork,
		});
		Ok(())
	}

	async fn list_in_work(&self) -> Result<Vec<Order>, StoreError> {
		Ok(self.list_stage(OrderStage::InWork).await)
	}

	async fn list_ready_for_delivery(&self) -> Result<Vec<Order>, StoreError> {
		Ok(self.list_stage(OrderStage::ReadyForDelivery).await)
	}

	async fn mark_ready(&self, request: &TransitionRequest) -> Result<(), StoreError> {
		self.transition(request, OrderStage::ReadyForDelivery).await
	}

	async fn mark_delivered(&self, request: &TransitionRequest) -> Result<(), StoreError> {
		self.transition(request, OrderStage::Delivered).await
	}

	async fn status(&self) -> Result<StatusSnapshot, StoreError> {
		Ok(StatusSnapshot {
			in_work: self.list_stage(OrderStage::InWork).await,
			ready_for_delivery: self.list_stage(OrderStage::ReadyForDelivery).await,
			history: self.list_stage(OrderStage::Delivered).await,
		})
	}
}

/// Configuration schema for MemoryStore.
pub struct MemoryStoreSchema;

impl ConfigSchema for MemoryStoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// Memory store has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Registry for the in-memory store implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = StoreFactory;

	fn factory() -> Self::Factory {
		create_store
	}
}

impl StoreRegistry for Registry {}

/// Factory function to create a memory store backend from configuration.
///
/// Configuration parameters:
/// - None required for the memory store
pub fn create_store(_config: &toml::Value) -> Result<Box<dyn StoreInterface>, StoreError> {
	Ok(Box::new(MemoryStore::new()))
}
