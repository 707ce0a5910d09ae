//! HTTP implementation of the remote order store client.
//!
//! Talks to the authoritative store over the fixed HTTP/JSON contract. Exact
//! paths are preserved for compatibility: `/addContact`, `/contacts/inWork`,
//! `/contacts/readyForDelivery`, `/markReady`, `/markDelivered`, `/status`.

use crate::{ack_to_result, StoreError, StoreFactory, StoreInterface, StoreRegistry};
use async_trait::async_trait;
use laundry_types::{
	Ack, AddOrderRequest, ConfigSchema, Field, FieldType, ImplementationRegistry, InWorkResponse,
	Order, ReadyForDeliveryResponse, Schema, StatusSnapshot, TransitionRequest, ValidationError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default request timeout in seconds when none is configured.
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// HTTP client against the remote order store.
pub struct HttpStore {
	/// Shared reqwest client with the configured timeout.
	client: reqwest::Client,
	/// Base URL of the store, without a trailing slash.
	base_url: String,
}

impl HttpStore {
	/// Creates a new HttpStore for the given base URL and request timeout.
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| StoreError::Configuration(e.to_string()))?;
		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Issues a GET and decodes the JSON body.
	///
	/// Transport failures and non-2xx statuses become `Network`; an
	/// undecodable body becomes `Serialization`.
	async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
		let response = self
			.client
			.get(self.url(path))
			.send()
			.await
			.map_err(|e| StoreError::Network(e.to_string()))?;
		if !response.status().is_success() {
			return Err(StoreError::Network(format!(
				"HTTP {} from {}",
				response.status(),
				path
			)));
		}
		response
			.json()
			.await
			.map_err(|e| StoreError::Serialization(e.to_string()))
	}

	/// Issues a POST with a JSON body and decodes the acknowledgement.
	async fn post_json<B: Serialize + ?Sized>(
		&self,
		path: &str,
		body: &B,
	) -> Result<Ack, StoreError> {
		let response = self
			.client
			.post(self.url(path))
			.json(body)
			.send()
			.await
			.map_err(|e| StoreError::Network(e.to_string()))?;
		if !response.status().is_success() {
			return Err(StoreError::Network(format!(
				"HTTP {} from {}",
				response.status(),
				path
			)));
		}
		response
			.json()
			.await
			.map_err(|e| StoreError::Serialization(e.to_string()))
	}
}

#[async_trait]
impl StoreInterface for HttpStore {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(HttpStoreSchema)
	}

	async fn add_order(&self, request: &AddOrderRequest) -> Result<(), StoreError> {
		let ack = self.post_json("/addContact", request).await?;
		ack_to_result(ack)
	}

	async fn list_in_work(&self) -> Result<Vec<Order>, StoreError> {
		let response: InWorkResponse = self.get_json("/contacts/inWork").await?;
		if !response.success {
			return Err(StoreError::Rejected(
				response
					.error
					.unwrap_or_else(|| "no reason supplied".to_string()),
			));
		}
		Ok(response.in_work)
	}

	async fn list_ready_for_delivery(&self) -> Result<Vec<Order>, StoreError> {
		let response: ReadyForDeliveryResponse = self.get_json("/contacts/readyForDelivery").await?;
		if !response.success {
			return Err(StoreError::Rejected(
				response
					.error
					.unwrap_or_else(|| "no reason supplied".to_string()),
			));
		}
		Ok(response.ready_for_delivery)
	}

	async fn mark_ready(&self, request: &TransitionRequest) -> Result<(), StoreError> {
		let ack = self.post_json("/markReady", request).await?;
		ack_to_result(ack)
	}

	async fn mark_delivered(&self, request: &TransitionRequest) -> Result<(), StoreError> {
		let ack = self.post_json("/markDelivered", request).await?;
		ack_to_result(ack)
	}

	async fn status(&self) -> Result<StatusSnapshot, StoreError> {
		// The status endpoint carries no success flag; decode it as-is.
		self.get_json("/status").await
	}
}

/// Configuration schema for HttpStore.
pub struct HttpStoreSchema;

impl ConfigSchema for HttpStoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("url", FieldType::String).with_validator(|v| {
				let url = v.as_str().unwrap_or_default();
				if url.starts_with("http://") || url.starts_with("https://") {
					Ok(())
				} else {
					Err("must start with http:// or https://".to_string())
				}
			})],
			vec![Field::new(
				"timeout_seconds",
				FieldType::Integer {
					min: Some(1),
					max: Some(300),
				},
			)],
		);
		schema.validate(config)
	}
}

/// Registry for the HTTP store implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "http";
	type Factory = StoreFactory;

	fn factory() -> Self::Factory {
		create_store
	}
}

impl StoreRegistry for Registry {}

/// Factory function to create an HTTP store backend from configuration.
///
/// Configuration parameters:
/// - `url`: Base URL of the remote order store (required)
/// - `timeout_seconds`: Request timeout in seconds (default: 30)
pub fn create_store(config: &toml::Value) -> Result<Box<dyn StoreInterface>, StoreError> {
	HttpStoreSchema
		.validate(config)
		.map_err(|e| StoreError::Configuration(e.to_string()))?;

	let url = config
		.get("url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| StoreError::Configuration("url is required".to_string()))?;
	let timeout_seconds = config
		.get("timeout_seconds")
		.and_then(|v| v.as_integer())
		.map(|v| v as u64)
		.unwrap_or(DEFAULT_TIMEOUT_SECONDS);

	let store = HttpStore::new(url, Duration::from_secs(timeout_seconds))?;
	Ok(Box::new(store))
}
