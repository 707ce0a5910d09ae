//! Order intake: validation, phone normalization and submission.
//!
//! Intake accepts a customer name and phone, either typed in or picked from
//! the device contacts export, normalizes the phone to the configured country
//! prefix, and submits the order to the store. Empty fields are rejected
//! locally and never reach the network.

use crate::CoreError;
use laundry_store::StoreService;
use laundry_types::{normalize_phone, AddOrderRequest, ContactCandidate};
use std::path::Path;
use std::sync::Arc;

/// The order creation flow.
pub struct OrderIntake {
	store: Arc<StoreService>,
	/// Prefix prepended to phones that do not already start with it.
	country_prefix: String,
}

impl OrderIntake {
	/// Creates an intake flow submitting through `store`.
	pub fn new(store: Arc<StoreService>, country_prefix: String) -> Self {
		Self {
			store,
			country_prefix,
		}
	}

	/// Validates, normalizes and submits a new order.
	///
	/// Both fields are trimmed first; an empty name or phone after trimming
	/// is rejected without any store call. Returns the request exactly as
	/// sent, normalized phone included.
	pub async fn submit(&self, name: &str, phone: &str) -> Result<AddOrderRequest, CoreError> {
		let name = name.trim();
		if name.is_empty() {
			return Err(CoreError::InvalidInput(
				"customer name must not be empty".to_string(),
			));
		}
		let phone = phone.trim();
		if phone.is_empty() {
			return Err(CoreError::InvalidInput(
				"phone number must not be empty".to_string(),
			));
		}

		let request = AddOrderRequest {
			name: name.to_string(),
			phone: normalize_phone(&self.country_prefix, phone),
		};
		self.store.add_order(&request).await?;
		tracing::info!(name = %request.name, "Order created");
		Ok(request)
	}
}

/// Loads contact candidates from a JSON export file.
///
/// The file holds an array of `{ "name": ..., "phones": [...] }` entries, the
/// shape produced by the device contacts export. Read and decode failures
/// both surface as [`CoreError::Contacts`].
pub async fn load_candidates(path: impl AsRef<Path>) -> Result<Vec<ContactCandidate>, CoreError> {
	let path = path.as_ref();
	let raw = tokio::fs::read_to_string(path)
		.await
		.map_err(|e| CoreError::Contacts(format!("failed to read {}: {}", path.display(), e)))?;
	serde_json::from_str(&raw)
		.map_err(|e| CoreError::Contacts(format!("failed to decode {}: {}", path.display(), e)))
}
