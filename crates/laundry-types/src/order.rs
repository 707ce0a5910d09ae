//! Order entity and lifecycle stage types.
//!
//! An order is a unit of laundry work tracked from intake to delivery. Its
//! stage moves strictly forward through the lifecycle; the remote store is
//! the sole authority on the current stage, so the client-side type carries
//! only the wire fields and stages are always observed through queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked laundry order as it appears on the wire.
///
/// The id is assigned by the remote store and never changes across
/// transitions. The phone is the value notifications are sent to, exactly as
/// last known to the client at the moment a transition is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
	/// Opaque store-assigned identifier, globally unique.
	pub id: String,
	/// Customer display name, non-empty free text.
	pub name: String,
	/// E.164-like phone number used for notifications.
	pub phone: String,
}

/// One discrete position in the order lifecycle.
///
/// Stages advance monotonically New -> InWork -> ReadyForDelivery ->
/// Delivered; the client never requests a skipped or reversed transition.
/// "History" is not a stage but a view over all orders that reached
/// [`OrderStage::Delivered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStage {
	/// Order captured by intake but not yet accepted by the store.
	New,
	/// Order accepted and being worked on.
	InWork,
	/// Work finished, waiting to be delivered.
	ReadyForDelivery,
	/// Terminal stage; the record persists indefinitely for the history view.
	Delivered,
}

impl OrderStage {
	/// Returns the single legal successor stage, or `None` for the terminal
	/// stage.
	pub fn next(&self) -> Option<OrderStage> {
		match self {
			OrderStage::New => Some(OrderStage::InWork),
			OrderStage::InWork => Some(OrderStage::ReadyForDelivery),
			OrderStage::ReadyForDelivery => Some(OrderStage::Delivered),
			OrderStage::Delivered => None,
		}
	}
}

impl fmt::Display for OrderStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStage::New => write!(f, "New"),
			OrderStage::InWork => write!(f, "InWork"),
			OrderStage::ReadyForDelivery => write!(f, "ReadyForDelivery"),
			OrderStage::Delivered => write!(f, "Delivered"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stage_successors_are_monotonic() {
		assert_eq!(OrderStage::New.next(), Some(OrderStage::InWork));
		assert_eq!(OrderStage::InWork.next(), Some(OrderStage::ReadyForDelivery));
		assert_eq!(
			OrderStage::ReadyForDelivery.next(),
			Some(OrderStage::Delivered)
		);
		assert_eq!(OrderStage::Delivered.next(), None);
	}

	#[test]
	fn stage_serializes_camel_case() {
		let json = serde_json::to_string(&OrderStage::ReadyForDelivery).unwrap();
		assert_eq!(json, "\"readyForDelivery\"");
		let back: OrderStage = serde_json::from_str("\"inWork\"").unwrap();
		assert_eq!(back, OrderStage::InWork);
	}

	#[test]
	fn order_decodes_wire_shape() {
		let order: Order =
			serde_json::from_str(r#"{"id":"1","name":"A","phone":"+910000000001"}"#).unwrap();
		assert_eq!(order.id, "1");
		assert_eq!(order.name, "A");
		assert_eq!(order.phone, "+910000000001");
	}
}
