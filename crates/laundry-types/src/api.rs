//! Wire types for the remote order store HTTP contract.
//!
//! One named request/response struct per endpoint. The store reports
//! application-level failure with an explicit `success` flag and an optional
//! reason string; each list endpoint names its array after the stage it
//! queries. The aggregate status endpoint carries no success flag at all.

use crate::Order;
use serde::{Deserialize, Serialize};

/// Request body for `POST /addContact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOrderRequest {
	/// Customer display name.
	pub name: String,
	/// Phone number, already normalized with the country prefix.
	pub phone: String,
}

/// Request body for `POST /markReady` and `POST /markDelivered`.
///
/// Carries the full order identity, not just the id, matching the store
/// contract exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
	pub id: String,
	pub name: String,
	pub phone: String,
}

impl From<&Order> for TransitionRequest {
	fn from(order: &Order) -> Self {
		Self {
			id: order.id.clone(),
			name: order.name.clone(),
			phone: order.phone.clone(),
		}
	}
}

/// Acknowledgement response for mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
	/// Whether the store committed the operation.
	pub success: bool,
	/// Reason string supplied by the store on failure, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Response for `GET /contacts/inWork`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InWorkResponse {
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// Orders currently in the InWork stage.
	#[serde(rename = "inWork", default)]
	pub in_work: Vec<Order>,
}

/// Response for `GET /contacts/readyForDelivery`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyForDeliveryResponse {
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// Orders currently in the ReadyForDelivery stage.
	#[serde(rename = "readyForDelivery", default)]
	pub ready_for_delivery: Vec<Order>,
}

/// Response for `GET /status`: the aggregate view over every stage, with
/// history being all orders that reached Delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
	#[serde(rename = "inWork", default)]
	pub in_work: Vec<Order>,
	#[serde(rename = "readyForDelivery", default)]
	pub ready_for_delivery: Vec<Order>,
	#[serde(default)]
	pub history: Vec<Order>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn in_work_response_decodes_named_array() {
		let json = r#"{"success":true,"inWork":[{"id":"1","name":"A","phone":"+910000000001"}]}"#;
		let resp: InWorkResponse = serde_json::from_str(json).unwrap();
		assert!(resp.success);
		assert_eq!(resp.in_work.len(), 1);
		assert_eq!(resp.in_work[0].id, "1");
	}

	#[test]
	fn failure_ack_carries_reason() {
		let json = r#"{"success":false,"error":"duplicate phone"}"#;
		let ack: Ack = serde_json::from_str(json).unwrap();
		assert!(!ack.success);
		assert_eq!(ack.error.as_deref(), Some("duplicate phone"));
	}

	#[test]
	fn status_snapshot_has_no_success_flag() {
		let json = r#"{"inWork":[],"readyForDelivery":[],"history":[{"id":"9","name":"B","phone":"+910000000002"}]}"#;
		let snapshot: StatusSnapshot = serde_json::from_str(json).unwrap();
		assert!(snapshot.in_work.is_empty());
		assert_eq!(snapshot.history.len(), 1);
	}

	#[test]
	fn transition_request_copies_order_identity() {
		let order = Order {
			id: "7".into(),
			name: "C".into(),
			phone: "+910000000003".into(),
		};
		let req = TransitionRequest::from(&order);
		assert_eq!(req.id, order.id);
		assert_eq!(req.name, order.name);
		assert_eq!(req.phone, order.phone);
	}
}
