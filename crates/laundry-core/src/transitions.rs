//! Client-side stage transition rules.
//!
//! The store's enforcement is outside this system's control; what the client
//! guarantees is that it never requests an out-of-order transition. Stages
//! move strictly forward, one step at a time, and Delivered is terminal.

use laundry_types::OrderStage;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

// Static transition table - each stage maps to its allowed next stages
static TRANSITIONS: Lazy<HashMap<OrderStage, HashSet<OrderStage>>> = Lazy::new(|| {
	let mut m = HashMap::new();
	m.insert(OrderStage::New, HashSet::from([OrderStage::InWork]));
	m.insert(
		OrderStage::InWork,
		HashSet::from([OrderStage::ReadyForDelivery]),
	);
	m.insert(
		OrderStage::ReadyForDelivery,
		HashSet::from([OrderStage::Delivered]),
	);
	m.insert(OrderStage::Delivered, HashSet::new()); // terminal
	m
});

/// Checks whether the client may request a transition from `from` to `to`.
pub fn is_valid_transition(from: OrderStage, to: OrderStage) -> bool {
	TRANSITIONS
		.get(&from)
		.is_some_and(|set| set.contains(&to))
}
