//! Single-order selection state for a stage-scoped list.
//!
//! At most one order is ever selected, and pressing the already-selected
//! order again deselects it. The selection is screen-local, cleared on every
//! successful transition, and never persisted.

use laundry_types::Order;

/// The single order currently chosen on a screen, if any.
#[derive(Debug, Default)]
pub struct Selection {
	current: Option<Order>,
}

impl Selection {
	/// Creates an empty selection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Selects `order`, or deselects when its id matches the current
	/// selection. Identity is compared by id, not by value.
	pub fn toggle(&mut self, order: Order) {
		match &self.current {
			Some(selected) if selected.id == order.id => self.current = None,
			_ => self.current = Some(order),
		}
	}

	/// Unconditionally empties the selection.
	pub fn clear(&mut self) {
		self.current = None;
	}

	/// Returns the currently selected order, if any.
	pub fn current(&self) -> Option<&Order> {
		self.current.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn order(id: &str) -> Order {
		Order {
			id: id.to_string(),
			name: "A".to_string(),
			phone: "+910000000001".to_string(),
		}
	}

	#[test]
	fn selecting_same_id_toggles_off() {
		let mut selection = Selection::new();
		selection.toggle(order("1"));
		assert_eq!(selection.current().map(|o| o.id.as_str()), Some("1"));
		selection.toggle(order("1"));
		assert!(selection.current().is_none());
	}

	#[test]
	fn selecting_other_order_replaces() {
		let mut selection = Selection::new();
		selection.toggle(order("1"));
		selection.toggle(order("2"));
		assert_eq!(selection.current().map(|o| o.id.as_str()), Some("2"));
	}

	#[test]
	fn toggle_compares_identity_not_value() {
		let mut selection = Selection::new();
		selection.toggle(order("1"));
		// Same id but different name still deselects.
		let mut renamed = order("1");
		renamed.name = "B".to_string();
		selection.toggle(renamed);
		assert!(selection.current().is_none());
	}

	#[test]
	fn clear_empties_selection() {
		let mut selection = Selection::new();
		selection.toggle(order("1"));
		selection.clear();
		assert!(selection.current().is_none());
	}
}
