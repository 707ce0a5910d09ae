//! Per-screen lifecycle transition coordinator.
//!
//! One controller exists per stage-scoped action screen, constructed on
//! screen entry and discarded on exit. It owns the screen's cached list and
//! selection, serializes transition requests so a second action cannot start
//! while one is outstanding, and chains the customer notification strictly
//! after a committed transition. The store stays the sole source of truth:
//! a successful transition is followed by a full re-query, never by a local
//! stage edit.

use crate::selection::Selection;
use crate::transitions::is_valid_transition;
use crate::CoreError;
use laundry_notify::NotificationService;
use laundry_store::StoreService;
use laundry_types::{Order, OrderStage};
use std::sync::Arc;

/// Result of a successful advance.
///
/// The transition itself is committed by the time this exists; the flags
/// report how the two follow-up effects went. Neither failing rolls the
/// transition back.
#[derive(Debug)]
pub struct AdvanceOutcome {
	/// The order that was advanced, as sent to the store.
	pub order: Order,
	/// The stage the order now sits in.
	pub stage: OrderStage,
	/// Whether the notification was handed off to the composer.
	pub notified: bool,
	/// Whether the post-transition list refresh succeeded.
	pub refreshed: bool,
}

/// Coordinator for a single stage-scoped action screen.
pub struct ScreenController {
	/// The stage this screen lists.
	stage: OrderStage,
	/// The stage an advanced order moves into.
	next_stage: OrderStage,
	store: Arc<StoreService>,
	notifier: Arc<NotificationService>,
	/// The most recently loaded list, replaced wholesale on every load.
	orders: Vec<Order>,
	selection: Selection,
	/// Bumped on reset; loads started under an older epoch are discarded.
	epoch: u64,
	/// Set while an advance is outstanding; gates the action control.
	in_flight: bool,
}

impl ScreenController {
	/// Creates a controller bound to `stage`.
	///
	/// Only the two action stages may back a screen: InWork (advancing into
	/// ReadyForDelivery) and ReadyForDelivery (advancing into Delivered).
	pub fn new(
		stage: OrderStage,
		store: Arc<StoreService>,
		notifier: Arc<NotificationService>,
	) -> Result<Self, CoreError> {
		let next_stage = match stage {
			OrderStage::InWork | OrderStage::ReadyForDelivery => stage
				.next()
				.ok_or(CoreError::UnsupportedScreenStage(stage))?,
			other => return Err(CoreError::UnsupportedScreenStage(other)),
		};
		debug_assert!(is_valid_transition(stage, next_stage));

		Ok(Self {
			stage,
			next_stage,
			store,
			notifier,
			orders: Vec::new(),
			selection: Selection::new(),
			epoch: 0,
			in_flight: false,
		})
	}

	/// The stage this screen lists.
	pub fn stage(&self) -> OrderStage {
		self.stage
	}

	/// The screen's cached list, as of the last applied load.
	pub fn orders(&self) -> &[Order] {
		&self.orders
	}

	/// The currently selected order, if any.
	pub fn selected(&self) -> Option<&Order> {
		self.selection.current()
	}

	/// Whether the action control should be enabled: a selection exists and
	/// no request is outstanding.
	pub fn can_advance(&self) -> bool {
		self.selection.current().is_some() && !self.in_flight
	}

	/// Current load epoch; responses stamped with an older value are stale.
	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	/// Queries the store for this screen's stage and applies the result.
	///
	/// The cached list is replaced entirely; there is no incremental merge.
	/// An empty list is a valid, non-error result.
	pub async fn load(&mut self) -> Result<&[Order], CoreError> {
		let epoch = self.epoch;
		let orders = self.store.list(self.stage).await?;
		self.apply_loaded(epoch, orders);
		Ok(&self.orders)
	}

	/// Applies a fetched list if the screen has not been reset since the
	/// fetch began. Returns false when the response was stale and discarded.
	///
	/// A selection pointing at an order the new list no longer contains is
	/// cleared defensively; another client may have transitioned it.
	pub fn apply_loaded(&mut self, epoch: u64, orders: Vec<Order>) -> bool {
		if epoch != self.epoch {
			tracing::debug!(stage = %self.stage, "Discarded stale list response");
			return false;
		}

		self.orders = orders;
		if let Some(selected) = self.selection.current() {
			if !self.orders.iter().any(|order| order.id == selected.id) {
				tracing::debug!(
					stage = %self.stage,
					order_id = %selected.id,
					"Selected order vanished from list, clearing selection"
				);
				self.selection.clear();
			}
		}
		true
	}

	/// Tears the screen state down, as on navigating away.
	///
	/// Any load still in flight carries the old epoch and will be discarded
	/// when its response arrives.
	pub fn reset(&mut self) {
		self.epoch += 1;
		self.orders.clear();
		self.selection.clear();
		self.in_flight = false;
	}

	/// Toggles selection of the order with `id`.
	///
	/// The order must be in the current list; the selection never references
	/// anything outside it. Returns the selection after the toggle.
	pub fn toggle_select(&mut self, id: &str) -> Result<Option<&Order>, CoreError> {
		let order = self
			.orders
			.iter()
			.find(|order| order.id == id)
			.cloned()
			.ok_or_else(|| CoreError::UnknownOrder(id.to_string()))?;
		self.selection.toggle(order);
		Ok(self.selection.current())
	}

	/// Advances the selected order into this screen's next stage.
	///
	/// Preconditions are checked locally and reach no network on failure: an
	/// order must be selected and no prior advance may be outstanding. On a
	/// committed transition the customer is notified (best-effort), the
	/// selection is cleared, and the list is re-queried so the order
	/// disappears from this screen. On a failed transition the selection and
	/// list are left exactly as they were; no retry is attempted.
	pub async fn advance(&mut self) -> Result<AdvanceOutcome, CoreError> {
		if self.in_flight {
			return Err(CoreError::RequestInFlight);
		}
		let order = self
			.selection
			.current()
			.cloned()
			.ok_or(CoreError::NoSelection)?;

		self.in_flight = true;
		let committed = self.store.advance(&order, self.next_stage).await;
		if let Err(e) = committed {
			// Not committed: leave selection and list untouched.
			self.in_flight = false;
			return Err(e.into());
		}

		// The stage change is durable from here on. The notification and the
		// refresh are follow-ups whose failures are reported, not rolled
		// back into the transition.
		let notified = match self.notifier.notify_transition(&order, self.next_stage).await {
			Ok(()) => true,
			Err(e) => {
				tracing::warn!(
					order_id = %order.id,
					stage = %self.next_stage,
					error = %e,
					"Notification failed after committed transition"
				);
				false
			}
		};

		self.selection.clear();

		let epoch = self.epoch;
		let refreshed = match self.store.list(self.stage).await {
			Ok(orders) => self.apply_loaded(epoch, orders),
			Err(e) => {
				tracing::warn!(
					stage = %self.stage,
					error = %e,
					"List refresh failed after committed transition"
				);
				false
			}
		};

		self.in_flight = false;
		Ok(AdvanceOutcome {
			order,
			stage: self.next_stage,
			notified,
			refreshed,
		})
	}
}
