//! Core lifecycle coordination for the laundry tracker.
//!
//! This crate owns the rules of the order lifecycle on the client side: which
//! transitions may be requested, how a screen's cached list is reconciled
//! with the authoritative store, how the single selected order gates the next
//! action, and how the best-effort customer notification is sequenced after
//! a committed transition. Everything here treats the remote store as the
//! sole source of truth for stage; nothing is mutated optimistically.

use laundry_config::Config;
use laundry_notify::NotificationService;
use laundry_store::{StoreError, StoreService};
use laundry_types::{ContactCandidate, OrderStage, StatusSnapshot};
use std::sync::Arc;
use thiserror::Error;

pub mod builder;
pub mod intake;
pub mod screen;
pub mod selection;
pub mod transitions;

pub use builder::{BuilderError, TrackerBuilder, TrackerFactories};
pub use intake::OrderIntake;
pub use screen::{AdvanceOutcome, ScreenController};
pub use selection::Selection;

/// Errors that can occur during lifecycle coordination.
///
/// Validation failures are detected locally and never reach the network;
/// store failures pass through with the reason the store client attached.
#[derive(Debug, Error)]
pub enum CoreError {
	/// An action was attempted with no order selected.
	#[error("No order selected")]
	NoSelection,
	/// An action was attempted while a previous one is still outstanding.
	#[error("A request is already in flight for this screen")]
	RequestInFlight,
	/// The referenced order is not in the screen's current list.
	#[error("Order {0} is not in the current list")]
	UnknownOrder(String),
	/// The screen was bound to a stage that has no action.
	#[error("Stage {0} has no action screen")]
	UnsupportedScreenStage(OrderStage),
	/// Locally rejected user input.
	#[error("Invalid input: {0}")]
	InvalidInput(String),
	/// The contacts file could not be read or decoded.
	#[error("Contacts file error: {0}")]
	Contacts(String),
	/// Failure reported by the store client (transport or application).
	#[error(transparent)]
	Store(#[from] StoreError),
}

/// Top-level handle over the tracker's services.
///
/// Built once from configuration via [`TrackerBuilder`]; hands out
/// per-screen controllers that are constructed fresh on screen entry and
/// discarded on exit.
pub struct Tracker {
	config: Config,
	store: Arc<StoreService>,
	notifier: Arc<NotificationService>,
}

impl std::fmt::Debug for Tracker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Tracker")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl Tracker {
	/// Creates a tracker from already-built services.
	pub fn new(
		config: Config,
		store: Arc<StoreService>,
		notifier: Arc<NotificationService>,
	) -> Self {
		Self {
			config,
			store,
			notifier,
		}
	}

	/// Constructs a controller for the action screen bound to `stage`.
	pub fn screen(&self, stage: OrderStage) -> Result<ScreenController, CoreError> {
		ScreenController::new(stage, Arc::clone(&self.store), Arc::clone(&self.notifier))
	}

	/// Constructs the order intake flow.
	pub fn intake(&self) -> OrderIntake {
		OrderIntake::new(
			Arc::clone(&self.store),
			self.config.intake.country_prefix.clone(),
		)
	}

	/// Fetches the aggregate status snapshot from the store.
	pub async fn status(&self) -> Result<StatusSnapshot, CoreError> {
		Ok(self.store.status().await?)
	}

	/// Loads contact candidates from the configured contacts file.
	///
	/// Returns an empty list when no file is configured.
	pub async fn contacts(&self) -> Result<Vec<ContactCandidate>, CoreError> {
		match &self.config.intake.contacts_file {
			Some(path) => intake::load_candidates(path).await,
			None => {
				tracing::debug!("No contacts file configured");
				Ok(Vec::new())
			}
		}
	}
}
