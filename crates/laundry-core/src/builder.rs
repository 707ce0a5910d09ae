//! Builder pattern for constructing the tracker.
//!
//! Composes a [`Tracker`] from pluggable store and notification
//! implementations using factory functions. Every implementation named in
//! the configuration is instantiated through its factory; the primary one is
//! wired into the tracker.

use crate::Tracker;
use laundry_config::Config;
use laundry_notify::{NotificationService, NotifyError, NotifyInterface};
use laundry_store::{StoreError, StoreInterface, StoreService};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during tracker construction.
///
/// These errors indicate problems with configuration or missing required
/// components when building a tracker instance.
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Missing required component: {0}")]
	MissingComponent(String),
}

/// Container for the factory functions needed to build a Tracker.
///
/// Each factory function takes a TOML configuration value and returns the
/// corresponding backend implementation.
pub struct TrackerFactories<SF, NF> {
	pub store_factories: HashMap<String, SF>,
	pub notify_factories: HashMap<String, NF>,
}

/// Builder for constructing a Tracker with pluggable implementations.
pub struct TrackerBuilder {
	config: Config,
}

impl TrackerBuilder {
	/// Creates a new TrackerBuilder with the given configuration.
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Builds the Tracker using factories for each component type.
	pub fn build<SF, NF>(
		self,
		factories: TrackerFactories<SF, NF>,
	) -> Result<Tracker, BuilderError>
	where
		SF: Fn(&toml::Value) -> Result<Box<dyn StoreInterface>, StoreError>,
		NF: Fn(&toml::Value) -> Result<Box<dyn NotifyInterface>, NotifyError>,
	{
		// Create store implementations
		let mut store_impls = HashMap::new();
		for (name, config) in &self.config.store.implementations {
			if let Some(factory) = factories.store_factories.get(name) {
				match factory(config) {
					Ok(implementation) => {
						// Validation already happened in the factory
						store_impls.insert(name.clone(), implementation);
						let is_primary = &self.config.store.primary == name;
						tracing::info!(component = "store", implementation = %name, enabled = %is_primary, "Loaded");
					}
					Err(e) => {
						tracing::error!(
							component = "store",
							implementation = %name,
							error = %e,
							"Failed to create store implementation"
						);
						return Err(BuilderError::Config(format!(
							"Failed to create store implementation '{}': {}",
							name, e
						)));
					}
				}
			}
		}

		if store_impls.is_empty() {
			return Err(BuilderError::MissingComponent(
				"No valid store implementations available".into(),
			));
		}

		// Get the primary store implementation
		let primary_store = &self.config.store.primary;
		let store_backend = store_impls.remove(primary_store).ok_or_else(|| {
			BuilderError::Config(format!(
				"Primary store '{}' failed to load or has invalid configuration",
				primary_store
			))
		})?;

		let store = Arc::new(StoreService::new(store_backend));

		// Create notification implementations
		let mut notify_impls = HashMap::new();
		for (name, config) in &self.config.notify.implementations {
			if let Some(factory) = factories.notify_factories.get(name) {
				match factory(config) {
					Ok(implementation) => {
						notify_impls.insert(name.clone(), implementation);
						let is_primary = &self.config.notify.primary == name;
						tracing::info!(component = "notify", implementation = %name, enabled = %is_primary, "Loaded");
					}
					Err(e) => {
						tracing::error!(
							component = "notify",
							implementation = %name,
							error = %e,
							"Failed to create notify implementation"
						);
						return Err(BuilderError::Config(format!(
							"Failed to create notify implementation '{}': {}",
							name, e
						)));
					}
				}
			}
		}

		if notify_impls.is_empty() {
			return Err(BuilderError::MissingComponent(
				"No valid notify implementations available".into(),
			));
		}

		// Get the primary notification implementation
		let primary_notify = &self.config.notify.primary;
		let notify_backend = notify_impls.remove(primary_notify).ok_or_else(|| {
			BuilderError::Config(format!(
				"Primary notifier '{}' failed to load or has invalid configuration",
				primary_notify
			))
		})?;

		let notifier = Arc::new(NotificationService::new(notify_backend));

		Ok(Tracker::new(self.config, store, notifier))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use laundry_types::OrderStage;

	fn factories() -> TrackerFactories<laundry_store::StoreFactory, laundry_notify::NotifyFactory> {
		TrackerFactories {
			store_factories: laundry_store::get_all_implementations()
				.into_iter()
				.map(|(name, factory)| (name.to_string(), factory))
				.collect(),
			notify_factories: laundry_notify::get_all_implementations()
				.into_iter()
				.map(|(name, factory)| (name.to_string(), factory))
				.collect(),
		}
	}

	fn config(store_primary: &str) -> Config {
		format!(
			r#"
			[store]
			primary = "{store_primary}"

			[store.implementations.memory]

			[notify]
			primary = "log"

			[notify.implementations.log]
			"#
		)
		.parse()
		.unwrap()
	}

	#[tokio::test]
	async fn builds_tracker_from_registered_implementations() {
		let tracker = TrackerBuilder::new(config("memory"))
			.build(factories())
			.unwrap();

		let intake = tracker.intake();
		intake.submit("Asha", "9876543210").await.unwrap();
		let status = tracker.status().await.unwrap();
		assert_eq!(status.in_work.len(), 1);
	}

	#[tokio::test]
	async fn built_tracker_hands_out_screens() {
		let tracker = TrackerBuilder::new(config("memory"))
			.build(factories())
			.unwrap();
		assert!(tracker.screen(OrderStage::InWork).is_ok());
		assert!(tracker.screen(OrderStage::Delivered).is_err());
	}

	#[test]
	fn rejects_primary_without_factory() {
		// Config validation passes (the section exists) but no factory is
		// registered under that name.
		let config: Config = r#"
			[store]
			primary = "redis"

			[store.implementations.redis]

			[notify]
			primary = "log"

			[notify.implementations.log]
		"#
		.parse()
		.unwrap();

		let err = TrackerBuilder::new(config).build(factories()).unwrap_err();
		assert!(matches!(err, BuilderError::MissingComponent(_)));
	}
}
