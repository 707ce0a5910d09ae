//! Registry trait for self-registering implementations.
//!
//! Each backend module (store, notify) provides a `Registry` struct tying
//! together the name used in configuration files and the factory function
//! that builds the backend from its TOML table.

/// Base trait for implementation registries.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation,
	/// e.g. "http" for `store.implementations.http`.
	const NAME: &'static str;

	/// The factory function type this implementation provides; each backend
	/// crate defines its own (StoreFactory, NotifyFactory).
	type Factory;

	/// Returns the factory function for this implementation.
	fn factory() -> Self::Factory;
}
