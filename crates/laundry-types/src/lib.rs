//! Common types module for the laundry tracker.
//!
//! This crate defines the domain and wire types shared by every other crate:
//! orders and their lifecycle stages, the request/response shapes of the
//! remote order store contract, contact candidates for order intake, and the
//! configuration validation framework that pluggable implementations expose.

/// Wire types for the remote order store HTTP contract.
pub mod api;
/// Contact candidates produced by the intake flow.
pub mod contact;
/// Order entity and lifecycle stage types.
pub mod order;
/// Phone number normalization at the order-creation boundary.
pub mod phone;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use api::*;
pub use contact::*;
pub use order::*;
pub use phone::*;
pub use registry::*;
pub use validation::*;
