//! Domain models for rental fleet management.
//!
//! This module contains the core domain types: rentable units, customers,
//! rental agreements, and the registry that ties them together.

mod agreement;
pub use agreement::RentalAgreement;

mod customer;
pub use customer::{Customer, CustomerId};

mod error;
pub use error::Error;

/// The fleet registry and its rent/return operations.
pub mod registry;
pub use registry::FleetRegistry;

/// Rentable units and their identifiers.
pub mod unit;
pub use unit::{Unit, UnitId, UnitStatus};
