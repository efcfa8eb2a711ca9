//! In-memory rental fleet tracking
//!
//! A [`FleetRegistry`] holds a catalog of rentable [`Unit`]s, the
//! [`Customer`]s who have rented them, and a ledger of active
//! [`RentalAgreement`]s.
//!
//! ```
//! use fleet::{FleetRegistry, Unit, UnitId};
//! use rust_decimal::Decimal;
//!
//! let id: UnitId = "C001".parse()?;
//! let mut registry = FleetRegistry::new();
//! registry.add_unit(Unit::new(id.clone(), "Toyota", "Camry", Decimal::from(160))?)?;
//!
//! assert_eq!(registry.quote(&id, 3)?, Decimal::from(480));
//!
//! let agreement = registry.open_rental("Alice", &id, 3)?;
//! assert_eq!(agreement.customer().as_str(), "CUS1");
//! assert!(registry.find_available_unit(&id).is_none());
//!
//! registry.return_unit(&id)?;
//! assert_eq!(registry.available_units().count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod domain;
pub use domain::{
    Customer, CustomerId, Error, FleetRegistry, RentalAgreement, Unit, UnitId, UnitStatus,
};

/// Configuration file handling.
pub mod config;
pub use config::{Config, UnitRecord};
