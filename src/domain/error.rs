use crate::domain::{CustomerId, UnitId, unit::InvalidUnitIdError};

/// Errors returned by fleet operations.
///
/// None of these are fatal. Most of them (a rented unit, an unknown return)
/// are ordinary outcomes of a rental desk and should be reported to the user
/// rather than treated as faults.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A supplied value is out of range, such as a zero-day rental or a
    /// negative daily rate.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A unit identifier is malformed.
    #[error(transparent)]
    InvalidUnitId(#[from] InvalidUnitIdError),

    /// A unit with the same identifier is already in the fleet.
    #[error("unit {0} already exists")]
    DuplicateId(UnitId),

    /// The unit is currently rented out.
    #[error("unit {0} is not available")]
    UnitNotAvailable(UnitId),

    /// The unit is unknown, or has no active rental to return.
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    /// No customer is registered under this identifier.
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),
}
