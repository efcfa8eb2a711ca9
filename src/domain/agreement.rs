use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Customer, CustomerId, Error, Unit, UnitId};

/// An active rental: one unit, out with one customer, for a number of days.
///
/// The unit's daily rate and the total are captured when the agreement is
/// made. Rates are fixed for the lifetime of a unit, so the total always
/// agrees with [`Unit::price`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalAgreement {
    unit: UnitId,
    customer: CustomerId,
    duration_days: NonZeroU32,
    daily_rate: Decimal,
    total_price: Decimal,
    started: DateTime<Utc>,
}

impl RentalAgreement {
    /// Fails with [`Error::InvalidArgument`] if the total is out of range.
    pub(crate) fn new(
        unit: &Unit,
        customer: &Customer,
        duration_days: NonZeroU32,
    ) -> Result<Self, Error> {
        Ok(Self {
            unit: unit.id().clone(),
            customer: customer.id().clone(),
            duration_days,
            daily_rate: unit.daily_rate(),
            total_price: unit.price_for(duration_days)?,
            started: Utc::now(),
        })
    }

    /// The rented unit.
    #[must_use]
    pub const fn unit(&self) -> &UnitId {
        &self.unit
    }

    /// The customer holding the unit.
    #[must_use]
    pub const fn customer(&self) -> &CustomerId {
        &self.customer
    }

    /// Length of the rental in days. Always at least one.
    #[must_use]
    pub const fn duration_days(&self) -> NonZeroU32 {
        self.duration_days
    }

    /// The daily rate at the time of rental.
    #[must_use]
    pub const fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    /// When the rental was confirmed.
    #[must_use]
    pub const fn started(&self) -> DateTime<Utc> {
        self.started
    }

    /// The full price of the rental.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }
}
