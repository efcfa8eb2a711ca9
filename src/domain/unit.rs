use std::{fmt, num::NonZeroU32, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use rust_decimal::Decimal;

use crate::domain::Error;

/// A validated unit identifier, such as `C001`.
///
/// Identifiers are non-empty and contain no whitespace. Matching is exact;
/// any case folding is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitId(NonEmptyString);

impl UnitId {
    /// Creates a new `UnitId` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUnitIdError` if the string is empty or contains
    /// whitespace.
    pub fn new(s: String) -> Result<Self, InvalidUnitIdError> {
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidUnitIdError(s));
        }
        NonEmptyString::new(s).map(Self).map_err(InvalidUnitIdError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for UnitId {
    type Error = InvalidUnitIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UnitId {
    type Error = InvalidUnitIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for UnitId {
    type Err = InvalidUnitIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for UnitId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for UnitId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a unit identifier is empty or contains whitespace.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid unit id '{0}': must be non-empty and contain no whitespace")]
pub struct InvalidUnitIdError(String);

/// Whether a unit can currently be rented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStatus {
    /// On the lot and free to rent.
    Available,
    /// Out on an active rental agreement.
    Rented,
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Available => f.pad("available"),
            Self::Rented => f.pad("rented"),
        }
    }
}

/// A single rentable asset in the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    id: UnitId,
    brand: String,
    model: String,
    daily_rate: Decimal,
    available: bool,
}

impl Unit {
    /// Creates a new unit. Units start out available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `daily_rate` is negative.
    pub fn new(
        id: UnitId,
        brand: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Decimal,
    ) -> Result<Self, Error> {
        if daily_rate < Decimal::ZERO {
            return Err(Error::InvalidArgument(format!(
                "daily rate for unit {id} must not be negative, got {daily_rate}"
            )));
        }

        Ok(Self {
            id,
            brand: brand.into(),
            model: model.into(),
            daily_rate,
            available: true,
        })
    }

    /// The unit's stable identifier.
    #[must_use]
    pub const fn id(&self) -> &UnitId {
        &self.id
    }

    /// The manufacturer.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// The model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The price of one rental day.
    #[must_use]
    pub const fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    /// Whether the unit can be rented right now.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// The unit's position in the rent/return cycle.
    #[must_use]
    pub const fn status(&self) -> UnitStatus {
        if self.available {
            UnitStatus::Available
        } else {
            UnitStatus::Rented
        }
    }

    /// The price of renting this unit for `days` days.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `days` is zero or the total
    /// does not fit in a [`Decimal`].
    pub fn price(&self, days: u32) -> Result<Decimal, Error> {
        self.price_for(rental_days(days)?)
    }

    pub(crate) fn price_for(&self, days: NonZeroU32) -> Result<Decimal, Error> {
        price(self.daily_rate, days)
    }

    /// Takes the unit off the lot.
    ///
    /// Availability is not checked here; the registry does that before
    /// calling.
    pub(crate) const fn mark_rented(&mut self) {
        self.available = false;
    }

    /// Puts the unit back on the lot. Calling it twice is harmless.
    pub(crate) const fn mark_returned(&mut self) {
        self.available = true;
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {} {}", self.id, self.brand, self.model)
    }
}

/// Validates a rental duration.
pub(crate) fn rental_days(days: u32) -> Result<NonZeroU32, Error> {
    NonZeroU32::new(days).ok_or_else(|| {
        Error::InvalidArgument("rental duration must be at least one day".to_string())
    })
}

fn price(daily_rate: Decimal, days: NonZeroU32) -> Result<Decimal, Error> {
    daily_rate
        .checked_mul(Decimal::from(days.get()))
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "price of {days} day(s) at {daily_rate}/day is out of range"
            ))
        })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use test_case::test_case;

    use super::*;

    fn camry() -> Unit {
        Unit::new("C001".parse().unwrap(), "Toyota", "Camry", dec!(160.0)).unwrap()
    }

    #[test]
    fn unit_id_rejects_empty() {
        assert!(UnitId::new(String::new()).is_err());
    }

    #[test]
    fn unit_id_rejects_whitespace() {
        assert!(UnitId::new("C 001".to_string()).is_err());
        assert!(UnitId::new(" C001".to_string()).is_err());
    }

    #[test]
    fn unit_id_is_case_sensitive() {
        let upper: UnitId = "C001".parse().unwrap();
        let lower: UnitId = "c001".parse().unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn new_unit_is_available() {
        let unit = camry();
        assert!(unit.is_available());
        assert_eq!(unit.status(), UnitStatus::Available);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let result = Unit::new("C001".parse().unwrap(), "Toyota", "Camry", dec!(-1));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn zero_rate_is_allowed() {
        let unit = Unit::new("C001".parse().unwrap(), "Toyota", "Camry", dec!(0)).unwrap();
        assert_eq!(unit.price(5).unwrap(), dec!(0));
    }

    #[test_case(1, dec!(160.0); "single day")]
    #[test_case(3, dec!(480.0); "three days")]
    #[test_case(30, dec!(4800.0); "a month")]
    fn price_is_rate_times_days(days: u32, expected: Decimal) {
        assert_eq!(camry().price(days).unwrap(), expected);
    }

    #[test]
    fn price_for_zero_days_fails() {
        assert!(matches!(camry().price(0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn price_keeps_fractional_rates_exact() {
        let unit = Unit::new("N001".parse().unwrap(), "Nissan", "Leaf", dec!(89.99)).unwrap();
        assert_eq!(unit.price(3).unwrap(), dec!(269.97));
    }

    #[test]
    fn overflowing_price_is_an_error() {
        let unit = Unit::new("X001".parse().unwrap(), "Bugatti", "Chiron", Decimal::MAX).unwrap();
        assert!(matches!(unit.price(2), Err(Error::InvalidArgument(_))));
        assert_eq!(unit.price(1).unwrap(), Decimal::MAX);
    }

    #[test]
    fn mark_rented_then_returned() {
        let mut unit = camry();
        unit.mark_rented();
        assert_eq!(unit.status(), UnitStatus::Rented);
        unit.mark_returned();
        unit.mark_returned();
        assert!(unit.is_available());
    }

    #[test]
    fn display_shows_id_brand_and_model() {
        assert_eq!(camry().to_string(), "C001 - Toyota Camry");
    }
}
