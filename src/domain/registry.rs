//! The fleet registry: units, customers and the ledger of active rentals.
//!
//! [`FleetRegistry`] is the only component allowed to change a unit's
//! availability. It keeps availability and the agreement ledger consistent:
//! a unit is rented out if and only if exactly one agreement references it.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    num::NonZeroUsize,
};

use rust_decimal::Decimal;
use tracing::instrument;

use crate::domain::{
    Customer, CustomerId, Error, RentalAgreement, Unit, UnitId, unit::rental_days,
};

/// Prefix used for generated customer identifiers unless configured
/// otherwise.
pub const DEFAULT_CUSTOMER_PREFIX: &str = "CUS";

/// An in-memory registry of units, customers and active rental agreements.
///
/// Storage is decomposed:
/// - Units: `Vec<Unit>` (insertion order is listing order)
/// - Unit lookup: `BTreeMap<UnitId, usize>` into the unit vector
/// - Customers: `Vec<Customer>`, in registration order
/// - Agreements: `BTreeMap<UnitId, RentalAgreement>`, keyed by the rented
///   unit so that no unit can appear in two agreements
///
/// Mutating operations take `&mut self`, so the check-then-mark sequence of a
/// rental can never interleave with another caller.
#[derive(Debug)]
pub struct FleetRegistry {
    units: Vec<Unit>,
    unit_index: BTreeMap<UnitId, usize>,
    customers: Vec<Customer>,
    agreements: BTreeMap<UnitId, RentalAgreement>,
    customer_prefix: String,
    next_customer: NonZeroUsize,
}

impl Default for FleetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_customer_prefix(DEFAULT_CUSTOMER_PREFIX)
    }

    /// Creates an empty registry whose customer ids start with `prefix`.
    #[must_use]
    pub fn with_customer_prefix(prefix: impl Into<String>) -> Self {
        Self {
            units: Vec::new(),
            unit_index: BTreeMap::new(),
            customers: Vec::new(),
            agreements: BTreeMap::new(),
            customer_prefix: prefix.into(),
            next_customer: NonZeroUsize::MIN,
        }
    }

    /// Adds a unit to the end of the fleet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if a unit with the same id is already
    /// registered.
    pub fn add_unit(&mut self, unit: Unit) -> Result<(), Error> {
        match self.unit_index.entry(unit.id().clone()) {
            Entry::Occupied(entry) => Err(Error::DuplicateId(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(self.units.len());
                self.units.push(unit);
                Ok(())
            }
        }
    }

    /// Registers a new customer and returns it.
    ///
    /// Every call creates a fresh record with a new id, even if a customer
    /// with the same name already exists.
    pub fn add_customer(&mut self, name: impl Into<String>) -> &Customer {
        let id = CustomerId::generate(&self.customer_prefix, self.next_customer);
        self.next_customer = self.next_customer.saturating_add(1);

        tracing::debug!(customer = %id, "registered customer");
        self.customers.push(Customer::new(id, name.into()));
        &self.customers[self.customers.len() - 1]
    }

    /// All units, in the order they were added.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Units that can currently be rented, in the order they were added.
    ///
    /// The iterator borrows the registry, so each call reflects the current
    /// state.
    pub fn available_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.is_available())
    }

    /// Looks up a unit by id, whatever its status.
    #[must_use]
    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.unit_index.get(id).map(|&index| &self.units[index])
    }

    /// Looks up a unit by id, returning it only if it is available.
    #[must_use]
    pub fn find_available_unit(&self, id: &UnitId) -> Option<&Unit> {
        self.unit(id).filter(|unit| unit.is_available())
    }

    /// Looks up a unit by id, returning it only if it is rented out.
    #[must_use]
    pub fn find_rented_unit(&self, id: &UnitId) -> Option<&Unit> {
        self.unit(id).filter(|unit| !unit.is_available())
    }

    /// All registered customers, in registration order.
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    /// Looks up a customer by id.
    #[must_use]
    pub fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id() == id)
    }

    /// All active rental agreements, ordered by unit id.
    pub fn agreements(&self) -> impl Iterator<Item = &RentalAgreement> {
        self.agreements.values()
    }

    /// The active agreement for a unit, if it is rented out.
    #[must_use]
    pub fn agreement(&self, unit: &UnitId) -> Option<&RentalAgreement> {
        self.agreements.get(unit)
    }

    /// Prices a rental of `days` days without committing to it.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `days` is zero or the price is out of
    ///   range
    /// - [`Error::UnitNotFound`] if no unit has this id
    pub fn quote(&self, unit: &UnitId, days: u32) -> Result<Decimal, Error> {
        let days = rental_days(days)?;
        let unit = self
            .unit(unit)
            .ok_or_else(|| Error::UnitNotFound(unit.clone()))?;
        unit.price_for(days)
    }

    /// Rents a unit out to an existing customer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `days` is zero or the price is out of
    ///   range
    /// - [`Error::UnitNotFound`] if no unit has this id
    /// - [`Error::CustomerNotFound`] if the customer is not registered
    /// - [`Error::UnitNotAvailable`] if the unit is already rented out
    ///
    /// On error the registry is left unchanged.
    #[instrument(level = "debug", skip_all, fields(unit = %unit, customer = %customer, days = days))]
    pub fn rent(
        &mut self,
        unit: &UnitId,
        customer: &CustomerId,
        days: u32,
    ) -> Result<&RentalAgreement, Error> {
        let days = rental_days(days)?;
        let index = self.index_of(unit)?;
        let customer = self
            .customers
            .iter()
            .find(|c| c.id() == customer)
            .ok_or_else(|| Error::CustomerNotFound(customer.clone()))?;

        let target = &self.units[index];
        if !target.is_available() {
            return Err(Error::UnitNotAvailable(unit.clone()));
        }
        let agreement = RentalAgreement::new(target, customer, days)?;

        let Entry::Vacant(slot) = self.agreements.entry(unit.clone()) else {
            return Err(Error::UnitNotAvailable(unit.clone()));
        };
        tracing::info!(days = days.get(), total = %agreement.total_price(), "unit rented");

        self.units[index].mark_rented();
        Ok(slot.insert(agreement))
    }

    /// Registers a new customer and rents them a unit in one step.
    ///
    /// The unit and duration are checked before the customer is created, so
    /// a failed rental leaves no customer record behind.
    ///
    /// # Errors
    ///
    /// Same as [`FleetRegistry::rent`], apart from
    /// [`Error::CustomerNotFound`].
    pub fn open_rental(
        &mut self,
        name: impl Into<String>,
        unit: &UnitId,
        days: u32,
    ) -> Result<&RentalAgreement, Error> {
        let duration = rental_days(days)?;
        let index = self.index_of(unit)?;
        let target = &self.units[index];
        if !target.is_available() {
            return Err(Error::UnitNotAvailable(unit.clone()));
        }
        target.price_for(duration)?;

        let customer = self.add_customer(name).id().clone();
        self.rent(unit, &customer, days)
    }

    /// Takes a unit back and closes its agreement.
    ///
    /// Returns the closed agreement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitNotFound`] if no unit has this id or the unit has
    /// no active agreement.
    #[instrument(level = "debug", skip_all, fields(unit = %unit))]
    pub fn return_unit(&mut self, unit: &UnitId) -> Result<RentalAgreement, Error> {
        let index = self.index_of(unit)?;
        let agreement = self
            .agreements
            .remove(unit)
            .ok_or_else(|| Error::UnitNotFound(unit.clone()))?;
        self.units[index].mark_returned();

        tracing::info!(customer = %agreement.customer(), "unit returned");
        Ok(agreement)
    }

    fn index_of(&self, unit: &UnitId) -> Result<usize, Error> {
        self.unit_index
            .get(unit)
            .copied()
            .ok_or_else(|| Error::UnitNotFound(unit.clone()))
    }
}
