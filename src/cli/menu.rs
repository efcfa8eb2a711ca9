//! The interactive rental desk.
//!
//! A line-oriented menu: rent a car, return a car, list available cars, or
//! exit. Bad input is reported and the loop carries on; nothing typed here
//! can leave the registry in an inconsistent state, since every change goes
//! through [`FleetRegistry`].

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use fleet::{Config, FleetRegistry, UnitId};
use tracing::instrument;

use crate::cli::{parse_unit_id, terminal::Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Rent,
    Return,
    View,
    Exit,
}

#[derive(Debug, PartialEq, Eq)]
enum ChoiceError {
    NotANumber,
    OutOfRange,
}

impl FromStr for Choice {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(1) => Ok(Self::Rent),
            Ok(2) => Ok(Self::Return),
            Ok(3) => Ok(Self::View),
            Ok(4) => Ok(Self::Exit),
            Ok(_) => Err(ChoiceError::OutOfRange),
            Err(_) => Err(ChoiceError::NotANumber),
        }
    }
}

pub struct Menu<'a, R, W> {
    registry: &'a mut FleetRegistry,
    config: &'a Config,
    input: R,
    output: W,
    color: bool,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub const fn new(
        registry: &'a mut FleetRegistry,
        config: &'a Config,
        input: R,
        output: W,
        color: bool,
    ) -> Self {
        Self {
            registry,
            config,
            input,
            output,
            color,
        }
    }

    /// Runs the menu until the user exits or input ends.
    pub fn run(mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "\n{}", "===== Car Rental System =====".heading(self.color))?;
            writeln!(self.output, "1. Rent a Car")?;
            writeln!(self.output, "2. Return a Car")?;
            writeln!(self.output, "3. View Available Cars")?;
            writeln!(self.output, "4. Exit")?;

            let Some(line) = self.prompt("Enter your choice: ")? else {
                tracing::debug!("input closed");
                return Ok(());
            };

            match line.parse::<Choice>() {
                Ok(Choice::Rent) => self.rent()?,
                Ok(Choice::Return) => self.return_unit()?,
                Ok(Choice::View) => self.view_available()?,
                Ok(Choice::Exit) => {
                    writeln!(
                        self.output,
                        "Thank you for using the Car Rental System. Goodbye!"
                    )?;
                    return Ok(());
                }
                Err(ChoiceError::NotANumber) => {
                    writeln!(
                        self.output,
                        "{}",
                        "Invalid input! Please enter a number between 1 and 4.".warning(self.color)
                    )?;
                }
                Err(ChoiceError::OutOfRange) => {
                    writeln!(
                        self.output,
                        "{}",
                        "Invalid choice! Please select a valid option.".warning(self.color)
                    )?;
                }
            }
        }
    }

    /// Prints `label` and reads one line, without its line ending.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    #[instrument(level = "debug", skip_all)]
    fn rent(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n{}\n", "== Rent a Car ==".heading(self.color))?;

        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(());
        };

        self.view_available()?;

        let Some(unit) = self.prompt("\nEnter the car ID you want to rent: ")? else {
            return Ok(());
        };
        let Some(days) = self.prompt("Enter the number of days for rental: ")? else {
            return Ok(());
        };

        let Ok(days) = days.trim().parse::<u32>() else {
            tracing::debug!(input = %days, "duration is not a number");
            writeln!(
                self.output,
                "{}",
                "Invalid number of days. Please try again.".warning(self.color)
            )?;
            return Ok(());
        };

        let Some(unit) = self.available(&unit) else {
            writeln!(
                self.output,
                "\n{}",
                "Invalid car selection or car not available.".warning(self.color)
            )?;
            return Ok(());
        };

        let price = match self.registry.quote(&unit, days) {
            Ok(price) => price,
            Err(e) => {
                tracing::debug!(error = %e, "quote rejected");
                writeln!(
                    self.output,
                    "{}",
                    "Invalid number of days. Please try again.".warning(self.color)
                )?;
                return Ok(());
            }
        };

        writeln!(self.output, "\nTotal Price: {}", self.config.format_price(price))?;
        let Some(confirm) = self.prompt("Confirm rental (Y/N): ")? else {
            return Ok(());
        };

        if !confirm.trim().eq_ignore_ascii_case("y") {
            writeln!(self.output, "\n{}", "Rental canceled.".dim(self.color))?;
            return Ok(());
        }

        match self.registry.open_rental(name, &unit, days) {
            Ok(agreement) => {
                let customer = agreement.customer().clone();
                writeln!(self.output, "\n{}", "Car rented successfully.".success(self.color))?;
                writeln!(
                    self.output,
                    "{}",
                    format!("Customer {customer}, {unit} for {days} day(s)").dim(self.color)
                )?;
            }
            Err(e) => {
                writeln!(self.output, "\n{}", format!("Rental failed: {e}").warning(self.color))?;
            }
        }
        Ok(())
    }

    #[instrument(level = "debug", skip_all)]
    fn return_unit(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n{}\n", "== Return a Car ==".heading(self.color))?;

        let Some(input) = self.prompt("Enter the car ID you want to return: ")? else {
            return Ok(());
        };

        let rented = parse_unit_id(&input)
            .ok()
            .filter(|id| self.registry.find_rented_unit(id).is_some());

        match rented.map(|id| self.registry.return_unit(&id)) {
            Some(Ok(agreement)) => {
                writeln!(self.output, "\n{}", "Car returned successfully.".success(self.color))?;
                let name = self
                    .registry
                    .customer(agreement.customer())
                    .map(|customer| customer.name().to_string())
                    .unwrap_or_default();
                writeln!(
                    self.output,
                    "{}",
                    format!("Returned by {} ({name})", agreement.customer()).dim(self.color)
                )?;
            }
            Some(Err(e)) => {
                writeln!(self.output, "\n{}", format!("Return failed: {e}").warning(self.color))?;
            }
            None => {
                writeln!(
                    self.output,
                    "\n{}",
                    "Invalid car ID or car is not rented.".warning(self.color)
                )?;
            }
        }
        Ok(())
    }

    fn view_available(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}\n", "== Available Cars ==".heading(self.color))?;
        for unit in self.registry.available_units() {
            writeln!(self.output, "{unit}")?;
        }
        Ok(())
    }

    fn available(&self, input: &str) -> Option<UnitId> {
        let id = parse_unit_id(input).ok()?;
        self.registry
            .find_available_unit(&id)
            .map(|unit| unit.id().clone())
    }
}

#[cfg(test)]
mod tests {
    use fleet::Unit;
    use rust_decimal::Decimal;

    use super::*;

    fn id(s: &str) -> UnitId {
        s.parse().unwrap()
    }

    fn registry() -> FleetRegistry {
        let mut registry = FleetRegistry::new();
        for (unit, brand, model, rate) in [
            ("C001", "Toyota", "Camry", 160),
            ("C002", "Honda", "Accord", 170),
        ] {
            registry
                .add_unit(Unit::new(id(unit), brand, model, Decimal::from(rate)).unwrap())
                .unwrap();
        }
        registry
    }

    /// Feeds `script` to the menu and returns everything it printed.
    fn session(registry: &mut FleetRegistry, script: &str) -> String {
        let config = Config::default();
        let mut output = Vec::new();
        Menu::new(registry, &config, script.as_bytes(), &mut output, false)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn choice_parsing() {
        assert_eq!(" 1 ".parse::<Choice>(), Ok(Choice::Rent));
        assert_eq!("4".parse::<Choice>(), Ok(Choice::Exit));
        assert_eq!("5".parse::<Choice>(), Err(ChoiceError::OutOfRange));
        assert_eq!("0".parse::<Choice>(), Err(ChoiceError::OutOfRange));
        assert_eq!("rent".parse::<Choice>(), Err(ChoiceError::NotANumber));
    }

    #[test]
    fn exit_says_goodbye() {
        let out = session(&mut registry(), "4\n");
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn end_of_input_ends_session() {
        let out = session(&mut registry(), "");
        assert!(out.contains("Enter your choice: "));
    }

    #[test]
    fn invalid_choices_reprompt() {
        let out = session(&mut registry(), "abc\n9\n4\n");
        assert!(out.contains("Invalid input! Please enter a number between 1 and 4."));
        assert!(out.contains("Invalid choice! Please select a valid option."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn view_lists_available_cars() {
        let out = session(&mut registry(), "3\n4\n");
        assert!(out.contains("C001 - Toyota Camry"));
        assert!(out.contains("C002 - Honda Accord"));
    }

    #[test]
    fn confirmed_rental_rents_the_car() {
        let mut registry = registry();
        let out = session(&mut registry, "1\nAlice\nc001\n3\ny\n4\n");

        assert!(out.contains("Total Price: $480.00"));
        assert!(out.contains("Car rented successfully."));
        assert!(registry.find_rented_unit(&id("C001")).is_some());

        let agreement = registry.agreement(&id("C001")).unwrap();
        assert_eq!(agreement.duration_days().get(), 3);
        assert_eq!(registry.customer(agreement.customer()).unwrap().name(), "Alice");
    }

    #[test]
    fn declined_rental_changes_nothing() {
        let mut registry = registry();
        let out = session(&mut registry, "1\nAlice\nC001\n3\nN\n4\n");

        assert!(out.contains("Rental canceled."));
        assert!(registry.find_available_unit(&id("C001")).is_some());
        assert_eq!(registry.customers().count(), 0);
    }

    #[test]
    fn non_numeric_days_are_rejected() {
        let mut registry = registry();
        let out = session(&mut registry, "1\nAlice\nC001\nthree\n4\n");

        assert!(out.contains("Invalid number of days. Please try again."));
        assert_eq!(registry.agreements().count(), 0);
    }

    #[test]
    fn zero_days_are_rejected() {
        let mut registry = registry();
        let out = session(&mut registry, "1\nAlice\nC001\n0\n4\n");

        assert!(out.contains("Invalid number of days. Please try again."));
        assert!(!out.contains("Total Price"));
        assert_eq!(registry.agreements().count(), 0);
    }

    #[test]
    fn renting_a_rented_car_is_rejected() {
        let mut registry = registry();
        registry.open_rental("Alice", &id("C001"), 2).unwrap();

        let out = session(&mut registry, "1\nBob\nC001\n3\n4\n");

        assert!(out.contains("Invalid car selection or car not available."));
        assert_eq!(registry.customers().count(), 1);
    }

    #[test]
    fn return_round_trip() {
        let mut registry = registry();
        let out = session(&mut registry, "1\nAlice\nC002\n1\nY\n2\nC002\n3\n4\n");

        assert!(out.contains("Car returned successfully."));
        assert!(out.contains("Returned by CUS1 (Alice)"));
        assert!(registry.find_available_unit(&id("C002")).is_some());
        assert_eq!(registry.agreements().count(), 0);
    }

    #[test]
    fn unit_ids_are_trimmed_and_upper_cased() {
        let mut registry = registry();
        let out = session(&mut registry, "1\nAlice\n c002 \n2\ny\n2\n  c002\n4\n");

        assert!(out.contains("Car rented successfully."));
        assert!(out.contains("Car returned successfully."));
        assert!(registry.find_available_unit(&id("C002")).is_some());
        assert!(registry.find_available_unit(&id("c002")).is_none());
    }

    #[test]
    fn plain_session_has_no_escape_codes() {
        let out = session(&mut registry(), "3\nxyz\n2\nC001\n4\n");
        assert!(out.contains("== Available Cars =="));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn returning_an_available_car_is_rejected() {
        let out = session(&mut registry(), "2\nC001\n4\n");
        assert!(out.contains("Invalid car ID or car is not rented."));
    }

    #[test]
    fn repeat_names_get_new_customer_ids() {
        let mut registry = registry();
        session(&mut registry, "1\nAlice\nC001\n1\ny\n1\nAlice\nC002\n1\ny\n4\n");

        let ids: Vec<_> = registry
            .customers()
            .map(|customer| customer.id().to_string())
            .collect();
        assert_eq!(ids, ["CUS1", "CUS2"]);
    }
}
