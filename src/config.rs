use std::path::Path;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Unit, UnitId, registry::DEFAULT_CUSTOMER_PREFIX};

/// Configuration for the rental desk.
///
/// Controls how prices and customer ids are rendered, and optionally
/// replaces the built-in fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Symbol printed in front of prices, such as `$`.
    pub currency: String,

    /// Prefix of generated customer ids.
    ///
    /// With the default `CUS`, customers are numbered `CUS1`, `CUS2`, ...
    pub customer_prefix: String,

    /// Units to load at start-up.
    ///
    /// If this is empty, the built-in fleet is used.
    fleet: Vec<UnitRecord>,
}

/// A unit as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Unit identifier, such as `C001`.
    pub id: String,
    /// Manufacturer.
    pub brand: String,
    /// Model name.
    pub model: String,
    /// Price of one rental day.
    pub daily_rate: Decimal,
}

impl TryFrom<&UnitRecord> for Unit {
    type Error = Error;

    fn try_from(record: &UnitRecord) -> Result<Self, Self::Error> {
        let id = UnitId::new(record.id.clone())?;
        Self::new(id, &record.brand, &record.model, record.daily_rate)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            customer_prefix: default_customer_prefix(),
            fleet: Vec::new(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the configured fleet, which may be empty.
    #[must_use]
    pub fn fleet(&self) -> &[UnitRecord] {
        &self.fleet
    }

    /// Replaces the configured fleet.
    pub fn set_fleet(&mut self, fleet: Vec<UnitRecord>) {
        self.fleet = fleet;
    }

    /// Formats an amount with the configured currency and two fraction
    /// digits, e.g. `$480.00`. Halves round away from zero.
    #[must_use]
    pub fn format_price(&self, amount: Decimal) -> String {
        let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{amount:.2}", self.currency)
    }
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_customer_prefix() -> String {
    DEFAULT_CUSTOMER_PREFIX.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_currency")]
        currency: String,

        #[serde(default = "default_customer_prefix")]
        customer_prefix: String,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fleet: Vec<UnitRecord>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                currency,
                customer_prefix,
                fleet,
            } => Self {
                currency,
                customer_prefix,
                fleet,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            currency: config.currency,
            customer_prefix: config.customer_prefix,
            fleet: config.fleet,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ncurrency = \"EUR \"\ncustomer_prefix = \"R\"\n\n[[fleet]]\nid = \"V001\"\nbrand = \"Volvo\"\nmodel = \"XC40\"\ndaily_rate = 95.5\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.currency, "EUR ");
        assert_eq!(config.customer_prefix, "R");
        assert_eq!(config.fleet().len(), 1);
        assert_eq!(config.fleet()[0].id, "V001");
        assert_eq!(config.fleet()[0].daily_rate, dec!(95.5));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ncurrency = 3\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_keeps_fleet() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fleet.toml");

        let mut config = Config::default();
        config.set_fleet(vec![UnitRecord {
            id: "C001".to_string(),
            brand: "Toyota".to_string(),
            model: "Camry".to_string(),
            daily_rate: dec!(160.0),
        }]);
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn record_with_bad_id_is_rejected() {
        let record = UnitRecord {
            id: "C 001".to_string(),
            brand: "Toyota".to_string(),
            model: "Camry".to_string(),
            daily_rate: dec!(1),
        };
        assert!(matches!(
            Unit::try_from(&record),
            Err(Error::InvalidUnitId(_))
        ));
    }

    #[test]
    fn record_with_negative_rate_is_rejected() {
        let record = UnitRecord {
            id: "C001".to_string(),
            brand: "Toyota".to_string(),
            model: "Camry".to_string(),
            daily_rate: dec!(-5),
        };
        assert!(matches!(
            Unit::try_from(&record),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn prices_are_rendered_with_two_digits() {
        let config = Config::default();
        assert_eq!(config.format_price(dec!(480)), "$480.00");
        assert_eq!(config.format_price(dec!(269.965)), "$269.97");
    }
}
