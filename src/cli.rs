use std::path::{Path, PathBuf};

mod init;
mod list;
mod menu;
mod quote;
mod seed;
mod terminal;

use clap::ArgAction;
use fleet::{Config, FleetRegistry, Unit, UnitId};
use tracing::instrument;

/// Parse a unit id from a string, trimming and normalizing to uppercase.
///
/// This is a CLI boundary function; the registry itself matches ids
/// exactly.
fn parse_unit_id(s: &str) -> Result<UnitId, String> {
    s.trim().to_uppercase().parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// Path to a configuration file (defaults are used if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let command = self.command.unwrap_or_default();
        if let Command::Init(init) = command {
            return init.run();
        }

        let config = load_config(self.config.as_deref())?;
        let mut registry = build_registry(&config)?;
        command.run(&mut registry, &config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // Logs go to stderr so they never interleave with the menu on stdout.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, Default, clap::Parser)]
pub enum Command {
    /// Run the interactive rental desk (default)
    #[default]
    Menu,

    /// List units in the fleet
    List(list::Command),

    /// Price a rental without renting
    Quote(quote::Command),

    /// Write a default configuration file
    Init(init::Command),
}

impl Command {
    fn run(self, registry: &mut FleetRegistry, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Menu => {
                let stdin = std::io::stdin();
                let color = terminal::supports_color();
                menu::Menu::new(registry, config, stdin.lock(), std::io::stdout(), color).run()?;
            }
            Self::List(command) => command.run(registry, config)?,
            Self::Quote(command) => command.run(registry, config)?,
            Self::Init(command) => command.run()?,
        }
        Ok(())
    }
}

#[instrument(level = "debug")]
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!("{e}")),
        None => Ok(Config::default()),
    }
}

/// Builds the registry from the configured fleet, falling back to the
/// built-in seed units.
#[instrument(level = "debug", skip_all)]
fn build_registry(config: &Config) -> anyhow::Result<FleetRegistry> {
    let mut registry = FleetRegistry::with_customer_prefix(&config.customer_prefix);

    let records = if config.fleet().is_empty() {
        seed::records()
    } else {
        config.fleet().to_vec()
    };

    for record in &records {
        let unit = Unit::try_from(record)
            .map_err(|e| anyhow::anyhow!("Invalid unit '{}' in fleet: {e}", record.id))?;
        registry.add_unit(unit)?;
    }

    tracing::debug!(units = records.len(), "fleet loaded");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use fleet::UnitRecord;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_unit_id_normalizes_case_and_whitespace() {
        assert_eq!(parse_unit_id(" c001\n").unwrap().as_str(), "C001");
        assert!(parse_unit_id("   ").is_err());
    }

    #[test]
    fn default_config_loads_seed_fleet() {
        let registry = build_registry(&Config::default()).unwrap();
        assert_eq!(registry.available_units().count(), 15);
    }

    #[test]
    fn configured_fleet_replaces_seed() {
        let mut config = Config::default();
        config.set_fleet(vec![UnitRecord {
            id: "V001".to_string(),
            brand: "Volvo".to_string(),
            model: "XC40".to_string(),
            daily_rate: dec!(95),
        }]);

        let registry = build_registry(&config).unwrap();
        let ids: Vec<_> = registry.units().map(|u| u.id().to_string()).collect();
        assert_eq!(ids, ["V001"]);
    }

    #[test]
    fn duplicate_ids_in_configured_fleet_are_rejected() {
        let record = UnitRecord {
            id: "V001".to_string(),
            brand: "Volvo".to_string(),
            model: "XC40".to_string(),
            daily_rate: dec!(95),
        };
        let mut config = Config::default();
        config.set_fleet(vec![record.clone(), record]);

        assert!(build_registry(&config).is_err());
    }
}
