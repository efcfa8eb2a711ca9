use std::io::{self, Write};

use fleet::{Config, FleetRegistry, UnitId};
use tracing::instrument;

use crate::cli::{
    parse_unit_id,
    terminal::{Colorize, supports_color},
};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The unit to price (e.g. C001)
    #[clap(value_parser = parse_unit_id)]
    unit: UnitId,

    /// Rental length in days
    days: u32,
}

impl Command {
    #[instrument(level = "debug", skip(registry, config))]
    pub fn run(self, registry: &FleetRegistry, config: &Config) -> anyhow::Result<()> {
        self.write(registry, config, &mut io::stdout().lock(), supports_color())
    }

    fn write(
        &self,
        registry: &FleetRegistry,
        config: &Config,
        out: &mut impl Write,
        color: bool,
    ) -> anyhow::Result<()> {
        let Some(unit) = registry.unit(&self.unit) else {
            anyhow::bail!("Unit {} not found", self.unit);
        };
        let price = registry.quote(&self.unit, self.days)?;

        writeln!(out, "{}", unit.to_string().dim(color))?;
        writeln!(
            out,
            "{} day(s) at {}/day: {}",
            self.days,
            config.format_price(unit.daily_rate()),
            config.format_price(price).success(color)
        )?;
        Ok(())
    }
}
