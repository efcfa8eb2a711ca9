use std::io::{self, Write};

use clap::Parser;
use fleet::{Config, FleetRegistry, Unit, UnitStatus};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow, supports_color};

#[derive(Debug, Parser, Default)]
#[command(about = "List available units (or the whole fleet with --all)")]
pub struct Command {
    /// Include rented units
    #[arg(long)]
    all: bool,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Print one `ID - BRAND MODEL` line per unit, with no header
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// How the table is laid out on the destination.
#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    color: bool,
    narrow: bool,
}

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, registry: &FleetRegistry, config: &Config) -> anyhow::Result<()> {
        let layout = Layout {
            color: supports_color(),
            narrow: is_narrow(),
        };
        self.write(registry, config, &mut io::stdout().lock(), layout)
    }

    fn write(
        &self,
        registry: &FleetRegistry,
        config: &Config,
        out: &mut impl Write,
        layout: Layout,
    ) -> anyhow::Result<()> {
        let units: Vec<&Unit> = if self.all {
            registry.units().collect()
        } else {
            registry.available_units().collect()
        };

        match self.output {
            OutputFormat::Json => Self::output_json(out, &units)?,
            OutputFormat::Table => {
                if self.quiet {
                    Self::output_quiet(out, &units)?;
                } else {
                    Self::output_table(out, &units, config, layout)?;
                }
            }
        }

        Ok(())
    }

    fn output_json(out: &mut impl Write, units: &[&Unit]) -> anyhow::Result<()> {
        use serde_json::json;

        let units: Vec<_> = units
            .iter()
            .map(|unit| {
                json!({
                    "id": unit.id().as_str(),
                    "brand": unit.brand(),
                    "model": unit.model(),
                    "daily_rate": unit.daily_rate().to_string(),
                    "status": unit.status().to_string(),
                })
            })
            .collect();

        writeln!(out, "{}", serde_json::to_string_pretty(&units)?)?;
        Ok(())
    }

    fn output_quiet(out: &mut impl Write, units: &[&Unit]) -> io::Result<()> {
        for unit in units {
            writeln!(out, "{unit}")?;
        }
        Ok(())
    }

    fn output_table(
        out: &mut impl Write,
        units: &[&Unit],
        config: &Config,
        layout: Layout,
    ) -> io::Result<()> {
        let Layout { color, narrow } = layout;

        if units.is_empty() {
            writeln!(out, "{}", "No units available.".warning(color))?;
            return Ok(());
        }

        if narrow {
            for unit in units {
                writeln!(out, "{unit}")?;
                writeln!(
                    out,
                    "  {}/day ({})",
                    config.format_price(unit.daily_rate()),
                    status_label(unit.status(), color)
                )?;
            }
            return Ok(());
        }

        writeln!(out, "{:<6} {:<10} {:<12} {:>10}  Status", "ID", "Brand", "Model", "Rate/day")?;
        writeln!(out, "{}", "─".repeat(48).dim(color))?;
        for unit in units {
            writeln!(
                out,
                "{:<6} {:<10} {:<12} {:>10}  {}",
                unit.id(),
                unit.brand(),
                unit.model(),
                config.format_price(unit.daily_rate()),
                status_label(unit.status(), color)
            )?;
        }
        writeln!(out)?;
        writeln!(out, "{} unit(s)", units.len())
    }
}

fn status_label(status: UnitStatus, color: bool) -> String {
    match status {
        UnitStatus::Available => status.to_string().success(color),
        UnitStatus::Rented => status.to_string().warning(color),
    }
}
