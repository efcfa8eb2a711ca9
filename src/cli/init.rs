use std::path::PathBuf;

use fleet::Config;
use tracing::instrument;

use crate::cli::{
    seed,
    terminal::{Colorize, supports_color},
};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Where to write the configuration file
    #[arg(default_value = "fleet.toml")]
    path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

impl Command {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        if self.path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.path.display()
            );
        }

        let mut config = Config::default();
        config.set_fleet(seed::records());
        config
            .save(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", self.path.display()))?;

        println!(
            "{}",
            format!("✅ Wrote {}", self.path.display()).success(supports_color())
        );
        println!(
            "  {} units, currency '{}', customer ids '{}1', '{}2', ...",
            config.fleet().len(),
            config.currency,
            config.customer_prefix,
            config.customer_prefix
        );
        println!();
        println!("Next steps:");
        println!("  fleet --config {} list", self.path.display());

        Ok(())
    }
}
