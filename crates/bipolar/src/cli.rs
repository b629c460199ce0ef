use crate::config::Config;
use anyhow::{Context, Result};
use bipolar_core::KinematicsModel;
use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod forward;
pub mod inverse;
pub mod options;
pub mod replay;

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct MachineArgs {
    /// Path to the machine configuration file (TOML or JSON).
    #[arg(short, long)]
    pub config: PathBuf,

    /// Runtime option applied before transforming, e.g. `R=1`.
    #[arg(long = "set", value_name = "TAG=VALUE", value_parser = parse_option)]
    pub set: Vec<(char, f64)>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// A configured kinematics model ready to transform.
pub struct Machine {
    pub config: Config,
    pub model: Box<dyn KinematicsModel + Send>,
}

impl MachineArgs {
    /// Load and validate the config, build the model and apply `--set`
    /// options. Every option named on the command line must be recognized.
    pub fn load(&self) -> Result<Machine> {
        let config = Config::from_file(&self.config)?;
        config.validate()?;
        init_tracing(&config);

        let geometry = config.kinematics.geometry();
        let mut model = geometry.build();
        tracing::debug!(
            "Loaded {} kinematics from {}",
            model.name(),
            self.config.display()
        );

        for &(tag, value) in &self.set {
            if !model.set_option(tag, value) {
                anyhow::bail!(
                    "option `{tag}` is not supported by {} kinematics",
                    model.name()
                );
            }
        }

        Ok(Machine { config, model })
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the config filter.
///
/// Repeated calls keep the first subscriber and return `false`.
pub fn init_tracing(config: &Config) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(%err, "keeping existing tracing subscriber");
            false
        }
    }
}

/// Parse a `TAG=VALUE` option word.
pub fn parse_option(s: &str) -> Result<(char, f64), String> {
    let (tag, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TAG=VALUE, found `{s}`"))?;
    let mut chars = tag.chars();
    let (Some(tag), None) = (chars.next(), chars.next()) else {
        return Err(format!("option tag must be a single character, found `{tag}`"));
    };
    let value = value
        .parse::<f64>()
        .map_err(|err| format!("invalid value for option `{tag}`: {err}"))?;
    Ok((tag, value))
}

/// Print rendered command output.
pub(crate) fn emit(output: Result<String>) -> Result<()> {
    let output = output.context("failed to render output")?;
    println!("{output}");
    Ok(())
}
