use crate::{
    cli::{MachineArgs, emit},
    replay::{parse_targets, replay},
    report,
};
use anyhow::{Context, Result};
use clap::Args;
use std::{fs, path::PathBuf};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub machine: MachineArgs,

    /// File of `x y z` targets, one per line.
    pub input: PathBuf,
}

impl ReplayArgs {
    pub fn run(&self) -> Result<()> {
        emit(self.render())
    }

    pub fn render(&self) -> Result<String> {
        let machine = self.machine.load()?;
        let source = fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read targets {}", self.input.display()))?;
        let targets = parse_targets(&source)
            .with_context(|| format!("failed to parse targets {}", self.input.display()))?;

        tracing::info!(
            "Replaying {} targets from {}",
            targets.len(),
            self.input.display()
        );
        let rows = replay(machine.model.as_ref(), &targets)?;

        let mut lines = Vec::with_capacity(rows.len());
        for row in &rows {
            let rendered = report::solution(&row.solution, self.machine.json)?;
            if self.machine.json {
                lines.push(rendered);
            } else {
                lines.push(format!("{}: {}", row.line, rendered));
            }
        }
        Ok(lines.join("\n"))
    }
}
