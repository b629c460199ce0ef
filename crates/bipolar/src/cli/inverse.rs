use crate::{
    cli::{MachineArgs, emit},
    report,
};
use anyhow::{Context, Result};
use bipolar_core::{ActuatorCoord, CartesianCoord};
use clap::Args;

#[derive(Args, Debug)]
pub struct InverseArgs {
    #[command(flatten)]
    pub machine: MachineArgs,

    /// Target X, mm.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Target Y, mm.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// Target Z, mm.
    #[arg(allow_negative_numbers = true)]
    pub z: f64,

    /// Committed actuator position to stay continuous with.
    ///
    /// Without it the target is solved with no reference pose and any
    /// unsolvable axis is an error.
    #[arg(
        long,
        num_args = 3,
        value_names = ["ALPHA", "BETA", "GAMMA"],
        allow_negative_numbers = true
    )]
    pub current: Option<Vec<f64>>,
}

impl InverseArgs {
    pub fn run(&self) -> Result<()> {
        emit(self.render())
    }

    pub fn render(&self) -> Result<String> {
        let machine = self.machine.load()?;
        let target = CartesianCoord::new(self.x, self.y, self.z);

        match self.current.as_deref() {
            Some(&[alpha, beta, gamma]) => {
                let current = ActuatorCoord::new(alpha, beta, gamma);
                let solution = machine.model.to_actuator_continuous(&target, &current);
                if let Some(fault) = solution.fault() {
                    tracing::warn!("Target {} degraded: {}", target, fault);
                }
                report::solution(&solution, self.machine.json)
            }
            Some(other) => anyhow::bail!("--current takes 3 values, got {}", other.len()),
            None => {
                let actuator = machine
                    .model
                    .to_actuator(&target)
                    .with_context(|| format!("failed to solve target {target}"))?;
                report::actuator(&actuator, self.machine.json)
            }
        }
    }
}
