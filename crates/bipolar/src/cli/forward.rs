use crate::{
    cli::{MachineArgs, emit},
    report,
};
use anyhow::Result;
use bipolar_core::ActuatorCoord;
use clap::Args;

#[derive(Args, Debug)]
pub struct ForwardArgs {
    #[command(flatten)]
    pub machine: MachineArgs,

    /// Platter angle, degrees.
    #[arg(allow_negative_numbers = true)]
    pub alpha: f64,

    /// Arm angle, degrees.
    #[arg(allow_negative_numbers = true)]
    pub beta: f64,

    /// Z actuator position, mm.
    #[arg(allow_negative_numbers = true)]
    pub gamma: f64,
}

impl ForwardArgs {
    pub fn run(&self) -> Result<()> {
        emit(self.render())
    }

    pub fn render(&self) -> Result<String> {
        let machine = self.machine.load()?;
        let actuator = ActuatorCoord::new(self.alpha, self.beta, self.gamma);
        let cartesian = machine.model.to_cartesian(&actuator);
        report::cartesian(&cartesian, self.machine.json)
    }
}
