use crate::{
    cli::{MachineArgs, emit},
    report,
};
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub machine: MachineArgs,

    /// Include options still at their default value.
    #[arg(long)]
    pub all: bool,
}

impl OptionsArgs {
    pub fn run(&self) -> Result<()> {
        emit(self.render())
    }

    /// Options are always rendered as JSON.
    pub fn render(&self) -> Result<String> {
        let machine = self.machine.load()?;
        report::options(&machine.model.options(self.all))
    }
}
