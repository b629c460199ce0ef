use anyhow::Result;
use bipolar::cli;
use clap::{Parser, Subcommand};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Inverse(args) => args.run(),
        Command::Forward(args) => args.run(),
        Command::Options(args) => args.run(),
        Command::Replay(args) => args.run(),
    }
}

#[derive(Parser)]
#[command(name = "bipolar", about = "Kinematics transforms for bipolar machines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a Cartesian target into actuator positions.
    Inverse(cli::inverse::InverseArgs),
    /// Convert actuator positions into a Cartesian position.
    Forward(cli::forward::ForwardArgs),
    /// Show the runtime options of the configured geometry.
    Options(cli::options::OptionsArgs),
    /// Transform a file of targets while carrying the actuator position.
    Replay(cli::replay::ReplayArgs),
}
