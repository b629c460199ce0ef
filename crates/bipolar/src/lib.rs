//! Host tool around `bipolar-core`: loads a machine configuration and runs
//! transforms from the command line.

pub mod cli;
pub mod config;
pub mod replay;
pub mod report;
