//! Kinematic transforms between machine workspace and actuator space.
//!
//! This crate is pure arithmetic: no I/O, no allocation on the transform
//! path, and no motion state. The motion planner owns the committed
//! actuator position and passes it in where continuity matters.

pub mod coord;
pub mod error;
pub mod kinematics;
pub mod options;

pub use coord::{ActuatorCoord, AxisFlags, CartesianCoord};
pub use error::KinematicsError;
pub use kinematics::{
    BipolarKin, CartesianKin, Geometry, KinematicsModel, Solution, SolveStatus, Warnings,
};
pub use options::{ArmOption, ArmOptions};
