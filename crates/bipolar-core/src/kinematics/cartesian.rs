// Cartesian kinematics - each actuator directly drives one axis

use crate::{
    coord::{ActuatorCoord, AxisFlags, CartesianCoord},
    error::{KinematicsError, Result},
    kinematics::{KinematicsModel, Solution},
    options::ArmOptions,
};

pub const NAME: &str = "cartesian";

/// Identity geometry: X drives alpha, Y drives beta, Z drives gamma.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartesianKin;

impl CartesianKin {
    pub fn new() -> Self {
        Self
    }
}

impl KinematicsModel for CartesianKin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn to_actuator(&self, c: &CartesianCoord) -> Result<ActuatorCoord> {
        let actuator = ActuatorCoord::new(c.x, c.y, c.z);
        if actuator.is_finite() {
            Ok(actuator)
        } else {
            Err(KinematicsError::NonFiniteInput)
        }
    }

    fn to_actuator_continuous(&self, c: &CartesianCoord, current: &ActuatorCoord) -> Solution {
        // No periodic axes; the reference only backfills non-finite inputs.
        let mut actuator = ActuatorCoord::new(c.x, c.y, c.z);
        if !current.is_finite() {
            return Solution::degraded(
                actuator,
                KinematicsError::NonFiniteReference,
                AxisFlags::new(),
            );
        }
        let mut substituted = AxisFlags::new();
        if !actuator.alpha.is_finite() {
            actuator.alpha = current.alpha;
            substituted = substituted.with_alpha();
        }
        if !actuator.beta.is_finite() {
            actuator.beta = current.beta;
            substituted = substituted.with_beta();
        }
        if !actuator.gamma.is_finite() {
            actuator.gamma = current.gamma;
            substituted = substituted.with_gamma();
        }

        if substituted.is_empty() {
            return Solution::exact(actuator);
        }
        Solution::degraded(actuator, KinematicsError::NonFiniteInput, substituted)
    }

    fn to_cartesian(&self, a: &ActuatorCoord) -> CartesianCoord {
        CartesianCoord::new(a.alpha, a.beta, a.gamma)
    }

    fn set_option(&mut self, _tag: char, _value: f64) -> bool {
        false
    }

    fn options(&self, _force_all: bool) -> ArmOptions {
        ArmOptions::new()
    }
}
