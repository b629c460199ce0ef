// Bipolar kinematics
//
// A rotating platter (alpha) carries the work while an arm pivoting at
// `arm_length` from the platter center (beta) carries the tool. Both axes
// are angular; Z is an independent linear axis.

use crate::{
    coord::{ActuatorCoord, AxisFlags, CartesianCoord},
    error::{KinematicsError, Result},
    kinematics::{
        KinematicsModel, Solution, SolveStatus, Warnings,
        angle::{Polar, unwrap_near},
    },
    options::{ArmOption, ArmOptions},
};
use core::f64::consts::PI;

pub const NAME: &str = "bipolar";

/// Arm length used when the machine configuration does not name one.
pub const DEFAULT_ARM_LENGTH: f64 = 110.0;

/// Largest per-call angular move, in degrees, accepted without a warning.
pub const DEFAULT_MAX_STEP_DEG: f64 = 90.0;

/// Targets with both |x| and |y| at or below this (mm) sit on the platter
/// center where the platter angle is undefined.
pub const CENTER_TOLERANCE: f64 = 1e-3;

/// Reach overshoot, as a fraction of reach, still solved as full extension.
const REACH_ROUNDING: f64 = 4.0 * f64::EPSILON;

/// Bipolar kinematics - rotating platter plus rotating arm
#[derive(Debug, Clone)]
pub struct BipolarKin {
    arm_length: f64,
    max_step_deg: f64,
    raw_mode: bool,
    raw_mode_set: bool,
}

impl BipolarKin {
    /// `arm_length` is the distance between the two rotational centers. It
    /// is not validated here; a non-positive length makes every inverse call
    /// fail with [`KinematicsError::InvalidGeometry`].
    pub fn new(arm_length: f64) -> Self {
        Self {
            arm_length,
            max_step_deg: DEFAULT_MAX_STEP_DEG,
            raw_mode: false,
            raw_mode_set: false,
        }
    }

    pub fn with_raw_mode(mut self, enabled: bool) -> Self {
        self.raw_mode = enabled;
        self.raw_mode_set = true;
        self
    }

    pub fn with_max_step(mut self, max_step_deg: f64) -> Self {
        self.max_step_deg = max_step_deg;
        self
    }

    pub fn arm_length(&self) -> f64 {
        self.arm_length
    }

    pub fn raw_mode(&self) -> bool {
        self.raw_mode
    }

    /// Furthest radius from the platter center the arm can reach.
    pub fn reach(&self) -> f64 {
        2.0 * self.arm_length
    }

    fn has_valid_geometry(&self) -> bool {
        self.arm_length.is_finite() && self.arm_length > 0.0
    }

    /// Bipolar angles (radians) to XY.
    pub fn bipolar_to_cartesian(&self, theta1: f64, theta2: f64) -> (f64, f64) {
        let theta = (PI - theta2) / 2.0 - theta1;
        let r = 2.0 * self.arm_length * (theta2 / 2.0).sin();
        Polar { theta, r }.to_cartesian()
    }

    /// XY to bipolar angles (radians), unguarded.
    ///
    /// Returns NaN for `theta2` (and therefore `theta1`) when the point is
    /// beyond [`reach`](Self::reach). Overshoot within a few ulps of reach is
    /// treated as full extension. `theta1` is the principal value.
    pub fn cartesian_to_bipolar(&self, x: f64, y: f64) -> (f64, f64) {
        let polar = Polar::from_cartesian(x, y);
        let mut ratio = polar.r / (2.0 * self.arm_length);
        // Forward rounding can put a full-extension pose just past reach.
        if ratio > 1.0 && ratio <= 1.0 + REACH_ROUNDING {
            ratio = 1.0;
        }
        let theta2 = 2.0 * ratio.asin();
        let theta1 = (PI - theta2) / 2.0 - polar.theta;
        (theta1, theta2)
    }

    // Solve every axis, leaving NaN on the ones that cannot be solved.
    fn solve(&self, c: &CartesianCoord) -> (ActuatorCoord, Option<KinematicsError>) {
        let unsolved = ActuatorCoord::new(f64::NAN, f64::NAN, c.z);
        if !c.x.is_finite() || !c.y.is_finite() {
            return (unsolved, Some(KinematicsError::NonFiniteInput));
        }
        if !self.has_valid_geometry() {
            let fault = KinematicsError::InvalidGeometry {
                arm_length: self.arm_length,
            };
            return (unsolved, Some(fault));
        }

        let radius = c.x.hypot(c.y);
        let (theta1, theta2) = self.cartesian_to_bipolar(c.x, c.y);
        let mut actuator = ActuatorCoord::new(theta1.to_degrees(), theta2.to_degrees(), c.z);

        let mut fault = None;
        if c.x.abs() <= CENTER_TOLERANCE && c.y.abs() <= CENTER_TOLERANCE {
            actuator.alpha = f64::NAN;
            fault = Some(KinematicsError::Singular { radius });
        }

        // Classify what came out rather than trusting the guards above.
        if !actuator.beta.is_finite() {
            actuator.alpha = f64::NAN;
            fault = Some(KinematicsError::Unreachable {
                radius,
                reach: self.reach(),
            });
        } else if fault.is_none() && !actuator.is_finite() {
            fault = Some(KinematicsError::NonFiniteInput);
        }

        (actuator, fault)
    }

    fn check_steps(&self, target: &ActuatorCoord, current: &ActuatorCoord) -> Warnings {
        let mut warnings = Warnings::new();
        let platter = (target.alpha - current.alpha).abs();
        if platter > self.max_step_deg {
            tracing::warn!(
                geometry = NAME,
                from = current.alpha,
                to = target.alpha,
                limit = self.max_step_deg,
                "platter step exceeds sanity limit"
            );
            warnings = warnings.with_platter_step();
        }
        let arm = (target.beta - current.beta).abs();
        if arm > self.max_step_deg {
            tracing::warn!(
                geometry = NAME,
                from = current.beta,
                to = target.beta,
                limit = self.max_step_deg,
                "arm step exceeds sanity limit"
            );
            warnings = warnings.with_arm_step();
        }
        warnings
    }
}

impl Default for BipolarKin {
    fn default() -> Self {
        Self::new(DEFAULT_ARM_LENGTH)
    }
}

impl KinematicsModel for BipolarKin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn to_actuator(&self, cartesian: &CartesianCoord) -> Result<ActuatorCoord> {
        if self.raw_mode {
            return Ok(ActuatorCoord::new(cartesian.x, cartesian.y, cartesian.z));
        }
        match self.solve(cartesian) {
            (_, Some(fault)) => Err(fault),
            (actuator, None) => Ok(actuator),
        }
    }

    fn to_actuator_continuous(
        &self,
        cartesian: &CartesianCoord,
        current: &ActuatorCoord,
    ) -> Solution {
        if self.raw_mode {
            return Solution::exact(ActuatorCoord::new(cartesian.x, cartesian.y, cartesian.z));
        }

        let (mut actuator, fault) = self.solve(cartesian);
        if !current.is_finite() {
            // Nothing to unwrap against or hold; report the principal solution.
            tracing::debug!(geometry = NAME, %current, "reference position is not finite");
            return Solution::degraded(
                actuator,
                KinematicsError::NonFiniteReference,
                AxisFlags::new(),
            );
        }
        let mut substituted = AxisFlags::new();

        if actuator.alpha.is_finite() {
            actuator.alpha = unwrap_near(actuator.alpha, current.alpha);
        } else {
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

        let status = match fault {
            None => SolveStatus::Exact,
            Some(fault) => {
                tracing::debug!(
                    geometry = NAME,
                    %fault,
                    %substituted,
                    "holding current position on unsolvable axes"
                );
                SolveStatus::Degraded { fault, substituted }
            }
        };

        Solution {
            actuator,
            status,
            warnings: self.check_steps(&actuator, current),
        }
    }

    fn to_cartesian(&self, actuator: &ActuatorCoord) -> CartesianCoord {
        if self.raw_mode {
            return CartesianCoord::new(actuator.alpha, actuator.beta, actuator.gamma);
        }
        let (x, y) =
            self.bipolar_to_cartesian(actuator.alpha.to_radians(), actuator.beta.to_radians());
        CartesianCoord::new(x, y, actuator.gamma)
    }

    fn set_option(&mut self, tag: char, value: f64) -> bool {
        match ArmOption::from_tag(tag) {
            Some(ArmOption::RawMode) => {
                self.raw_mode = ArmOption::as_bool(value);
                self.raw_mode_set = true;
                tracing::debug!(geometry = NAME, raw_mode = self.raw_mode, "option set");
                true
            }
            None => false,
        }
    }

    fn options(&self, force_all: bool) -> ArmOptions {
        let mut options = ArmOptions::new();
        if self.raw_mode_set || force_all {
            options.insert(ArmOption::RawMode, ArmOption::from_bool(self.raw_mode));
        }
        options
    }
}
