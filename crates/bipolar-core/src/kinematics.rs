// Kinematics models for non-cartesian and cartesian machines

use crate::{
    coord::{ActuatorCoord, AxisFlags, CartesianCoord},
    error::{KinematicsError, Result},
    options::ArmOptions,
};
use core::fmt;

// Submodules for each kinematics system
pub mod angle;
pub mod bipolar;
pub mod cartesian;

pub use bipolar::BipolarKin;
pub use cartesian::CartesianKin;

/// Capability every machine geometry provides to the motion planner.
///
/// Implementations are stateless with respect to motion: the planner owns
/// the committed actuator position and hands it to
/// [`to_actuator_continuous`](KinematicsModel::to_actuator_continuous) on
/// every call. Only the option protocol mutates a model.
pub trait KinematicsModel {
    /// Short geometry identifier used in logs and config.
    fn name(&self) -> &'static str;

    /// Inverse transform without a reference pose.
    ///
    /// Used when no committed position exists yet, e.g. the first move after
    /// homing. Any axis that cannot be solved fails the whole call.
    fn to_actuator(&self, cartesian: &CartesianCoord) -> Result<ActuatorCoord>;

    /// Inverse transform resolved against the current actuator pose.
    ///
    /// Angular ambiguity is resolved to the branch nearest `current`. Axes
    /// that cannot be solved keep `current`'s value and the solution is
    /// marked degraded.
    fn to_actuator_continuous(
        &self,
        cartesian: &CartesianCoord,
        current: &ActuatorCoord,
    ) -> Solution;

    /// Forward transform. Exact for every geometry in this crate.
    fn to_cartesian(&self, actuator: &ActuatorCoord) -> CartesianCoord;

    /// Apply one runtime option. Unknown tags return `false` and change
    /// nothing.
    fn set_option(&mut self, tag: char, value: f64) -> bool;

    /// Options that were explicitly set; with `force_all`, every option the
    /// geometry understands including those still at their default.
    fn options(&self, force_all: bool) -> ArmOptions;

    /// Apply a batch of options. Every entry is attempted; the result is
    /// `true` only if all of them were recognized.
    fn apply_options(&mut self, options: &[(char, f64)]) -> bool {
        let mut all_known = true;
        for &(tag, value) in options {
            let known = self.set_option(tag, value);
            all_known &= known;
        }
        all_known
    }
}

/// Result of a continuous inverse transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub actuator: ActuatorCoord,
    pub status: SolveStatus,
    pub warnings: Warnings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveStatus {
    /// Every axis was solved.
    Exact,
    /// Some axes could not be solved and were held at the current pose.
    Degraded {
        fault: KinematicsError,
        substituted: AxisFlags,
    },
}

impl Solution {
    pub const fn exact(actuator: ActuatorCoord) -> Self {
        Self {
            actuator,
            status: SolveStatus::Exact,
            warnings: Warnings::new(),
        }
    }

    pub const fn degraded(
        actuator: ActuatorCoord,
        fault: KinematicsError,
        substituted: AxisFlags,
    ) -> Self {
        Self {
            actuator,
            status: SolveStatus::Degraded { fault, substituted },
            warnings: Warnings::new(),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self.status, SolveStatus::Exact)
    }

    pub fn fault(&self) -> Option<KinematicsError> {
        match self.status {
            SolveStatus::Exact => None,
            SolveStatus::Degraded { fault, .. } => Some(fault),
        }
    }

    pub fn substituted(&self) -> AxisFlags {
        match self.status {
            SolveStatus::Exact => AxisFlags::new(),
            SolveStatus::Degraded { substituted, .. } => substituted,
        }
    }
}

/// Non-fatal sanity findings attached to a solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Warnings(u8);

impl Warnings {
    const PLATTER_STEP: u8 = 1 << 0;
    const ARM_STEP: u8 = 1 << 1;

    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn with_platter_step(mut self) -> Self {
        self.0 |= Self::PLATTER_STEP;
        self
    }

    pub const fn with_arm_step(mut self) -> Self {
        self.0 |= Self::ARM_STEP;
        self
    }

    /// Platter moved further than the configured step limit.
    pub const fn platter_step(&self) -> bool {
        self.0 & Self::PLATTER_STEP != 0
    }

    /// Arm moved further than the configured step limit.
    pub const fn arm_step(&self) -> bool {
        self.0 & Self::ARM_STEP != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Warnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.platter_step(), self.arm_step()) {
            (false, false) => f.write_str("none"),
            (true, false) => f.write_str("platter-step"),
            (false, true) => f.write_str("arm-step"),
            (true, true) => f.write_str("platter-step,arm-step"),
        }
    }
}

/// Geometry selection resolved from machine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Bipolar {
        arm_length: f64,
        raw_mode: bool,
        max_step_deg: f64,
    },
    Cartesian,
}

impl Geometry {
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Bipolar { .. } => bipolar::NAME,
            Geometry::Cartesian => cartesian::NAME,
        }
    }

    /// Instantiate the model for this geometry.
    pub fn build(&self) -> Box<dyn KinematicsModel + Send> {
        match *self {
            Geometry::Bipolar {
                arm_length,
                raw_mode,
                max_step_deg,
            } => {
                let mut kin = BipolarKin::new(arm_length).with_max_step(max_step_deg);
                if raw_mode {
                    kin = kin.with_raw_mode(true);
                }
                Box::new(kin)
            }
            Geometry::Cartesian => Box::new(CartesianKin::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_builds_named_models() {
        let bipolar = Geometry::Bipolar {
            arm_length: 110.0,
            raw_mode: false,
            max_step_deg: 90.0,
        };
        assert_eq!(bipolar.build().name(), "bipolar");
        assert_eq!(bipolar.name(), "bipolar");
        assert_eq!(Geometry::Cartesian.build().name(), "cartesian");
    }

    #[test]
    fn geometry_raw_mode_reported_as_set() {
        let model = Geometry::Bipolar {
            arm_length: 110.0,
            raw_mode: true,
            max_step_deg: 90.0,
        }
        .build();
        assert_eq!(model.options(false).get_tag('R'), Some(1.0));
    }

    #[test]
    fn apply_options_attempts_every_entry() {
        let mut kin = BipolarKin::new(110.0);
        assert!(!kin.apply_options(&[('Q', 1.0), ('R', 1.0)]));
        assert_eq!(kin.options(false).get_tag('R'), Some(1.0));
        assert!(kin.apply_options(&[('R', 0.0)]));
        assert_eq!(kin.options(false).get_tag('R'), Some(0.0));
    }

    #[test]
    fn solution_accessors() {
        let exact = Solution::exact(ActuatorCoord::new(1.0, 2.0, 3.0));
        assert!(exact.is_exact());
        assert_eq!(exact.fault(), None);
        assert!(exact.substituted().is_empty());

        let degraded = Solution {
            status: SolveStatus::Degraded {
                fault: KinematicsError::NonFiniteInput,
                substituted: AxisFlags::new().with_alpha(),
            },
            ..exact
        };
        assert!(!degraded.is_exact());
        assert_eq!(degraded.fault(), Some(KinematicsError::NonFiniteInput));
        assert!(degraded.substituted().has_alpha());
    }

    #[test]
    fn warnings_display() {
        assert_eq!(Warnings::new().to_string(), "none");
        assert_eq!(Warnings::new().with_arm_step().to_string(), "arm-step");
        assert_eq!(
            Warnings::new().with_platter_step().with_arm_step().to_string(),
            "platter-step,arm-step"
        );
    }
}
