//! Coordinate types exchanged with the motion planner.

use core::fmt;

/// Position in machine workspace, millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CartesianCoord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianCoord {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for CartesianCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={:.4} y={:.4} z={:.4}", self.x, self.y, self.z)
    }
}

/// Position in actuator space.
///
/// `alpha` is the platter angle and `beta` the arm angle, both in degrees.
/// `gamma` is the linear Z actuator in millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActuatorCoord {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl ActuatorCoord {
    pub const fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    pub fn is_finite(&self) -> bool {
        self.alpha.is_finite() && self.beta.is_finite() && self.gamma.is_finite()
    }
}

impl fmt::Display for ActuatorCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha={:.4} beta={:.4} gamma={:.4}",
            self.alpha, self.beta, self.gamma
        )
    }
}

/// Set of actuator axes, packed into a byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisFlags(u8);

impl AxisFlags {
    const ALPHA: u8 = 1 << 0;
    const BETA: u8 = 1 << 1;
    const GAMMA: u8 = 1 << 2;

    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn with_alpha(mut self) -> Self {
        self.0 |= Self::ALPHA;
        self
    }

    pub const fn with_beta(mut self) -> Self {
        self.0 |= Self::BETA;
        self
    }

    pub const fn with_gamma(mut self) -> Self {
        self.0 |= Self::GAMMA;
        self
    }

    pub const fn has_alpha(&self) -> bool {
        self.0 & Self::ALPHA != 0
    }

    pub const fn has_beta(&self) -> bool {
        self.0 & Self::BETA != 0
    }

    pub const fn has_gamma(&self) -> bool {
        self.0 & Self::GAMMA != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AxisFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.has_alpha(), "alpha"),
            (self.has_beta(), "beta"),
            (self.has_gamma(), "gamma"),
        ];
        let mut first = true;
        for (_, name) in names.iter().filter(|(set, _)| *set) {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(name)?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}
