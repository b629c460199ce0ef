// Angle and polar helpers shared by the rotary geometries

/// Gaps wider than this many degrees drop whole turns in one step before the
/// wrap loop runs, keeping the loop bounded for drifted references.
const BULK_UNWRAP_LIMIT: f64 = 360.0 * 16.0;

/// Polar form of a point in the XY plane. `theta` in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub theta: f64,
    pub r: f64,
}

impl Polar {
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self {
            theta: y.atan2(x),
            r: x.hypot(y),
        }
    }

    pub fn to_cartesian(self) -> (f64, f64) {
        (self.r * self.theta.cos(), self.r * self.theta.sin())
    }
}

/// Shift `angle` by whole turns until it lies within 180 degrees of
/// `reference`.
///
/// A gap of exactly 180 degrees is left as-is. Non-finite inputs are
/// returned unchanged so the caller's domain guard still sees them.
pub fn unwrap_near(angle: f64, reference: f64) -> f64 {
    if !angle.is_finite() || !reference.is_finite() {
        return angle;
    }

    let mut angle = angle;
    let gap = reference - angle;
    if gap.abs() > BULK_UNWRAP_LIMIT {
        angle += (gap / 360.0).trunc() * 360.0;
    }

    while angle - reference > 180.0 {
        angle -= 360.0;
    }
    while angle - reference < -180.0 {
        angle += 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_takes_nearest_branch() {
        assert_eq!(unwrap_near(-170.0, 170.0), 190.0);
        assert_eq!(unwrap_near(170.0, -170.0), -190.0);
        assert_eq!(unwrap_near(10.0, 20.0), 10.0);
    }

    #[test]
    fn unwrap_handles_several_turns() {
        // Reference two and three turns away from the principal value.
        assert_eq!(unwrap_near(-170.0, 170.0 + 720.0), 190.0 + 720.0);
        assert_eq!(unwrap_near(-170.0, 170.0 + 1080.0), 190.0 + 1080.0);
        assert_eq!(unwrap_near(170.0, -170.0 - 720.0), -190.0 - 720.0);
    }

    #[test]
    fn unwrap_bulk_path_lands_within_half_turn() {
        let reference = 360.0 * 1000.0 + 5.0;
        let unwrapped = unwrap_near(-3.0, reference);
        assert!((unwrapped - reference).abs() <= 180.0);
        assert_eq!(unwrapped, 360.0 * 1000.0 - 3.0);
    }

    #[test]
    fn unwrap_keeps_exact_half_turn() {
        assert_eq!(unwrap_near(0.0, 180.0), 0.0);
        assert_eq!(unwrap_near(180.0, 0.0), 180.0);
    }

    #[test]
    fn unwrap_passes_non_finite_through() {
        assert!(unwrap_near(f64::NAN, 10.0).is_nan());
        assert_eq!(unwrap_near(f64::INFINITY, 10.0), f64::INFINITY);
        assert_eq!(unwrap_near(10.0, f64::NAN), 10.0);
    }

    #[test]
    fn polar_round_trip() {
        let p = Polar::from_cartesian(3.0, 4.0);
        assert_eq!(p.r, 5.0);
        let (x, y) = p.to_cartesian();
        assert!((x - 3.0).abs() < 1e-12 && (y - 4.0).abs() < 1e-12);
    }
}
