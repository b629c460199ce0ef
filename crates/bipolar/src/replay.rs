//! Replays a list of Cartesian targets through a kinematics model, carrying
//! the committed actuator position from one target to the next the way the
//! motion planner does.

use anyhow::{Context, Result};
use bipolar_core::{ActuatorCoord, CartesianCoord, KinematicsModel, Solution};

/// A target read from a point file, tagged with its 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub line: usize,
    pub point: CartesianCoord,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayRow {
    pub line: usize,
    pub target: CartesianCoord,
    pub solution: Solution,
}

/// Parse whitespace separated `x y z` rows.
///
/// Text after `;` is a comment; blank lines are skipped.
pub fn parse_targets(source: &str) -> Result<Vec<Target>> {
    let mut targets = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let body = raw.split(';').next().unwrap_or_default().trim();
        if body.is_empty() {
            continue;
        }

        let fields: Vec<&str> = body.split_whitespace().collect();
        let [x, y, z] = fields[..] else {
            anyhow::bail!(
                "line {line}: expected `x y z`, found {} fields",
                fields.len()
            );
        };
        let parse = |field: &str, axis: &str| -> Result<f64> {
            field
                .parse::<f64>()
                .with_context(|| format!("line {line}: invalid {axis} value `{field}`"))
        };
        targets.push(Target {
            line,
            point: CartesianCoord::new(parse(x, "x")?, parse(y, "y")?, parse(z, "z")?),
        });
    }
    Ok(targets)
}

/// Transform every target in order.
///
/// The first target has no committed position to be continuous with, so it
/// goes through the pure transform and must be solvable. Every later target
/// is resolved against the previous row's actuator position.
pub fn replay(model: &dyn KinematicsModel, targets: &[Target]) -> Result<Vec<ReplayRow>> {
    let mut rows = Vec::with_capacity(targets.len());
    let mut current: Option<ActuatorCoord> = None;
    let mut degraded = 0usize;

    for target in targets {
        let solution = match current {
            None => {
                let actuator = model.to_actuator(&target.point).with_context(|| {
                    format!(
                        "line {}: first target {} cannot be solved",
                        target.line, target.point
                    )
                })?;
                Solution::exact(actuator)
            }
            Some(current) => model.to_actuator_continuous(&target.point, &current),
        };

        if let Some(fault) = solution.fault() {
            degraded += 1;
            tracing::warn!(
                line = target.line,
                %fault,
                held = %solution.substituted(),
                "target degraded"
            );
        }

        current = Some(solution.actuator);
        rows.push(ReplayRow {
            line: target.line,
            target: target.point,
            solution,
        });
    }

    tracing::info!(
        geometry = model.name(),
        targets = rows.len(),
        degraded,
        "replay finished"
    );
    Ok(rows)
}
